//! CLI command implementations

pub mod demo;
pub mod logs;
pub mod menu;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use teller_core::{LogEvent, LoggingService, TellerContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let teller_dir = get_teller_dir().ok()?;
    std::fs::create_dir_all(&teller_dir).ok()?;
    LoggingService::new(&teller_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the teller directory from environment or default
pub fn get_teller_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TELLER_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".teller"))
        .ok_or_else(|| anyhow!("Could not find home directory; set TELLER_DIR"))
}

/// Load settings and build a fresh ledger
pub fn get_context() -> Result<TellerContext> {
    let teller_dir = get_teller_dir()?;

    std::fs::create_dir_all(&teller_dir)
        .with_context(|| format!("Failed to create teller directory: {:?}", teller_dir))?;

    TellerContext::new(&teller_dir).context("Failed to initialize teller context")
}
