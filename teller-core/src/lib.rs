//! Teller Core - in-memory account ledger
//!
//! - **domain**: Account, Credential, HistoryRecord, amounts and errors
//! - **services**: the Ledger (registration, login, transfers) plus event
//!   logging and demo seeding for the shell
//! - **config**: settings.json and environment overrides
//!
//! Accounts live only in memory for the lifetime of the process.

pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use config::Config;
use services::{seed_demo_accounts, Ledger};

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult, Result};
pub use domain::{Account, Credential, CredentialScheme, HistoryRecord, RecordKind};
pub use services::{
    AccountHandle, AccountSnapshot, LedgerSummary, LogEntry, LogEvent, LoggingService,
    TransferReceipt,
};

/// Main context for a teller session
///
/// Holds the configuration and the ledger built from it. Cloning the ledger
/// handle is cheap; every clone sees the same accounts.
pub struct TellerContext {
    pub config: Config,
    pub ledger: Arc<Ledger>,
}

impl TellerContext {
    /// Load settings from `teller_dir` and build an empty ledger
    ///
    /// In demo mode the ledger is seeded with the sample accounts.
    pub fn new(teller_dir: &Path) -> anyhow::Result<Self> {
        let config = Config::load(teller_dir)?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let ledger = Arc::new(Ledger::new(config.credential_scheme, config.minor_units));
        if config.demo_mode {
            seed_demo_accounts(&ledger)?;
        }
        Ok(Self { config, ledger })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_from_default_config() {
        let ctx = TellerContext::from_config(Config::default()).unwrap();
        assert!(ctx.ledger.is_empty());
        assert_eq!(ctx.ledger.scheme(), CredentialScheme::Argon2id);
    }

    #[test]
    fn test_demo_context_is_seeded() {
        let config = Config {
            demo_mode: true,
            credential_scheme: CredentialScheme::LegacyShift { offset: 3 },
            ..Config::default()
        };
        let ctx = TellerContext::from_config(config).unwrap();
        assert_eq!(ctx.ledger.len(), 2);
    }
}
