//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_teller_dir;
use crate::output;
use teller_core::services::{DemoService, DEMO_ACCOUNTS};

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let teller_dir = get_teller_dir()?;
    std::fs::create_dir_all(&teller_dir)?;
    let demo_service = DemoService::new(&teller_dir);

    match command {
        Some(DemoCommands::On) => {
            demo_service.enable()?;
            output::success("Demo mode enabled");
            println!("Sample accounts are created each time 'teller' starts:");
            for demo in &DEMO_ACCOUNTS {
                println!(
                    "  {}  account {}  password {}",
                    demo.holder_name, demo.account_id, demo.password
                );
            }
        }
        Some(DemoCommands::Off) => {
            demo_service.disable()?;
            output::warning("Demo mode disabled");
        }
        Some(DemoCommands::Status) | None => {
            if demo_service.is_enabled()? {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
        }
    }

    Ok(())
}
