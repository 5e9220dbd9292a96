//! Service layer
//!
//! `Ledger` owns the accounts and is the only way to reach them. The other
//! services support the presentation shell: event logging and demo mode.

pub mod demo;
mod ledger;
pub mod logging;

pub use demo::{seed_demo_accounts, DemoAccount, DemoService, DEMO_ACCOUNTS};
pub use ledger::{AccountHandle, AccountSnapshot, Ledger, LedgerSummary, TransferReceipt};
pub use logging::{LogEntry, LogEvent, LoggingService};
