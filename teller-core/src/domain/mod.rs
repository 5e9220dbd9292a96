//! Core domain entities
//!
//! Pure data structures with their invariants - no I/O, no locking.

mod account;
pub mod credential;
mod history;
pub mod money;
pub mod result;

pub use account::Account;
pub use credential::{Credential, CredentialScheme};
pub use history::{HistoryRecord, RecordKind};
