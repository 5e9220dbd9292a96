//! Demo service - manage demo mode
//!
//! Demo mode pre-populates the in-memory ledger with sample accounts so the
//! menu can be explored without registering first.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::Config;
use crate::services::Ledger;

/// A sample account and the password that opens it
#[derive(Debug, Clone, Serialize)]
pub struct DemoAccount {
    pub holder_name: &'static str,
    pub account_id: &'static str,
    pub password: &'static str,
}

pub const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        holder_name: "Asha Demo",
        account_id: "10000000001",
        password: "demo1234",
    },
    DemoAccount {
        holder_name: "Ravi Demo",
        account_id: "10000000002",
        password: "demo5678",
    },
];

/// Demo service for managing demo mode
pub struct DemoService {
    teller_dir: PathBuf,
}

impl DemoService {
    pub fn new(teller_dir: &Path) -> Self {
        Self {
            teller_dir: teller_dir.to_path_buf(),
        }
    }

    pub fn is_enabled(&self) -> Result<bool> {
        let config = Config::load(&self.teller_dir)?;
        Ok(config.demo_mode)
    }

    pub fn enable(&self) -> Result<()> {
        let mut config = Config::load(&self.teller_dir).unwrap_or_default();
        config.enable_demo_mode();
        config.save(&self.teller_dir)
    }

    pub fn disable(&self) -> Result<()> {
        let mut config = Config::load(&self.teller_dir).unwrap_or_default();
        config.disable_demo_mode();
        config.save(&self.teller_dir)
    }
}

/// Register the demo accounts and give them some history
///
/// Goes through the public ledger operations only, so the seeded state obeys
/// the same invariants as anything a user does.
pub fn seed_demo_accounts(ledger: &Ledger) -> crate::Result<()> {
    let [asha, ravi] = &DEMO_ACCOUNTS;

    let first = ledger.register(asha.holder_name, asha.account_id, asha.password)?;
    let second = ledger.register(ravi.holder_name, ravi.account_id, ravi.password)?;

    first.deposit(Decimal::new(500000, 2))?;
    first.withdraw(Decimal::new(75000, 2))?;
    second.deposit(Decimal::new(120000, 2))?;
    ledger.transfer_between(&first, &second, Decimal::new(25000, 2))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CredentialScheme;
    use tempfile::tempdir;

    #[test]
    fn test_seed_demo_accounts() {
        let ledger = Ledger::new(CredentialScheme::LegacyShift { offset: 3 }, 2);
        seed_demo_accounts(&ledger).unwrap();

        let asha = ledger.authenticate("10000000001", "demo1234").unwrap();
        let ravi = ledger.authenticate("10000000002", "demo5678").unwrap();
        assert_eq!(asha.balance(), Decimal::new(400000, 2));
        assert_eq!(ravi.balance(), Decimal::new(145000, 2));
        assert_eq!(asha.history_snapshot().len(), 3);
        assert_eq!(ravi.history_snapshot().len(), 2);
    }

    #[test]
    fn test_seeding_twice_fails() {
        let ledger = Ledger::new(CredentialScheme::LegacyShift { offset: 3 }, 2);
        seed_demo_accounts(&ledger).unwrap();
        assert!(seed_demo_accounts(&ledger).is_err());
    }

    #[test]
    fn test_toggle_demo_mode() {
        let dir = tempdir().unwrap();
        let service = DemoService::new(dir.path());
        assert!(!service.is_enabled().unwrap());

        service.enable().unwrap();
        assert!(service.is_enabled().unwrap());

        service.disable().unwrap();
        assert!(!service.is_enabled().unwrap());
    }
}
