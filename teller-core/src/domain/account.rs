//! Account domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::credential::{Credential, CredentialScheme};
use super::history::HistoryRecord;
use super::money;
use super::result::{Error, Result};

/// A single user's identity, credential, balance and history
///
/// Fields are private: the balance only moves through `deposit`, `withdraw`
/// and the two transfer primitives, and `balance >= 0` holds after every
/// call. Account IDs are treated as opaque here; uniqueness is the ledger's
/// job.
#[derive(Debug, Clone)]
pub struct Account {
    holder_name: String,
    account_id: String,
    credential: Credential,
    balance: Decimal,
    minor_units: u32,
    history: Vec<HistoryRecord>,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new, empty account
    ///
    /// Only the derived credential is kept; `raw_password` is dropped here.
    pub fn new(
        holder_name: impl Into<String>,
        account_id: impl Into<String>,
        raw_password: &str,
        scheme: CredentialScheme,
    ) -> Result<Self> {
        Self::with_minor_units(holder_name, account_id, raw_password, scheme, money::DEFAULT_MINOR_UNITS)
    }

    pub fn with_minor_units(
        holder_name: impl Into<String>,
        account_id: impl Into<String>,
        raw_password: &str,
        scheme: CredentialScheme,
        minor_units: u32,
    ) -> Result<Self> {
        let minor_units = money::check_minor_units(minor_units)?;
        Ok(Self {
            holder_name: holder_name.into(),
            account_id: account_id.into(),
            credential: Credential::derive(raw_password, scheme)?,
            balance: money::zero(minor_units),
            minor_units,
            history: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check a candidate password against the stored credential
    pub fn verify_credential(&self, candidate: &str) -> bool {
        self.credential.verify(candidate)
    }

    /// Add funds and record a deposit
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal> {
        let amount = money::validate_amount(amount, self.minor_units)?;
        self.balance = money::credit(self.balance, amount)?;
        self.history.push(HistoryRecord::deposit(amount));
        Ok(self.balance)
    }

    /// Remove funds and record a withdrawal
    ///
    /// Fails with `InsufficientFunds` when `amount > balance`; nothing changes
    /// on failure.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal> {
        let amount = money::validate_amount(amount, self.minor_units)?;
        self.balance = money::debit(self.balance, amount)?;
        self.history.push(HistoryRecord::withdraw(amount));
        Ok(self.balance)
    }

    /// Credit half of a transfer. Does not touch history.
    pub(crate) fn receive_transfer(&mut self, amount: Decimal) -> Result<()> {
        self.balance = money::credit(self.balance, amount)?;
        Ok(())
    }

    /// Debit half of a transfer. Does not touch history.
    pub(crate) fn send_transfer(&mut self, amount: Decimal) -> Result<()> {
        self.balance = money::debit(self.balance, amount)?;
        Ok(())
    }

    /// Would a debit of `amount` succeed right now
    pub(crate) fn ensure_funds(&self, amount: Decimal) -> Result<()> {
        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        Ok(())
    }

    pub(crate) fn record(&mut self, record: HistoryRecord) {
        self.history.push(record);
    }

    /// Copy of the history in insertion order
    pub fn history_snapshot(&self) -> Vec<HistoryRecord> {
        self.history.clone()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::history::RecordKind;

    fn legacy() -> CredentialScheme {
        CredentialScheme::LegacyShift { offset: 3 }
    }

    fn account() -> Account {
        Account::new("Asha", "11111111111", "pass1234", legacy()).unwrap()
    }

    fn inr(minor: i64) -> Decimal {
        Decimal::new(minor, 2)
    }

    #[test]
    fn test_new_account_is_empty() {
        let account = account();
        assert_eq!(account.holder_name(), "Asha");
        assert_eq!(account.account_id(), "11111111111");
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.balance().to_string(), "0.00");
        assert!(account.history_snapshot().is_empty());
    }

    #[test]
    fn test_rejects_unrepresentable_minor_units() {
        let err = Account::with_minor_units("Asha", "11111111111", "pass1234", legacy(), 30)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_created_at_is_set() {
        let before = Utc::now();
        let account = account();
        assert!(account.created_at() >= before);
        assert!(account.created_at() <= Utc::now());
    }

    #[test]
    fn test_verify_credential() {
        let account = account();
        assert!(account.verify_credential("pass1234"));
        assert!(!account.verify_credential("wrong"));
    }

    #[test]
    fn test_deposit_and_withdraw() {
        let mut account = account();
        assert_eq!(account.deposit(inr(10000)).unwrap(), inr(10000));
        assert_eq!(account.withdraw(inr(2550)).unwrap(), inr(7450));

        let kinds: Vec<RecordKind> = account.history_snapshot().iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RecordKind::Deposit, RecordKind::Withdraw]);
    }

    #[test]
    fn test_overdraw_leaves_state_unchanged() {
        let mut account = account();
        account.deposit(inr(10000)).unwrap();

        for _ in 0..2 {
            let err = account.withdraw(inr(15000)).unwrap_err();
            assert!(matches!(err, Error::InsufficientFunds { .. }));
            assert_eq!(account.balance(), inr(10000));
            assert_eq!(account.history_len(), 1);
        }
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        let mut account = account();
        assert!(matches!(account.deposit(Decimal::ZERO), Err(Error::InvalidAmount(_))));
        assert!(matches!(account.deposit(inr(-100)), Err(Error::InvalidAmount(_))));
        assert!(matches!(account.withdraw(inr(-100)), Err(Error::InvalidAmount(_))));
        assert_eq!(account.history_len(), 0);
    }

    #[test]
    fn test_transfer_primitives_skip_history() {
        let mut account = account();
        account.receive_transfer(inr(5000)).unwrap();
        account.send_transfer(inr(2000)).unwrap();
        assert_eq!(account.balance(), inr(3000));
        assert_eq!(account.history_len(), 0);
        assert!(account.send_transfer(inr(3001)).is_err());
        assert_eq!(account.balance(), inr(3000));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut account = account();
        account.deposit(inr(100)).unwrap();
        let mut snapshot = account.history_snapshot();
        snapshot.clear();
        assert_eq!(account.history_len(), 1);
    }
}
