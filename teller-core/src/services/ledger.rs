//! Ledger service - account registry and transfers
//!
//! Locking model:
//! - the account index sits behind an `RwLock`; `register` holds the write
//!   lock for its check-and-insert, lookups share the read lock
//! - every account has its own `Mutex`; deposit and withdraw take only that one
//! - operations touching several accounts lock them in ascending account ID
//!   order, so two opposing transfers can never deadlock
//!
//! The index lock is never held while an account lock is being acquired.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::money;
use crate::domain::result::{Error, Result};
use crate::domain::{Account, CredentialScheme, HistoryRecord};

/// Shared handle to one registered account
///
/// Cloning is cheap; all clones refer to the same account.
#[derive(Debug, Clone)]
pub struct AccountHandle {
    account_id: Arc<str>,
    inner: Arc<Mutex<Account>>,
}

impl AccountHandle {
    fn new(account: Account) -> Self {
        Self {
            account_id: Arc::from(account.account_id()),
            inner: Arc::new(Mutex::new(account)),
        }
    }

    // Account methods validate before they write, so a poisoned lock still
    // guards a consistent account.
    fn lock(&self) -> MutexGuard<'_, Account> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn holder_name(&self) -> String {
        self.lock().holder_name().to_string()
    }

    pub fn balance(&self) -> Decimal {
        self.lock().balance()
    }

    pub fn verify_credential(&self, candidate: &str) -> bool {
        self.lock().verify_credential(candidate)
    }

    /// Deposit `amount`, returning the new balance
    pub fn deposit(&self, amount: Decimal) -> Result<Decimal> {
        self.lock().deposit(amount)
    }

    /// Withdraw `amount`, returning the new balance
    pub fn withdraw(&self, amount: Decimal) -> Result<Decimal> {
        self.lock().withdraw(amount)
    }

    pub fn history_snapshot(&self) -> Vec<HistoryRecord> {
        self.lock().history_snapshot()
    }

    /// Point-in-time copy of the whole account
    pub fn snapshot(&self) -> AccountSnapshot {
        let account = self.lock();
        AccountSnapshot {
            account_id: account.account_id().to_string(),
            holder_name: account.holder_name().to_string(),
            balance: account.balance(),
            created_at: account.created_at(),
            history: account.history_snapshot(),
        }
    }

    fn same_account(&self, other: &AccountHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.account_id == other.account_id
    }
}

/// Read-only view of an account, safe to serialize
#[derive(Debug, Clone, Serialize)]
pub struct AccountSnapshot {
    pub account_id: String,
    pub holder_name: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub history: Vec<HistoryRecord>,
}

/// Outcome of a completed transfer
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
    /// Sender's balance right after the transfer
    pub from_balance: Decimal,
    /// Recipient's balance right after the transfer
    pub to_balance: Decimal,
}

/// Totals across every account
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSummary {
    pub total_accounts: usize,
    pub total_balance: Decimal,
}

#[derive(Default)]
struct Index {
    by_id: HashMap<String, usize>,
    // registration order
    accounts: Vec<AccountHandle>,
}

/// Registry of all accounts, keyed by account ID
pub struct Ledger {
    index: RwLock<Index>,
    scheme: CredentialScheme,
    minor_units: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(CredentialScheme::default(), money::DEFAULT_MINOR_UNITS)
    }
}

impl Ledger {
    /// `minor_units` above `money::MAX_MINOR_UNITS` is capped to it
    pub fn new(scheme: CredentialScheme, minor_units: u32) -> Self {
        Self {
            index: RwLock::new(Index::default()),
            scheme,
            minor_units: minor_units.min(money::MAX_MINOR_UNITS),
        }
    }

    fn read_index(&self) -> RwLockReadGuard<'_, Index> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_index(&self) -> RwLockWriteGuard<'_, Index> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn scheme(&self) -> CredentialScheme {
        self.scheme
    }

    pub fn minor_units(&self) -> u32 {
        self.minor_units
    }

    /// Register a new account
    ///
    /// Fails with `DuplicateAccountId` if the ID is taken; the existing
    /// account is left untouched. Length policy is the caller's concern.
    pub fn register(
        &self,
        holder_name: &str,
        account_id: &str,
        raw_password: &str,
    ) -> Result<AccountHandle> {
        if self.read_index().by_id.contains_key(account_id) {
            return Err(Error::DuplicateAccountId(account_id.to_string()));
        }

        // Hashing is slow; do it before taking the write lock and re-check after.
        let account = Account::with_minor_units(
            holder_name,
            account_id,
            raw_password,
            self.scheme,
            self.minor_units,
        )?;

        let mut index = self.write_index();
        if index.by_id.contains_key(account_id) {
            return Err(Error::DuplicateAccountId(account_id.to_string()));
        }

        let handle = AccountHandle::new(account);
        let position = index.accounts.len();
        index.accounts.push(handle.clone());
        index.by_id.insert(account_id.to_string(), position);
        Ok(handle)
    }

    /// Exact-match lookup by account ID
    pub fn find_by_id(&self, account_id: &str) -> Option<AccountHandle> {
        let index = self.read_index();
        index
            .by_id
            .get(account_id)
            .map(|&position| index.accounts[position].clone())
    }

    /// Log in with an account ID and password
    ///
    /// Unknown IDs and wrong passwords both yield `AuthenticationFailed`.
    pub fn authenticate(&self, account_id: &str, raw_password: &str) -> Result<AccountHandle> {
        match self.find_by_id(account_id) {
            Some(handle) if handle.verify_credential(raw_password) => Ok(handle),
            _ => Err(Error::AuthenticationFailed),
        }
    }

    /// Move `amount` between two accounts identified by ID
    pub fn transfer(&self, from_id: &str, to_id: &str, amount: Decimal) -> Result<TransferReceipt> {
        money::validate_amount(amount, self.minor_units)?;

        let from = self
            .find_by_id(from_id)
            .ok_or_else(|| Error::AccountNotFound(from_id.to_string()))?;
        let to = self
            .find_by_id(to_id)
            .ok_or_else(|| Error::AccountNotFound(to_id.to_string()))?;

        self.transfer_between(&from, &to, amount)
    }

    /// Move `amount` from one account to another as a single atomic step
    ///
    /// Both accounts stay locked from the funds check until both history
    /// records are written, so no observer sees half a transfer. On failure
    /// neither account changes.
    pub fn transfer_between(
        &self,
        from: &AccountHandle,
        to: &AccountHandle,
        amount: Decimal,
    ) -> Result<TransferReceipt> {
        let amount = money::validate_amount(amount, self.minor_units)?;
        if from.same_account(to) {
            return Err(Error::SelfTransfer);
        }

        let (mut sender, mut recipient) = if from.account_id() < to.account_id() {
            let sender = from.lock();
            let recipient = to.lock();
            (sender, recipient)
        } else {
            let recipient = to.lock();
            let sender = from.lock();
            (sender, recipient)
        };

        sender.ensure_funds(amount)?;
        // Fail on overflow before anything is written
        money::credit(recipient.balance(), amount)?;

        sender.send_transfer(amount)?;
        recipient.receive_transfer(amount)?;
        sender.record(HistoryRecord::transfer_out(amount, recipient.account_id()));
        recipient.record(HistoryRecord::transfer_in(amount, sender.account_id()));

        Ok(TransferReceipt {
            from: sender.account_id().to_string(),
            to: recipient.account_id().to_string(),
            amount,
            from_balance: sender.balance(),
            to_balance: recipient.balance(),
        })
    }

    /// All accounts in registration order
    pub fn accounts(&self) -> Vec<AccountHandle> {
        self.read_index().accounts.clone()
    }

    pub fn len(&self) -> usize {
        self.read_index().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consistent totals: every account is locked (in ID order) while summing
    pub fn summary(&self) -> LedgerSummary {
        let mut handles = self.accounts();
        handles.sort_by(|a, b| a.account_id().cmp(b.account_id()));

        let guards: Vec<MutexGuard<'_, Account>> = handles.iter().map(|h| h.lock()).collect();
        let total_balance = guards
            .iter()
            .fold(money::zero(self.minor_units), |total, account| total + account.balance());

        LedgerSummary {
            total_accounts: guards.len(),
            total_balance,
        }
    }
}
