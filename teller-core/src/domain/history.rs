//! Transaction history records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of balance change a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Deposit,
    Withdraw,
    TransferOut,
    TransferIn,
}

/// One completed balance-affecting operation
///
/// Records are immutable once appended. `counterparty` is set for the two
/// transfer kinds and holds the other account's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub kind: RecordKind,
    pub amount: Decimal,
    pub counterparty: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryRecord {
    fn new(kind: RecordKind, amount: Decimal, counterparty: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            counterparty,
            recorded_at: Utc::now(),
        }
    }

    pub fn deposit(amount: Decimal) -> Self {
        Self::new(RecordKind::Deposit, amount, None)
    }

    pub fn withdraw(amount: Decimal) -> Self {
        Self::new(RecordKind::Withdraw, amount, None)
    }

    /// Outgoing half of a transfer, recorded on the sender
    pub fn transfer_out(amount: Decimal, to: impl Into<String>) -> Self {
        Self::new(RecordKind::TransferOut, amount, Some(to.into()))
    }

    /// Incoming half of a transfer, recorded on the recipient
    pub fn transfer_in(amount: Decimal, from: impl Into<String>) -> Self {
        Self::new(RecordKind::TransferIn, amount, Some(from.into()))
    }

    /// Signed effect of this record on the balance
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            RecordKind::Deposit | RecordKind::TransferIn => self.amount,
            RecordKind::Withdraw | RecordKind::TransferOut => -self.amount,
        }
    }

    /// Human-readable line, e.g. `Transferred INR 50.00 to 22222222222`
    pub fn describe(&self, currency: &str) -> String {
        let counterparty = self.counterparty.as_deref().unwrap_or("unknown");
        match self.kind {
            RecordKind::Deposit => format!("Deposited: {} {}", currency, self.amount),
            RecordKind::Withdraw => format!("Withdrew: {} {}", currency, self.amount),
            RecordKind::TransferOut => {
                format!("Transferred {} {} to {}", currency, self.amount, counterparty)
            }
            RecordKind::TransferIn => {
                format!("Received {} {} from {}", currency, self.amount, counterparty)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let amount = Decimal::new(5000, 2);
        assert_eq!(HistoryRecord::deposit(amount).describe("INR"), "Deposited: INR 50.00");
        assert_eq!(HistoryRecord::withdraw(amount).describe("INR"), "Withdrew: INR 50.00");
        assert_eq!(
            HistoryRecord::transfer_out(amount, "22222222222").describe("INR"),
            "Transferred INR 50.00 to 22222222222"
        );
        assert_eq!(
            HistoryRecord::transfer_in(amount, "11111111111").describe("INR"),
            "Received INR 50.00 from 11111111111"
        );
    }

    #[test]
    fn test_signed_amount() {
        let amount = Decimal::new(5000, 2);
        assert_eq!(HistoryRecord::deposit(amount).signed_amount(), amount);
        assert_eq!(HistoryRecord::transfer_out(amount, "x").signed_amount(), -amount);
    }

    #[test]
    fn test_serializes_kind_as_snake_case() {
        let record = HistoryRecord::transfer_in(Decimal::new(100, 2), "11111111111");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "transfer_in");
        assert_eq!(json["counterparty"], "11111111111");
    }
}
