//! Result and error types for the core library

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// Every ledger outcome other than success is one of these variants. None of
/// them are fatal: the caller reports the failure and carries on.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Account ID already registered: {0}")]
    DuplicateAccountId(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Deliberately carries no detail about which half of the login was wrong.
    #[error("Invalid account number or password")]
    AuthenticationFailed,

    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Cannot transfer to the same account")]
    SelfTransfer,

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid amount error
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    /// Create a credential error
    pub fn credential(msg: impl Into<String>) -> Self {
        Self::Credential(msg.into())
    }

    /// Stable, machine-readable tag for this error
    pub fn kind(&self) -> &'static str {
        match self {
            Error::DuplicateAccountId(_) => "duplicate_account_id",
            Error::AccountNotFound(_) => "account_not_found",
            Error::AuthenticationFailed => "authentication_failed",
            Error::InsufficientFunds { .. } => "insufficient_funds",
            Error::InvalidAmount(_) => "invalid_amount",
            Error::SelfTransfer => "self_transfer",
            Error::Credential(_) => "credential",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub error_kind: Option<String>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_kind: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            error_kind: None,
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self {
                error_kind: Some(e.kind().to_string()),
                ..Self::fail(e.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_result_ok() {
        let result: OperationResult<i32> = OperationResult::ok(42);
        assert!(result.success);
        assert_eq!(result.data, Some(42));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_from_result_carries_kind() {
        let ok: Result<i32> = Ok(42);
        let result: OperationResult<i32> = ok.into();
        assert!(result.success);

        let err: Result<i32> = Err(Error::AuthenticationFailed);
        let result: OperationResult<i32> = err.into();
        assert!(!result.success);
        assert_eq!(result.error_kind.as_deref(), Some("authentication_failed"));
        assert_eq!(
            result.error.as_deref(),
            Some("Invalid account number or password")
        );
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = Error::InsufficientFunds {
            balance: Decimal::new(10000, 2),
            requested: Decimal::new(15000, 2),
        };
        assert_eq!(err.kind(), "insufficient_funds");
        assert!(err.to_string().contains("100.00"));
        assert!(err.to_string().contains("150.00"));
    }
}
