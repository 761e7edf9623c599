//! Error taxonomy for ledger, loan, and settlement operations.
//!
//! Domain-rule violations are raised before any write happens. Storage
//! failures are carried as `Database`, and serialization conflicts between
//! concurrent settlements as `ConcurrentModification`.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in any banking operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankingError {
    // ========== Validation Errors ==========
    /// Monetary amount must be strictly positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    /// Loan interest rate cannot be negative.
    #[error("Interest rate cannot be negative, got {0}")]
    NegativeInterestRate(Decimal),

    /// Loan repayment period must be strictly positive.
    #[error("Repayment period must be positive, got {0}")]
    InvalidRepaymentPeriod(i32),

    // ========== Business Rule Errors ==========
    /// Not enough funds to cover the requested amount.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount the caller asked for.
        requested: i64,
        /// Amount that was available at the time of the check.
        available: i64,
    },

    /// Repayment requested but no pending loan principal remains.
    #[error("No outstanding loan balance")]
    NoOutstandingLoan,

    // ========== Concurrency Errors ==========
    /// The storage layer aborted the transaction because of a concurrent writer.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,

    // ========== Database Errors ==========
    /// Storage failure at read, begin, exec, or commit.
    #[error("Database error: {0}")]
    Database(String),
}

impl BankingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "invalid_amount",
            Self::NegativeInterestRate(_) => "invalid_interest_rate",
            Self::InvalidRepaymentPeriod(_) => "invalid_repayment_period",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::NoOutstandingLoan => "no_outstanding_loan",
            Self::ConcurrentModification => "concurrent_modification",
            Self::Database(_) => "database_error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::NonPositiveAmount(_)
            | Self::NegativeInterestRate(_)
            | Self::InvalidRepaymentPeriod(_) => 400,

            // 409 Conflict - concurrency errors
            Self::ConcurrentModification => 409,

            // 422 Unprocessable - business rule violations
            Self::InsufficientFunds { .. } | Self::NoOutstandingLoan => 422,

            // 500 Internal Server Error
            Self::Database(_) => 500,
        }
    }

    /// Returns true if the caller may retry the same request unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }

    /// Returns true for input validation failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NonPositiveAmount(_)
                | Self::NegativeInterestRate(_)
                | Self::InvalidRepaymentPeriod(_)
        )
    }
}

/// Validates that a monetary amount is strictly positive.
///
/// # Errors
///
/// Returns `BankingError::NonPositiveAmount` for zero or negative amounts.
pub fn ensure_positive(amount: i64) -> Result<i64, BankingError> {
    if amount <= 0 {
        return Err(BankingError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(BankingError::NonPositiveAmount(0), 400, "invalid_amount")]
    #[case(BankingError::NegativeInterestRate(dec!(-1)), 400, "invalid_interest_rate")]
    #[case(BankingError::InvalidRepaymentPeriod(0), 400, "invalid_repayment_period")]
    #[case(
        BankingError::InsufficientFunds { requested: 150, available: 100 },
        422,
        "insufficient_funds"
    )]
    #[case(BankingError::NoOutstandingLoan, 422, "no_outstanding_loan")]
    #[case(BankingError::ConcurrentModification, 409, "concurrent_modification")]
    #[case(BankingError::Database("boom".into()), 500, "database_error")]
    fn test_status_and_code(
        #[case] err: BankingError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        assert_eq!(err.http_status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(BankingError::ConcurrentModification.is_retryable());
        assert!(!BankingError::NoOutstandingLoan.is_retryable());
        assert!(!BankingError::Database("x".into()).is_retryable());
    }

    #[test]
    fn test_validation_errors() {
        assert!(BankingError::NonPositiveAmount(-5).is_validation());
        assert!(BankingError::InvalidRepaymentPeriod(-1).is_validation());
        assert!(!BankingError::NoOutstandingLoan.is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = BankingError::InsufficientFunds {
            requested: 150,
            available: 100,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: requested 150, available 100"
        );
        assert_eq!(
            BankingError::NegativeInterestRate(dec!(-0.5)).to_string(),
            "Interest rate cannot be negative, got -0.5"
        );
    }

    #[rstest]
    #[case(1, true)]
    #[case(0, false)]
    #[case(-10, false)]
    fn test_ensure_positive(#[case] amount: i64, #[case] ok: bool) {
        assert_eq!(ensure_positive(amount).is_ok(), ok);
    }
}
