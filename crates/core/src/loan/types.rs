//! Loan domain types.

use chrono::{DateTime, Utc};
use ledgerbank_shared::types::{AccountId, LoanId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BankingError, ensure_positive};

/// Lifecycle status of a loan.
///
/// Loans are created `pending` and repayments only move their principal,
/// so no other status is ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Counted by the outstanding balance.
    #[default]
    Pending,
}

impl LoanStatus {
    /// Returns the persisted name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            _ => Err(format!("Unknown loan status: {s}")),
        }
    }
}

/// Validated terms for a new loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Principal in minor currency units.
    pub amount: i64,
    /// Annual interest rate. Stored only.
    pub interest_rate: Decimal,
    /// Repayment period in months. Stored only.
    pub repayment_period: i32,
}

impl LoanTerms {
    /// Validates and builds loan terms.
    ///
    /// # Errors
    ///
    /// - `NonPositiveAmount` if `amount <= 0`
    /// - `NegativeInterestRate` if `interest_rate < 0`
    /// - `InvalidRepaymentPeriod` if `repayment_period <= 0`
    pub fn new(
        amount: i64,
        interest_rate: Decimal,
        repayment_period: i32,
    ) -> Result<Self, BankingError> {
        ensure_positive(amount)?;
        if interest_rate < Decimal::ZERO {
            return Err(BankingError::NegativeInterestRate(interest_rate));
        }
        if repayment_period <= 0 {
            return Err(BankingError::InvalidRepaymentPeriod(repayment_period));
        }
        Ok(Self {
            amount,
            interest_rate,
            repayment_period,
        })
    }
}

/// A loan as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanView {
    /// Public loan identifier.
    pub loan_id: LoanId,
    /// Borrowing account.
    pub account_id: AccountId,
    /// Remaining principal in minor units.
    pub amount: i64,
    /// Annual interest rate.
    pub interest_rate: Decimal,
    /// Repayment period in months.
    pub repayment_period: i32,
    /// Lifecycle status.
    pub status: LoanStatus,
    /// When the loan was created.
    pub created_at: DateTime<Utc>,
}
