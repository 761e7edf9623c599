//! Repayment, debt deduction, and withdrawal rules.

use crate::error::{BankingError, ensure_positive};

/// Writes required by an approved loan repayment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepaymentPlan {
    /// Amount of the appended `repayment` entry (negative).
    pub repayment_entry: i64,
    /// Delta applied across `deposit` rows (negative).
    pub deposit_delta: i64,
    /// Delta applied across pending loans (negative).
    pub loan_delta: i64,
}

/// Decides whether a repayment of `amount` may proceed.
///
/// `deposit_balance` is the aggregate of `deposit` rows and `loan_balance`
/// the outstanding principal, both read in the same transaction that will
/// perform the writes.
///
/// # Errors
///
/// - `NonPositiveAmount` if `amount <= 0`
/// - `NoOutstandingLoan` if `loan_balance <= 0`
/// - `InsufficientFunds` if `deposit_balance < amount`
pub fn plan_repayment(
    amount: i64,
    deposit_balance: i64,
    loan_balance: i64,
) -> Result<RepaymentPlan, BankingError> {
    ensure_positive(amount)?;
    if loan_balance <= 0 {
        return Err(BankingError::NoOutstandingLoan);
    }
    if deposit_balance < amount {
        return Err(BankingError::InsufficientFunds {
            requested: amount,
            available: deposit_balance,
        });
    }
    Ok(RepaymentPlan {
        repayment_entry: -amount,
        deposit_delta: -amount,
        loan_delta: -amount,
    })
}

/// Outcome of reconciling outstanding debt against deposits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtDeduction {
    /// Deposits cover the debt: append `debt_payment` of `payment` and
    /// remove every `debt` row.
    Full {
        /// Amount of the `debt_payment` entry, equal to the outstanding debt.
        payment: i64,
    },
    /// Deposits cover part of the debt: append `debt_payment` of `payment`
    /// and move the `debt` rows by `debt_delta`.
    Partial {
        /// Amount of the `debt_payment` entry (negative deposit balance).
        payment: i64,
        /// Delta applied across `debt` rows (the deposit balance).
        debt_delta: i64,
    },
}

/// Plans the auto-deduction that follows a deposit.
///
/// Returns `None` when there is no debt (`outstanding_debt >= 0`) or nothing
/// to pay it from (`deposit_balance <= 0`). Deposits are only accepted with
/// positive amounts, so the second case arises only when repayments have
/// already consumed every deposit.
#[must_use]
pub fn plan_debt_deduction(deposit_balance: i64, outstanding_debt: i64) -> Option<DebtDeduction> {
    if outstanding_debt >= 0 || deposit_balance <= 0 {
        return None;
    }
    if deposit_balance >= -outstanding_debt {
        Some(DebtDeduction::Full {
            payment: outstanding_debt,
        })
    } else {
        Some(DebtDeduction::Partial {
            payment: -deposit_balance,
            debt_delta: deposit_balance,
        })
    }
}

/// Checks a withdrawal of `amount` against the computed balance.
///
/// # Errors
///
/// - `NonPositiveAmount` if `amount <= 0`
/// - `InsufficientFunds` if `amount > balance`
pub fn check_withdrawal(amount: i64, balance: i64) -> Result<(), BankingError> {
    ensure_positive(amount)?;
    if amount > balance {
        return Err(BankingError::InsufficientFunds {
            requested: amount,
            available: balance,
        });
    }
    Ok(())
}
