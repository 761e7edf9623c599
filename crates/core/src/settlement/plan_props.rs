//! Property-based tests for settlement planning.
//!
//! - Debt after deduction is never positive
//! - A repayment is approved exactly when funds and a loan exist
//! - Withdrawal is refused exactly when it exceeds the balance

use proptest::prelude::*;

use super::plan::{DebtDeduction, check_withdrawal, plan_debt_deduction, plan_repayment};
use crate::error::BankingError;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Applying the planned deduction leaves the debt aggregate at or below zero.
    #[test]
    fn prop_debt_never_positive_after_deduction(
        deposits in -1_000_000i64..1_000_000,
        debt in -1_000_000i64..=0,
    ) {
        let remaining = match plan_debt_deduction(deposits, debt) {
            None => debt,
            Some(DebtDeduction::Full { .. }) => 0,
            Some(DebtDeduction::Partial { debt_delta, .. }) => debt + debt_delta,
        };
        prop_assert!(remaining <= 0);
    }

    /// The payment entry equals the amount the debt moved by, negated.
    #[test]
    fn prop_payment_matches_debt_movement(
        deposits in 1i64..1_000_000,
        debt in -1_000_000i64..0,
    ) {
        match plan_debt_deduction(deposits, debt) {
            Some(DebtDeduction::Full { payment }) => prop_assert_eq!(payment, debt),
            Some(DebtDeduction::Partial { payment, debt_delta }) => {
                prop_assert_eq!(payment, -debt_delta);
                prop_assert!(debt_delta < -debt);
            }
            None => prop_assert!(false, "debt {} with deposits {} must be deducted", debt, deposits),
        }
    }

    /// Repayment is approved iff amount > 0, a loan is outstanding, and deposits cover it.
    #[test]
    fn prop_repayment_approval(
        amount in -100i64..10_000,
        deposits in -1_000i64..10_000,
        loans in -1_000i64..10_000,
    ) {
        let approved = plan_repayment(amount, deposits, loans).is_ok();
        prop_assert_eq!(approved, amount > 0 && loans > 0 && deposits >= amount);
    }

    /// An approved repayment reduces outstanding principal by exactly the amount.
    #[test]
    fn prop_repayment_reduces_outstanding_exactly(
        amount in 1i64..10_000,
        loans in 1i64..10_000,
    ) {
        let plan = plan_repayment(amount, amount, loans).unwrap();
        prop_assert_eq!(loans + plan.loan_delta, loans - amount);
    }

    /// Withdrawal fails with InsufficientFunds iff amount > balance.
    #[test]
    fn prop_withdrawal_iff_covered(amount in 1i64..10_000, balance in -1_000i64..10_000) {
        let result = check_withdrawal(amount, balance);
        if amount > balance {
            let is_insufficient = matches!(result, Err(BankingError::InsufficientFunds { .. }));
            prop_assert!(is_insufficient);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
