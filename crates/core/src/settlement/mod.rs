//! Settlement planning.
//!
//! Pure decision rules for the multi-step settlements. The storage layer
//! reads the aggregates inside its transaction, asks these functions what
//! to do, and then performs the writes.

pub mod plan;

#[cfg(test)]
mod plan_props;

pub use plan::{DebtDeduction, RepaymentPlan, check_withdrawal, plan_debt_deduction, plan_repayment};
