//! Ledger rules.
//!
//! This module implements the account ledger:
//! - Entry kinds and their balance signs
//! - Balance and running-balance calculations
//! - Allocation of in-place adjustments across stored rows

pub mod adjustment;
pub mod balance;
pub mod entry;

#[cfg(test)]
mod adjustment_props;

pub use adjustment::{AdjustmentReason, RowAdjustment, allocate_delta};
pub use balance::{RunningBalance, StatementLine, statement};
pub use entry::{EntryKind, LedgerEntry};
