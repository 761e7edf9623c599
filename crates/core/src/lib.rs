//! Core business logic for LedgerBank.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and settlement arithmetic live here.
//!
//! # Modules
//!
//! - `ledger` - Entry kinds, balance formula, and row adjustment allocation
//! - `loan` - Loan terms validation and loan status
//! - `settlement` - Repayment, debt deduction, and withdrawal planning
//! - `error` - Error taxonomy shared by every operation

pub mod error;
pub mod ledger;
pub mod loan;
pub mod settlement;

pub use error::BankingError;
