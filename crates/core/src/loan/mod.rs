//! Loan registry rules.
//!
//! Validation of new loan terms and the status lifecycle of a loan.

pub mod types;

pub use types::{LoanStatus, LoanTerms, LoanView};
