//! Entity re-exports.

pub use super::entry_adjustments::Entity as EntryAdjustments;
pub use super::loans::Entity as Loans;
pub use super::transactions::Entity as Transactions;
