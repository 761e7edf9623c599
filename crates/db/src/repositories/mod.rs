//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every public method returns [`ledgerbank_core::BankingError`].

pub mod ledger;
pub mod loan;
pub mod settlement;

pub use ledger::LedgerRepository;
pub use loan::LoanRepository;
pub use settlement::{DepositReceipt, RepaymentReceipt, SettlementCoordinator, WithdrawalReceipt};
