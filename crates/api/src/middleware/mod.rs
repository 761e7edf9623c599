//! Request middleware.

pub mod account;

pub use account::{ACCOUNT_HEADER, CurrentAccount, account_middleware};
