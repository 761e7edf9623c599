//! Shared types and configuration for LedgerBank.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe account and loan references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{AccountId, LoanId};
