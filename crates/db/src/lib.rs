//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the ledger, loans, and adjustment audit
//! - Repositories for the ledger store, loan registry, and settlements
//! - Database migrations

pub mod entities;
pub mod error;
pub mod migration;
pub mod repositories;

pub use repositories::{LedgerRepository, LoanRepository, SettlementCoordinator};

use std::time::Duration;

use ledgerbank_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool to the configured database.
///
/// Accepts `postgres://` and `sqlite:` URLs.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}
