//! Shared setup for repository tests.

#![allow(dead_code)]

use ledgerbank_db::migration::{Migrator, MigratorTrait};
use ledgerbank_shared::config::DatabaseConfig;
use ledgerbank_shared::types::AccountId;
use sea_orm::DatabaseConnection;

/// Connects to a fresh in-memory SQLite database with the schema applied.
///
/// The pool holds a single connection so every query sees the same database.
pub async fn setup() -> DatabaseConnection {
    let mut config = DatabaseConfig::with_url("sqlite::memory:");
    config.max_connections = 1;
    config.min_connections = 1;

    let db = ledgerbank_db::connect(&config)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// A fresh account id.
pub fn account() -> AccountId {
    AccountId::new()
}
