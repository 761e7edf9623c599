//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration and written with the
//! schema builder so they apply to PostgreSQL and SQLite alike.

pub use sea_orm_migration::prelude::*;

mod m20261016_000001_ledger;
mod m20261016_000002_entry_adjustments;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_ledger::Migration),
            Box::new(m20261016_000002_entry_adjustments::Migration),
        ]
    }
}
