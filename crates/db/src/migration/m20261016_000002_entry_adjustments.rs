//! Audit trail of in-place ledger adjustments.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EntryAdjustments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EntryAdjustments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // No foreign key: cleared debt rows are deleted but their audit stays.
                    .col(ColumnDef::new(EntryAdjustments::EntryId).big_integer().not_null())
                    .col(ColumnDef::new(EntryAdjustments::UserId).uuid().not_null())
                    .col(ColumnDef::new(EntryAdjustments::Type).text().not_null())
                    .col(ColumnDef::new(EntryAdjustments::Delta).big_integer().not_null())
                    .col(ColumnDef::new(EntryAdjustments::Reason).text().not_null())
                    .col(
                        ColumnDef::new(EntryAdjustments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entry_adjustments_entry")
                    .table(EntryAdjustments::Table)
                    .col(EntryAdjustments::EntryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EntryAdjustments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EntryAdjustments {
    Table,
    Id,
    EntryId,
    UserId,
    Type,
    Delta,
    Reason,
    CreatedAt,
}
