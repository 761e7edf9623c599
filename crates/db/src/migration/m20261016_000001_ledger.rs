//! Initial schema: the ledger (`transactions`) and `loans` tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::Type).text().not_null())
                    .col(ColumnDef::new(Transactions::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Every aggregate filters on (user_id, type)
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_user_type")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::Type)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Loans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Loans::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Loans::LoanId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Loans::UserId).uuid().not_null())
                    .col(ColumnDef::new(Loans::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Loans::InterestRate)
                            .decimal_len(9, 4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Loans::RepaymentPeriod).integer().not_null())
                    .col(
                        ColumnDef::new(Loans::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Loans::CreatedAt)
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
                    .name("idx_loans_user_status")
                    .table(Loans::Table)
                    .col(Loans::UserId)
                    .col(Loans::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Loans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Type,
    Amount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Loans {
    Table,
    Id,
    LoanId,
    UserId,
    Amount,
    InterestRate,
    RepaymentPeriod,
    Status,
    CreatedAt,
}
