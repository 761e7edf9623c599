//! Ledger store and balance aggregation.
//!
//! The free functions take any [`ConnectionTrait`] so the settlement
//! coordinator can run them inside its own transaction. The in-place
//! operations (`adjust_entries_by_kind`, `delete_entries_by_kind`) are only
//! reachable that way.

use chrono::Utc;
use ledgerbank_core::BankingError;
use ledgerbank_core::ledger::{
    AdjustmentReason, EntryKind, LedgerEntry, RowAdjustment, StatementLine, allocate_delta,
    statement,
};
use ledgerbank_shared::types::AccountId;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{
    entry_adjustments,
    sea_orm_active_enums::{AdjustmentReasonType, EntryType},
    transactions,
};
use crate::error::banking_error;

/// `SUM(amount)` over the selected rows, `0` when there are none.
const SUM_AMOUNT: &str = "CAST(COALESCE(SUM(amount), 0) AS BIGINT)";

/// Deposits count as stored; every other kind is subtracted as stored.
const BALANCE_FORMULA: &str =
    "CAST(COALESCE(SUM(CASE WHEN \"type\" = 'deposit' THEN amount ELSE -amount END), 0) AS BIGINT)";

/// Ledger repository for appending entries and reading balances.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends an entry and returns its id.
    ///
    /// The amount is stored exactly as given; sign conventions belong to
    /// the caller.
    pub async fn append_entry(
        &self,
        account_id: AccountId,
        kind: EntryKind,
        amount: i64,
    ) -> Result<i64, BankingError> {
        append_entry(&self.db, account_id, kind, amount)
            .await
            .map_err(banking_error)
    }

    /// Returns `SUM(amount)` over the account's entries of `kind`.
    pub async fn aggregate_by_kind(
        &self,
        account_id: AccountId,
        kind: EntryKind,
    ) -> Result<i64, BankingError> {
        aggregate_by_kind(&self.db, account_id, kind)
            .await
            .map_err(banking_error)
    }

    /// Computes the account balance in a single query.
    pub async fn compute_balance(&self, account_id: AccountId) -> Result<i64, BankingError> {
        compute_balance(&self.db, account_id)
            .await
            .map_err(banking_error)
    }

    /// Lists the account's entries in storage order.
    pub async fn list_entries(&self, account_id: AccountId) -> Result<Vec<LedgerEntry>, BankingError> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(account_id.into_inner()))
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(banking_error)?;

        Ok(rows.into_iter().map(to_ledger_entry).collect())
    }

    /// Lists the account's entries with the balance after each one.
    pub async fn statement(&self, account_id: AccountId) -> Result<Vec<StatementLine>, BankingError> {
        let entries = self.list_entries(account_id).await?;
        Ok(statement(entries))
    }

    /// Lists the audit trail of in-place adjustments for the account.
    pub async fn list_adjustments(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<entry_adjustments::Model>, BankingError> {
        entry_adjustments::Entity::find()
            .filter(entry_adjustments::Column::UserId.eq(account_id.into_inner()))
            .order_by_asc(entry_adjustments::Column::Id)
            .all(&self.db)
            .await
            .map_err(banking_error)
    }
}

fn to_ledger_entry(model: transactions::Model) -> LedgerEntry {
    LedgerEntry {
        id: model.id,
        account_id: AccountId::from_uuid(model.user_id),
        kind: model.kind.into(),
        amount: model.amount,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

/// Inserts a ledger row and returns its id.
pub(crate) async fn append_entry<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
    kind: EntryKind,
    amount: i64,
) -> Result<i64, DbErr> {
    let entry = transactions::ActiveModel {
        user_id: Set(account_id.into_inner()),
        kind: Set(EntryType::from(kind)),
        amount: Set(amount),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let result = transactions::Entity::insert(entry).exec(conn).await?;
    Ok(result.last_insert_id)
}

pub(crate) async fn aggregate_by_kind<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
    kind: EntryKind,
) -> Result<i64, DbErr> {
    let total: Option<i64> = transactions::Entity::find()
        .select_only()
        .column_as(Expr::cust(SUM_AMOUNT), "total")
        .filter(transactions::Column::UserId.eq(account_id.into_inner()))
        .filter(transactions::Column::Kind.eq(EntryType::from(kind)))
        .into_tuple::<i64>()
        .one(conn)
        .await?;

    Ok(total.unwrap_or(0))
}

pub(crate) async fn compute_balance<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
) -> Result<i64, DbErr> {
    let balance: Option<i64> = transactions::Entity::find()
        .select_only()
        .column_as(Expr::cust(BALANCE_FORMULA), "balance")
        .filter(transactions::Column::UserId.eq(account_id.into_inner()))
        .into_tuple::<i64>()
        .one(conn)
        .await?;

    Ok(balance.unwrap_or(0))
}

/// `(id, amount)` of the account's rows of `kind`, oldest first.
async fn rows_of_kind<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
    kind: EntryKind,
) -> Result<Vec<(i64, i64)>, DbErr> {
    transactions::Entity::find()
        .select_only()
        .column(transactions::Column::Id)
        .column(transactions::Column::Amount)
        .filter(transactions::Column::UserId.eq(account_id.into_inner()))
        .filter(transactions::Column::Kind.eq(EntryType::from(kind)))
        .order_by_asc(transactions::Column::Id)
        .into_tuple::<(i64, i64)>()
        .all(conn)
        .await
}

/// Moves the aggregate of the account's `kind` rows by exactly `delta`.
///
/// Rows are changed per [`allocate_delta`] and each change is written to
/// `entry_adjustments` with `reason`. Must run inside the caller's
/// transaction.
pub(crate) async fn adjust_entries_by_kind<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
    kind: EntryKind,
    delta: i64,
    reason: AdjustmentReason,
) -> Result<Vec<RowAdjustment>, DbErr> {
    let rows = rows_of_kind(conn, account_id, kind).await?;
    let adjustments = allocate_delta(&rows, delta);

    for adjustment in &adjustments {
        transactions::Entity::update_many()
            .col_expr(
                transactions::Column::Amount,
                Expr::col(transactions::Column::Amount).add(adjustment.delta),
            )
            .filter(transactions::Column::Id.eq(adjustment.row_id))
            .exec(conn)
            .await?;
        record_adjustment(conn, account_id, kind, *adjustment, reason).await?;
    }

    Ok(adjustments)
}

/// Removes every `kind` row of the account, auditing each one first.
///
/// Returns the number of deleted rows. Must run inside the caller's
/// transaction.
pub(crate) async fn delete_entries_by_kind<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
    kind: EntryKind,
    reason: AdjustmentReason,
) -> Result<u64, DbErr> {
    for (row_id, amount) in rows_of_kind(conn, account_id, kind).await? {
        let cleared = RowAdjustment {
            row_id,
            delta: -amount,
        };
        record_adjustment(conn, account_id, kind, cleared, reason).await?;
    }

    let result = transactions::Entity::delete_many()
        .filter(transactions::Column::UserId.eq(account_id.into_inner()))
        .filter(transactions::Column::Kind.eq(EntryType::from(kind)))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

async fn record_adjustment<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
    kind: EntryKind,
    adjustment: RowAdjustment,
    reason: AdjustmentReason,
) -> Result<(), DbErr> {
    let audit = entry_adjustments::ActiveModel {
        entry_id: Set(adjustment.row_id),
        user_id: Set(account_id.into_inner()),
        kind: Set(EntryType::from(kind)),
        delta: Set(adjustment.delta),
        reason: Set(AdjustmentReasonType::from(reason)),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    entry_adjustments::Entity::insert(audit).exec(conn).await?;
    Ok(())
}
