//! Loan registry.

use chrono::Utc;
use ledgerbank_core::BankingError;
use ledgerbank_core::ledger::{RowAdjustment, allocate_delta};
use ledgerbank_core::loan::{LoanStatus, LoanTerms, LoanView};
use ledgerbank_shared::types::{AccountId, LoanId};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{loans, sea_orm_active_enums::LoanStatusType};
use crate::error::banking_error;

const SUM_AMOUNT: &str = "CAST(COALESCE(SUM(amount), 0) AS BIGINT)";

/// Loan repository for creating and reading loans.
#[derive(Debug, Clone)]
pub struct LoanRepository {
    db: DatabaseConnection,
}

impl LoanRepository {
    /// Creates a new loan repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a new `pending` loan with validated terms.
    pub async fn create_loan(
        &self,
        account_id: AccountId,
        terms: LoanTerms,
    ) -> Result<LoanView, BankingError> {
        let loan_id = LoanId::new();
        let now = Utc::now();

        let loan = loans::ActiveModel {
            loan_id: Set(loan_id.into_inner()),
            user_id: Set(account_id.into_inner()),
            amount: Set(terms.amount),
            interest_rate: Set(terms.interest_rate),
            repayment_period: Set(terms.repayment_period),
            status: Set(LoanStatusType::Pending),
            created_at: Set(now.into()),
            ..Default::default()
        };
        loans::Entity::insert(loan)
            .exec(&self.db)
            .await
            .map_err(banking_error)?;

        tracing::info!(
            account_id = %account_id,
            loan_id = %loan_id,
            amount = terms.amount,
            "Loan created"
        );

        Ok(LoanView {
            loan_id,
            account_id,
            amount: terms.amount,
            interest_rate: terms.interest_rate,
            repayment_period: terms.repayment_period,
            status: LoanStatus::Pending,
            created_at: now,
        })
    }

    /// Lists the account's loans in storage order.
    pub async fn list_loans(&self, account_id: AccountId) -> Result<Vec<LoanView>, BankingError> {
        let rows = loans::Entity::find()
            .filter(loans::Column::UserId.eq(account_id.into_inner()))
            .order_by_asc(loans::Column::Id)
            .all(&self.db)
            .await
            .map_err(banking_error)?;

        Ok(rows.into_iter().map(to_loan_view).collect())
    }

    /// Sum of remaining principal over `pending` loans.
    pub async fn outstanding_balance(&self, account_id: AccountId) -> Result<i64, BankingError> {
        outstanding_balance(&self.db, account_id)
            .await
            .map_err(banking_error)
    }
}

fn to_loan_view(model: loans::Model) -> LoanView {
    LoanView {
        loan_id: LoanId::from_uuid(model.loan_id),
        account_id: AccountId::from_uuid(model.user_id),
        amount: model.amount,
        interest_rate: model.interest_rate,
        repayment_period: model.repayment_period,
        status: model.status.into(),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub(crate) async fn outstanding_balance<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
) -> Result<i64, DbErr> {
    let total: Option<i64> = loans::Entity::find()
        .select_only()
        .column_as(Expr::cust(SUM_AMOUNT), "total")
        .filter(loans::Column::UserId.eq(account_id.into_inner()))
        .filter(loans::Column::Status.eq(LoanStatusType::Pending))
        .into_tuple::<i64>()
        .one(conn)
        .await?;

    Ok(total.unwrap_or(0))
}

/// Moves the account's pending principal by exactly `delta` (negative).
///
/// Loans are consumed oldest first and only their `amount` changes; status
/// stays `pending`. Any overpayment remains on the newest loan. Must run
/// inside the caller's transaction.
pub(crate) async fn decrement_outstanding<C: ConnectionTrait>(
    conn: &C,
    account_id: AccountId,
    delta: i64,
) -> Result<Vec<RowAdjustment>, DbErr> {
    let rows: Vec<(i64, i64)> = loans::Entity::find()
        .select_only()
        .column(loans::Column::Id)
        .column(loans::Column::Amount)
        .filter(loans::Column::UserId.eq(account_id.into_inner()))
        .filter(loans::Column::Status.eq(LoanStatusType::Pending))
        .order_by_asc(loans::Column::Id)
        .into_tuple::<(i64, i64)>()
        .all(conn)
        .await?;

    let adjustments = allocate_delta(&rows, delta);

    for adjustment in &adjustments {
        loans::Entity::update_many()
            .col_expr(
                loans::Column::Amount,
                Expr::col(loans::Column::Amount).add(adjustment.delta),
            )
            .filter(loans::Column::Id.eq(adjustment.row_id))
            .exec(conn)
            .await?;
    }

    Ok(adjustments)
}
