//! Deposit, withdrawal, balance, and statement routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use ledgerbank_core::ledger::{EntryKind, StatementLine};
use ledgerbank_db::{LedgerRepository, SettlementCoordinator};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::map_banking_error;
use crate::{AppState, middleware::CurrentAccount};

/// Creates the ledger routes (account middleware is applied by the caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/deposits", post(create_deposit))
        .route("/withdrawals", post(create_withdrawal))
        .route("/balance", get(get_balance))
        .route("/ledger", get(get_ledger))
}

/// Request body carrying a single amount in minor units.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    /// Amount in minor currency units; must be positive.
    pub amount: i64,
}

/// One line of the account statement.
#[derive(Debug, Serialize)]
pub struct LedgerEntryResponse {
    /// Entry id.
    pub id: i64,
    /// Entry kind.
    pub kind: EntryKind,
    /// Stored amount.
    pub amount: i64,
    /// Balance after this entry.
    pub balance_after: i64,
    /// When the entry was appended.
    pub created_at: DateTime<Utc>,
}

impl From<StatementLine> for LedgerEntryResponse {
    fn from(line: StatementLine) -> Self {
        Self {
            id: line.entry.id,
            kind: line.entry.kind,
            amount: line.entry.amount,
            balance_after: line.running.current_balance,
            created_at: line.entry.created_at,
        }
    }
}

/// POST `/deposits` - Deposit and settle outstanding debt.
async fn create_deposit(
    State(state): State<AppState>,
    account: CurrentAccount,
    Json(payload): Json<AmountRequest>,
) -> impl IntoResponse {
    let settlement = SettlementCoordinator::new((*state.db).clone());

    match settlement.process_deposit(account.id(), payload.amount).await {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(json!({
                "entry_id": receipt.entry_id,
                "balance": receipt.balance,
                "debt_payment": receipt.debt_payment,
            })),
        )
            .into_response(),
        Err(e) => map_banking_error(&e),
    }
}

/// POST `/withdrawals` - Withdraw if the balance covers it.
async fn create_withdrawal(
    State(state): State<AppState>,
    account: CurrentAccount,
    Json(payload): Json<AmountRequest>,
) -> impl IntoResponse {
    let settlement = SettlementCoordinator::new((*state.db).clone());

    match settlement.withdraw(account.id(), payload.amount).await {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(json!({
                "entry_id": receipt.entry_id,
                "balance": receipt.balance,
            })),
        )
            .into_response(),
        Err(e) => map_banking_error(&e),
    }
}

/// GET `/balance` - Current balance.
async fn get_balance(State(state): State<AppState>, account: CurrentAccount) -> impl IntoResponse {
    let ledger = LedgerRepository::new((*state.db).clone());

    match ledger.compute_balance(account.id()).await {
        Ok(balance) => (
            StatusCode::OK,
            Json(json!({
                "account_id": account.id(),
                "balance": balance,
            })),
        )
            .into_response(),
        Err(e) => map_banking_error(&e),
    }
}

/// GET `/ledger` - Entries in storage order with running balance.
async fn get_ledger(State(state): State<AppState>, account: CurrentAccount) -> impl IntoResponse {
    let ledger = LedgerRepository::new((*state.db).clone());

    match ledger.statement(account.id()).await {
        Ok(lines) => {
            let entries: Vec<LedgerEntryResponse> =
                lines.into_iter().map(LedgerEntryResponse::from).collect();
            (StatusCode::OK, Json(json!({ "entries": entries }))).into_response()
        }
        Err(e) => map_banking_error(&e),
    }
}
