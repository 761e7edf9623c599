//! Loan application, listing, and repayment routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use ledgerbank_core::loan::LoanTerms;
use ledgerbank_db::{LoanRepository, SettlementCoordinator};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use super::ledger::AmountRequest;
use super::map_banking_error;
use crate::{AppState, middleware::CurrentAccount};

/// Creates the loan routes (account middleware is applied by the caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/loans", get(list_loans).post(apply_loan))
        .route("/loans/repayments", post(repay_loan))
}

/// Request body for a loan application.
#[derive(Debug, Deserialize)]
pub struct ApplyLoanRequest {
    /// Principal in minor currency units.
    pub amount: i64,
    /// Annual interest rate as a decimal string, e.g. `"5.25"`.
    #[serde(with = "rust_decimal::serde::str")]
    pub interest_rate: Decimal,
    /// Repayment period in months.
    pub repayment_period: i32,
}

/// POST `/loans` - Apply for a loan.
async fn apply_loan(
    State(state): State<AppState>,
    account: CurrentAccount,
    Json(payload): Json<ApplyLoanRequest>,
) -> impl IntoResponse {
    let terms = match LoanTerms::new(
        payload.amount,
        payload.interest_rate,
        payload.repayment_period,
    ) {
        Ok(terms) => terms,
        Err(e) => return map_banking_error(&e),
    };

    let loans = LoanRepository::new((*state.db).clone());

    match loans.create_loan(account.id(), terms).await {
        Ok(loan) => (StatusCode::CREATED, Json(json!(loan))).into_response(),
        Err(e) => map_banking_error(&e),
    }
}

/// GET `/loans` - Loans in storage order with the outstanding total.
async fn list_loans(State(state): State<AppState>, account: CurrentAccount) -> impl IntoResponse {
    let loans = LoanRepository::new((*state.db).clone());

    let listed = match loans.list_loans(account.id()).await {
        Ok(listed) => listed,
        Err(e) => return map_banking_error(&e),
    };

    match loans.outstanding_balance(account.id()).await {
        Ok(outstanding) => (
            StatusCode::OK,
            Json(json!({
                "loans": listed,
                "outstanding": outstanding,
            })),
        )
            .into_response(),
        Err(e) => map_banking_error(&e),
    }
}

/// POST `/loans/repayments` - Repay loan principal from deposits.
async fn repay_loan(
    State(state): State<AppState>,
    account: CurrentAccount,
    Json(payload): Json<AmountRequest>,
) -> impl IntoResponse {
    let settlement = SettlementCoordinator::new((*state.db).clone());

    match settlement.repay_loan(account.id(), payload.amount).await {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(json!({
                "entry_id": receipt.entry_id,
                "outstanding": receipt.outstanding,
            })),
        )
            .into_response(),
        Err(e) => map_banking_error(&e),
    }
}
