//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use ledgerbank_core::BankingError;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::{AppState, middleware::account_middleware};

pub mod health;
pub mod ledger;
pub mod loans;

/// Creates the API router with public and account-scoped routes.
pub fn api_routes() -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(ledger::routes())
        .merge(loans::routes())
        .layer(middleware::from_fn(account_middleware));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}

/// Maps a domain error onto a JSON error response.
///
/// Storage failures are logged and reported without detail. `retryable`
/// tells the client whether the same request may succeed if resent.
pub(crate) fn map_banking_error(e: &BankingError) -> Response {
    let status =
        StatusCode::from_u16(e.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match e {
        BankingError::Database(_) => {
            error!(error = %e, "Database operation failed");
            "An error occurred".to_string()
        }
        _ if e.is_retryable() => {
            warn!(error = %e, "Settlement conflicted with a concurrent request");
            e.to_string()
        }
        _ if e.is_validation() => {
            debug!(error = %e, "Rejected invalid input");
            e.to_string()
        }
        _ => e.to_string(),
    };

    (
        status,
        Json(json!({
            "error": e.error_code(),
            "message": message,
            "retryable": e.is_retryable()
        })),
    )
        .into_response()
}
