//! Account identification for protected routes.
//!
//! Authentication happens upstream; the session layer forwards the
//! authenticated account as the `x-account-id` header.

use axum::{
    Json,
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ledgerbank_shared::types::AccountId;
use serde_json::json;

/// Header carrying the authenticated account id.
pub const ACCOUNT_HEADER: &str = "x-account-id";

/// Middleware that resolves the calling account.
///
/// Rejects the request with 401 when the header is missing or is not a UUID;
/// otherwise stores the [`AccountId`] in request extensions.
pub async fn account_middleware(mut request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(ACCOUNT_HEADER)
        .and_then(|h| h.to_str().ok());

    let Some(raw) = header else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_account",
                "message": "x-account-id header is required"
            })),
        )
            .into_response();
    };

    match raw.trim().parse::<AccountId>() {
        Ok(account_id) => {
            request.extensions_mut().insert(account_id);
            next.run(request).await
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_account",
                "message": "x-account-id header must be a UUID"
            })),
        )
            .into_response(),
    }
}

/// Extractor for the account resolved by [`account_middleware`].
#[derive(Debug, Clone, Copy)]
pub struct CurrentAccount(pub AccountId);

impl CurrentAccount {
    /// Returns the account id.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        self.0
    }
}

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AccountId>()
            .copied()
            .map(CurrentAccount)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Account identification required"
                    })),
                )
            })
    }
}
