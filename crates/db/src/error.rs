//! Mapping of storage failures onto the domain error taxonomy.

use ledgerbank_core::BankingError;
use sea_orm::{DbErr, RuntimeErr};

/// SQLSTATE / SQLite result codes reported when a concurrent writer wins.
///
/// - `40001`: PostgreSQL serialization failure
/// - `40P01`: PostgreSQL deadlock detected
/// - `5`, `261`, `517`, `773`: SQLite busy and its extended codes
/// - `6`, `262`: SQLite locked and its extended code
const CONFLICT_CODES: &[&str] = &["40001", "40P01", "5", "261", "517", "773", "6", "262"];

/// Returns the driver error code carried by `err`, if any.
fn database_code(err: &DbErr) -> Option<String> {
    let runtime = match err {
        DbErr::Conn(e) | DbErr::Exec(e) | DbErr::Query(e) => e,
        _ => return None,
    };
    match runtime {
        RuntimeErr::SqlxError(sqlx_err) => sqlx_err
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .map(|code| code.into_owned()),
        RuntimeErr::Internal(_) => None,
    }
}

/// Returns true when `err` is a serialization conflict with another transaction.
#[must_use]
pub fn is_serialization_failure(err: &DbErr) -> bool {
    database_code(err).is_some_and(|code| CONFLICT_CODES.contains(&code.as_str()))
}

/// Converts a storage error into a [`BankingError`].
///
/// Serialization conflicts become `ConcurrentModification`; everything else
/// becomes `Database`.
#[must_use]
pub fn banking_error(err: DbErr) -> BankingError {
    if is_serialization_failure(&err) {
        tracing::warn!(error = %err, "Transaction aborted by concurrent writer");
        BankingError::ConcurrentModification
    } else {
        BankingError::Database(err.to_string())
    }
}
