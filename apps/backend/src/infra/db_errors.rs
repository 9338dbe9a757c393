//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos funnel every error through
//! `map_db_err` so constraint names and raw driver messages never reach
//! clients.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// `table.column` from SQLite's "UNIQUE constraint failed: table.column".
fn sqlite_unique_column(msg: &str) -> Option<&str> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = msg.find(MARKER)? + MARKER.len();
    msg[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
        .filter(|s| !s.is_empty())
}

fn is_duplicate_customer_code(msg: &str) -> bool {
    sqlite_unique_column(msg) == Some("customers.code")
        || msg.contains("customers_code_key")
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Unique constraint violation");
        if is_duplicate_customer_code(&msg) {
            return DomainError::duplicate_code();
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&msg, "23503") || msg.contains("FOREIGN KEY constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Foreign key violation");
        return DomainError::customer_not_found();
    }

    if msg.contains("timeout") || msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Unhandled database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), "Database operation failed")
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use super::*;

    fn exec_err(msg: &str) -> DbErr {
        DbErr::Exec(RuntimeErr::Internal(msg.to_string()))
    }

    #[test]
    fn sqlite_duplicate_code() {
        let err = exec_err("error returned from database: (code: 2067) UNIQUE constraint failed: customers.code");
        assert_eq!(map_db_err(err), DomainError::duplicate_code());
    }

    #[test]
    fn postgres_duplicate_code() {
        let err = exec_err(
            "duplicate key value violates unique constraint \"customers_code_key\" SQLSTATE(23505)",
        );
        assert_eq!(map_db_err(err), DomainError::duplicate_code());
    }

    #[test]
    fn other_unique_violation_is_generic_conflict() {
        let err = exec_err("UNIQUE constraint failed: orders.id");
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::Other(_), _)
        ));
    }

    #[test]
    fn foreign_key_violation_means_missing_customer() {
        let err = exec_err("FOREIGN KEY constraint failed");
        assert_eq!(map_db_err(err), DomainError::customer_not_found());
    }

    #[test]
    fn unknown_errors_hide_detail() {
        let err = exec_err("syntax error near SELECT secret_column");
        match map_db_err(err) {
            DomainError::Infra(InfraErrorKind::Other(_), detail) => {
                assert_eq!(detail, "Database operation failed")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn extracts_sqlite_column() {
        assert_eq!(
            sqlite_unique_column("UNIQUE constraint failed: customers.code"),
            Some("customers.code")
        );
        assert_eq!(sqlite_unique_column("something else"), None);
    }
}
