//! Error conversions
//!
//! SQLSTATE classification for `sqlx` errors and the wire representation of
//! [`AppError`].

#[cfg(feature = "axum")]
use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// PostgreSQL SQLSTATE codes the repositories branch on.
///
/// <https://www.postgresql.org/docs/current/errcodes-appendix.html>
#[cfg(feature = "sqlx")]
pub mod sqlstate {
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
    pub const UNIQUE_VIOLATION: &str = "23505";
    pub const CHECK_VIOLATION: &str = "23514";

    /// SQLSTATE of a database error, if any.
    pub fn code(err: &sqlx::Error) -> Option<String> {
        match err {
            sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
            _ => None,
        }
    }

    pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
        code(err).as_deref() == Some(FOREIGN_KEY_VIOLATION)
    }

    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        code(err).as_deref() == Some(UNIQUE_VIOLATION)
    }
}

/// Classify a sqlx error into a kind and a client-safe message.
///
/// Crate errors that wrap `sqlx::Error` use this to pick their status.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
        sqlx::Error::PoolTimedOut => (
            ErrorKind::ServiceUnavailable,
            "Database connection pool exhausted",
        ),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // Class 23: Integrity Constraint Violation
            Some("23000") => (ErrorKind::Conflict, "Integrity constraint violation"),
            Some("23001") => (ErrorKind::Conflict, "Restrict violation"),
            Some("23502") => (ErrorKind::BadRequest, "Required field is null"),
            Some(sqlstate::FOREIGN_KEY_VIOLATION) => (ErrorKind::Conflict, "Foreign key violation"),
            Some(sqlstate::UNIQUE_VIOLATION) => (ErrorKind::Conflict, "Duplicate key value"),
            Some(sqlstate::CHECK_VIOLATION) => {
                (ErrorKind::BadRequest, "Check constraint violation")
            }
            // Class 53: Insufficient Resources
            Some("53000" | "53100" | "53200" | "53300") => {
                (ErrorKind::ServiceUnavailable, "Database resource exhausted")
            }
            // Class 57: Operator Intervention
            Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                (ErrorKind::ServiceUnavailable, "Database unavailable")
            }
            _ => (ErrorKind::InternalServerError, "Database error"),
        },
        sqlx::Error::Io(_) => (ErrorKind::ServiceUnavailable, "Database connection error"),
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side details stay in the logs.
        let detail = if self.is_server_error() {
            self.kind().as_str().to_string()
        } else {
            self.message().to_string()
        };

        crate::response::Detail::with_status(status, detail).into_response()
    }
}
