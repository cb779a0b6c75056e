use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::model::LeaveStatus;

/// Domain error taxonomy: validation failures, missing records, and decided
/// requests are all detected before any write, so a failed operation never
/// leaves partial state behind.
#[derive(Debug, Error)]
pub enum HrError {
    #[error("end_date cannot be before start_date")]
    InvalidDateRange,

    #[error("requested days exceed the remaining quota; {remaining} day(s) remaining")]
    QuotaExceeded { remaining: i64 },

    #[error("an employee with this {0} already exists")]
    DuplicateEmployee(&'static str),

    #[error("{0} not found")]
    NotFound(String),

    #[error("leave request is already {status}")]
    AlreadyDecided { status: LeaveStatus },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ResponseError for HrError {
    fn status_code(&self) -> StatusCode {
        match self {
            HrError::InvalidDateRange
            | HrError::QuotaExceeded { .. }
            | HrError::DuplicateEmployee(_) => StatusCode::BAD_REQUEST,
            HrError::NotFound(_) => StatusCode::NOT_FOUND,
            HrError::AlreadyDecided { .. } => StatusCode::CONFLICT,
            HrError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            HrError::Database(e) => {
                error!(error = %e, "database failure");
                json!({ "message": "Internal Server Error" })
            }
            HrError::QuotaExceeded { remaining } => json!({
                "message": self.to_string(),
                "remaining": remaining,
            }),
            _ => json!({ "message": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Turns a unique-constraint violation on the employees table into the
/// duplicate-field error; anything else passes through as a database error.
pub fn map_employee_insert_err(e: sqlx::Error) -> HrError {
    if let sqlx::Error::Database(db) = &e {
        if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            // SQLite reports "UNIQUE constraint failed: employees.<column>"
            let field = if db.message().contains("employees.email") {
                "email"
            } else {
                "employee_code"
            };
            return HrError::DuplicateEmployee(field);
        }
    }
    HrError::Database(e)
}
