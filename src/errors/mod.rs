use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use std::fmt;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum ApiError {
    /// The id-addressed record does not exist. 404, empty body.
    NotFound,
    /// One or more payload fields violated a validation rule. 400 with the
    /// per-field violations.
    Validation(ValidationErrors),
    /// The backing store failed. Connectivity problems map to 503, anything
    /// else to 500; the detail is logged but never sent to the client.
    Database(sqlx::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "Not Found"),
            ApiError::Validation(errs) => write!(f, "Validation failed: {}", errs),
            ApiError::Database(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err)
    }
}

// Transient connectivity failures, as opposed to query/constraint errors.
fn indisponivel(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
    )
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::NotFound => HttpResponse::NotFound().finish(),
            ApiError::Validation(errs) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "errors": errs }))
            }
            ApiError::Database(err) => {
                error!("database error: {}", err);
                if indisponivel(err) {
                    HttpResponse::ServiceUnavailable().json(ErrorResponse {
                        error: "Serviço temporariamente indisponível".to_string(),
                    })
                } else {
                    HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Erro interno no servidor".to_string(),
                    })
                }
            }
        }
    }
}
