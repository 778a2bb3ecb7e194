use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::OnceCell;
use serde_json::{json, Map, Value};
use std::fmt;

// Whether failure envelopes carry `error.details`. Unset means expose.
static EXPOSE_ERROR_DETAILS: OnceCell<bool> = OnceCell::new();

/// Set once at startup. Later calls are ignored.
pub fn configure_error_details(expose: bool) {
    let _ = EXPOSE_ERROR_DETAILS.set(expose);
}

fn error_details_exposed() -> bool {
    *EXPOSE_ERROR_DETAILS.get().unwrap_or(&true)
}

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    DatabaseError(String),
    Internal(String),
    TooManyRequests(String),
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "UPSTREAM_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::TooManyRequests(_) => "RATE_LIMITED",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// The message shown to API clients. Server-side failures are masked.
    fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::TooManyRequests(msg)
            | AppError::ServiceUnavailable(msg) => msg.clone(),
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            AppError::DatabaseError(msg)
            | AppError::Internal(msg)
            | AppError::ServiceUnavailable(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Failure envelope: `{success: false, message, error: {code, message, details?}}`.
    pub fn envelope(&self, expose_details: bool) -> Value {
        let message = self.public_message();
        let mut error = Map::new();
        error.insert("code".to_string(), json!(self.code()));
        error.insert("message".to_string(), json!(message));
        if expose_details {
            if let Some(details) = self.details() {
                error.insert("details".to_string(), json!(details));
            }
        }

        json!({
            "success": false,
            "message": message,
            "error": Value::Object(error),
        })
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::TooManyRequests(msg) => write!(f, "Too many requests: {}", msg),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::DatabaseError(msg) => tracing::error!("Database error: {}", msg),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::ServiceUnavailable(msg) => tracing::warn!("Service unavailable: {}", msg),
            _ => {}
        }

        let status = self.status();
        let body = Json(self.envelope(error_details_exposed()));
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
