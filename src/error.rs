use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::ReservationError;
use crate::validation::ValidationReport;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(ValidationReport),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        let message = err.to_string();
        match err {
            ReservationError::EventNotFound => AppError::NotFound(message),
            ReservationError::AlreadyBooked | ReservationError::SoldOut => {
                AppError::Conflict(message)
            }
            ReservationError::Storage(_) => AppError::Internal(message),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ValidationReport> for AppError {
    fn from(report: ValidationReport) -> Self {
        AppError::Validation(report)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::Validation(report) => json!(report),
            AppError::NotFound(message) | AppError::Conflict(message) => {
                json!({ "message": message })
            }
            AppError::Internal(cause) => {
                tracing::error!("Internal Server Error: {}", cause);
                json!({ "message": "Internal server error" })
            }
        };

        (status, Json(json!({ "ok": false, "error": error }))).into_response()
    }
}
