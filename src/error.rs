use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        AppError::Validation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let Some((field, field_errors)) = errors.field_errors().into_iter().next() else {
            return AppError::validation("Validation failed", None);
        };
        // Struct fields are snake_case; the wire format is camelCase.
        let field = match &*field {
            "seat_ids" => "seatIds",
            "booked_by" => "bookedBy",
            other => other,
        };
        let message = field_errors
            .first()
            .and_then(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid value for {field}"));
        AppError::validation(message, Some(field))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
            AppError::Validation { message, field } => {
                let body = match field {
                    Some(field) => json!({ "message": message, "field": field }),
                    None => json!({ "message": message }),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::Conflict(message) => (
                StatusCode::CONFLICT,
                Json(json!({ "message": message })),
            )
                .into_response(),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": message })),
            )
                .into_response(),
        }
    }
}
