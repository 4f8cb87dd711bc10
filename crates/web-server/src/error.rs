use analytics::AnalyticsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

pub const STOCK_NOT_FOUND: &str = "stock_not_found";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(DbError::NotFound) => {
                (StatusCode::NOT_FOUND, STOCK_NOT_FOUND.to_string())
            }
            AppError::Database(DbError::DuplicateSymbol(symbol)) => (
                StatusCode::CONFLICT,
                format!("Stock with symbol '{symbol}' already exists"),
            ),
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Analytics(AnalyticsError::InvalidInput(message)) => {
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Analytics(AnalyticsError::NotFound(message)) => {
                (StatusCode::NOT_FOUND, message)
            }
            AppError::Analytics(AnalyticsError::Store(detail)) => {
                tracing::error!(error = %detail, "Analytics store error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An error occurred during analysis: {detail}"),
                )
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
