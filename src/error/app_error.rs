use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// The store endpoint could not be reached at startup.
    Connection(String),
    /// Any other SDK/client-construction failure.
    Sdk(String),
    /// Table provisioning failed for a reason other than "already exists".
    Schema(String),
    /// A scan failed. Recoverable: the caller serves an empty catalog.
    Read(String),
    /// A put failed. Recoverable: nothing was written.
    Write(String),
    /// Form input rejected before any store call.
    Validation(String),
    Config(String),
}

impl AppError {
    /// Fatal kinds abort startup; the rest are reported and the process
    /// keeps serving.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::Connection(_) | AppError::Sdk(_) | AppError::Schema(_) | AppError::Config(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Connection(msg) => write!(f, "connection error: {}", msg),
            AppError::Sdk(msg) => write!(f, "SDK error: {}", msg),
            AppError::Schema(msg) => write!(f, "schema error: {}", msg),
            AppError::Read(msg) => write!(f, "read error: {}", msg),
            AppError::Write(msg) => write!(f, "write error: {}", msg),
            AppError::Validation(msg) => write!(f, "validation error: {}", msg),
            AppError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Connection(ref msg) => {
                tracing::error!("Connection error: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Could not connect to the product store. Please ensure the service is running.",
                )
            }
            AppError::Sdk(ref msg) => {
                tracing::error!("SDK error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred with the storage SDK. Please check the logs for more details.",
                )
            }
            AppError::Schema(ref msg) => {
                tracing::error!("Schema error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create or access the Products table.",
                )
            }
            AppError::Read(ref msg) => {
                tracing::error!("Read error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error retrieving products. Please try again later.",
                )
            }
            AppError::Write(ref msg) => {
                tracing::error!("Write error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error adding product. Please check your input and try again.",
                )
            }
            AppError::Validation(ref msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::Config(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error.",
                )
            }
        };

        let body = Json(json!({
            "message": error_message,
        }));

        (status, body).into_response()
    }
}
