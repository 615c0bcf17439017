//! Advisor error taxonomy and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::value_objects::ParamError;
use crate::repository::RepositoryError;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Bad horizon/lookback/threshold parameters. Rejected before any data fetch.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The persistence layer could not return products or sales. Retryable by the caller.
    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] RepositoryError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;

impl From<ParamError> for AdvisorError {
    fn from(e: ParamError) -> Self { Self::InvalidArgument(e.to_string()) }
}

impl From<validator::ValidationErrors> for AdvisorError {
    fn from(e: validator::ValidationErrors) -> Self { Self::InvalidArgument(e.to_string()) }
}

impl AdvisorError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    pub fn is_retryable(&self) -> bool { matches!(self, Self::DataUnavailable(_)) }
}

impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.is_retryable() {
            tracing::error!(error = %self, "inventory data fetch failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        // Don't leak database details to clients
        let message = match &self {
            Self::DataUnavailable(_) => "Inventory data is temporarily unavailable".to_string(),
            _ => self.to_string(),
        };
        let body = json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
            "retryable": self.is_retryable(),
        });
        (status, Json(body)).into_response()
    }
}
