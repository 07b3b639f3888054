//! API error taxonomy shared by the intake and query paths.
//!
//! Every variant maps to exactly one HTTP status and a JSON `{"error": ...}`
//! body. Storage and internal failures are logged with their detail but the
//! response carries only a short generic message.

use axum::extract::{FromRequest, Request};
use axum::{http::StatusCode, response::IntoResponse, Json};
use sea_orm::DbErr;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::opportunity::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller omitted a required input (400)
    #[error("{0}")]
    MissingField(String),

    /// Request body was not valid JSON of the expected shape (400)
    #[error("{0}")]
    MalformedRequest(String),

    /// close_date did not parse against "YYYY-MM-DD HH:MM:SS" (400)
    #[error("Invalid date format for close_date: {0}")]
    InvalidFormat(String),

    /// Probability outside the defined stage buckets (400)
    #[error("Invalid probability value: {0}")]
    InvalidProbability(i32),

    /// Dealer credential triple did not match any dealer row (401)
    #[error("Invalid dealer information")]
    Unauthorized,

    /// No opportunity with the requested id (404)
    #[error("Customer not found")]
    NotFound,

    /// The storage collaborator failed (500); detail stays in the logs
    #[error("Database error")]
    Storage(#[from] DbErr),

    /// Anything else unanticipated (500)
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_)
            | ApiError::MalformedRequest(_)
            | ApiError::InvalidFormat(_)
            | ApiError::InvalidProbability(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::Storage(e) => tracing::error!(error = %e, "database error"),
            ApiError::Internal(detail) => tracing::error!(detail = %detail, "internal error"),
            _ => tracing::debug!(error = %self, "request rejected"),
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

/// `Json` extractor that keeps the JSON error contract: a body that fails to
/// deserialize answers 400 with an `{"error": ...}` body instead of axum's
/// plain-text 422 rejection.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedRequest(rejection.body_text()))?;
        Ok(AppJson(value))
    }
}
