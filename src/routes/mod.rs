pub mod feed;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coursecal_core::{HttpFetcher, RewriteConfig, RewriteError};
use serde::Serialize;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RewriteConfig>,
    pub fetcher: HttpFetcher,
}

impl AppState {
    pub fn new(config: RewriteConfig) -> Result<Self> {
        Ok(AppState {
            config: Arc::new(config),
            fetcher: HttpFetcher::new()?,
        })
    }
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors to HTTP responses
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<RewriteError>() {
            Some(err) if err.is_bad_request() => StatusCode::BAD_REQUEST,
            Some(err) if err.is_fetch() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!("Request failed ({}): {}", status, self.0);

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
