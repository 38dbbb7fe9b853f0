//! Rewritten feed endpoint

use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use coursecal_core::rewrite_url;
use serde::Deserialize;

use crate::routes::{AppError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar.ics", get(rewritten_feed))
        .route("/health", get(health))
}

#[derive(Deserialize)]
pub struct FeedQuery {
    /// The TimeEdit .ics URL to rewrite
    pub url: String,
}

/// GET /calendar.ics?url=... - Rewrite a feed on every request
async fn rewritten_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<impl IntoResponse, AppError> {
    let feed = rewrite_url(&state.fetcher, &state.config, &query.url).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
        feed.to_ics(),
    ))
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}
