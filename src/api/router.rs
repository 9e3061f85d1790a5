//! API router.

use axum::http::Uri;
use axum::routing::get;
use axum::Router;

use crate::api::endpoints;
use crate::api::error::ApiError;

/// Build the API router with every endpoint under `/api/`.
pub fn api_router() -> Router {
    let api = Router::new().route("/health", get(endpoints::health::check));

    Router::new().nest("/api", api).fallback(not_found)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
