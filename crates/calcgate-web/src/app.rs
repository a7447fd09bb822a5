use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::state::AppState;

pub fn build_router(state: AppState) -> axum::Router {
    // CORS: same-origin only by default (no cross-origin requests allowed)
    let cors = CorsLayer::new()
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let max_body_bytes = state.config.max_body_bytes;

    axum::Router::new()
        .merge(api::calculate_router(state.clone()))
        .fallback(api::not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
