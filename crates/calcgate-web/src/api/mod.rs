pub mod calculate;

use axum::http::Uri;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::Router;

use crate::error::AppError;
use crate::middleware::rate_limit::rate_limit;
use crate::state::AppState;

/// Routes behind the admission gate.
pub fn calculate_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate::calculate))
        .route_layer(from_fn_with_state(state, rate_limit))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
