//! Admission gate in front of the calculation routes.
//!
//! Runs before the body is read, so malformed requests still use up a slot
//! in the caller's window.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use calcgate_core::Admission;

use crate::client::ClientKey;
use crate::error::AppError;
use crate::state::AppState;

pub async fn rate_limit(
    State(state): State<AppState>,
    client: ClientKey,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    match state.limiter.check(client.as_str()) {
        Admission::Admitted { remaining } => {
            tracing::debug!("Admitted: client={}, remaining={remaining}", client.as_str());
            Ok(next.run(req).await)
        }
        Admission::Rejected { retry_after } => {
            tracing::warn!(
                "Rate limit exceeded: client={}, retry_after={retry_after:?}",
                client.as_str()
            );
            Err(AppError::RateLimitExceeded { retry_after })
        }
    }
}
