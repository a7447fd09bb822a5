use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::config::RateScope;
use crate::state::AppState;

const GLOBAL_KEY: &str = "anonymous";
const UNKNOWN_KEY: &str = "unknown";

/// Identity a request is rate limited under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl ClientKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<AppState> for ClientKey {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = match state.rate_scope() {
            RateScope::Global => GLOBAL_KEY.to_string(),
            RateScope::PerClient => {
                let peer = parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| *addr);
                client_ip(&parts.headers, peer)
            }
        };
        Ok(ClientKey(key))
    }
}

/// Picks the client address: first `X-Forwarded-For` hop, then `X-Real-IP`,
/// then the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = real_ip {
        return ip.to_string();
    }

    match peer {
        Some(addr) => addr.ip().to_string(),
        None => {
            tracing::warn!("No client address available; using shared '{UNKNOWN_KEY}' window");
            UNKNOWN_KEY.to_string()
        }
    }
}
