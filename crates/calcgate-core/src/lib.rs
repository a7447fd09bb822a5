//! calcgate core library — transport-agnostic service logic.
//!
//! `calcgate-core` holds the two pieces the HTTP server composes per
//! request: an admission gate and a pure calculator. Neither knows about
//! HTTP, so both can be tested and reused without a server.
//!
//! # Modules
//!
//! - [`limiter`] — Fixed-window rate limiter keyed by client identity.
//! - [`calc`] — Request/result types, validation and the computation itself.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod calc;
pub mod error;
pub mod limiter;

pub use calc::{calculate, round_to, validate, CalculationRequest, CalculationResult};
pub use error::{retry_after_secs, CoreError, CoreResult};
pub use limiter::{Admission, FixedWindowLimiter};
