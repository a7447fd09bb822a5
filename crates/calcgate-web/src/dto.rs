use serde::Serialize;

pub use calcgate_core::{CalculationRequest, CalculationResult};

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
