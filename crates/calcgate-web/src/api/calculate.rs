use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::dto::{CalculationRequest, CalculationResult};
use crate::error::AppError;

pub async fn calculate(
    body: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationResult>, AppError> {
    let Json(request) = body?;

    let result = calcgate_core::calculate(&request).map_err(|e| {
        tracing::debug!("Calculation rejected: {e}");
        AppError::from(e)
    })?;

    tracing::debug!(
        "Calculated X={}, Y={}, IsEqual={}",
        result.x,
        result.y,
        result.is_equal
    );
    Ok(Json(result))
}
