//! The calculator: validation and computation of `X`, `Y` and `IsEqual`.
//!
//! `X = X1 / X2 * X3` and `Y = Y1 / Y2 * Y3`, each rounded to `E` decimal
//! places. Everything here is a pure function of the request.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Operands of a single calculation, as received from the client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(rename = "X1")]
    pub x1: f64,
    #[serde(rename = "X2")]
    pub x2: f64,
    #[serde(rename = "X3")]
    pub x3: f64,
    #[serde(rename = "Y1")]
    pub y1: f64,
    #[serde(rename = "Y2")]
    pub y2: f64,
    #[serde(rename = "Y3")]
    pub y3: f64,
    /// Number of decimal places both results are rounded to.
    #[serde(rename = "E")]
    pub e: i32,
}

/// Outcome of a successful calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "IsEqual")]
    pub is_equal: bool,
}

/// Checks that `req` can be computed without dividing by zero.
///
/// # Errors
///
/// [`CoreError::InvalidArgument`] when `E` is negative, an operand is not
/// finite, or a divisor (`X2`, `Y2`) is zero.
pub fn validate(req: &CalculationRequest) -> CoreResult<()> {
    if req.e < 0 {
        return Err(CoreError::invalid("precision E must be non-negative"));
    }

    let operands = [
        ("X1", req.x1),
        ("X2", req.x2),
        ("X3", req.x3),
        ("Y1", req.y1),
        ("Y2", req.y2),
        ("Y3", req.y3),
    ];
    if let Some((name, _)) = operands.iter().find(|(_, v)| !v.is_finite()) {
        return Err(CoreError::invalid(format!("{name} must be a finite number")));
    }

    if req.x2 == 0.0 {
        return Err(CoreError::invalid("division by zero: X2 is zero"));
    }
    if req.y2 == 0.0 {
        return Err(CoreError::invalid("division by zero: Y2 is zero"));
    }
    Ok(())
}

/// Validates `req` and computes both results.
///
/// `IsEqual` compares the rounded values exactly, so `E` decides how close
/// `X` and `Y` must be to count as equal.
///
/// # Errors
///
/// Everything [`validate`] rejects, plus inputs whose quotient overflows.
pub fn calculate(req: &CalculationRequest) -> CoreResult<CalculationResult> {
    validate(req)?;

    let x = evaluate("X", req.x1, req.x2, req.x3, req.e)?;
    let y = evaluate("Y", req.y1, req.y2, req.y3, req.e)?;

    Ok(CalculationResult {
        x,
        y,
        is_equal: x == y,
    })
}

fn evaluate(label: &str, a: f64, b: f64, c: f64, precision: i32) -> CoreResult<f64> {
    let raw = a / b * c;
    if !raw.is_finite() {
        return Err(CoreError::invalid(format!(
            "{label} is out of range for a 64-bit float"
        )));
    }
    Ok(round_to(raw, precision))
}

/// Rounds `value` half away from zero to `precision` decimal places.
///
/// When `10^precision` scaling overflows, `value` has no digits left to
/// drop at that precision and is returned as is.
pub fn round_to(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // -0.0 serializes as "-0.0"; keep results sign-clean.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(x: (f64, f64, f64), y: (f64, f64, f64), e: i32) -> CalculationRequest {
        CalculationRequest {
            x1: x.0,
            x2: x.1,
            x3: x.2,
            y1: y.0,
            y2: y.1,
            y3: y.2,
            e,
        }
    }

    #[test]
    fn valid_request_computes_both_sides() {
        let result = calculate(&req((10.0, 2.0, 5.0), (15.0, 3.0, 5.0), 2)).unwrap();
        assert_eq!(result.x, 25.0);
        assert_eq!(result.y, 25.0);
        assert!(result.is_equal);
    }

    #[test]
    fn different_results_are_not_equal() {
        let result = calculate(&req((1.0, 3.0, 1.0), (2.0, 3.0, 1.0), 3)).unwrap();
        assert_eq!(result.x, 0.333);
        assert_eq!(result.y, 0.667);
        assert!(!result.is_equal);
    }

    #[test]
    fn precision_decides_equality() {
        // 1/3 vs 0.334: equal at 2 places, different at 3.
        let coarse = calculate(&req((1.0, 3.0, 1.0), (0.334, 1.0, 1.0), 2)).unwrap();
        assert!(coarse.is_equal);

        let fine = calculate(&req((1.0, 3.0, 1.0), (0.334, 1.0, 1.0), 3)).unwrap();
        assert!(!fine.is_equal);
    }

    #[test]
    fn zero_divisors_are_rejected() {
        let err = calculate(&req((10.0, 0.0, 5.0), (15.0, 0.0, 5.0), 2)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(ref m) if m.contains("X2")));

        let err = calculate(&req((10.0, 2.0, 5.0), (15.0, 0.0, 5.0), 2)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(ref m) if m.contains("Y2")));
    }

    #[test]
    fn negative_zero_divisor_is_rejected() {
        let err = validate(&req((1.0, -0.0, 1.0), (1.0, 1.0, 1.0), 0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn zero_multiplier_is_allowed() {
        let result = calculate(&req((10.0, 2.0, 0.0), (15.0, 3.0, 0.0), 2)).unwrap();
        assert_eq!(result.x, 0.0);
        assert!(result.is_equal);
    }

    #[test]
    fn negative_precision_is_rejected() {
        let err = validate(&req((1.0, 1.0, 1.0), (1.0, 1.0, 1.0), -1)).unwrap_err();
        assert_eq!(
            err,
            CoreError::invalid("precision E must be non-negative")
        );
    }

    #[test]
    fn non_finite_operand_is_rejected() {
        let err = validate(&req((f64::NAN, 1.0, 1.0), (1.0, 1.0, 1.0), 0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(ref m) if m.contains("X1")));
    }

    #[test]
    fn overflowing_quotient_is_rejected() {
        let err = calculate(&req((f64::MAX, 0.5, 2.0), (1.0, 1.0, 1.0), 0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(ref m) if m.starts_with("X ")));
    }

    #[test]
    fn calculation_is_pure() {
        let input = req((7.0, 3.0, 2.0), (9.0, 4.0, 1.5), 4);
        assert_eq!(calculate(&input).unwrap(), calculate(&input).unwrap());
    }

    #[test]
    fn round_to_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(1.2345, 2), 1.23);
        assert_eq!(round_to(123.0, 0), 123.0);
    }

    #[test]
    fn round_to_huge_precision_keeps_value() {
        assert_eq!(round_to(0.1, 400), 0.1);
    }

    #[test]
    fn round_to_normalizes_negative_zero() {
        let r = round_to(-0.001, 2);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn request_uses_wire_field_names() {
        let json = r#"{"X1":10.0,"X2":2.0,"X3":5.0,"Y1":15.0,"Y2":3.0,"Y3":5.0,"E":2}"#;
        let parsed: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, req((10.0, 2.0, 5.0), (15.0, 3.0, 5.0), 2));
    }

    #[test]
    fn result_uses_wire_field_names() {
        let value = serde_json::to_value(CalculationResult {
            x: 25.0,
            y: 25.0,
            is_equal: true,
        })
        .unwrap();
        assert_eq!(value["X"], 25.0);
        assert_eq!(value["Y"], 25.0);
        assert_eq!(value["IsEqual"], true);
    }
}
