//! # volsvc
//!
//! Exponentially-weighted volatility service built on the infergate contract.
//!
//! The predictor folds a return series through the recurrence
//! `var = alpha * var + (1 - alpha) * r^2` starting from zero variance and
//! reports the next-step volatility `sigma_t1 = sqrt(var)` together with a
//! 95% value-at-risk estimate, both rounded to 6 decimals.

use gate_core::{PredictFailure, PredictResult, Predictor};
use serde_json::{json, Map, Value};

/// Smoothing factor used when the request does not supply one
pub const DEFAULT_ALPHA: f64 = 0.94;

/// Exponentially-weighted moving-average volatility predictor
///
/// Expects `data.returns` (non-empty array of numbers, required) and
/// `data.alpha` (optional smoothing factor).
#[derive(Debug, Clone)]
pub struct EwmaVolatility {
    default_alpha: f64,
}

impl EwmaVolatility {
    /// Create a predictor with a custom default smoothing factor
    pub fn new(default_alpha: f64) -> Self {
        Self { default_alpha }
    }
}

impl Default for EwmaVolatility {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl Predictor for EwmaVolatility {
    fn predict(&self, _params: &Map<String, Value>, data: &Value) -> PredictResult {
        let returns = match data.get("returns").and_then(Value::as_array) {
            Some(returns) if !returns.is_empty() => returns,
            _ => {
                return Err(PredictFailure::new(
                    "MissingInput",
                    "returns array required",
                ))
            }
        };

        let alpha = match data.get("alpha") {
            None => self.default_alpha,
            Some(value) => value.as_f64().ok_or_else(|| {
                PredictFailure::new("InvalidInput", "alpha must be a number")
            })?,
        };

        let mut var = 0.0;
        for (index, entry) in returns.iter().enumerate() {
            let r = entry.as_f64().ok_or_else(|| {
                PredictFailure::new(
                    "InvalidInput",
                    format!("returns[{}] is not a number", index),
                )
            })?;
            var = alpha * var + (1.0 - alpha) * r * r;
        }

        let sigma = var.sqrt();

        Ok(json!({
            "sigma_t1": round6(sigma),
            "VaR": { "0.95": round6(-1.65 * sigma) },
        }))
    }
}

/// Round to 6 decimal places
fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
