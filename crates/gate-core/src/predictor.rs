//! The prediction capability implemented by concrete services
//!
//! The contract layer is generic over a single-method capability and never
//! inspects its internals. Prediction is synchronous and best-effort: one
//! attempt, no timeout, no retry. Failures are values, not panics - the
//! dispatcher maps a [`PredictFailure`] deterministically to the error
//! envelope.

use serde_json::{Map, Value};
use std::fmt;

/// Result type for predictor invocations
pub type PredictResult = std::result::Result<Value, PredictFailure>;

/// Typed failure reported by a predictor
#[derive(Debug, Clone, PartialEq)]
pub struct PredictFailure {
    /// Stable name identifying the failure's kind
    pub kind: String,

    /// Human-readable description
    pub message: String,

    /// Additional structured context, possibly empty
    pub details: Map<String, Value>,
}

impl PredictFailure {
    /// Create a new failure with a kind and message
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            details: Map::new(),
        }
    }

    /// Attach structured details to the failure
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = details;
        self
    }
}

impl fmt::Display for PredictFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for PredictFailure {}

/// Single-method capability invoked by the predict dispatcher
///
/// Implemented once per concrete service. `params` carries client-supplied
/// options; `data` is the domain payload whose shape only the implementation
/// understands.
pub trait Predictor: Send + Sync {
    /// Run one prediction over the given parameters and payload
    fn predict(&self, params: &Map<String, Value>, data: &Value) -> PredictResult;
}

/// Adapter turning a plain closure into a [`Predictor`]
///
/// Mostly useful in tests and small services that have no state to carry.
pub struct FnPredictor<F>(F);

impl<F> FnPredictor<F>
where
    F: Fn(&Map<String, Value>, &Value) -> PredictResult + Send + Sync,
{
    /// Wrap a closure as a predictor
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&Map<String, Value>, &Value) -> PredictResult + Send + Sync,
{
    fn predict(&self, params: &Map<String, Value>, data: &Value) -> PredictResult {
        (self.0)(params, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_display() {
        let failure = PredictFailure::new("MissingInput", "returns array required");
        assert_eq!(failure.to_string(), "MissingInput: returns array required");
    }

    #[test]
    fn test_failure_details() {
        let mut details = Map::new();
        details.insert("field".to_string(), json!("returns"));

        let failure = PredictFailure::new("MissingInput", "returns array required")
            .with_details(details);
        assert_eq!(failure.details["field"], json!("returns"));
    }

    #[test]
    fn test_fn_predictor() {
        let predictor = FnPredictor::new(|params, data| {
            if data.is_null() {
                return Err(PredictFailure::new("MissingInput", "data required"));
            }
            Ok(json!({ "echoed": data, "param_count": params.len() }))
        });

        let params = Map::new();
        let ok = predictor.predict(&params, &json!({"x": 1})).unwrap();
        assert_eq!(ok["param_count"], json!(0));

        let err = predictor.predict(&params, &Value::Null).unwrap_err();
        assert_eq!(err.kind, "MissingInput");
    }
}
