//! Response envelopes for the serving contract
//!
//! Every contract endpoint wraps its payload in one of two envelopes: a
//! success envelope carrying the prediction result with timing and model
//! metadata, or an error envelope carrying a typed failure. Both carry the
//! per-request trace id, identical to the `X-Trace-Id` response header.

use crate::config::ModelIdentity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body accepted by the prediction endpoint
///
/// `data` is required; its internal shape is defined by the domain predictor,
/// not by this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Optional model override requested by the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Prediction parameters, passed through to the predictor
    #[serde(default)]
    pub params: Map<String, Value>,

    /// Domain-specific input payload
    pub data: Value,
}

/// Success envelope for the prediction endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Always true for the success envelope
    pub ok: bool,

    /// Per-request correlation id
    pub trace_id: String,

    /// Served model name
    pub model: String,

    /// Served model version
    pub model_version: String,

    /// Wall-clock time spent in the predictor, milliseconds, 3 decimals
    pub timing_ms: f64,

    /// Predictor output, passed through verbatim
    pub result: Value,

    /// Non-fatal notes accumulated during prediction
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl PredictResponse {
    /// Build a success envelope
    pub fn new(
        trace_id: impl Into<String>,
        identity: &ModelIdentity,
        timing_ms: f64,
        result: Value,
    ) -> Self {
        Self {
            ok: true,
            trace_id: trace_id.into(),
            model: identity.name.clone(),
            model_version: identity.version.clone(),
            timing_ms,
            result,
            warnings: Vec::new(),
        }
    }
}

/// Typed failure carried inside the error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable name identifying the failure's kind
    #[serde(rename = "type")]
    pub kind: String,

    /// Human-readable description
    pub message: String,

    /// Additional structured context, possibly empty
    #[serde(default)]
    pub details: Map<String, Value>,
}

/// Error envelope for the prediction endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false for the error envelope
    pub ok: bool,

    /// Per-request correlation id
    pub trace_id: String,

    /// The failure that produced this response
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Build an error envelope
    pub fn new(
        trace_id: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ok: false,
            trace_id: trace_id.into(),
            error: ErrorInfo {
                kind: kind.into(),
                message: message.into(),
                details: Map::new(),
            },
        }
    }

    /// Attach structured details to the failure
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.error.details = details;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predict_request_requires_data() {
        let missing: Result<PredictRequest, _> = serde_json::from_value(json!({
            "params": {"horizon": 1}
        }));
        assert!(missing.is_err());

        let ok: PredictRequest = serde_json::from_value(json!({
            "data": {"returns": [0.01]}
        }))
        .unwrap();
        assert!(ok.model.is_none());
        assert!(ok.params.is_empty());
    }

    #[test]
    fn test_success_envelope_shape() {
        let identity = ModelIdentity::new("garch", "1.0.0");
        let resp = PredictResponse::new("a1b2c3d4e5f60718", &identity, 1.234, json!({"sigma_t1": 0.02}));

        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["ok"], json!(true));
        assert_eq!(value["trace_id"], json!("a1b2c3d4e5f60718"));
        assert_eq!(value["model"], json!("garch"));
        assert_eq!(value["model_version"], json!("1.0.0"));
        assert_eq!(value["timing_ms"], json!(1.234));
        assert_eq!(value["warnings"], json!([]));
    }

    #[test]
    fn test_error_envelope_shape() {
        let resp = ErrorResponse::new("a1b2c3d4e5f60718", "RateLimit", "Too many requests");

        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["ok"], json!(false));
        assert_eq!(value["error"]["type"], json!("RateLimit"));
        assert_eq!(value["error"]["message"], json!("Too many requests"));
        assert_eq!(value["error"]["details"], json!({}));
    }

    #[test]
    fn test_error_envelope_details() {
        let mut details = Map::new();
        details.insert("field".to_string(), json!("data"));

        let resp = ErrorResponse::new("a1b2c3d4e5f60718", "ValidationError", "data is required")
            .with_details(details);
        assert_eq!(resp.error.details["field"], json!("data"));
    }
}
