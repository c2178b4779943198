//! Predict dispatcher
//!
//! The composition root for one prediction request: start a monotonic timer,
//! invoke the injected predictor, convert its outcome into the typed envelope,
//! and record the request and latency samples. A predictor failure is always
//! converted to the error envelope; nothing propagates past this boundary.
//! One synchronous attempt, no retry.

use gate_core::{ErrorResponse, ModelIdentity, PredictRequest, PredictResponse, Predictor};
use gate_metrics::HttpMetrics;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Route label the dispatcher records against
pub const PREDICT_ROUTE: &str = "/predict";

/// Outcome of one dispatch: an envelope and the status to send it with
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// HTTP status code (200 on success, 500 on prediction failure)
    pub status: u16,

    /// Serialized success or error envelope
    pub body: Value,
}

/// Orchestrates one request's lifecycle around the injected predictor
pub struct Dispatcher {
    predictor: Arc<dyn Predictor>,
    identity: ModelIdentity,
    metrics: HttpMetrics,
}

impl Dispatcher {
    /// Create a dispatcher around a predictor
    pub fn new(predictor: Arc<dyn Predictor>, identity: ModelIdentity, metrics: HttpMetrics) -> Self {
        Self {
            predictor,
            identity,
            metrics,
        }
    }

    /// The model identity stamped on envelopes and headers
    pub fn identity(&self) -> &ModelIdentity {
        &self.identity
    }

    /// Run one prediction and build its envelope
    pub fn dispatch(&self, trace_id: &str, request: &PredictRequest) -> DispatchOutcome {
        let started = Instant::now();
        let outcome = self.predictor.predict(&request.params, &request.data);
        let elapsed_secs = started.elapsed().as_secs_f64();
        let timing_ms = round3(elapsed_secs * 1000.0);

        let (status, body) = match outcome {
            Ok(result) => {
                debug!(trace_id, timing_ms, "prediction succeeded");
                let envelope = PredictResponse::new(trace_id, &self.identity, timing_ms, result);
                (200, serde_json::to_value(envelope))
            }
            Err(failure) => {
                warn!(trace_id, kind = %failure.kind, "prediction failed: {}", failure.message);
                let envelope = ErrorResponse::new(trace_id, &failure.kind, &failure.message)
                    .with_details(failure.details);
                (500, serde_json::to_value(envelope))
            }
        };

        self.metrics.record_request(PREDICT_ROUTE, status);
        self.metrics.observe_latency(PREDICT_ROUTE, elapsed_secs);

        DispatchOutcome {
            status,
            body: body.unwrap_or(Value::Null),
        }
    }
}

/// Round to 3 decimal places
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
