//! Axum application for the serving contract
//!
//! One request to the prediction endpoint flows: admission check (denied: 429
//! envelope, recorded, predictor untouched) -> trace id -> body validation
//! (malformed: 422 envelope) -> dispatch. The probes (`/health`, `/ready`,
//! `/meta`) and the metrics exposition (`/metrics`) are thin reads over the
//! injected components. All shared state lives in [`AppState`] and is
//! explicitly constructed - no process globals.

use crate::dispatch::{Dispatcher, PREDICT_ROUTE};
use crate::meta::MetaDescriptor;
use crate::trace;
use crate::{HttpError, Result};

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use gate_core::{ErrorResponse, GateConfig, ModelIdentity, PredictRequest, Predictor};
use gate_limit::RateLimiter;
use gate_metrics::HttpMetrics;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Optional readiness predicate injected by the surrounding application
///
/// Absent probe means readiness is assumed. A probe error maps to not-ready.
pub type ReadinessProbe = Arc<dyn Fn() -> anyhow::Result<bool> + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    limiter: Arc<RateLimiter>,
    metrics: HttpMetrics,
    dispatcher: Arc<Dispatcher>,
    config: GateConfig,
    ready_probe: Option<ReadinessProbe>,
    started: String,
}

/// HTTP server for the serving-contract surface
#[derive(Clone)]
pub struct GateServer {
    state: AppState,
}

impl GateServer {
    /// Create a server around a predictor and configuration
    pub fn new(config: GateConfig, predictor: Arc<dyn Predictor>) -> Result<Self> {
        config.validate()?;

        let metrics = HttpMetrics::new()?;
        let limiter = Arc::new(RateLimiter::new(config.rate_limit_per_min));
        let dispatcher = Arc::new(Dispatcher::new(
            predictor,
            config.identity(),
            metrics.clone(),
        ));

        Ok(Self {
            state: AppState {
                limiter,
                metrics,
                dispatcher,
                config,
                ready_probe: None,
                started: chrono::Utc::now().to_rfc3339(),
            },
        })
    }

    /// Inject a readiness predicate
    pub fn with_ready_probe(
        mut self,
        probe: impl Fn() -> anyhow::Result<bool> + Send + Sync + 'static,
    ) -> Self {
        self.state.ready_probe = Some(Arc::new(probe));
        self
    }

    /// The metrics recorder backing this server
    pub fn metrics(&self) -> &HttpMetrics {
        &self.state.metrics
    }

    /// Build the axum router with all contract routes
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .route("/meta", get(meta_handler))
            .route("/metrics", get(metrics_handler))
            .route("/predict", post(predict_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve the contract surface on the given address
    pub async fn serve(&self, bind_addr: &str) -> Result<()> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| HttpError::Configuration(format!("Invalid bind address: {}", e)))?;

        info!(
            model = %self.state.config.model_name,
            version = %self.state.config.model_version,
            "Starting contract server on {}",
            addr
        );

        let app = self.router();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| HttpError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| HttpError::Server(format!("HTTP server failed: {}", e)))?;

        Ok(())
    }
}

// HTTP handler functions

/// Constant-true health probe
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// Readiness probe
async fn ready_handler(State(state): State<AppState>) -> Response {
    let ready = match &state.ready_probe {
        None => true,
        Some(probe) => match probe() {
            Ok(ready) => ready,
            Err(e) => {
                warn!("readiness probe failed: {}", e);
                false
            }
        },
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({ "ready": ready, "started": state.started })),
    )
        .into_response()
}

/// Meta descriptor endpoint
async fn meta_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(MetaDescriptor::from_config(&state.config))
}

/// Metrics endpoint (Prometheus text exposition)
async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(text) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            text,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics").into_response()
        }
    }
}

/// Prediction endpoint
async fn predict_handler(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    payload: std::result::Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let client = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| trace::UNKNOWN_CLIENT.to_string());
    let trace_id = trace::trace_id(&client, PREDICT_ROUTE);

    if !state.limiter.allow(&client) {
        state.metrics.record_request(PREDICT_ROUTE, 429);
        let envelope = ErrorResponse::new(&trace_id, "RateLimit", "Too many requests");
        return envelope_response(StatusCode::TOO_MANY_REQUESTS, &trace_id, None, &envelope);
    }

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            state.metrics.record_request(PREDICT_ROUTE, 422);
            let envelope =
                ErrorResponse::new(&trace_id, "ValidationError", rejection.body_text());
            return envelope_response(StatusCode::UNPROCESSABLE_ENTITY, &trace_id, None, &envelope);
        }
    };

    let outcome = state.dispatcher.dispatch(&trace_id, &request);
    let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    envelope_response(
        status,
        &trace_id,
        Some(state.dispatcher.identity()),
        &outcome.body,
    )
}

/// Attach the envelope body plus correlation and model headers
fn envelope_response<T: serde::Serialize>(
    status: StatusCode,
    trace_id: &str,
    identity: Option<&ModelIdentity>,
    body: &T,
) -> Response {
    let mut response = (status, Json(body)).into_response();
    let headers = response.headers_mut();

    if let Ok(value) = HeaderValue::from_str(trace_id) {
        headers.insert("x-trace-id", value);
    }

    if let Some(identity) = identity {
        if let Ok(value) = HeaderValue::from_str(&identity.name) {
            headers.insert("x-model", value);
        }
        if let Ok(value) = HeaderValue::from_str(&identity.version) {
            headers.insert("x-model-version", value);
        }
    }

    response
}
