//! # gate-http
//!
//! HTTP serving contract for infergate.
//!
//! This crate provides:
//! - Per-request trace-id generation for log/metric correlation
//! - The predict dispatcher orchestrating admission, timing, and envelopes
//!   around an injected [`gate_core::Predictor`]
//! - Readiness, health, meta, and metrics probes
//! - The axum application and server serving the whole contract surface
//!
//! ## Example
//!
//! ```rust,no_run
//! use gate_core::{FnPredictor, GateConfig};
//! use gate_http::GateServer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GateConfig::default();
//!     let predictor = Arc::new(FnPredictor::new(|_params, data| Ok(data.clone())));
//!
//!     let server = GateServer::new(config, predictor)?;
//!     server.serve("0.0.0.0:8080").await?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

pub mod dispatch;
pub mod meta;
pub mod server;
pub mod trace;

// Re-export main types
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use meta::{MetaDescriptor, RuntimeDescriptor};
pub use server::{AppState, GateServer, ReadinessProbe};

/// Result type for serving operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// Errors that can occur while serving the contract surface
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Core error: {0}")]
    Core(#[from] gate_core::Error),

    #[error("Metrics error: {0}")]
    Metrics(#[from] gate_metrics::MetricsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HttpError {
    /// Convert to HTTP status code
    pub fn to_status_code(&self) -> u16 {
        match self {
            HttpError::Configuration(_) => 500,
            HttpError::Server(_) => 500,
            HttpError::Core(e) => e.to_http_status(),
            HttpError::Metrics(_) => 500,
            HttpError::Io(_) => 500,
            HttpError::Json(_) => 400,
        }
    }
}
