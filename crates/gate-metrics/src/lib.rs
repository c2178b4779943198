//! # gate-metrics
//!
//! Request metrics for infergate - Prometheus recording and text exposition.
//!
//! This crate provides the metrics recorder shared by the serving-contract
//! layer:
//! - Per-route request counters, labeled by status code
//! - Per-route latency histograms
//! - Text exposition for pull-based scraping at /metrics

pub mod recorder;

// Re-export main types
pub use recorder::HttpMetrics;

// Error handling
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
