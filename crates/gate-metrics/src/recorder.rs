//! HTTP request metrics recorder
//!
//! Counters and histograms accumulate for the process lifetime and are reset
//! only by restart. The recorder hands out cheap clones - the underlying
//! prometheus vectors share state - so every request path records into the
//! same series.

use crate::{MetricsError, Result};
use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};

/// Request count and latency metrics for the serving-contract layer
#[derive(Debug, Clone)]
pub struct HttpMetrics {
    /// Request count keyed by (route, status)
    requests: CounterVec,

    /// Request latency in seconds keyed by route
    latency: HistogramVec,

    /// Owning registry, scraped by [`HttpMetrics::render`]
    registry: Registry,
}

impl HttpMetrics {
    /// Create a recorder with its own registry
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let requests = CounterVec::new(
            Opts::new("http_requests_total", "HTTP request count"),
            &["route", "status"],
        )?;
        let latency = HistogramVec::new(
            HistogramOpts::new("http_request_latency_seconds", "HTTP request latency (s)"),
            &["route"],
        )?;

        registry
            .register(Box::new(requests.clone()))
            .map_err(|e| MetricsError::Registry(format!("Failed to register counter: {}", e)))?;
        registry
            .register(Box::new(latency.clone()))
            .map_err(|e| MetricsError::Registry(format!("Failed to register histogram: {}", e)))?;

        Ok(Self {
            requests,
            latency,
            registry,
        })
    }

    /// Count one request against (route, status)
    pub fn record_request(&self, route: &str, status: u16) {
        self.requests
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Observe one request latency for a route, in seconds
    pub fn observe_latency(&self, route: &str, seconds: f64) {
        self.latency.with_label_values(&[route]).observe(seconds);
    }

    /// Current count for (route, status); zero if the series does not exist yet
    pub fn request_count(&self, route: &str, status: u16) -> f64 {
        self.requests
            .get_metric_with_label_values(&[route, &status.to_string()])
            .map(|c| c.get())
            .unwrap_or(0.0)
    }

    /// Render all accumulated series as Prometheus text exposition
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| MetricsError::Export(format!("Failed to encode metrics: {}", e)))?;

        String::from_utf8(buffer)
            .map_err(|e| MetricsError::Export(format!("Failed to convert metrics to string: {}", e)))
    }

    /// Access the underlying registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
