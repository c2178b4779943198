//! Error handling for infergate
//!
//! Provides a unified error type and result type for use across all infergate
//! components.

/// Result type alias for infergate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for infergate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Admission denied by the per-client rate limiter
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Malformed request body, rejected before reaching the dispatcher
    #[error("Validation error: {0}")]
    Validation(String),

    /// The injected prediction function reported a typed failure
    #[error("Prediction failure ({kind}): {message}")]
    Prediction { kind: String, message: String },

    /// Readiness probe returned false or failed
    #[error("Readiness failure: {0}")]
    Readiness(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    /// Server/bind errors
    #[error("Server error: {0}")]
    Server(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration parsing errors
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a rate limit error
    pub fn rate_limit(msg: impl Into<String>) -> Self {
        Self::RateLimitExceeded(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a prediction failure
    pub fn prediction(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Prediction {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a readiness error
    pub fn readiness(msg: impl Into<String>) -> Self {
        Self::Readiness(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a server error
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    /// Get the error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::RateLimitExceeded(_) => "rate_limit",
            Error::Validation(_) => "validation",
            Error::Prediction { .. } => "prediction",
            Error::Readiness(_) => "readiness",
            Error::InvalidConfiguration(_) => "configuration",
            Error::Server(_) => "server",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Config(_) => "config",
            Error::Other(_) => "other",
        }
    }

    /// Stable name used as `error.type` in the error envelope
    pub fn envelope_type(&self) -> String {
        match self {
            Error::RateLimitExceeded(_) => "RateLimit".to_string(),
            Error::Validation(_) => "ValidationError".to_string(),
            Error::Prediction { kind, .. } => kind.clone(),
            Error::Readiness(_) => "Readiness".to_string(),
            _ => "Internal".to_string(),
        }
    }

    /// Convert to HTTP status code
    pub fn to_http_status(&self) -> u16 {
        match self {
            Error::RateLimitExceeded(_) => 429,
            Error::Validation(_) => 422,
            Error::Prediction { .. } => 500,
            Error::Readiness(_) => 503,
            Error::InvalidConfiguration(_) | Error::Config(_) => 400,
            _ => 500,
        }
    }

    /// Check if this error indicates a client-side problem
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::RateLimitExceeded(_) | Error::Validation(_) | Error::InvalidConfiguration(_)
        )
    }

    /// Check if this error indicates a server-side problem
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::rate_limit("client 10.0.0.1");
        assert!(matches!(err, Error::RateLimitExceeded(_)));
        assert_eq!(err.to_string(), "Rate limit exceeded: client 10.0.0.1");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::rate_limit("test").category(), "rate_limit");
        assert_eq!(Error::validation("test").category(), "validation");
        assert_eq!(Error::prediction("ValueError", "test").category(), "prediction");
        assert_eq!(Error::readiness("test").category(), "readiness");
    }

    #[test]
    fn test_envelope_types() {
        assert_eq!(Error::rate_limit("test").envelope_type(), "RateLimit");
        assert_eq!(Error::validation("test").envelope_type(), "ValidationError");
        assert_eq!(
            Error::prediction("MissingInput", "returns array required").envelope_type(),
            "MissingInput"
        );
        assert_eq!(Error::readiness("test").envelope_type(), "Readiness");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(Error::rate_limit("test").to_http_status(), 429);
        assert_eq!(Error::validation("test").to_http_status(), 422);
        assert_eq!(Error::prediction("ValueError", "test").to_http_status(), 500);
        assert_eq!(Error::readiness("test").to_http_status(), 503);
    }

    #[test]
    fn test_error_classification() {
        let client_err = Error::validation("bad body");
        assert!(client_err.is_client_error());
        assert!(!client_err.is_server_error());

        let server_err = Error::prediction("ValueError", "bad input");
        assert!(!server_err.is_client_error());
        assert!(server_err.is_server_error());
    }
}
