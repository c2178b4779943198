//! Configuration management for infergate
//!
//! Provides a unified configuration system loading defaults first and
//! environment variables on top. The recognized environment variables are the
//! deployment surface of the contract layer: `RATE_LIMIT_PER_MIN`,
//! `MODEL_NAME`, `MODEL_VERSION`, `GIT_SHA`, `DOCKER_IMAGE`,
//! `TRAINED_WEIGHTS`, and `WEIGHTS_FORMAT`.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Main configuration structure for an infergate service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Requests allowed per client per minute
    pub rate_limit_per_min: u32,

    /// Served model name
    pub model_name: String,

    /// Served model version
    pub model_version: String,

    /// Source revision the service was built from
    pub git_sha: String,

    /// Container image the service runs in
    pub docker_image: String,

    /// URI of the trained weights; presence implies the model is trained
    pub trained_weights: Option<String>,

    /// Serialized weights format (e.g. ".pt")
    pub weights_format: String,
}

impl GateConfig {
    /// Load configuration with precedence:
    /// 1. Environment variables (highest)
    /// 2. Defaults (lowest)
    pub fn load() -> Result<Self> {
        Self::load_with_defaults(Self::default())
    }

    /// Load configuration with service-supplied defaults under the
    /// environment layer
    pub fn load_with_defaults(defaults: Self) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::Environment::default().try_parsing(true));

        let config = builder.build()?;
        let parsed: Self = config.try_deserialize()?;

        parsed.validate()?;

        Ok(parsed)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit_per_min == 0 {
            return Err(crate::Error::config(
                "rate_limit_per_min must be greater than 0",
            ));
        }

        if self.model_name.is_empty() {
            return Err(crate::Error::config("model_name must not be empty"));
        }

        if self.model_version.is_empty() {
            return Err(crate::Error::config("model_version must not be empty"));
        }

        Ok(())
    }

    /// The model identity stamped on responses and headers
    pub fn identity(&self) -> ModelIdentity {
        ModelIdentity::new(&self.model_name, &self.model_version)
    }

    /// Whether trained weights are configured
    pub fn trained(&self) -> bool {
        self.trained_weights.is_some()
    }

    /// URI of the trained weights, empty if none are configured
    pub fn weights_uri(&self) -> String {
        self.trained_weights.clone().unwrap_or_default()
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_min: 120,
            model_name: "model".to_string(),
            model_version: "0.1.0".to_string(),
            git_sha: "dev".to_string(),
            docker_image: "local/dev".to_string(),
            trained_weights: None,
            weights_format: String::new(),
        }
    }
}

/// Name and version of the served model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIdentity {
    /// Model name
    pub name: String,

    /// Model version
    pub version: String,
}

impl ModelIdentity {
    /// Create a new model identity
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GateConfig::default();
        assert_eq!(config.rate_limit_per_min, 120);
        assert_eq!(config.model_name, "model");
        assert_eq!(config.model_version, "0.1.0");
        assert_eq!(config.git_sha, "dev");
        assert!(!config.trained());
        assert_eq!(config.weights_uri(), "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = GateConfig::default();

        config.rate_limit_per_min = 0;
        assert!(config.validate().is_err());

        config.rate_limit_per_min = 60;
        config.model_name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_trained_follows_weights_presence() {
        let mut config = GateConfig::default();
        assert!(!config.trained());

        config.trained_weights = Some("/app/models/model.pt".to_string());
        assert!(config.trained());
        assert_eq!(config.weights_uri(), "/app/models/model.pt");
    }

    #[test]
    fn test_model_identity() {
        let identity = GateConfig::default().identity();
        assert_eq!(identity, ModelIdentity::new("model", "0.1.0"));
    }
}
