//! Service meta descriptor
//!
//! A static-plus-environment-derived description of the deployed model:
//! identity, source revision, trained-weights indicator, and the runtime the
//! service executes in. No dynamic computation beyond timestamp formatting.

use gate_core::GateConfig;
use serde::{Deserialize, Serialize};

/// Runtime the service executes in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeDescriptor {
    /// Rust toolchain the service was deployed with
    pub rust: String,

    /// Operating system and architecture
    pub os: String,

    /// Container image the service runs in
    pub docker_image: String,
}

/// Descriptor returned by the meta probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaDescriptor {
    /// Served model name
    pub model: String,

    /// Served model version
    pub model_version: String,

    /// Source revision the service was built from
    pub git_sha: String,

    /// Timestamp of this descriptor, RFC3339
    pub last_updated: String,

    /// Whether trained weights are configured
    pub trained: bool,

    /// Serialized weights format (e.g. ".pt")
    pub weights_format: String,

    /// URI of the trained weights, empty if none
    pub weights_uri: String,

    /// Runtime description
    pub runtime: RuntimeDescriptor,
}

impl MetaDescriptor {
    /// Build the descriptor from configuration
    pub fn from_config(config: &GateConfig) -> Self {
        Self {
            model: config.model_name.clone(),
            model_version: config.model_version.clone(),
            git_sha: config.git_sha.clone(),
            last_updated: chrono::Utc::now().to_rfc3339(),
            trained: config.trained(),
            weights_format: config.weights_format.clone(),
            weights_uri: config.weights_uri(),
            runtime: RuntimeDescriptor {
                rust: std::env::var("RUST_VERSION").unwrap_or_else(|_| "1.x".to_string()),
                os: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
                docker_image: config.docker_image.clone(),
            },
        }
    }
}
