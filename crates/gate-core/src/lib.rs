//! # gate-core
//!
//! Core types, traits, and utilities for infergate - a serving-contract layer
//! for model-inference HTTP services.
//!
//! This crate provides the foundational data structures and interfaces that are
//! shared across all other infergate components. It includes:
//!
//! - The success/error response envelopes returned by every contract endpoint
//! - The `Predictor` capability implemented once per concrete service
//! - Configuration schema and environment-variable loading
//! - Error handling types and utilities

pub mod config;
pub mod envelope;
pub mod error;
pub mod predictor;

// Re-export commonly used types at the crate root
pub use config::{GateConfig, ModelIdentity};
pub use envelope::{ErrorInfo, ErrorResponse, PredictRequest, PredictResponse};
pub use error::{Error, Result};
pub use predictor::{FnPredictor, PredictFailure, PredictResult, Predictor};
