//! # gate-limit
//!
//! Per-client admission control for infergate.
//!
//! This crate provides a fixed-window rate limiter that decides whether a
//! request from a given client key may proceed, using a fixed per-minute
//! quota. It owns the only piece of admission state in the system and is safe
//! for concurrent invocation by multiple in-flight requests.

pub mod limiter;

// Re-export main types
pub use limiter::{LimiterStats, RateLimiter};
