//! Per-request trace-id generation
//!
//! Trace ids correlate a response with server-side logs and metric samples.
//! They are not a security primitive: the goal is high-probability uniqueness,
//! not collision resistance. The digest input is the current high-resolution
//! timestamp, the client address (or a fixed sentinel), the request path, and
//! the process id.

use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Sentinel used when the client address is unavailable
pub const UNKNOWN_CLIENT: &str = "x";

/// Number of hex characters in a trace id
pub const TRACE_ID_LEN: usize = 16;

/// Generate a trace id for a request from `client` to `path`
pub fn trace_id(client: &str, path: &str) -> String {
    let timestamp_nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    trace_id_at(timestamp_nanos, client, path, std::process::id())
}

/// Digest the trace input material; split out so tests can pin the clock
fn trace_id_at(timestamp_nanos: u128, client: &str, path: &str, pid: u32) -> String {
    let material = format!("{}:{}:{}:{}", timestamp_nanos, client, path, pid);
    let digest = Sha256::digest(material.as_bytes());
    hex::encode(digest)[..TRACE_ID_LEN].to_string()
}
