//! Fixed-window per-client rate limiter
//!
//! Time is bucketed into minute-granularity windows (`unix_seconds / 60`).
//! Each client key holds at most one window entry; a request in a new window
//! replaces the entry and resets the count. Within a window, a request is
//! allowed iff the stored count is strictly below the limit, and the count is
//! incremented only on allow - a denied request never consumes quota.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Window entry tracked per client key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClientWindow {
    /// Minute bucket the count belongs to
    window: u64,

    /// Requests allowed so far in this window
    count: u32,
}

/// Admission statistics
#[derive(Debug, Default)]
pub struct LimiterStats {
    /// Requests admitted
    pub allowed: AtomicU64,

    /// Requests rejected
    pub denied: AtomicU64,
}

/// Fixed-window per-client admission controller
///
/// A single mutex guards the window map; two concurrent requests from the
/// same client serialize on it, so the count can never race past the limit.
#[derive(Debug)]
pub struct RateLimiter {
    /// Requests allowed per client per minute
    limit: u32,

    /// One window entry per client key
    windows: Mutex<HashMap<String, ClientWindow>>,

    /// Admission statistics
    stats: LimiterStats,
}

impl RateLimiter {
    /// Create a limiter with the given per-minute quota
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            windows: Mutex::new(HashMap::new()),
            stats: LimiterStats::default(),
        }
    }

    /// The configured per-minute quota
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Admission statistics
    pub fn stats(&self) -> &LimiterStats {
        &self.stats
    }

    /// Decide whether a request from `client_key` may proceed now
    pub fn allow(&self, client_key: &str) -> bool {
        let now_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.allow_at(client_key, now_secs)
    }

    /// Decide admission against an explicit clock reading
    ///
    /// Exposed so tests can cross window boundaries deterministically.
    pub fn allow_at(&self, client_key: &str, now_secs: u64) -> bool {
        let window = now_secs / 60;
        let mut windows = self.windows.lock().expect("limiter mutex poisoned");

        let entry = windows.entry(client_key.to_string()).or_insert(ClientWindow {
            window,
            count: 0,
        });

        if entry.window != window {
            entry.window = window;
            entry.count = 0;
        }

        if entry.count < self.limit {
            entry.count += 1;
            self.stats.allowed.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            self.stats.denied.fetch_add(1, Ordering::Relaxed);
            debug!(client = client_key, limit = self.limit, "admission denied");
            false
        }
    }

    /// Number of client keys currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().expect("limiter mutex poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    const T0: u64 = 1_700_000_040; // arbitrary fixed instant, mid-window

    #[test]
    fn test_allows_up_to_limit_then_denies() {
        let limiter = RateLimiter::new(5);

        for _ in 0..5 {
            assert!(limiter.allow_at("10.0.0.1", T0));
        }
        assert!(!limiter.allow_at("10.0.0.1", T0));
        assert!(!limiter.allow_at("10.0.0.1", T0 + 10));
    }

    #[test]
    fn test_window_rollover_resets_count() {
        let limiter = RateLimiter::new(2);

        assert!(limiter.allow_at("10.0.0.1", T0));
        assert!(limiter.allow_at("10.0.0.1", T0));
        assert!(!limiter.allow_at("10.0.0.1", T0));

        // Next minute window: the previously denied client succeeds again.
        assert!(limiter.allow_at("10.0.0.1", T0 + 60));
        assert!(limiter.allow_at("10.0.0.1", T0 + 60));
        assert!(!limiter.allow_at("10.0.0.1", T0 + 60));
    }

    #[test]
    fn test_denied_calls_do_not_consume_quota() {
        let limiter = RateLimiter::new(1);

        assert!(limiter.allow_at("10.0.0.1", T0));

        // Hammering a denied client must not change behavior after rollover.
        for _ in 0..100 {
            assert!(!limiter.allow_at("10.0.0.1", T0 + 1));
        }

        assert!(limiter.allow_at("10.0.0.1", T0 + 60));
        assert_eq!(limiter.stats().denied.load(Ordering::Relaxed), 100);
        assert_eq!(limiter.stats().allowed.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = RateLimiter::new(1);

        assert!(limiter.allow_at("10.0.0.1", T0));
        assert!(!limiter.allow_at("10.0.0.1", T0));

        // A different client has its own window entry.
        assert!(limiter.allow_at("10.0.0.2", T0));
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn test_one_entry_per_client() {
        let limiter = RateLimiter::new(10);

        for offset in [0, 1, 59, 60, 120, 600] {
            limiter.allow_at("10.0.0.1", T0 + offset);
        }
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_concurrent_admission_respects_limit() {
        let limiter = Arc::new(RateLimiter::new(50));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let limiter = Arc::clone(&limiter);
            handles.push(std::thread::spawn(move || {
                let mut admitted = 0u32;
                for _ in 0..25 {
                    if limiter.allow_at("10.0.0.1", T0) {
                        admitted += 1;
                    }
                }
                admitted
            }));
        }

        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 50);
    }
}
