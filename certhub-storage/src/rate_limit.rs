use certhub_models::settings::RateLimit;
use moka::future::Cache;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Fixed-window request limiter keyed by client IP.
///
/// Counters live in an in-memory cache whose entry TTL is the window; a
/// counter expiring is what resets the window. Per-instance state only, which
/// is the intended scope for abuse damping on the public endpoints.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    counters: Cache<String, Arc<AtomicU32>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimit) -> Self {
        RateLimiter {
            max_requests: config.max_requests,
            counters: Cache::builder()
                .max_capacity(100_000)
                .time_to_live(Duration::from_secs(config.window_secs))
                .build(),
        }
    }

    /// Count a request against the key. Returns false once the key has
    /// exhausted its budget for the current window.
    pub async fn check(&self, key: &str) -> bool {
        let counter = self
            .counters
            .get_with(key.to_string(), async { Arc::new(AtomicU32::new(0)) })
            .await;
        let used = counter.fetch_add(1, Ordering::Relaxed);
        if used >= self.max_requests {
            debug!(key, used, "rate limit exceeded");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_enforced_per_key() {
        let limiter = RateLimiter::new(&RateLimit {
            max_requests: 3,
            window_secs: 60,
        });

        for _ in 0..3 {
            assert!(limiter.check("1.2.3.4").await);
        }
        assert!(!limiter.check("1.2.3.4").await);
        // Other keys are unaffected.
        assert!(limiter.check("5.6.7.8").await);
    }
}
