//! Request rate limiting for the chat endpoint.
//!
//! Sliding-window limiter keyed by client: each client key holds the
//! timestamps of its recent requests, pruned on every check.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Request timestamps for a single client within the current window.
#[derive(Debug, Default)]
struct RequestWindow {
    requests: Vec<Instant>,
}

impl RequestWindow {
    /// Drops entries older than the window, records the new request, and
    /// returns the resulting count.
    fn record(&mut self, window: Duration) -> usize {
        let now = Instant::now();
        let window_start = now - window;
        self.requests.retain(|&instant| instant > window_start);
        self.requests.push(now);
        self.requests.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: usize },
    Limited { retry_after_secs: u64 },
}

#[derive(Clone, Debug)]
pub struct RateLimiter {
    windows: Arc<RwLock<HashMap<String, RequestWindow>>>,
    window: Duration,
    limit: usize,
}

impl RateLimiter {
    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit as usize, Duration::from_secs(60))
    }

    pub fn new(limit: usize, window: Duration) -> Self {
        Self { windows: Arc::new(RwLock::new(HashMap::new())), window, limit }
    }

    pub async fn check(&self, client_key: &str) -> RateDecision {
        let mut windows = self.windows.write().await;
        let entry = windows.entry(client_key.to_string()).or_default();
        let request_count = entry.record(self.window);

        if request_count > self.limit {
            warn!(
                client_key = %client_key,
                request_count,
                limit = self.limit,
                "request rate limit exceeded"
            );
            return RateDecision::Limited { retry_after_secs: self.window.as_secs() };
        }

        let remaining = self.limit - request_count;
        debug!(client_key = %client_key, remaining, "request within rate limit");
        RateDecision::Allowed { remaining }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::limiter::{RateDecision, RateLimiter};

    #[tokio::test]
    async fn requests_within_limit_are_allowed() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));

        assert_eq!(limiter.check("10.0.0.1").await, RateDecision::Allowed { remaining: 1 });
        assert_eq!(limiter.check("10.0.0.1").await, RateDecision::Allowed { remaining: 0 });
    }

    #[tokio::test]
    async fn over_limit_requests_carry_a_retry_hint() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        limiter.check("10.0.0.1").await;
        limiter.check("10.0.0.1").await;

        assert_eq!(
            limiter.check("10.0.0.1").await,
            RateDecision::Limited { retry_after_secs: 60 }
        );
    }

    #[tokio::test]
    async fn clients_do_not_share_windows() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        limiter.check("10.0.0.1").await;

        assert_eq!(
            limiter.check("10.0.0.1").await,
            RateDecision::Limited { retry_after_secs: 60 }
        );
        assert_eq!(limiter.check("10.0.0.2").await, RateDecision::Allowed { remaining: 0 });
    }

    #[tokio::test]
    async fn old_requests_fall_out_of_the_window() {
        let limiter = RateLimiter::new(1, Duration::from_millis(40));
        limiter.check("10.0.0.1").await;
        assert!(matches!(limiter.check("10.0.0.1").await, RateDecision::Limited { .. }));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(limiter.check("10.0.0.1").await, RateDecision::Allowed { remaining: 0 });
    }
}
