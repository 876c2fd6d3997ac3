use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::utils::log_rate_limit;

/// Per-IP admission control using a sliding-window log.
///
/// Each IP gets an ordered log of recent request timestamps. On every check
/// the expired timestamps are evicted first, then the remaining count is
/// compared against capacity. Denied attempts are not recorded. State is
/// process-local and never persisted.
pub struct RateLimiter {
    /// Capacity per window
    max_requests: u32,
    /// Window length
    window: Duration,
    /// Request timestamp log per IP, oldest first
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given capacity and window length
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether a request from `ip` is admitted right now.
    ///
    /// Returns `(allowed, remaining)`. A denied request returns `(false, 0)`
    /// and leaves no trace in the log. Eviction runs before the capacity
    /// check, so an entry expiring on this very call frees a slot for it.
    pub async fn allow(&self, ip: &str) -> (bool, u32) {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let log = windows.entry(ip.to_string()).or_default();

        // A timestamp exactly one window old is expired
        while let Some(&oldest) = log.front() {
            if now.duration_since(oldest) >= self.window {
                log.pop_front();
            } else {
                break;
            }
        }

        if log.len() >= self.max_requests as usize {
            log_rate_limit(ip, true);
            return (false, 0);
        }

        log.push_back(now);
        log_rate_limit(ip, false);
        (true, self.max_requests - log.len() as u32)
    }

    /// Drop IPs whose windows have fully drained and return how many were
    /// removed. Without this sweep the outer table grows by one entry per
    /// distinct IP ever seen for the lifetime of the process.
    pub async fn sweep_idle(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, log| {
            log.back()
                .map_or(false, |&newest| now.duration_since(newest) < self.window)
        });
        before - windows.len()
    }
}
