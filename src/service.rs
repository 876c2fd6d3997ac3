use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::Settings;
use crate::core::{BlockEntry, Blocklist, LogScanner, RateLimiter, SuspiciousIp};
use crate::error::ServiceError;
use crate::utils::log_scan_detection;

/// Snapshot of service health for the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Number of currently blocked IPs
    pub blocklist_count: usize,
    /// Seconds since the service was constructed
    pub uptime: f64,
}

/// Main protection service composing the log scanner, the blocklist, and
/// the rate limiter.
///
/// Constructed once at process start and shared by reference with the
/// request handlers; the three components never touch each other's state.
pub struct ProtectionService {
    /// Stateless scanner for uploaded log text
    scanner: LogScanner,
    /// Durable set of blocked IPs
    blocklist: Blocklist,
    /// Per-IP admission control
    rate_limiter: RateLimiter,
    /// Construction time, for uptime reporting
    started_at: Instant,
}

impl ProtectionService {
    /// Creates a new protection service from the loaded settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            scanner: LogScanner::new(settings.scanner.threshold),
            blocklist: Blocklist::new(&settings.blocklist.path),
            rate_limiter: RateLimiter::new(
                settings.rate_limit.max_requests,
                Duration::from_secs(settings.rate_limit.window_seconds),
            ),
            started_at: Instant::now(),
        }
    }

    /// Admission gate consulted before any request is dispatched.
    ///
    /// The blocklist is checked first, then the rate limiter; a blocked IP
    /// never consumes a rate-limit slot.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the request is allowed
    /// * `Err(ServiceError)` - If the request should be rejected
    pub async fn admit(&self, ip: &str) -> Result<(), ServiceError> {
        if self.blocklist.is_blocked(ip).await {
            return Err(ServiceError::IpBlocked(format!("IP {} is blocked", ip)));
        }

        let (allowed, _remaining) = self.rate_limiter.allow(ip).await;
        if !allowed {
            return Err(ServiceError::RateLimitExceeded(format!(
                "IP {} exceeded the request rate limit",
                ip
            )));
        }

        Ok(())
    }

    /// Scan raw log text for suspicious IPs.
    ///
    /// Detections are logged but not auto-blocked; promoting a suspicious
    /// IP to the blocklist is an explicit operator action.
    pub fn scan_logs(&self, text: &str) -> HashMap<String, SuspiciousIp> {
        let suspicious = self.scanner.scan(text);
        for (ip, record) in &suspicious {
            log_scan_detection(ip, record.count, self.scanner.threshold());
        }
        suspicious
    }

    /// Block an IP with the given reason, persisting the blocklist
    pub async fn block_ip(&self, ip: &str, reason: &str) -> Result<(), ServiceError> {
        self.blocklist.add(ip, reason).await?;
        Ok(())
    }

    /// Unblock an IP, persisting the blocklist if it was present
    pub async fn unblock_ip(&self, ip: &str) -> Result<(), ServiceError> {
        self.blocklist.remove(ip).await?;
        Ok(())
    }

    /// Snapshot of the full blocklist
    pub async fn list_blocked(&self) -> HashMap<String, BlockEntry> {
        self.blocklist.list().await
    }

    /// Current service status
    pub async fn status(&self) -> StatusReport {
        StatusReport {
            blocklist_count: self.blocklist.count().await,
            uptime: self.started_at.elapsed().as_secs_f64(),
        }
    }

    /// Remove rate-limiter entries for IPs whose windows have drained.
    /// Called periodically by the background sweeper.
    pub async fn sweep_idle_windows(&self) -> usize {
        self.rate_limiter.sweep_idle().await
    }
}
