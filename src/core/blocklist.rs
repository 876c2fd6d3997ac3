use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::utils::{log_blocklist_event, GuardResult};

/// Audit metadata persisted per blocked IP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockEntry {
    /// Why the IP was blocked
    pub reason: String,
    /// Seconds since the Unix epoch at the time of the block
    pub timestamp: f64,
}

/// Durable set of blocked IPs backed by a single JSON file.
///
/// The whole table lives in memory; every mutation rewrites the backing
/// file before returning. The file is a JSON object keyed by IP, each value
/// carrying `reason` and `timestamp`.
pub struct Blocklist {
    /// Path of the backing file
    path: PathBuf,
    /// In-memory mirror of the persisted table
    entries: Mutex<HashMap<String, BlockEntry>>,
}

impl Blocklist {
    /// Create a new blocklist backed by the file at `path`, loading any
    /// existing entries. A missing, unreadable, or invalid file starts the
    /// table empty rather than failing startup.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let entries = Self::load(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn load(path: &Path) -> HashMap<String, BlockEntry> {
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "blocklist file is not valid JSON, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        }
    }

    /// Full-file rewrite of the complete table. Write failures propagate to
    /// the mutating caller; silently losing a block would be worse than the
    /// error.
    fn save(path: &Path, entries: &HashMap<String, BlockEntry>) -> GuardResult<()> {
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Block an IP, overwriting any existing entry for it (last write wins).
    /// The table is persisted before this returns.
    pub async fn add(&self, ip: &str, reason: &str) -> GuardResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            ip.to_string(),
            BlockEntry {
                reason: reason.to_string(),
                timestamp: unix_now(),
            },
        );
        Self::save(&self.path, &entries)?;
        log_blocklist_event("ip_blocked", ip, Some(reason));
        Ok(())
    }

    /// Unblock an IP. Removing an IP that is not present is a no-op, not an
    /// error; the file is only rewritten when something actually changed.
    pub async fn remove(&self, ip: &str) -> GuardResult<()> {
        let mut entries = self.entries.lock().await;
        if entries.remove(ip).is_some() {
            Self::save(&self.path, &entries)?;
            log_blocklist_event("ip_unblocked", ip, None);
        }
        Ok(())
    }

    /// Check whether an IP is currently blocked. In-memory lookup only.
    pub async fn is_blocked(&self, ip: &str) -> bool {
        self.entries.lock().await.contains_key(ip)
    }

    /// Snapshot of the full table. Callers get their own copy; mutating it
    /// does not touch the internal state.
    pub async fn list(&self) -> HashMap<String, BlockEntry> {
        self.entries.lock().await.clone()
    }

    /// Number of blocked IPs
    pub async fn count(&self) -> usize {
        self.entries.lock().await.len()
    }
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
