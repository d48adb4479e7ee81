use std::sync::Arc;

use chrono::Duration;
use domain::models::RawStatsFile;
use domain::types::{Clock, TimeStamped};
use tokio::sync::Mutex;

pub const DEFAULT_TTL_SECONDS: u64 = 120;

/// Single-slot cache of the last successfully fetched stats file.
///
/// There is one entry and one TTL for the whole file. An entry is served while
/// `now - fetched_at < ttl`; it is only ever replaced whole.
pub struct StatsCache {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    slot: Mutex<Option<TimeStamped<Arc<RawStatsFile>>>>,
}

impl StatsCache {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self) -> Option<Arc<RawStatsFile>> {
        let mut slot = self.slot.lock().await;
        let now = self.clock.now();

        if let Some(entry) = slot.as_ref() {
            if entry.age_at(now) < self.ttl {
                return Some(entry.data.clone());
            }
            tracing::debug!(fetched_at = %entry.utc_timestamp, "stats cache entry expired");
        }

        *slot = None;
        None
    }

    pub async fn put(&self, stats_file: Arc<RawStatsFile>) {
        let entry = TimeStamped::new(stats_file, self.clock.now());
        *self.slot.lock().await = Some(entry);
    }

    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }
}
