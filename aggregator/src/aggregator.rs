use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use domain::errors::{FetchError, LiveLookupError};
use domain::models::{LiveLookupResult, PlayerId, PlayerStatsRecord, RawPlayerStats, RawStatsFile};
use domain::repositories::{LiveRankRepository, PlayerStatsFileRepository};
use domain::types::Clock;
use tokio_util::sync::CancellationToken;

use crate::cache::StatsCache;
use crate::merge::merge_live_result;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Combines the stats file and the live rank lookup into per-player records.
///
/// Lookups never fail: whatever a source cannot provide ends up as the
/// placeholder, and an outage of one source leaves the other's data intact.
pub struct StatsAggregator<StatsSource, LiveSource> {
    stats_source: StatsSource,
    live_source: LiveSource,
    cache: StatsCache,
    clock: Arc<dyn Clock>,
    fetch_timeout: Duration,
}

impl<StatsSource, LiveSource> StatsAggregator<StatsSource, LiveSource>
where
    StatsSource: PlayerStatsFileRepository + Sync,
    LiveSource: LiveRankRepository + Sync,
{
    pub fn new(
        stats_source: StatsSource,
        live_source: LiveSource,
        cache: StatsCache,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            stats_source,
            live_source,
            cache,
            clock,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub const fn cache(&self) -> &StatsCache {
        &self.cache
    }

    /// Drops the cached stats file so that the next lookup reads it again.
    pub async fn refresh_stats(&self) {
        self.cache.invalidate().await;
    }

    pub async fn get_stats(&self, player_id: &PlayerId) -> PlayerStatsRecord {
        self.get_stats_with_cancellation(player_id, &CancellationToken::new())
            .await
    }

    /// Same as [`Self::get_stats`]; cancelling `cancel` makes every pending
    /// fetch count as failed.
    #[tracing::instrument(skip_all, fields(player_id = %player_id))]
    pub async fn get_stats_with_cancellation(
        &self,
        player_id: &PlayerId,
        cancel: &CancellationToken,
    ) -> PlayerStatsRecord {
        // both branches always settle, so neither can cut the other short
        let (stats_file, live_result) = tokio::join!(
            self.load_stats_file(cancel),
            self.lookup_live_rank(cancel)
        );

        let mut stats = match stats_file.player_stats(player_id) {
            Ok(stats) => stats,
            Err(mismatch) => {
                tracing::info!(%mismatch, "using placeholder stats");
                RawPlayerStats::default()
            }
        };

        if let Some(live_result) = live_result {
            merge_live_result(&mut stats, live_result, self.clock.now());
        }

        stats.into_record(player_id.clone())
    }

    async fn load_stats_file(&self, cancel: &CancellationToken) -> Arc<RawStatsFile> {
        if let Some(cached) = self.cache.get().await {
            tracing::debug!("stats file served from cache");
            return cached;
        }

        match bounded(
            self.fetch_timeout,
            cancel,
            self.stats_source.fetch_stats_file(),
        )
        .await
        {
            Ok(stats_file) => {
                tracing::debug!(players = stats_file.player_count(), "stats file fetched");
                let stats_file = Arc::new(stats_file);
                self.cache.put(stats_file.clone()).await;
                stats_file
            }
            Err(error) => {
                // not cached: the next lookup retries instead of replaying the failure
                tracing::warn!(%error, "could not fetch stats file");
                Arc::new(RawStatsFile::placeholder())
            }
        }
    }

    async fn lookup_live_rank(&self, cancel: &CancellationToken) -> Option<LiveLookupResult> {
        match bounded(
            self.fetch_timeout,
            cancel,
            self.live_source.lookup_live_rank(),
        )
        .await
        {
            Ok(result) => Some(result),
            Err(LiveLookupError::ConfigMissing) => {
                tracing::debug!("live rank lookup skipped, not configured");
                None
            }
            Err(LiveLookupError::Fetch(error)) => {
                tracing::warn!(%error, "live rank lookup failed");
                None
            }
        }
    }
}

/// Runs `fetch` with a deadline, giving up early when `cancel` fires.
async fn bounded<T, E>(
    timeout: Duration,
    cancel: &CancellationToken,
    fetch: impl Future<Output = Result<T, E>>,
) -> Result<T, E>
where
    E: From<FetchError>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(FetchError::Cancelled.into()),
        result = tokio::time::timeout(timeout, fetch) => {
            result.unwrap_or_else(|_| Err(FetchError::Timeout(timeout).into()))
        }
    }
}
