use crate::errors::FetchError;
use crate::models::RawStatsFile;

/// Source of the published stats file.
#[async_trait::async_trait]
pub trait PlayerStatsFileRepository {
    async fn fetch_stats_file(&self) -> Result<RawStatsFile, FetchError>;
}
