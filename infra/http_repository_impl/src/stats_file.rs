use std::sync::Arc;

use domain::errors::FetchError;
use domain::models::RawStatsFile;
use domain::repositories::PlayerStatsFileRepository;
use domain::types::Clock;
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::config;
use crate::http::{cache_busted_get, fetch_json, parse_url};

/// Reads the published `player-stats.json`.
pub struct HttpStatsFileRepository {
    client: Client,
    url: Url,
    clock: Arc<dyn Clock>,
}

impl HttpStatsFileRepository {
    pub fn try_new(
        client: Client,
        config: config::StatsFile,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            url: parse_url(&config.stats_file_url)?,
            clock,
        })
    }

    fn request(&self) -> RequestBuilder {
        cache_busted_get(&self.client, &self.url, self.clock.as_ref())
    }
}

#[async_trait::async_trait]
impl PlayerStatsFileRepository for HttpStatsFileRepository {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch_stats_file(&self) -> Result<RawStatsFile, FetchError> {
        tracing::debug!("fetching stats file");
        fetch_json(self.request(), &self.url).await
    }
}
