use anyhow::Result;
use envy::Error;
use serde::Deserialize;
use std::time::Duration;

pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, Error>;
}

trait FromEnvLikeKeyValuePairs: Sized {
    fn from_iter(iter: impl Iterator<Item = (String, String)> + Clone) -> Result<Self, Error>;
}

impl<T: FromEnvLikeKeyValuePairs> FromEnv for T {
    fn from_env() -> Result<Self, Error> {
        // std::env::Vars is not Clone
        Self::from_iter(std::env::vars().collect::<Vec<_>>().into_iter())
    }
}

const fn default_cache_ttl_seconds() -> u64 {
    120
}

const fn default_fetch_timeout_seconds() -> u64 {
    10
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    pub stats_config: StatsConfig,
}

impl FromEnvLikeKeyValuePairs for AppConfig {
    fn from_iter(iter: impl Iterator<Item = (String, String)> + Clone) -> Result<Self, Error> {
        Ok(Self {
            stats_config: StatsConfig::from_iter(iter)?,
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct StatsConfig {
    /// Comma separated in the environment.
    pub player_ids: Vec<String>,
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
    #[serde(default = "default_fetch_timeout_seconds")]
    pub fetch_timeout_seconds: u64,
}

impl StatsConfig {
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

impl FromEnvLikeKeyValuePairs for StatsConfig {
    fn from_iter(iter: impl Iterator<Item = (String, String)>) -> Result<Self, Error> {
        envy::prefixed("STATS_").from_iter(iter)
    }
}
