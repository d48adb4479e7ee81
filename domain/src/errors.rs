use std::time::Duration;

use thiserror::Error;

use crate::models::PlayerId;

/// Failure of a single network read. Never carries partial data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request was cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum LiveLookupError {
    #[error("live rank lookup is not configured")]
    ConfigMissing,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("player {player_id} is not present in the stats file")]
pub struct ShapeMismatch {
    pub player_id: PlayerId,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManualUpdateError {
    #[error("premier rank is required")]
    PremierRankRequired,
}
