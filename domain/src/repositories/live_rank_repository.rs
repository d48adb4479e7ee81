use crate::errors::LiveLookupError;
use crate::models::LiveLookupResult;

/// Live rank lookup of the one identity the site follows.
///
/// Implementations report [`LiveLookupError::ConfigMissing`] instead of
/// attempting a request when they lack an identity or a credential.
#[async_trait::async_trait]
pub trait LiveRankRepository {
    async fn lookup_live_rank(&self) -> Result<LiveLookupResult, LiveLookupError>;
}
