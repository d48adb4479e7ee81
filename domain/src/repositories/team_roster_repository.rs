use crate::errors::FetchError;
use crate::models::TeamRoster;

#[async_trait::async_trait]
pub trait TeamRosterRepository {
    async fn fetch_roster(&self) -> Result<TeamRoster, FetchError>;
}
