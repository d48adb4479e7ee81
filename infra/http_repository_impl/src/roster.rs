use std::sync::Arc;

use domain::errors::FetchError;
use domain::models::TeamRoster;
use domain::repositories::TeamRosterRepository;
use domain::types::Clock;
use reqwest::Client;
use url::Url;

use crate::config;
use crate::http::{cache_busted_get, fetch_json, parse_url};

/// Reads the published `team-members.json`.
pub struct HttpTeamRosterRepository {
    client: Client,
    url: Url,
    clock: Arc<dyn Clock>,
}

impl HttpTeamRosterRepository {
    pub fn try_new(
        client: Client,
        config: config::Roster,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        let url = config
            .roster_url
            .ok_or_else(|| anyhow::anyhow!("ROSTER_URL is not set"))?;

        Ok(Self {
            client,
            url: parse_url(&url)?,
            clock,
        })
    }
}

#[async_trait::async_trait]
impl TeamRosterRepository for HttpTeamRosterRepository {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch_roster(&self) -> Result<TeamRoster, FetchError> {
        let request = cache_busted_get(&self.client, &self.url, self.clock.as_ref());
        fetch_json(request, &self.url).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::{http_response, local_client, serve_once};
    use domain::types::SystemClock;

    fn repository(url: &str) -> HttpTeamRosterRepository {
        HttpTeamRosterRepository::try_new(
            local_client(),
            config::Roster {
                roster_url: Some(url.to_owned()),
            },
            Arc::new(SystemClock),
        )
        .unwrap()
    }

    #[test]
    fn roster_url_is_required() {
        let result = HttpTeamRosterRepository::try_new(
            local_client(),
            config::Roster { roster_url: None },
            Arc::new(SystemClock),
        );

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn roster_is_fetched_and_parsed() {
        let url = serve_once(
            "/data/team-members.json",
            http_response(
                "200 OK",
                "application/json",
                r#"{
                    "members": [{ "id": "lobato", "nickname": "Lobato", "role": "AWP" }],
                    "openPositions": [],
                    "teamSettings": { "maxMembers": 5, "currentMembers": 1, "recruitmentActive": true }
                }"#,
            ),
        )
        .await;

        let roster = repository(&url).fetch_roster().await.unwrap();

        assert_eq!(roster.members.len(), 1);
        assert_eq!(roster.member("lobato").unwrap().role, "AWP");
        assert_eq!(roster.team_settings.max_members, 5);
    }

    #[tokio::test]
    async fn missing_roster_is_a_status_error() {
        let url = serve_once(
            "/data/team-members.json",
            http_response("404 Not Found", "text/plain", "not found"),
        )
        .await;

        let result = repository(&url).fetch_roster().await;

        let Err(FetchError::Status {
            url: failed_url,
            status,
        }) = &result
        else {
            panic!("expected a status error, got {result:?}");
        };
        assert_eq!(*status, 404);
        assert_eq!(failed_url, &url);
    }
}
