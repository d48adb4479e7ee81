use std::collections::HashMap;

use domain::errors::LiveLookupError;
use domain::models::{LiveFaceitRank, LiveLookupResult};
use domain::repositories::LiveRankRepository;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use url::Url;

use crate::config;
use crate::http::{fetch_json, parse_url};

/// Game ids in the `games` map, most preferred first.
const GAME_IDS: [&str; 2] = ["cs2", "csgo"];

#[derive(Debug, Deserialize)]
struct FaceitPlayer {
    #[serde(default)]
    games: HashMap<String, FaceitGame>,
}

#[derive(Debug, Deserialize)]
struct FaceitGame {
    skill_level: Option<u32>,
    faceit_elo: Option<u32>,
    region: Option<String>,
}

fn live_result_from(mut player: FaceitPlayer) -> LiveLookupResult {
    let game = GAME_IDS
        .iter()
        .find_map(|game_id| player.games.remove(*game_id));

    match game {
        Some(game) => LiveLookupResult::Ranked(LiveFaceitRank {
            level: game.skill_level.map(|level| format!("Level {level}")),
            elo: game.faceit_elo.map(|elo| elo.to_string()),
            region: game.region,
        }),
        None => LiveLookupResult::NoGameData,
    }
}

struct FaceitIdentity {
    nickname: String,
    api_key: String,
}

/// Looks up the configured nickname on the FACEIT Data API.
pub struct FaceitRepository {
    client: Client,
    players_url: Url,
    identity: Option<FaceitIdentity>,
}

impl FaceitRepository {
    pub fn try_new(client: Client, config: config::Faceit) -> anyhow::Result<Self> {
        let players_url = parse_url(&format!(
            "{}/players",
            config.faceit_api_base_url.trim_end_matches('/')
        ))?;

        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let identity = match (
            non_blank(config.faceit_nickname),
            non_blank(config.faceit_api_key),
        ) {
            (Some(nickname), Some(api_key)) => Some(FaceitIdentity { nickname, api_key }),
            _ => {
                tracing::info!("FACEIT nickname or API key missing, live lookup disabled");
                None
            }
        };

        Ok(Self {
            client,
            players_url,
            identity,
        })
    }

    pub const fn is_configured(&self) -> bool {
        self.identity.is_some()
    }

    fn request(&self, identity: &FaceitIdentity) -> RequestBuilder {
        self.client
            .get(self.players_url.clone())
            .query(&[("nickname", identity.nickname.as_str())])
            .bearer_auth(&identity.api_key)
    }
}

#[async_trait::async_trait]
impl LiveRankRepository for FaceitRepository {
    #[tracing::instrument(skip(self))]
    async fn lookup_live_rank(&self) -> Result<LiveLookupResult, LiveLookupError> {
        let identity = self
            .identity
            .as_ref()
            .ok_or(LiveLookupError::ConfigMissing)?;

        let player: FaceitPlayer = fetch_json(self.request(identity), &self.players_url).await?;
        let result = live_result_from(player);
        tracing::debug!(?result, nickname = %identity.nickname, "FACEIT lookup finished");
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn faceit_config(nickname: Option<&str>, api_key: Option<&str>) -> config::Faceit {
        config::Faceit {
            faceit_nickname: nickname.map(str::to_owned),
            faceit_api_key: api_key.map(str::to_owned),
            faceit_api_base_url: "https://open.faceit.com/data/v4/".to_owned(),
        }
    }

    fn parse(json: &str) -> LiveLookupResult {
        live_result_from(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn cs2_record_is_preferred() {
        let result = parse(
            r#"{
                "nickname": "SeuLobato",
                "games": {
                    "csgo": { "skill_level": 3, "faceit_elo": 900, "region": "SA" },
                    "cs2": { "skill_level": 5, "faceit_elo": 1250, "region": "SA", "game_player_id": "x" }
                }
            }"#,
        );

        assert_eq!(
            result,
            LiveLookupResult::Ranked(LiveFaceitRank {
                level: Some("Level 5".to_owned()),
                elo: Some("1250".to_owned()),
                region: Some("SA".to_owned()),
            })
        );
    }

    #[test]
    fn legacy_record_is_used_without_cs2() {
        let result = parse(r#"{ "games": { "csgo": { "skill_level": 8 } } }"#);

        assert_eq!(
            result,
            LiveLookupResult::Ranked(LiveFaceitRank {
                level: Some("Level 8".to_owned()),
                elo: None,
                region: None,
            })
        );
    }

    #[test]
    fn other_games_only_means_no_game_data() {
        assert_eq!(
            parse(r#"{ "games": { "dota2": { "skill_level": 2 } } }"#),
            LiveLookupResult::NoGameData
        );
        assert_eq!(parse(r#"{ "nickname": "x" }"#), LiveLookupResult::NoGameData);
    }

    #[test]
    fn request_carries_nickname_and_bearer_token() {
        let repository = FaceitRepository::try_new(
            Client::new(),
            faceit_config(Some("SeuLobato"), Some("secret-key")),
        )
        .unwrap();
        let identity = repository.identity.as_ref().unwrap();

        let request = repository.request(identity).build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://open.faceit.com/data/v4/players?nickname=SeuLobato"
        );
        assert_eq!(
            request.headers()[reqwest::header::AUTHORIZATION],
            "Bearer secret-key"
        );
    }

    #[test]
    fn missing_credentials_disable_lookup() {
        for (nickname, api_key) in [(None, Some("key")), (Some("SeuLobato"), None), (Some(" "), Some("key"))] {
            let repository =
                FaceitRepository::try_new(Client::new(), faceit_config(nickname, api_key)).unwrap();
            assert!(!repository.is_configured());
        }
    }

    #[tokio::test]
    async fn unconfigured_lookup_reports_config_missing() {
        let repository =
            FaceitRepository::try_new(Client::new(), faceit_config(None, None)).unwrap();

        assert!(matches!(
            repository.lookup_live_rank().await,
            Err(LiveLookupError::ConfigMissing)
        ));
    }
}
