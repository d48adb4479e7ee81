use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::statistics::{lenient, render_timestamp, RawPlayerStats, UpdateType, PLACEHOLDER};
use super::PlayerId;
use crate::errors::{ManualUpdateError, ShapeMismatch};

/// Key a legacy single-player file is stored under once it is converted to the multi-player shape.
pub const DEFAULT_PLAYER_KEY: &str = "default";

const NEW_PLAYER_NICKNAME: &str = "Jogador";

/// Legacy shape: the whole file is the stats of a single player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinglePlayerStatsFile {
    #[serde(flatten)]
    pub stats: RawPlayerStats,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiPlayerStatsFile {
    pub players: BTreeMap<String, RawPlayerStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_settings: Option<Map<String, Value>>,
    /// Top-level keys besides `players` and `teamSettings`, such as `status` or the
    /// groups of a converted legacy file.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contents of the stats file, in either of its two supported shapes.
///
/// The shape is decided once, while deserializing: an object with a `players`
/// key is [`RawStatsFile::MultiPlayer`], any other object is
/// [`RawStatsFile::SinglePlayer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawStatsFile {
    SinglePlayer(SinglePlayerStatsFile),
    MultiPlayer(MultiPlayerStatsFile),
}

impl<'de> Deserialize<'de> for RawStatsFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let Some(object) = value.as_object() else {
            return Err(D::Error::custom("expected the stats file to be a JSON object"));
        };

        if object.contains_key("players") {
            serde_json::from_value(value)
                .map(Self::MultiPlayer)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(Self::SinglePlayer)
                .map_err(D::Error::custom)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualRankUpdate {
    pub premier_rank: String,
    pub gc_rank: Option<String>,
}

impl RawStatsFile {
    /// A file that knows nothing; every field completes to the placeholder.
    pub fn placeholder() -> Self {
        Self::SinglePlayer(SinglePlayerStatsFile::default())
    }

    pub fn from_json_str(str: &str) -> serde_json::Result<Self> {
        serde_json::from_str(str)
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn player_stats(&self, player_id: &PlayerId) -> Result<RawPlayerStats, ShapeMismatch> {
        match self {
            Self::SinglePlayer(file) => Ok(file
                .stats
                .clone()
                .with_fallback_last_update(file.last_update.as_deref())),
            Self::MultiPlayer(file) => {
                file.players
                    .get(player_id.as_str())
                    .cloned()
                    .ok_or_else(|| ShapeMismatch {
                        player_id: player_id.clone(),
                    })
            }
        }
    }

    pub fn player_count(&self) -> usize {
        match self {
            Self::SinglePlayer(_) => 1,
            Self::MultiPlayer(file) => file.players.len(),
        }
    }

    fn into_multi_player(self) -> MultiPlayerStatsFile {
        match self {
            Self::MultiPlayer(file) => file,
            Self::SinglePlayer(file) => {
                // the legacy groups stay at the top level for pages still reading the flat shape
                let mut extra = match serde_json::to_value(&file) {
                    Ok(Value::Object(flat)) => flat,
                    _ => Map::new(),
                };
                extra.retain(|_, value| !matches!(value, Value::Object(group) if group.is_empty()));
                let team_settings = match extra.remove("teamSettings") {
                    Some(Value::Object(settings)) => Some(settings),
                    _ => None,
                };
                let mut stats = file
                    .stats
                    .with_fallback_last_update(file.last_update.as_deref());
                // file-wide keys are already kept at the top level
                stats.extra.clear();
                MultiPlayerStatsFile {
                    players: BTreeMap::from([(DEFAULT_PLAYER_KEY.to_owned(), stats)]),
                    team_settings,
                    extra,
                }
            }
        }
    }

    /// Records an operator-entered Premier and GamersClub rank for one player.
    ///
    /// Legacy single-player files are converted to the multi-player shape first: their
    /// stats are copied under [`DEFAULT_PLAYER_KEY`] and their top-level keys are kept.
    /// Keys this crate does not interpret survive the update.
    pub fn apply_manual_update(
        &mut self,
        player_id: &PlayerId,
        update: ManualRankUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), ManualUpdateError> {
        let premier_rank = update.premier_rank.trim();
        if premier_rank.is_empty() {
            return Err(ManualUpdateError::PremierRankRequired);
        }
        let gc_rank = update
            .gc_rank
            .as_deref()
            .map(str::trim)
            .filter(|rank| !rank.is_empty());
        let timestamp = render_timestamp(now);

        let mut file = std::mem::take(self).into_multi_player();

        let player = file
            .players
            .entry(player_id.as_str().to_owned())
            .or_insert_with(|| RawPlayerStats {
                nickname: Some(NEW_PLAYER_NICKNAME.to_owned()),
                ..RawPlayerStats::default()
            });

        player.steam.premier_rank = Some(premier_rank.to_owned());
        player.steam.last_update = Some(timestamp.clone());
        player.steam.update_type = Some(UpdateType::Manual);

        player.gc.rank = Some(gc_rank.unwrap_or(PLACEHOLDER).to_owned());
        if gc_rank.is_some() {
            player.gc.last_update = Some(timestamp.clone());
        }
        player.gc.update_type = Some(UpdateType::Manual);

        file.team_settings
            .get_or_insert_with(Map::new)
            .insert("lastUpdate".to_owned(), Value::String(timestamp));

        *self = Self::MultiPlayer(file);
        Ok(())
    }
}

impl Default for RawStatsFile {
    fn default() -> Self {
        Self::placeholder()
    }
}
