use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

use super::PlayerId;

/// Text shown wherever no real value is known.
pub const PLACEHOLDER: &str = "Em breve";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    Manual,
    Automatic,
}

impl UpdateType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
        }
    }

    fn parse(str: &str) -> Option<Self> {
        match str {
            "manual" => Some(Self::Manual),
            "automatic" => Some(Self::Automatic),
            _ => None,
        }
    }
}

/// Same format as javascript's `Date.prototype.toISOString`, which is what the stats file holds.
pub fn render_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whether a leaf holds a usable value; blank text counts as missing.
pub fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn or_placeholder(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_owned())
}

fn update_type_or_placeholder(value: Option<UpdateType>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_owned(), |t| t.as_str().to_owned())
}

// The stats file is hand-edited, so numbers-as-text and unknown tags are tolerated
// instead of rejecting the whole file.
pub(crate) mod lenient {
    use super::UpdateType;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(str)) => Some(str),
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        })
    }

    pub fn update_type<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<UpdateType>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(str)) => UpdateType::parse(&str),
            _ => None,
        })
    }

    pub fn group<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSteamStats {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub premier_rank: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub hours_played: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(default, deserialize_with = "lenient::update_type", skip_serializing_if = "Option::is_none")]
    pub update_type: Option<UpdateType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFaceitStats {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub elo: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(default, deserialize_with = "lenient::update_type", skip_serializing_if = "Option::is_none")]
    pub update_type: Option<UpdateType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGcStats {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(default, deserialize_with = "lenient::update_type", skip_serializing_if = "Option::is_none")]
    pub update_type: Option<UpdateType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-player stats as they are stored in the stats file: every leaf may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPlayerStats {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient::group")]
    pub steam: RawSteamStats,
    #[serde(default, deserialize_with = "lenient::group")]
    pub faceit: RawFaceitStats,
    #[serde(default, deserialize_with = "lenient::group")]
    pub gc: RawGcStats,
    /// Keys this crate does not interpret; kept so that saving the file does not drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawPlayerStats {
    /// Fills group timestamps that are missing with a file-wide timestamp.
    pub(crate) fn with_fallback_last_update(mut self, last_update: Option<&str>) -> Self {
        let Some(last_update) = last_update.filter(|v| !v.trim().is_empty()) else {
            return self;
        };

        for slot in [
            &mut self.steam.last_update,
            &mut self.faceit.last_update,
            &mut self.gc.last_update,
        ] {
            if !is_present(slot) {
                *slot = Some(last_update.to_owned());
            }
        }
        self
    }

    pub fn into_record(self, player_id: PlayerId) -> PlayerStatsRecord {
        PlayerStatsRecord {
            player_id,
            steam: SteamStats {
                premier_rank: or_placeholder(self.steam.premier_rank),
                hours_played: or_placeholder(self.steam.hours_played),
                last_update: or_placeholder(self.steam.last_update),
                update_type: update_type_or_placeholder(self.steam.update_type),
            },
            faceit: FaceitStats {
                level: or_placeholder(self.faceit.level),
                elo: or_placeholder(self.faceit.elo),
                region: or_placeholder(self.faceit.region),
                last_update: or_placeholder(self.faceit.last_update),
                update_type: update_type_or_placeholder(self.faceit.update_type),
            },
            gc: GcStats {
                rank: or_placeholder(self.gc.rank),
                last_update: or_placeholder(self.gc.last_update),
                update_type: update_type_or_placeholder(self.gc.update_type),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SteamStats {
    pub premier_rank: String,
    pub hours_played: String,
    pub last_update: String,
    pub update_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceitStats {
    pub level: String,
    pub elo: String,
    pub region: String,
    pub last_update: String,
    pub update_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GcStats {
    pub rank: String,
    pub last_update: String,
    pub update_type: String,
}

/// Stats of one player as handed to consumers. Every leaf holds either a real
/// value or [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsRecord {
    pub player_id: PlayerId,
    pub steam: SteamStats,
    pub faceit: FaceitStats,
    pub gc: GcStats,
}

impl PlayerStatsRecord {
    pub fn leaves(&self) -> [(&'static str, &str); 12] {
        [
            ("steam.premierRank", &self.steam.premier_rank),
            ("steam.hoursPlayed", &self.steam.hours_played),
            ("steam.lastUpdate", &self.steam.last_update),
            ("steam.updateType", &self.steam.update_type),
            ("faceit.level", &self.faceit.level),
            ("faceit.elo", &self.faceit.elo),
            ("faceit.region", &self.faceit.region),
            ("faceit.lastUpdate", &self.faceit.last_update),
            ("faceit.updateType", &self.faceit.update_type),
            ("gc.rank", &self.gc.rank),
            ("gc.lastUpdate", &self.gc.last_update),
            ("gc.updateType", &self.gc.update_type),
        ]
    }
}
