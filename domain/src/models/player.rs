use anyhow::anyhow;
use derive_more::{Display, Into};
use serde::Serialize;

/// Stable roster key of a player, e.g. `lobato`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Into, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn from_string(str: &str) -> anyhow::Result<Self> {
        let trimmed = str.trim();
        if trimmed.is_empty() {
            Err(anyhow!("Expected non-empty string for PlayerId, got {str:?}"))
        } else if trimmed.chars().any(char::is_whitespace) {
            Err(anyhow!(
                "Expected PlayerId without inner whitespace, got {str:?}"
            ))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}
