pub mod config {
    const DEFAULT_FACEIT_API_BASE_URL: &str = "https://open.faceit.com/data/v4";

    fn default_faceit_api_base_url() -> String {
        DEFAULT_FACEIT_API_BASE_URL.to_owned()
    }

    #[derive(serde::Deserialize, Debug, Clone)]
    pub struct StatsFile {
        pub stats_file_url: String,
    }

    impl StatsFile {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(envy::from_env::<Self>()?)
        }
    }

    /// Both the nickname and the key are optional; without them the live lookup is skipped.
    #[derive(serde::Deserialize, Debug, Clone)]
    pub struct Faceit {
        pub faceit_nickname: Option<String>,
        pub faceit_api_key: Option<String>,
        #[serde(default = "default_faceit_api_base_url")]
        pub faceit_api_base_url: String,
    }

    impl Faceit {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(envy::from_env::<Self>()?)
        }
    }

    #[derive(serde::Deserialize, Debug, Clone)]
    pub struct Roster {
        pub roster_url: Option<String>,
    }

    impl Roster {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(envy::from_env::<Self>()?)
        }
    }
}

mod faceit;
mod http;
mod roster;
mod stats_file;
#[cfg(test)]
mod test_support;

pub use faceit::FaceitRepository;
pub use http::build_client;
pub use reqwest::Client as HttpClient;
pub use roster::HttpTeamRosterRepository;
pub use stats_file::HttpStatsFileRepository;
