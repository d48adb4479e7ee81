use once_cell::sync::Lazy;

#[derive(serde::Deserialize, Debug)]
pub struct Env {
    #[serde(default = "local_environment_name")]
    pub environment_name: String,
    pub sentry_dsn: Option<String>,
}

fn local_environment_name() -> String {
    "local".to_owned()
}

impl Env {
    pub fn is_local(&self) -> bool {
        self.environment_name == "local"
    }
}

pub static SENTRY_CONFIG: Lazy<Env> = Lazy::new(|| {
    envy::prefixed("ENV_").from_env::<Env>().unwrap_or(Env {
        environment_name: local_environment_name(),
        sentry_dsn: None,
    })
});
