use serde::{Deserialize, Serialize};

use sdk::ClientConfig;

use crate::error::HarnessError;

/// Environment prefix for harness settings, e.g. `VERBEX_HARNESS__LOG_LEVEL=debug`.
pub const ENV_PREFIX: &str = "VERBEX_HARNESS";

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    #[serde(alias = "text")]
    Pretty,
    Json,
}

/// Harness configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HarnessConfig {
    /// Username for the login scenarios
    #[serde(default = "default_login_username")]
    pub login_username: String,

    #[serde(default = "default_login_password")]
    pub login_password: String,

    /// Credential the server must reject
    #[serde(default = "default_invalid_token")]
    pub invalid_token: String,

    /// Prefix of the generated test index id
    #[serde(default = "default_index_prefix")]
    pub index_prefix: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Overrides the SDK's default user agent
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Log level, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            login_username: default_login_username(),
            login_password: default_login_password(),
            invalid_token: default_invalid_token(),
            index_prefix: default_index_prefix(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: None,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from an optional `harness.{toml,yaml,json}` file and
    /// `VERBEX_HARNESS__*` environment variables.
    pub fn load() -> Result<Self, HarnessError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name("harness").required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: config::Config) -> Result<Self, HarnessError> {
        Ok(cfg.try_deserialize()?)
    }

    /// Client settings for one credential against `endpoint`.
    pub fn client_config(&self, endpoint: &str, access_key: &str) -> ClientConfig {
        let cfg = ClientConfig::new(endpoint, access_key)
            .with_timeout_secs(self.timeout_secs)
            .with_connect_timeout_secs(self.connect_timeout_secs);
        match &self.user_agent {
            Some(user_agent) => cfg.with_user_agent(user_agent.as_str()),
            None => cfg,
        }
    }
}

fn default_login_username() -> String {
    "admin".to_string()
}

fn default_login_password() -> String {
    "password".to_string()
}

fn default_invalid_token() -> String {
    "invalid-token".to_string()
}

fn default_index_prefix() -> String {
    "test-index".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}
