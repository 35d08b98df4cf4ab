use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings for a [`VerbexClient`](crate::VerbexClient).
///
/// # Example
/// ```
/// use sdk::ClientConfig;
///
/// let cfg = ClientConfig::new("http://localhost:8080", "verbexadmin")
///     .with_timeout_secs(5)
///     .with_user_agent("conformance/1.0");
///
/// assert_eq!(cfg.timeout().as_secs(), 5);
/// assert_eq!(cfg.connect_timeout_secs, 10);
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the server, e.g. `http://localhost:8080`. A trailing `/` is ignored.
    pub endpoint: String,
    /// Bearer credential sent on authenticated calls.
    pub access_key: String,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_pool_max_idle_per_host() -> usize {
    32
}

fn default_user_agent() -> String {
    format!("verbex-sdk/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
            user_agent: default_user_agent(),
        }
    }

    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = access_key.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Endpoint with any trailing `/` removed.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

// Keeps the access key out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
