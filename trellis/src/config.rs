//! Client configuration

use crate::error::{ClientError, Result};
use crate::server::{parse_servers, Server};
use crate::transport::{Credentials, FailureKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Bootstrap servers, always kept as the fallback membership
    #[serde(default)]
    pub servers: Vec<String>,

    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Overall request timeout in milliseconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: u64,

    /// Gzip request bodies
    #[serde(default)]
    pub request_compression: bool,

    /// Headers sent with every request; action headers take precedence
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,

    /// Basic-auth user for every request
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password, only used together with `username`
    #[serde(default)]
    pub password: Option<String>,

    /// Background topology discovery
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Retry behaviour for failed attempts
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_connect_timeout() -> u64 {
    3000
}

fn default_read_timeout() -> u64 {
    3000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            connect_timeout_ms: default_connect_timeout(),
            read_timeout_ms: default_read_timeout(),
            request_compression: false,
            default_headers: BTreeMap::new(),
            username: None,
            password: None,
            discovery: DiscoveryConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Topology discovery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Run the background discovery task
    #[serde(default)]
    pub enabled: bool,

    /// Node filter for the nodes-info request
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Delay before the first discovery run in milliseconds
    #[serde(default)]
    pub initial_delay_ms: u64,

    /// Delay between discovery runs in milliseconds
    #[serde(default = "default_interval")]
    pub interval_ms: u64,

    /// Scheme prefixed to discovered addresses
    #[serde(default = "default_scheme")]
    pub default_scheme: String,
}

fn default_filter() -> String {
    "_all".to_string()
}

fn default_interval() -> u64 {
    10_000
}

fn default_scheme() -> String {
    "http://".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            filter: default_filter(),
            initial_delay_ms: 0,
            interval_ms: default_interval(),
            default_scheme: default_scheme(),
        }
    }
}

impl DiscoveryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Retry configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Total attempts per logical request; 0 or 1 disables retries
    #[serde(default)]
    pub max_attempts: u32,

    /// Failure kinds worth retrying; empty means the default set
    #[serde(default)]
    pub recoverable: Vec<FailureKind>,
}

impl ClientConfig {
    /// Configuration with the given bootstrap servers and defaults elsewhere
    pub fn with_servers<I, S>(servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            servers: servers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("toml") | None => Self::from_toml_str(&content),
            Some(other) => Err(ClientError::Config(format!(
                "Unsupported config file extension '{}'",
                other
            ))),
        }
    }

    /// Check that the configuration can build a client
    pub fn validate(&self) -> Result<()> {
        self.bootstrap_servers()?;
        if self.password.is_some() && self.username.is_none() {
            return Err(ClientError::Config("password set without username".into()));
        }
        if self.discovery.enabled && self.discovery.interval_ms == 0 {
            return Err(ClientError::Config(
                "discovery.interval_ms must be greater than zero".into(),
            ));
        }
        if !self.discovery.default_scheme.ends_with("://") {
            return Err(ClientError::Config(format!(
                "discovery.default_scheme '{}' must end with '://'",
                self.discovery.default_scheme
            )));
        }
        Ok(())
    }

    /// Parsed, deduplicated bootstrap set
    pub fn bootstrap_servers(&self) -> Result<Vec<Server>> {
        let servers = parse_servers(&self.servers)?;
        if servers.is_empty() {
            return Err(ClientError::Config(
                "at least one server must be configured".into(),
            ));
        }
        Ok(servers)
    }

    /// Basic-auth credentials applied to every request, if configured
    pub fn credentials(&self) -> Option<Credentials> {
        self.username
            .as_ref()
            .map(|user| Credentials::new(user.clone(), self.password.clone()))
    }

    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Get request timeout as Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
