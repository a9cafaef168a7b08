use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

const CONFIG_PATH_VAR: &str = "BLOGFRONT_CONFIG";
const ENV_PREFIX: &str = "BLOGFRONT";

/// Well-known variables for the service connection, checked in order.
const SERVICE_URL_VARS: [&str; 2] = ["SERVICE_URL", "SUPABASE_URL"];
const SERVICE_KEY_VARS: [&str; 2] = ["SERVICE_KEY", "SUPABASE_ANON_KEY"];

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub service: ServiceConfig,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and the process environment.
    pub fn load() -> Result<Self> {
        let vars: HashMap<String, String> = env::vars().collect();
        let config_path = vars
            .get(CONFIG_PATH_VAR)
            .cloned()
            .unwrap_or_else(|| "config.toml".to_string());

        Self::load_from(Path::new(&config_path), vars)
    }

    /// Load configuration from `path` (if it exists) and an explicit
    /// environment map.
    pub fn load_from(path: &Path, vars: HashMap<String, String>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if path.exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if let Some(url) = first_set(&vars, &SERVICE_URL_VARS) {
            config.service.url = url;
        }
        if let Some(key) = first_set(&vars, &SERVICE_KEY_VARS) {
            config.service.key = key;
        }

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }
}

fn first_set(vars: &HashMap<String, String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| vars.get(*name).filter(|v| !v.is_empty()).cloned())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Connection settings for the database service.
///
/// Values are exposed as-is; an unset url or key reads as an empty string and
/// is rejected when a client is created.
#[derive(Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    pub url: String,
    pub key: String,
    /// Upper bound on the wait for a query response. Unbounded when unset.
    pub timeout_ms: Option<u64>,
}

impl ServiceConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            timeout_ms: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.key.is_empty() { "" } else { "[redacted]" };
        f.debug_struct("ServiceConfig")
            .field("url", &self.url)
            .field("key", &key)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}
