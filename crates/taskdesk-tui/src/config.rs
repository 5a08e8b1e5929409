/*
[INPUT]:  Built-in defaults, optional YAML file, TASKDESK_* environment, CLI overrides
[OUTPUT]: Parsed application configuration and a ready HTTP client
[POS]:    Configuration layer - API endpoint and logging setup
[UPDATE]: When adding new configuration options
[UPDATE]: 2026-10-13 Layer sources with the config crate
[UPDATE]: 2026-10-19 Default request timeout of 30s
*/

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use taskdesk_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT, TaskdeskClient};

const ENV_PREFIX: &str = "TASKDESK";

/// Top-level configuration for the taskdesk binary
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Remote task service settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout; `null` waits indefinitely
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn build_client(&self) -> Result<TaskdeskClient> {
        TaskdeskClient::with_config_and_base_url(self.client_config(), &self.base_url)
            .with_context(|| format!("build client for {}", self.base_url))
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `taskdesk_tui=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional file that receives a copy of every log line
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT.as_secs())
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load defaults, then `path` (or the per-user file when present), then
    /// the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => Some((path.to_path_buf(), true)),
            None => default_config_path()
                .filter(|path| path.exists())
                .map(|path| (path, false)),
        };
        Self::load_with_env(file, None)
    }

    /// `env` replaces the process environment when given
    pub(crate) fn load_with_env(
        file: Option<(PathBuf, bool)>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.connect_timeout_secs", default_connect_timeout_secs())?
            .set_default("api.timeout_secs", DEFAULT_REQUEST_TIMEOUT.as_secs())?
            .set_default("log.level", default_log_level())?;

        if let Some((path, required)) = file {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Yaml)
                    .required(required),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        builder
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")
    }

    /// CLI flags win over every other source
    pub fn apply_overrides(&mut self, base_url: Option<String>, log_level: Option<String>) {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if let Some(level) = log_level {
            self.log.level = level;
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serialize configuration")
    }
}

/// `<config dir>/taskdesk/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskdesk").join("config.yaml"))
}
