//! Client config load/save for `~/.docs-gpt/config.yaml`.
//! Every key is optional; the accessors fill in the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://coinbase-cloud-docs.herokuapp.com/predict";
pub const DEFAULT_TITLE: &str = "Coinbase Documentation GPT";
pub const DEFAULT_DOCS_LABEL: &str = "Coinbase Official Documentation";
pub const DEFAULT_DOCS_URL: &str = "https://docs.cloud.coinbase.com/";
pub const DEFAULT_PLACEHOLDER: &str = "Type your question here...";

/// What the component does when a submission fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the error and stay Pending: the spinner never goes away.
    #[default]
    KeepPending,
    /// Log the error, go back to Idle and show an error notice.
    ResetToIdle,
}

/// API section (endpoint).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// UI section (static chrome and failure policy).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_policy: Option<FailurePolicy>,
}

/// Full config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub ui: UiSection,
}

/// UI settings with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiSettings {
    pub title: String,
    pub docs_label: String,
    pub docs_url: String,
    pub placeholder: String,
    pub failure_policy: FailurePolicy,
}

impl Default for UiSettings {
    fn default() -> Self {
        Config::default().ui()
    }
}

impl Config {
    pub fn endpoint(&self) -> &str {
        self.api.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn ui(&self) -> UiSettings {
        let ui = &self.ui;
        UiSettings {
            title: ui.title.clone().unwrap_or_else(|| DEFAULT_TITLE.into()),
            docs_label: ui
                .docs_label
                .clone()
                .unwrap_or_else(|| DEFAULT_DOCS_LABEL.into()),
            docs_url: ui.docs_url.clone().unwrap_or_else(|| DEFAULT_DOCS_URL.into()),
            placeholder: ui
                .placeholder
                .clone()
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.into()),
            failure_policy: ui.failure_policy.unwrap_or_default(),
        }
    }
}

/// Returns the default config file path: `~/.docs-gpt/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".docs-gpt").join("config.yaml"))
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Load config from a YAML file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load config, or the defaults when `path` does not exist.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load(path)
}

/// Save config to a YAML file. Creates parent directory if missing.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let contents = serde_yaml::to_string(config).map_err(|source| ConfigError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, contents).map_err(io_err)
}

/// Config load/save error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid YAML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("cannot write config to {} as YAML: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
