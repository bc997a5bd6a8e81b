//! Tool configuration.
//!
//! Configuration is resolved with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (`GITHUB_TOKEN`, `GITHUB_TOOL_API_URL`, `GITHUB_TOOL_USERNAME`)
//! 3. Config file (`~/.config/github-tool/config.yaml` or `--config PATH`)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```yaml
//! api:
//!   base_url: https://api.github.com
//!   mode: direct
//! username: octocat
//! listing:
//!   page_size: 5
//!   sort: stars
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolError};
use crate::listing::{DEFAULT_PAGE_SIZE, SortKey};

/// Default public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const CONFIG_DIR: &str = "github-tool";
const CONFIG_FILE: &str = "config.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// API endpoint settings.
    pub api: ApiConfig,
    /// Default GitHub user to inspect.
    pub username: Option<String>,
    /// Token used for write calls.
    pub token: Option<String>,
    /// Listing defaults.
    pub listing: ListingConfig,
}

/// How repository creation is addressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// Talk to the GitHub REST API directly.
    #[default]
    Direct,
    /// Talk to a proxy that reimplements the endpoints, with its own creation call.
    Proxy,
}

/// API endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub mode: ApiMode,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            mode: ApiMode::Direct,
        }
    }
}

/// Listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub page_size: usize,
    pub sort: SortKey,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortKey::Name,
        }
    }
}

impl ToolConfig {
    /// Load configuration from an explicit file, or from the default location
    /// if it exists, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_yaml(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_yaml(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// The default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load config from a YAML file.
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ToolError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file: {}", e),
            ))
        })?;

        serde_yaml::from_str(&content)
            .map_err(|e| ToolError::InvalidConfig(format!("Failed to parse YAML config: {}", e)))
    }

    /// Save config to a YAML file.
    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ToolError::InvalidConfig(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content).map_err(|e| {
            ToolError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config file: {}", e),
            ))
        })
    }

    /// Apply environment overrides using the process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides from an arbitrary lookup.
    ///
    /// Empty values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(token) = get("GITHUB_TOKEN") {
            self.token = Some(token);
        }
        if let Some(url) = get("GITHUB_TOOL_API_URL") {
            self.api.base_url = url;
        }
        if let Some(user) = get("GITHUB_TOOL_USERNAME") {
            self.username = Some(user);
        }
        self
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.listing.page_size == 0 {
            return Err(ToolError::InvalidConfig(
                "listing.page_size must be at least 1".into(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ToolError::InvalidConfig("api.base_url is empty".into()));
        }
        Ok(())
    }
}
