//! Configuration management for Duocast
//!
//! Credentials come from the environment, optionally seeded from a TOML
//! file. Unset values fall back to placeholders so the UI can still start
//! and report which platform is unconfigured.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::Platform;

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com/v18.0";
pub const PLACEHOLDER_PAGE_ID: &str = "YOUR_PAGE_ID";
pub const PLACEHOLDER_IG_USER_ID: &str = "YOUR_IG_USER_ID";
pub const PLACEHOLDER_TOKEN: &str = "YOUR_TOKEN";

pub const ENV_CONFIG_PATH: &str = "DUOCAST_CONFIG";
pub const ENV_GRAPH_BASE_URL: &str = "DUOCAST_GRAPH_BASE_URL";
pub const ENV_FACEBOOK_PAGE_ID: &str = "FACEBOOK_PAGE_ID";
pub const ENV_FACEBOOK_ACCESS_TOKEN: &str = "FACEBOOK_ACCESS_TOKEN";
pub const ENV_INSTAGRAM_USER_ID: &str = "INSTAGRAM_USER_ID";
pub const ENV_INSTAGRAM_ACCESS_TOKEN: &str = "INSTAGRAM_ACCESS_TOKEN";

#[derive(Debug)]
pub struct Config {
    pub graph: GraphConfig,
    pub facebook: FacebookConfig,
    pub instagram: InstagramConfig,
}

#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub base_url: String,
}

#[derive(Debug)]
pub struct FacebookConfig {
    pub page_id: String,
    pub access_token: SecretString,
}

#[derive(Debug)]
pub struct InstagramConfig {
    pub user_id: String,
    pub access_token: SecretString,
}

/// On-disk shape of `config.toml`; every field is optional
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    graph: Option<GraphSection>,
    #[serde(default)]
    facebook: Option<FacebookSection>,
    #[serde(default)]
    instagram: Option<InstagramSection>,
}

#[derive(Debug, Default, Deserialize)]
struct GraphSection {
    base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FacebookSection {
    page_id: Option<String>,
    access_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct InstagramSection {
    user_id: Option<String>,
    access_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph: GraphConfig {
                base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            },
            facebook: FacebookConfig {
                page_id: PLACEHOLDER_PAGE_ID.to_string(),
                access_token: SecretString::from(PLACEHOLDER_TOKEN.to_string()),
            },
            instagram: InstagramConfig {
                user_id: PLACEHOLDER_IG_USER_ID.to_string(),
                access_token: SecretString::from(PLACEHOLDER_TOKEN.to_string()),
            },
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the config file if present, then
    /// environment variables
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = resolve_config_path()? {
            if path.exists() {
                tracing::debug!("Loading config file: {}", path.display());
                config.merge_file(&path)?;
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific TOML file, without environment
    /// overrides
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge_file(path)?;
        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let file: ConfigFile = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        if let Some(base_url) = file.graph.and_then(|g| g.base_url) {
            self.graph.base_url = base_url;
        }
        if let Some(facebook) = file.facebook {
            if let Some(page_id) = facebook.page_id {
                self.facebook.page_id = page_id;
            }
            if let Some(token) = facebook.access_token {
                self.facebook.access_token = SecretString::from(token);
            }
        }
        if let Some(instagram) = file.instagram {
            if let Some(user_id) = instagram.user_id {
                self.instagram.user_id = user_id;
            }
            if let Some(token) = instagram.access_token {
                self.instagram.access_token = SecretString::from(token);
            }
        }

        Ok(())
    }

    /// Apply overrides from a key lookup (normally the process environment).
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = get(ENV_GRAPH_BASE_URL) {
            self.graph.base_url = base_url;
        }
        if let Some(page_id) = get(ENV_FACEBOOK_PAGE_ID) {
            self.facebook.page_id = page_id;
        }
        if let Some(token) = get(ENV_FACEBOOK_ACCESS_TOKEN) {
            self.facebook.access_token = SecretString::from(token);
        }
        if let Some(user_id) = get(ENV_INSTAGRAM_USER_ID) {
            self.instagram.user_id = user_id;
        }
        if let Some(token) = get(ENV_INSTAGRAM_ACCESS_TOKEN) {
            self.instagram.access_token = SecretString::from(token);
        }
    }

    /// Whether real credentials (not placeholders) are set for a platform
    pub fn is_configured(&self, platform: Platform) -> bool {
        match platform {
            Platform::Facebook => {
                self.facebook.page_id != PLACEHOLDER_PAGE_ID
                    && self.facebook.access_token.expose_secret() != PLACEHOLDER_TOKEN
            }
            Platform::Instagram => {
                self.instagram.user_id != PLACEHOLDER_IG_USER_ID
                    && self.instagram.access_token.expose_secret() != PLACEHOLDER_TOKEN
            }
        }
    }
}

/// Resolve the configuration file path
///
/// `DUOCAST_CONFIG` wins; otherwise `{config_dir}/duocast/config.toml`.
/// Returns `None` on systems without a config directory.
pub fn resolve_config_path() -> Result<Option<PathBuf>> {
    if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
        return Ok(Some(PathBuf::from(shellexpand::tilde(&path).to_string())));
    }

    Ok(dirs::config_dir().map(|dir| dir.join("duocast").join("config.toml")))
}

/// Resolve the data directory path
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("duocast"))
}
