//! Configuration layer discovery and resolution.
//!
//! Each source (flags, environment, file) produces a [`ConfigLayer`] of
//! optional settings. [`resolve`] takes the layers in priority order and
//! fills each setting from the first layer that has it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::config::{parse_url, ApiKey, Config, Credentials, DEFAULT_TIMEOUT, DEFAULT_URL};
use crate::error::{GbpError, Result};

/// Base address of the build publisher.
pub const ENV_URL: &str = "BUILD_PUBLISHER_URL";
/// User name for basic auth.
pub const ENV_USER: &str = "BUILD_PUBLISHER_USER";
/// API key or token.
pub const ENV_API_KEY: &str = "BUILD_PUBLISHER_API_KEY";
/// Per-request timeout in seconds.
pub const ENV_TIMEOUT: &str = "BUILD_PUBLISHER_TIMEOUT";
/// Extra plugin manifest directories (path-list syntax).
pub const ENV_PLUGIN_PATH: &str = "GBPCLI_PLUGIN_PATH";

/// One source of optional configuration values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    /// Base address.
    pub url: Option<String>,
    /// User name.
    pub user: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Timeout in seconds.
    pub timeout: Option<u64>,
    /// Plugin manifest directories.
    pub plugin_dirs: Option<Vec<PathBuf>>,
}

impl ConfigLayer {
    /// Read the layer from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Read the layer from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                ENV_URL => layer.url = Some(value),
                ENV_USER => layer.user = Some(value),
                ENV_API_KEY => layer.api_key = Some(value),
                ENV_TIMEOUT => layer.timeout = Some(parse_timeout(&value, ENV_TIMEOUT)?),
                ENV_PLUGIN_PATH => {
                    layer.plugin_dirs = Some(std::env::split_paths(&value).collect());
                }
                _ => {}
            }
        }
        Ok(layer)
    }

    /// Load a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file doesn't exist.
    /// Returns `Configuration` if the YAML is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GbpError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                GbpError::Io(e)
            }
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            GbpError::configuration(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}

fn parse_timeout(value: &str, source: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| GbpError::configuration(format!("{source} must be a number of seconds")))
}

/// Default config file: `~/.config/gbpcli/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gbpcli").join("config.yml"))
}

/// Default plugin manifest directory: `~/.config/gbpcli/subcommands`.
pub fn default_plugin_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gbpcli").join("subcommands"))
}

/// Resolve layers given in priority order (highest first) into a [`Config`].
pub fn resolve(layers: impl IntoIterator<Item = ConfigLayer>) -> Result<Config> {
    let mut merged = ConfigLayer::default();
    for layer in layers {
        merged.url = merged.url.or(layer.url);
        merged.user = merged.user.or(layer.user);
        merged.api_key = merged.api_key.or(layer.api_key);
        merged.timeout = merged.timeout.or(layer.timeout);
        merged.plugin_dirs = merged.plugin_dirs.or(layer.plugin_dirs);
    }

    let url = parse_url(merged.url.as_deref().unwrap_or(DEFAULT_URL))?;

    let credentials = match (merged.user, merged.api_key) {
        (user, Some(key)) => Some(Credentials {
            user,
            api_key: ApiKey::new(key),
        }),
        (Some(user), None) => {
            return Err(GbpError::configuration(format!(
                "user {user:?} is configured without an API key"
            )));
        }
        (None, None) => None,
    };

    let timeout = match merged.timeout {
        Some(0) => return Err(GbpError::configuration("timeout must be greater than zero")),
        Some(secs) => Duration::from_secs(secs),
        None => DEFAULT_TIMEOUT,
    };

    let plugin_dirs = merged
        .plugin_dirs
        .unwrap_or_else(|| default_plugin_dir().into_iter().collect());

    Ok(Config {
        url,
        credentials,
        timeout,
        plugin_dirs,
    })
}

/// Load the configuration for this invocation.
///
/// `config_path` is the `--config` flag; when absent the default file is
/// used if it exists.
pub fn load_config(flags: ConfigLayer, config_path: Option<&Path>) -> Result<Config> {
    let env = ConfigLayer::from_env()?;

    let file = match config_path {
        Some(path) => ConfigLayer::from_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => ConfigLayer::from_file(&path)?,
            _ => ConfigLayer::default(),
        },
    };

    tracing::debug!(
        explicit_file = config_path.is_some(),
        "resolving configuration"
    );

    resolve(vec![flags, env, file])
}
