//! Client configuration.
//!
//! A single [`Config`] value is resolved once per invocation and passed
//! explicitly into the [`ApiClient`](crate::client::ApiClient) and every
//! subcommand. There is no process-wide default configuration.
//!
//! # Precedence
//!
//! Each setting is taken from the first layer that provides it:
//! 1. Command-line flags (`--url`, `--user`, `--api-key`, `--timeout`)
//! 2. Environment (`BUILD_PUBLISHER_URL`, `BUILD_PUBLISHER_USER`, ...)
//! 3. Config file (`--config` or `~/.config/gbpcli/config.yml`)
//! 4. Built-in defaults
//!
//! # Example
//!
//! ```
//! use gbpcli::config::{resolve, ConfigLayer};
//!
//! let flags = ConfigLayer {
//!     url: Some("http://gbp.example/".to_string()),
//!     ..Default::default()
//! };
//! let config = resolve(vec![flags, ConfigLayer::default()]).unwrap();
//! assert_eq!(config.endpoint().as_str(), "http://gbp.example/graphql");
//! ```

pub mod loader;

pub use loader::{
    default_config_path, default_plugin_dir, load_config, resolve, ConfigLayer, ENV_API_KEY,
    ENV_PLUGIN_PATH, ENV_TIMEOUT, ENV_URL, ENV_USER,
};

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::{GbpError, Result};

/// Service address used when nothing else is configured.
pub const DEFAULT_URL: &str = "https://gbp/";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for attaching to a request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Credentials attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name; when present the key is sent as HTTP basic auth.
    pub user: Option<String>,
    /// The API key or token.
    pub api_key: ApiKey,
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the build publisher.
    pub url: Url,
    /// Optional credentials.
    pub credentials: Option<Credentials>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Directories searched for subcommand plugin manifests.
    pub plugin_dirs: Vec<PathBuf>,
}

impl Config {
    /// Create a config for the given base URL with default settings.
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            url: parse_url(url)?,
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            plugin_dirs: Vec::new(),
        })
    }

    /// The GraphQL endpoint under the base URL.
    pub fn endpoint(&self) -> Url {
        let mut url = self.url.clone();
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        // Joining a relative segment onto a directory URL cannot fail.
        url.join("graphql").unwrap_or(url)
    }
}

/// Parse and check a base URL. Only http and https are accepted.
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed =
        Url::parse(url).map_err(|e| GbpError::configuration(format!("invalid url {url:?}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(GbpError::configuration(format!(
            "unsupported url scheme {other:?} in {url:?}"
        ))),
    }
}
