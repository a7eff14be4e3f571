//! Output masking for secret values.

use std::collections::BTreeSet;

use crate::config::Config;

const MASK: &str = "[REDACTED]";

/// Masks secret values in user-facing text.
///
/// # Example
///
/// ```
/// use gbpcli::secrets::OutputMasker;
///
/// let mut masker = OutputMasker::new();
/// masker.add_secret("super-secret-value");
///
/// let output = masker.mask("The key is super-secret-value here");
/// assert_eq!(output, "The key is [REDACTED] here");
/// ```
#[derive(Debug, Clone)]
pub struct OutputMasker {
    /// Longest first, so a secret containing another is masked whole.
    secrets: BTreeSet<(std::cmp::Reverse<usize>, String)>,
}

impl OutputMasker {
    /// Create a masker with no secrets.
    pub fn new() -> Self {
        Self {
            secrets: BTreeSet::new(),
        }
    }

    /// Create a masker for the credentials in a configuration.
    pub fn for_config(config: &Config) -> Self {
        let mut masker = Self::new();
        if let Some(credentials) = &config.credentials {
            masker.add_secret(credentials.api_key.expose());
        }
        masker
    }

    /// Register a secret value to be masked.
    ///
    /// Empty strings are ignored.
    pub fn add_secret(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.secrets
                .insert((std::cmp::Reverse(value.len()), value));
        }
    }

    /// Mask any secret values in the given string.
    pub fn mask(&self, input: &str) -> String {
        let mut result = input.to_string();
        for (_, secret) in &self.secrets {
            result = result.replace(secret.as_str(), MASK);
        }
        result
    }
}

impl Default for OutputMasker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, Credentials};

    #[test]
    fn masks_every_occurrence() {
        let mut masker = OutputMasker::new();
        masker.add_secret("token");

        let output = masker.mask("token=token123");

        assert_eq!(output, "[REDACTED]=[REDACTED]123");
    }

    #[test]
    fn ignores_empty_secrets() {
        let mut masker = OutputMasker::new();
        masker.add_secret("");
        assert_eq!(masker.mask("unchanged"), "unchanged");
    }

    #[test]
    fn longer_secret_masked_first() {
        let mut masker = OutputMasker::new();
        masker.add_secret("abc");
        masker.add_secret("abcdef");

        assert_eq!(masker.mask("key abcdef"), "key [REDACTED]");
    }

    #[test]
    fn masks_configured_api_key() {
        let mut config = Config::new("http://gbp.local/").unwrap();
        config.credentials = Some(Credentials {
            user: None,
            api_key: ApiKey::new("s3cret"),
        });

        let masker = OutputMasker::for_config(&config);

        assert_eq!(
            masker.mask("error: http://x/?key=s3cret"),
            "error: http://x/?key=[REDACTED]"
        );
    }

    #[test]
    fn config_without_credentials_masks_nothing() {
        let config = Config::new("http://gbp.local/").unwrap();
        assert_eq!(
            OutputMasker::for_config(&config).mask("http://gbp.local/"),
            "http://gbp.local/"
        );
    }
}
