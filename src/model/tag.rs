//! Build tags.

use std::fmt;

use crate::error::{GbpError, Result};

use super::build::BuildId;

/// Character that marks a build argument as a tag reference (`@prod`).
pub const TAG_SYMBOL: char = '@';

/// Validated tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(String);

impl TagName {
    /// Validate a tag name, stripping one leading [`TAG_SYMBOL`].
    pub fn new(name: &str) -> Result<Self> {
        let name = name.strip_prefix(TAG_SYMBOL).unwrap_or(name);
        if name.is_empty() {
            return Err(GbpError::invalid("tag name must not be empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(GbpError::invalid(format!(
                "tag name must not contain whitespace: {name:?}"
            )));
        }
        Ok(Self(name.to_string()))
    }

    /// The tag as a string slice (without the tag symbol).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named pointer from a machine to one of its builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: TagName,
    build: BuildId,
}

impl Tag {
    /// Create a tag value.
    pub fn new(name: TagName, build: BuildId) -> Self {
        Self { name, build }
    }

    /// The tag name.
    pub fn name(&self) -> &TagName {
        &self.name
    }

    /// The build the tag points at.
    pub fn build(&self) -> &BuildId {
        &self.build
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tag_symbol() {
        assert_eq!(TagName::new("@prod").unwrap().as_str(), "prod");
        assert_eq!(TagName::new("prod").unwrap().as_str(), "prod");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(TagName::new("").is_err());
        assert!(TagName::new("@").is_err());
        assert!(TagName::new("two words").is_err());
    }
}
