//! Machines.

use std::fmt;

use crate::error::{GbpError, Result};

/// Validated machine identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MachineName(String);

impl MachineName {
    /// Validate a machine name. Empty or blank names are rejected.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(GbpError::invalid("machine name must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for MachineName {
    type Err = GbpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// A machine tracked by the build publisher.
#[derive(Debug, Clone)]
pub struct Machine {
    name: MachineName,
    build_count: u64,
}

impl Machine {
    /// Create a machine summary.
    pub fn new(name: MachineName, build_count: u64) -> Self {
        Self { name, build_count }
    }

    /// The machine's name.
    pub fn name(&self) -> &MachineName {
        &self.name
    }

    /// Number of builds the service holds for this machine.
    pub fn build_count(&self) -> u64 {
        self.build_count
    }
}

impl PartialEq for Machine {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Machine {}
