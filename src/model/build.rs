//! Builds and build identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::{GbpError, Result};

use super::machine::MachineName;

/// Composite build identifier: machine name plus build number.
///
/// The wire form is `<machine>.<number>`; the number is taken from the text
/// after the last `.` so machine names may themselves contain dots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildId {
    machine: MachineName,
    number: u64,
}

impl BuildId {
    /// Create an identifier from already validated parts.
    pub fn new(machine: MachineName, number: u64) -> Self {
        Self { machine, number }
    }

    /// Parse a user- or server-supplied build number.
    ///
    /// Negative numbers and anything that is not a base-10 integer are
    /// rejected with [`GbpError::InvalidArgument`].
    pub fn parse_number(text: &str) -> Result<u64> {
        let text = text.trim();
        if text.starts_with('-') {
            return Err(GbpError::invalid(format!(
                "build number must not be negative: {text}"
            )));
        }
        text.parse::<u64>()
            .map_err(|_| GbpError::invalid(format!("build number must be an integer: {text}")))
    }

    /// The machine this build belongs to.
    pub fn machine(&self) -> &MachineName {
        &self.machine
    }

    /// The build number.
    pub fn number(&self) -> u64 {
        self.number
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.machine, self.number)
    }
}

impl FromStr for BuildId {
    type Err = GbpError;

    fn from_str(s: &str) -> Result<Self> {
        let (machine, number) = s
            .rsplit_once('.')
            .ok_or_else(|| GbpError::invalid(format!("build id must be <machine>.<number>: {s}")))?;
        Ok(Self::new(
            MachineName::new(machine)?,
            Self::parse_number(number)?,
        ))
    }
}

/// Metadata about a build as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// When the build was submitted to the service.
    pub submitted: DateTime<Utc>,
    /// When the build finished; `None` while it is still in progress.
    pub completed: Option<DateTime<Utc>>,
    /// Whether the build is the machine's published build.
    pub published: bool,
    /// Whether the build is pinned against retention purges.
    pub keep: bool,
    /// Tags currently pointing at this build.
    pub tags: Vec<String>,
}

/// A build of a machine.
///
/// Equality and hashing consider only the [`BuildId`].
#[derive(Debug, Clone)]
pub struct Build {
    id: BuildId,
    info: BuildInfo,
}

impl Build {
    /// Create a build value.
    pub fn new(id: BuildId, info: BuildInfo) -> Self {
        Self { id, info }
    }

    /// The build identifier.
    pub fn id(&self) -> &BuildId {
        &self.id
    }

    /// The machine this build belongs to.
    pub fn machine(&self) -> &MachineName {
        self.id.machine()
    }

    /// The build number.
    pub fn number(&self) -> u64 {
        self.id.number()
    }

    /// Full build metadata.
    pub fn info(&self) -> &BuildInfo {
        &self.info
    }

    /// Submission timestamp.
    pub fn submitted(&self) -> DateTime<Utc> {
        self.info.submitted
    }

    /// Completion timestamp, if complete.
    pub fn completed(&self) -> Option<DateTime<Utc>> {
        self.info.completed
    }

    /// Whether the package set is final.
    pub fn is_complete(&self) -> bool {
        self.info.completed.is_some()
    }

    /// Whether the build is published.
    pub fn is_published(&self) -> bool {
        self.info.published
    }

    /// Whether the build is kept.
    pub fn is_kept(&self) -> bool {
        self.info.keep
    }

    /// Tags pointing at this build.
    pub fn tags(&self) -> &[String] {
        &self.info.tags
    }
}

impl PartialEq for Build {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Build {}

impl Hash for Build {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
