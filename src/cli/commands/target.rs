//! Build selection on the command line.

use std::fmt;
use std::str::FromStr;

use crate::client::ApiClient;
use crate::error::{GbpError, Result};
use crate::model::{BuildId, MachineName, TagName};

/// Which build of a machine a command refers to.
///
/// Written as a build number (`3226`), a tag (`@prod`) or `latest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildTarget {
    /// A specific build number.
    Number(u64),
    /// The build a tag points at.
    Tag(TagName),
    /// The machine's most recent build.
    Latest,
}

impl BuildTarget {
    /// Resolve to a build id. Numbers resolve without a request.
    pub fn resolve(&self, client: &ApiClient, machine: &MachineName) -> Result<BuildId> {
        match self {
            Self::Number(number) => Ok(BuildId::new(machine.clone(), *number)),
            Self::Tag(tag) => Ok(client.resolve_tag(machine, tag)?.id().clone()),
            Self::Latest => Ok(client.latest(machine)?.id().clone()),
        }
    }
}

impl FromStr for BuildTarget {
    type Err = GbpError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("latest") {
            Ok(Self::Latest)
        } else if s.starts_with(crate::model::tag::TAG_SYMBOL) {
            Ok(Self::Tag(TagName::new(s)?))
        } else {
            Ok(Self::Number(BuildId::parse_number(s)?))
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Tag(tag) => write!(f, "@{}", tag),
            Self::Latest => f.write_str("latest"),
        }
    }
}
