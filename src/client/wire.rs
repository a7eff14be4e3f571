//! Wire payloads and their conversion into model types.
//!
//! Nothing in this module escapes the client: every payload is validated and
//! converted here, and anything that does not fit becomes
//! [`GbpError::Protocol`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GbpError, Result};
use crate::model::{Build, BuildId, BuildInfo, Machine, MachineName, Package};

/// GraphQL request body.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
}

impl GraphQlError {
    /// Whether the server is reporting a missing object.
    ///
    /// An error code decides on its own; the message is only consulted when
    /// the server sends none.
    pub fn is_not_found(&self) -> bool {
        let code = self.extensions.as_ref().and_then(|ext| ext.code.as_deref());
        match code {
            Some(code) => code.eq_ignore_ascii_case("NOT_FOUND"),
            None => {
                let message = self.message.to_lowercase();
                message.contains("not found") || message.contains("does not exist")
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSummary {
    pub machine: String,
    pub build_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct WireBuild {
    pub id: String,
    pub machine: String,
    pub keep: bool,
    pub published: bool,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub submitted: String,
    #[serde(default)]
    pub completed: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BuildRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildNotes {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BuildLogs {
    #[serde(default)]
    pub logs: Option<String>,
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| GbpError::protocol(format!("invalid `{field}` timestamp {value:?}: {e}")))
}

/// Parse a build id reported by the server.
pub fn build_id(id: &str) -> Result<BuildId> {
    id.parse()
        .map_err(|e| GbpError::protocol(format!("invalid build id {id:?}: {e}")))
}

impl TryFrom<MachineSummary> for Machine {
    type Error = GbpError;

    fn try_from(wire: MachineSummary) -> Result<Self> {
        let name = MachineName::new(wire.machine)
            .map_err(|e| GbpError::protocol(format!("invalid machine: {e}")))?;
        Ok(Machine::new(name, wire.build_count))
    }
}

impl TryFrom<WireBuild> for Build {
    type Error = GbpError;

    fn try_from(wire: WireBuild) -> Result<Self> {
        let id = build_id(&wire.id)?;
        if id.machine().as_str() != wire.machine {
            return Err(GbpError::protocol(format!(
                "build {} reports machine {:?}",
                wire.id, wire.machine
            )));
        }

        let submitted = parse_timestamp("submitted", &wire.submitted)?;
        let completed = wire
            .completed
            .as_deref()
            .map(|ts| parse_timestamp("completed", ts))
            .transpose()?;

        Ok(Build::new(
            id,
            BuildInfo {
                submitted,
                completed,
                published: wire.published,
                keep: wire.keep,
                tags: wire.tags.unwrap_or_default(),
            },
        ))
    }
}

/// Convert a list of atoms into packages.
pub fn packages(atoms: Vec<String>) -> Result<Vec<Package>> {
    atoms
        .into_iter()
        .map(|atom| {
            Package::new(atom).map_err(|e| GbpError::protocol(format!("invalid package: {e}")))
        })
        .collect()
}
