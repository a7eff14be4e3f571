//! Build publisher API client.
//!
//! [`ApiClient`] speaks GraphQL over HTTP to the build publisher and turns
//! every response into [`model`](crate::model) values or a typed
//! [`GbpError`]. Each method performs one logical remote interaction and
//! blocks until it completes; nothing is cached and nothing is retried.
//!
//! # Error mapping
//!
//! | Condition                                   | Error            |
//! |---------------------------------------------|------------------|
//! | timeout, refused connection, HTTP 5xx       | `Unavailable`    |
//! | HTTP 404, non-JSON body, missing fields     | `Protocol`       |
//! | `null` object or GraphQL "not found" error  | `NotFound`       |
//! | other GraphQL errors, other HTTP 4xx        | `Remote`         |
//!
//! # Example
//!
//! ```no_run
//! use gbpcli::client::ApiClient;
//! use gbpcli::config::Config;
//! use gbpcli::model::MachineName;
//!
//! let config = Config::new("https://gbp/").unwrap();
//! let client = ApiClient::new(&config).unwrap();
//! let machine = MachineName::new("lighthouse").unwrap();
//! for build in client.builds(&machine).unwrap() {
//!     println!("{} published={}", build.number(), build.is_published());
//! }
//! ```

pub mod queries;
pub mod wire;

use std::thread;

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::config::{Config, Credentials};
use crate::error::{GbpError, Result};
use crate::model::{Build, BuildId, Machine, MachineName, Package, PackageDiff, Tag, TagName};

use wire::{BuildLogs, BuildNotes, BuildRef, Envelope, GraphQlError, GraphQlRequest, WireBuild};

/// Client for the build publisher GraphQL API.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    endpoint: Url,
    credentials: Option<Credentials>,
}

impl ApiClient {
    /// Create a client from the resolved configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("gbpcli/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| GbpError::configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            credentials: config.credentials.clone(),
        })
    }

    /// The GraphQL endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// List all machines known to the service.
    pub fn machines(&self) -> Result<Vec<Machine>> {
        let mut data = self.execute("machines", queries::MACHINES, json!({}))?;
        let machines: Vec<wire::MachineSummary> = field(&mut data, "machines", "machines")?;
        machines.into_iter().map(Machine::try_from).collect()
    }

    /// List a machine's builds, most recent first.
    pub fn builds(&self, machine: &MachineName) -> Result<Vec<Build>> {
        let mut data = self.execute(
            "builds",
            queries::BUILDS,
            json!({ "machine": machine.as_str() }),
        )?;
        let wire: Vec<WireBuild> = field(&mut data, "builds", "builds")?;

        let mut builds = wire
            .into_iter()
            .map(Build::try_from)
            .collect::<Result<Vec<_>>>()?;
        if let Some(stray) = builds.iter().find(|b| b.machine() != machine) {
            return Err(GbpError::protocol(format!(
                "builds for {machine} included {}",
                stray.id()
            )));
        }
        builds.sort_by(|a, b| b.number().cmp(&a.number()));
        Ok(builds)
    }

    /// Fetch a single build.
    pub fn build(&self, id: &BuildId) -> Result<Build> {
        let mut data = self.execute("build", queries::BUILD, id_vars(id))?;
        let build: Option<WireBuild> = field(&mut data, "build", "build")?;
        build
            .ok_or_else(|| GbpError::not_found(format!("build {id}")))?
            .try_into()
    }

    /// Fetch the most recent build of a machine.
    pub fn latest(&self, machine: &MachineName) -> Result<Build> {
        let mut data = self.execute(
            "latest",
            queries::LATEST,
            json!({ "machine": machine.as_str() }),
        )?;
        let build: Option<WireBuild> = field(&mut data, "latest", "latest")?;
        build
            .ok_or_else(|| GbpError::not_found(format!("builds for machine {machine}")))?
            .try_into()
    }

    /// Fetch the build a tag currently points at.
    pub fn resolve_tag(&self, machine: &MachineName, tag: &TagName) -> Result<Build> {
        let mut data = self.execute(
            "resolve_tag",
            queries::RESOLVE_TAG,
            json!({ "machine": machine.as_str(), "tag": tag.as_str() }),
        )?;
        let build: Option<WireBuild> = field(&mut data, "resolve_tag", "resolveBuildTag")?;
        build
            .ok_or_else(|| GbpError::not_found(format!("tag @{tag} on machine {machine}")))?
            .try_into()
    }

    /// Fetch a completed build's package set.
    ///
    /// Incomplete builds have no final package set and report `NotFound`.
    pub fn packages(&self, id: &BuildId) -> Result<Vec<Package>> {
        let mut data = self.execute("packages", queries::PACKAGES, id_vars(id))?;
        let atoms: Option<Vec<String>> = field(&mut data, "packages", "packages")?;
        let atoms =
            atoms.ok_or_else(|| GbpError::not_found(format!("packages for build {id}")))?;
        wire::packages(atoms)
    }

    /// Compare the package sets of two builds of the same machine.
    ///
    /// Both package sets are fetched concurrently.
    pub fn diff(&self, left: &BuildId, right: &BuildId) -> Result<PackageDiff> {
        if left.machine() != right.machine() {
            return Err(GbpError::invalid(format!(
                "cannot diff builds of different machines: {left} and {right}"
            )));
        }

        let unavailable = |id: &BuildId, err: GbpError| match err {
            GbpError::NotFound { .. } => {
                GbpError::unavailable(format!("package set for build {id} is not available"))
            }
            other => other,
        };

        if left == right {
            let packages = self.packages(left).map_err(|e| unavailable(left, e))?;
            return Ok(PackageDiff::between(&packages, &packages));
        }

        let (left_packages, right_packages) = thread::scope(|scope| {
            let right_handle = scope.spawn(|| self.packages(right));
            let left_packages = self.packages(left);
            let right_packages = right_handle.join().unwrap_or_else(|_| {
                Err(GbpError::Other(anyhow::anyhow!(
                    "package fetch for {right} panicked"
                )))
            });
            (left_packages, right_packages)
        });

        let left_packages = left_packages.map_err(|e| unavailable(left, e))?;
        let right_packages = right_packages.map_err(|e| unavailable(right, e))?;
        Ok(PackageDiff::between(&left_packages, &right_packages))
    }

    /// Publish a build. Publishing a published build succeeds.
    pub fn publish(&self, id: &BuildId) -> Result<()> {
        self.mutate_build("publish", queries::PUBLISH, "publish", id)
    }

    /// Pull a build into the service.
    pub fn pull(&self, id: &BuildId) -> Result<()> {
        self.mutate_build("pull", queries::PULL, "pull", id)
    }

    /// Set or clear a build's keep flag.
    pub fn keep(&self, id: &BuildId, keep: bool) -> Result<()> {
        if keep {
            self.mutate_build("keep", queries::KEEP, "keepBuild", id)
        } else {
            self.mutate_build("release", queries::RELEASE, "releaseBuild", id)
        }
    }

    /// Point a machine's tag at a build, moving it if it already exists.
    pub fn tag(&self, machine: &MachineName, tag: &TagName, build: &BuildId) -> Result<Tag> {
        if build.machine() != machine {
            return Err(GbpError::invalid(format!(
                "build {build} does not belong to machine {machine}"
            )));
        }

        let mut data = self.execute(
            "tag",
            queries::TAG,
            json!({ "id": build.to_string(), "tag": tag.as_str() }),
        )?;
        let tagged: Option<BuildRef> = field(&mut data, "tag", "tagBuild")?;
        expect_build_ref(tagged, build)?;
        Ok(Tag::new(tag.clone(), build.clone()))
    }

    /// Remove a machine's tag.
    pub fn untag(&self, machine: &MachineName, tag: &TagName) -> Result<()> {
        let mut data = self.execute(
            "untag",
            queries::UNTAG,
            json!({ "machine": machine.as_str(), "tag": tag.as_str() }),
        )?;
        let untagged: Option<Value> = field(&mut data, "untag", "untagBuild")?;
        match untagged {
            Some(_) => Ok(()),
            None => Err(GbpError::not_found(format!("tag @{tag} on machine {machine}"))),
        }
    }

    /// Set a build's note, replacing any existing note.
    pub fn set_note(&self, id: &BuildId, text: &str) -> Result<()> {
        self.write_note(id, Some(text))
    }

    /// Remove a build's note.
    pub fn delete_note(&self, id: &BuildId) -> Result<()> {
        self.write_note(id, None)
    }

    /// Fetch a build's note, if it has one.
    pub fn note(&self, id: &BuildId) -> Result<Option<String>> {
        let mut data = self.execute("note", queries::NOTE, id_vars(id))?;
        let build: Option<BuildNotes> = field(&mut data, "note", "build")?;
        Ok(build
            .ok_or_else(|| GbpError::not_found(format!("build {id}")))?
            .notes)
    }

    /// Fetch a build's logs, if it has any.
    pub fn logs(&self, id: &BuildId) -> Result<Option<String>> {
        let mut data = self.execute("logs", queries::LOGS, id_vars(id))?;
        let build: Option<BuildLogs> = field(&mut data, "logs", "build")?;
        Ok(build
            .ok_or_else(|| GbpError::not_found(format!("build {id}")))?
            .logs)
    }

    /// Ask the service to schedule a build. Returns the job id.
    pub fn schedule_build(&self, machine: &MachineName) -> Result<String> {
        let mut data = self.execute(
            "schedule_build",
            queries::SCHEDULE_BUILD,
            json!({ "machine": machine.as_str() }),
        )?;
        field(&mut data, "schedule_build", "scheduleBuild")
    }

    fn write_note(&self, id: &BuildId, text: Option<&str>) -> Result<()> {
        let mut data = self.execute(
            "set_note",
            queries::CREATE_NOTE,
            json!({ "id": id.to_string(), "note": text }),
        )?;
        let noted: Option<BuildRef> = field(&mut data, "set_note", "createNote")?;
        expect_build_ref(noted, id)
    }

    fn mutate_build(&self, operation: &str, query: &str, name: &str, id: &BuildId) -> Result<()> {
        let mut data = self.execute(operation, query, id_vars(id))?;
        let mutated: Option<BuildRef> = field(&mut data, operation, name)?;
        expect_build_ref(mutated, id)
    }

    /// Send one GraphQL request and return its `data` object.
    fn execute(&self, operation: &str, query: &str, variables: Value) -> Result<Map<String, Value>> {
        let body = GraphQlRequest {
            query,
            variables: &variables,
        };

        let mut request = self.http.post(self.endpoint.clone()).json(&body);
        if let Some(credentials) = &self.credentials {
            let key = credentials.api_key.expose();
            request = match &credentials.user {
                Some(user) => request.basic_auth(user, Some(key)),
                None => request.bearer_auth(key),
            };
        }

        tracing::debug!(operation, endpoint = %self.endpoint, "sending request");
        let response = request
            .send()
            .map_err(|e| transport_error(operation, &e))?;

        let status = response.status();
        tracing::debug!(operation, status = status.as_u16(), "received response");

        if status.is_server_error() {
            return Err(GbpError::unavailable(format!(
                "{operation}: server returned HTTP {status}"
            )));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(GbpError::protocol(format!(
                "{operation}: {} returned HTTP 404; is this a build publisher?",
                self.endpoint
            )));
        }

        let text = response
            .text()
            .map_err(|e| transport_error(operation, &e))?;

        let envelope: Envelope = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(_) if status.is_client_error() => {
                return Err(GbpError::Remote {
                    message: format!("{operation}: server returned HTTP {status}"),
                });
            }
            Err(e) => {
                return Err(GbpError::protocol(format!(
                    "{operation}: response is not a GraphQL payload: {e}"
                )));
            }
        };

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            return Err(classify_errors(operation, &errors));
        }

        match envelope.data {
            Some(Value::Object(data)) => Ok(data),
            Some(_) | None if status.is_client_error() => Err(GbpError::Remote {
                message: format!("{operation}: server returned HTTP {status}"),
            }),
            Some(_) | None => Err(GbpError::protocol(format!(
                "{operation}: response has no data"
            ))),
        }
    }
}

fn id_vars(id: &BuildId) -> Value {
    json!({ "id": id.to_string() })
}

/// Take a required top-level field out of a `data` object.
fn field<T: DeserializeOwned>(data: &mut Map<String, Value>, operation: &str, name: &str) -> Result<T> {
    let value = data
        .remove(name)
        .ok_or_else(|| GbpError::protocol(format!("{operation}: response is missing `{name}`")))?;
    serde_json::from_value(value)
        .map_err(|e| GbpError::protocol(format!("{operation}: malformed `{name}`: {e}")))
}

fn expect_build_ref(reference: Option<BuildRef>, id: &BuildId) -> Result<()> {
    let reference = reference.ok_or_else(|| GbpError::not_found(format!("build {id}")))?;
    let returned = wire::build_id(&reference.id)?;
    if &returned != id {
        return Err(GbpError::protocol(format!(
            "server answered for build {returned} instead of {id}"
        )));
    }
    Ok(())
}

fn classify_errors(operation: &str, errors: &[GraphQlError]) -> GbpError {
    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    if errors.iter().any(GraphQlError::is_not_found) {
        GbpError::not_found(message)
    } else {
        GbpError::Remote {
            message: format!("{operation}: {message}"),
        }
    }
}

fn transport_error(operation: &str, err: &reqwest::Error) -> GbpError {
    let reason = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "could not connect"
    } else {
        "request failed"
    };
    GbpError::unavailable(format!("{operation}: {reason}: {err}"))
}
