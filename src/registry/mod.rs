//! Subcommand registry.
//!
//! Subcommands come from an ordered list of sources:
//! 1. Built-in commands compiled into the binary
//! 2. Plugin manifests in each configured plugin directory
//!
//! Every subcommand is registered under a unique name. A second
//! registration of a name is a [`GbpError::Conflict`](crate::GbpError) and
//! aborts startup; the registry is never used half-built.
//!
//! # Example
//!
//! ```
//! use gbpcli::registry::{BuiltinSource, SubcommandRegistry};
//!
//! let registry = SubcommandRegistry::from_sources(vec![Box::new(BuiltinSource)]).unwrap();
//! assert!(registry.get("list").is_some());
//! assert!(registry.get("frobnicate").is_none());
//! ```

pub mod builtin;
pub mod external;
pub mod local;
pub mod manifest;
pub mod resolver;
pub mod source;

pub use builtin::BuiltinSource;
pub use external::ExternalSubcommand;
pub use local::PluginDirSource;
pub use manifest::{ArgKind, ArgSpec, PluginManifest, EXTENSION_POINT};
pub use resolver::SubcommandRegistry;
pub use source::SubcommandSource;

use clap::ArgMatches;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::ui::UserInterface;

/// A named subcommand.
///
/// Each subcommand contributes its arguments to the command-line grammar and
/// runs against the values in a [`CommandContext`].
pub trait Subcommand {
    /// Name the subcommand is invoked by.
    fn name(&self) -> &str;

    /// One-line help text.
    fn about(&self) -> &str;

    /// Where the subcommand came from, for diagnostics.
    fn origin(&self) -> String {
        "built-in".to_string()
    }

    /// Add this subcommand's arguments to its clap command.
    fn augment_args(&self, cmd: clap::Command) -> clap::Command;

    /// Run the subcommand.
    fn execute(&self, matches: &ArgMatches, ctx: &mut CommandContext<'_>) -> Result<CommandResult>;
}

/// Per-invocation values handed to a subcommand.
pub struct CommandContext<'a> {
    /// Resolved configuration.
    pub config: &'a Config,
    /// Client for the configured build publisher.
    pub client: &'a ApiClient,
    /// Output.
    pub ui: &'a mut dyn UserInterface,
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Result for a status code; zero is success.
    pub fn from_status(status: i32) -> Self {
        if status == 0 {
            Self::success()
        } else {
            Self::failure(status)
        }
    }
}
