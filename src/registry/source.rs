//! Subcommand sources.

use crate::error::Result;

use super::Subcommand;

/// A provider of subcommands, consulted once while the registry is built.
pub trait SubcommandSource {
    /// Human-readable description of the source.
    fn label(&self) -> String;

    /// Produce this source's subcommands in registration order.
    fn discover(&self) -> Result<Vec<Box<dyn Subcommand>>>;
}
