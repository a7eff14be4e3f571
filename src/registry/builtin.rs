//! Built-in subcommands compiled into the binary.

use crate::cli::commands;
use crate::error::Result;

use super::{Subcommand, SubcommandSource};

/// Source of the compiled-in subcommands.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl SubcommandSource for BuiltinSource {
    fn label(&self) -> String {
        "built-in".to_string()
    }

    fn discover(&self) -> Result<Vec<Box<dyn Subcommand>>> {
        Ok(commands::builtins())
    }
}
