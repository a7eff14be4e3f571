//! Command-line interface for gbpcli.
//!
//! # Architecture
//!
//! - [`args`] - Global options and the runtime-built clap grammar
//! - [`commands`] - Built-in commands and the dispatcher
//! - [`entry`] - Wires configuration, registry, parsing and dispatch together

pub mod args;
pub mod commands;
pub mod entry;

pub use args::{build_command, GlobalArgs};
pub use commands::{BuildTarget, BuiltinCommand, Dispatcher, Outcome, Phase};
pub use entry::run;
