//! Built-in subcommands.
//!
//! Each built-in implements [`BuiltinCommand`]: a typed `clap::Args` struct
//! plus a `run` function. The blanket [`Subcommand`] impl plugs every
//! built-in into the registry, so built-ins and plugins are dispatched the
//! same way.

pub mod build;
pub mod diff;
pub mod dispatcher;
pub mod keep;
pub mod latest;
pub mod list;
pub mod logs;
pub mod machines;
pub mod notes;
pub mod packages;
pub mod publish;
pub mod pull;
pub mod status;
pub mod tag;
pub mod target;

pub use dispatcher::{Dispatcher, Outcome, Phase};
pub use target::BuildTarget;

use clap::{ArgMatches, FromArgMatches};

use crate::error::{GbpError, Result};
use crate::registry::{CommandContext, CommandResult, Subcommand};

/// A subcommand compiled into the binary.
pub trait BuiltinCommand {
    /// Typed arguments.
    type Args: clap::Args + FromArgMatches;

    /// Command name.
    const NAME: &'static str;

    /// One-line help text.
    const ABOUT: &'static str;

    /// Run with parsed arguments.
    fn run(&self, args: Self::Args, ctx: &mut CommandContext<'_>) -> Result<CommandResult>;
}

impl<T: BuiltinCommand> Subcommand for T {
    fn name(&self) -> &str {
        T::NAME
    }

    fn about(&self) -> &str {
        T::ABOUT
    }

    fn augment_args(&self, cmd: clap::Command) -> clap::Command {
        <T::Args as clap::Args>::augment_args(cmd)
    }

    fn execute(&self, matches: &ArgMatches, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let args = T::Args::from_arg_matches(matches)
            .map_err(|e| GbpError::invalid(e.to_string().trim().to_string()))?;
        self.run(args, ctx)
    }
}

/// All built-in subcommands, in help order.
pub fn builtins() -> Vec<Box<dyn Subcommand>> {
    vec![
        Box::new(machines::MachinesCommand),
        Box::new(list::ListCommand),
        Box::new(status::StatusCommand),
        Box::new(latest::LatestCommand),
        Box::new(packages::PackagesCommand),
        Box::new(diff::DiffCommand),
        Box::new(publish::PublishCommand),
        Box::new(pull::PullCommand),
        Box::new(keep::KeepCommand),
        Box::new(tag::TagCommand),
        Box::new(notes::NotesCommand),
        Box::new(logs::LogsCommand),
        Box::new(build::BuildCommand),
    ]
}

/// Yes/no for flag display.
pub(crate) fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
