//! `gbp pull`: pull a build into the build publisher.

use crate::error::Result;
use crate::model::{BuildId, MachineName};
use crate::registry::{CommandContext, CommandResult};

use super::BuiltinCommand;

/// Arguments for the `pull` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PullArgs {
    /// Machine name
    pub machine: MachineName,

    /// Build number
    #[arg(value_parser = parse_number)]
    pub number: u64,
}

fn parse_number(s: &str) -> Result<u64> {
    BuildId::parse_number(s)
}

/// The pull command implementation.
pub struct PullCommand;

impl BuiltinCommand for PullCommand {
    type Args = PullArgs;
    const NAME: &'static str = "pull";
    const ABOUT: &'static str = "Pull a build";

    fn run(&self, args: PullArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let id = BuildId::new(args.machine, args.number);
        ctx.client.pull(&id)?;
        ctx.ui.success(&format!("Pulled {} {}", id.machine(), id.number()));
        Ok(CommandResult::success())
    }
}
