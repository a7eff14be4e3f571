//! `gbp latest`: print the number of a machine's latest build.

use crate::error::Result;
use crate::model::MachineName;
use crate::registry::{CommandContext, CommandResult};

use super::BuiltinCommand;

/// Arguments for the `latest` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LatestArgs {
    /// Machine name
    pub machine: MachineName,
}

/// The latest command implementation.
pub struct LatestCommand;

impl BuiltinCommand for LatestCommand {
    type Args = LatestArgs;
    const NAME: &'static str = "latest";
    const ABOUT: &'static str = "Show the latest build number of a machine";

    fn run(&self, args: LatestArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let build = ctx.client.latest(&args.machine)?;
        ctx.ui.print(&build.number().to_string());
        Ok(CommandResult::success())
    }
}
