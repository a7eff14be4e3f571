//! `gbp keep`: protect a build from purging, or release it.

use crate::error::Result;
use crate::model::MachineName;
use crate::registry::{CommandContext, CommandResult};

use super::{BuildTarget, BuiltinCommand};

/// Arguments for the `keep` command.
#[derive(Debug, Clone, clap::Args)]
pub struct KeepArgs {
    /// Machine name
    pub machine: MachineName,

    /// Build number, @tag or "latest"
    pub build: BuildTarget,

    /// Release the build instead of keeping it
    #[arg(short, long)]
    pub release: bool,
}

/// The keep command implementation.
pub struct KeepCommand;

impl BuiltinCommand for KeepCommand {
    type Args = KeepArgs;
    const NAME: &'static str = "keep";
    const ABOUT: &'static str = "Keep (or release) a build";

    fn run(&self, args: KeepArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let id = args.build.resolve(ctx.client, &args.machine)?;
        ctx.client.keep(&id, !args.release)?;
        let verb = if args.release { "Released" } else { "Kept" };
        ctx.ui
            .success(&format!("{} {} {}", verb, id.machine(), id.number()));
        Ok(CommandResult::success())
    }
}
