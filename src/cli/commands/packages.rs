//! `gbp packages`: list the packages in a build.

use crate::error::Result;
use crate::model::MachineName;
use crate::registry::{CommandContext, CommandResult};

use super::{BuildTarget, BuiltinCommand};

/// Arguments for the `packages` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PackagesArgs {
    /// Machine name
    pub machine: MachineName,

    /// Build number, @tag or "latest"
    pub build: BuildTarget,
}

/// The packages command implementation.
pub struct PackagesCommand;

impl BuiltinCommand for PackagesCommand {
    type Args = PackagesArgs;
    const NAME: &'static str = "packages";
    const ABOUT: &'static str = "List the packages of a build";

    fn run(&self, args: PackagesArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let id = args.build.resolve(ctx.client, &args.machine)?;
        let mut packages = ctx.client.packages(&id)?;
        packages.sort();
        for package in &packages {
            ctx.ui.print(package.atom());
        }
        Ok(CommandResult::success())
    }
}
