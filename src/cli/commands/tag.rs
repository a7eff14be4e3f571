//! `gbp tag`: point a tag at a build, or remove it.
//!
//! `gbp tag <machine> [build] <tag>` tags the given build (the latest when
//! omitted). `gbp tag --remove <machine> <tag>` removes the tag; giving a
//! build number together with `--remove` is an error.

use crate::error::{GbpError, Result};
use crate::model::{MachineName, TagName};
use crate::registry::{CommandContext, CommandResult};

use super::{BuildTarget, BuiltinCommand};

/// Arguments for the `tag` command.
#[derive(Debug, Clone, clap::Args)]
pub struct TagArgs {
    /// Machine name
    pub machine: MachineName,

    /// Optional build (number, @tag or "latest") followed by the tag
    #[arg(value_name = "ARGS", num_args = 1..=2, required = true)]
    pub rest: Vec<String>,

    /// Remove the tag
    #[arg(short, long)]
    pub remove: bool,
}

impl TagArgs {
    /// Split the trailing values into an optional build and the tag.
    fn target_and_tag(&self) -> Result<(Option<BuildTarget>, TagName)> {
        match self.rest.as_slice() {
            [tag] => Ok((None, TagName::new(tag)?)),
            [build, tag] => Ok((Some(build.parse()?), TagName::new(tag)?)),
            _ => Err(GbpError::invalid("expected [build] <tag>")),
        }
    }
}

/// The tag command implementation.
pub struct TagCommand;

impl BuiltinCommand for TagCommand {
    type Args = TagArgs;
    const NAME: &'static str = "tag";
    const ABOUT: &'static str = "Add or remove a build tag";

    fn run(&self, args: TagArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let (target, tag) = args.target_and_tag()?;

        if args.remove {
            if target.is_some() {
                return Err(GbpError::invalid(
                    "When removing a tag, omit the build number",
                ));
            }
            ctx.client.untag(&args.machine, &tag)?;
            ctx.ui
                .success(&format!("Removed @{} from {}", tag, args.machine));
            return Ok(CommandResult::success());
        }

        let id = target
            .unwrap_or(BuildTarget::Latest)
            .resolve(ctx.client, &args.machine)?;
        let tagged = ctx.client.tag(&args.machine, &tag, &id)?;
        ctx.ui.success(&format!(
            "Tagged {} {} as @{}",
            tagged.build().machine(),
            tagged.build().number(),
            tagged.name()
        ));
        Ok(CommandResult::success())
    }
}
