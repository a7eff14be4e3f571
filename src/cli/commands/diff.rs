//! `gbp diff`: compare the packages of two builds of a machine.

use crate::error::Result;
use crate::model::{MachineName, PackageDiff};
use crate::registry::{CommandContext, CommandResult};
use crate::ui::GbpTheme;

use super::{BuildTarget, BuiltinCommand};

/// Arguments for the `diff` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DiffArgs {
    /// Machine name
    pub machine: MachineName,

    /// Left build (number, @tag or "latest")
    pub left: BuildTarget,

    /// Right build (number, @tag or "latest")
    pub right: BuildTarget,
}

/// The diff command implementation.
pub struct DiffCommand;

impl BuiltinCommand for DiffCommand {
    type Args = DiffArgs;
    const NAME: &'static str = "diff";
    const ABOUT: &'static str = "Show package differences between two builds";

    fn run(&self, args: DiffArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let left = args.left.resolve(ctx.client, &args.machine)?;
        let right = args.right.resolve(ctx.client, &args.machine)?;
        let diff = ctx.client.diff(&left, &right)?;

        if diff.is_empty() {
            ctx.ui.message("No differences");
            return Ok(CommandResult::success());
        }

        ctx.ui.print(&format!(
            "diff -r {}/{} {}/{}",
            left.machine(),
            left.number(),
            right.machine(),
            right.number()
        ));
        let theme = ctx.ui.theme().clone();
        for line in render(&diff, &theme) {
            ctx.ui.print(&line);
        }
        Ok(CommandResult::success())
    }
}

/// One `-`/`+` line per package, ordered by package key.
fn render(diff: &PackageDiff, theme: &GbpTheme) -> Vec<String> {
    let mut entries: Vec<(&str, char, &str)> = Vec::new();
    for package in &diff.removed {
        entries.push((package.key(), '-', package.atom()));
    }
    for package in &diff.added {
        entries.push((package.key(), '+', package.atom()));
    }
    for change in &diff.changed {
        for package in &change.from {
            entries.push((change.key.as_str(), '-', package.atom()));
        }
        for package in &change.to {
            entries.push((change.key.as_str(), '+', package.atom()));
        }
    }
    // Stable: within a key, removals stay ahead of additions.
    entries.sort_by(|a, b| a.0.cmp(b.0));

    entries
        .into_iter()
        .map(|(_, sign, atom)| {
            let style = if sign == '-' {
                &theme.error
            } else {
                &theme.success
            };
            style.apply_to(format!("{}{}", sign, atom)).to_string()
        })
        .collect()
}
