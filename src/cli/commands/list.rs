//! `gbp list`: show a machine's builds, newest first.

use crate::error::Result;
use crate::model::{Build, MachineName};
use crate::registry::{CommandContext, CommandResult};
use crate::ui::{format_timestamp, GbpTheme, Table};

use super::BuiltinCommand;

/// Arguments for the `list` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Machine name
    pub machine: MachineName,
}

/// The list command implementation.
pub struct ListCommand;

impl BuiltinCommand for ListCommand {
    type Args = ListArgs;
    const NAME: &'static str = "list";
    const ABOUT: &'static str = "List a machine's builds";

    fn run(&self, args: ListArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let builds = ctx.client.builds(&args.machine)?;
        if builds.is_empty() {
            ctx.ui.message(&format!("No builds for {}", args.machine));
            return Ok(CommandResult::success());
        }

        let theme = ctx.ui.theme().clone();
        let mut table = Table::new(vec!["Build", "Flags", "Submitted", "Tags"]);
        for build in &builds {
            table.add_row(vec![
                build.number().to_string(),
                flags(build, &theme),
                format_timestamp(build.submitted()),
                tags(build, &theme),
            ]);
        }
        ctx.ui.print(&table.render());
        if ctx.ui.output_mode().shows_detail() {
            ctx.ui.message("Flags: P published, K kept, * building");
        }
        Ok(CommandResult::success())
    }
}

/// Three-column flag field: published, kept, building.
fn flags(build: &Build, theme: &GbpTheme) -> String {
    let mark = |on: bool, c: char| if on { c } else { ' ' };
    let text: String = [
        mark(build.is_published(), 'P'),
        mark(build.is_kept(), 'K'),
        mark(!build.is_complete(), '*'),
    ]
    .iter()
    .collect();
    theme.flag.apply_to(text).to_string()
}

fn tags(build: &Build, theme: &GbpTheme) -> String {
    build
        .tags()
        .iter()
        .map(|t| theme.tag.apply_to(format!("@{}", t)).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
