//! `gbp status`: show one build.

use crate::error::Result;
use crate::model::MachineName;
use crate::registry::{CommandContext, CommandResult};
use crate::ui::{format_relative_time, format_timestamp};

use super::{yes_no, BuildTarget, BuiltinCommand};

/// Arguments for the `status` command.
#[derive(Debug, Clone, clap::Args)]
pub struct StatusArgs {
    /// Machine name
    pub machine: MachineName,

    /// Build number, @tag or "latest"
    pub build: BuildTarget,
}

/// The status command implementation.
pub struct StatusCommand;

impl BuiltinCommand for StatusCommand {
    type Args = StatusArgs;
    const NAME: &'static str = "status";
    const ABOUT: &'static str = "Show the status of a build";

    fn run(&self, args: StatusArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let id = args.build.resolve(ctx.client, &args.machine)?;
        let build = ctx.client.build(&id)?;

        let completed = match build.completed() {
            Some(ts) => format!("{} ({})", format_timestamp(ts), format_relative_time(ts)),
            None => "building".to_string(),
        };
        let tags = if build.tags().is_empty() {
            "-".to_string()
        } else {
            build
                .tags()
                .iter()
                .map(|t| format!("@{}", t))
                .collect::<Vec<_>>()
                .join(" ")
        };

        let lines = [
            ("Build", format!("{} {}", build.machine(), build.number())),
            (
                "Submitted",
                format!(
                    "{} ({})",
                    format_timestamp(build.submitted()),
                    format_relative_time(build.submitted())
                ),
            ),
            ("Completed", completed),
            ("Published", yes_no(build.is_published()).to_string()),
            ("Keep", yes_no(build.is_kept()).to_string()),
            ("Tags", tags),
        ];
        for (key, value) in lines {
            ctx.ui.print(&format!("{:<10} {}", format!("{}:", key), value));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{build_json, graphql, run};
    use crate::client::queries;
    use crate::error::GbpError;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn shows_build_fields() {
        let server = MockServer::start();
        graphql(
            &server,
            queries::BUILD,
            json!({"id": "x.1"}),
            json!({"build": build_json("x.1", true, &["prod"])}),
        );

        let (result, ui) = run(&StatusCommand, &server, &["x", "1"]);

        assert!(result.unwrap().success);
        let out = ui.stdout();
        assert!(out.contains("Build:     x 1"));
        assert!(out.contains("Published: yes"));
        assert!(out.contains("Keep:      no"));
        assert!(out.contains("@prod"));
    }

    #[test]
    fn missing_build_is_not_found() {
        let server = MockServer::start();
        graphql(&server, queries::BUILD, json!({"id": "x.9"}), json!({"build": null}));

        let (result, _) = run(&StatusCommand, &server, &["x", "9"]);

        assert!(matches!(result, Err(GbpError::NotFound { .. })));
    }

    #[test]
    fn latest_is_resolved_first() {
        let server = MockServer::start();
        graphql(
            &server,
            queries::LATEST,
            json!({"machine": "x"}),
            json!({"latest": build_json("x.5", false, &[])}),
        );
        let build = graphql(
            &server,
            queries::BUILD,
            json!({"id": "x.5"}),
            json!({"build": build_json("x.5", false, &[])}),
        );

        let (result, ui) = run(&StatusCommand, &server, &["x", "latest"]);

        assert!(result.unwrap().success);
        build.assert();
        assert!(ui.has_output("x 5"));
    }
}
