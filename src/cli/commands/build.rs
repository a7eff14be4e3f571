//! `gbp build`: schedule a build of a machine.

use crate::error::Result;
use crate::model::MachineName;
use crate::registry::{CommandContext, CommandResult};

use super::BuiltinCommand;

/// Arguments for the `build` command.
#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    /// Machine name
    pub machine: MachineName,
}

/// The build command implementation.
pub struct BuildCommand;

impl BuiltinCommand for BuildCommand {
    type Args = BuildArgs;
    const NAME: &'static str = "build";
    const ABOUT: &'static str = "Schedule a build of a machine";

    fn run(&self, args: BuildArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let job = ctx.client.schedule_build(&args.machine)?;
        ctx.ui
            .success(&format!("Scheduled build of {}", args.machine));
        ctx.ui.print(&job);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{graphql, run};
    use crate::client::queries;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn prints_job_id() {
        let server = MockServer::start();
        graphql(
            &server,
            queries::SCHEDULE_BUILD,
            json!({"machine": "babette"}),
            json!({"scheduleBuild": "f4c0ffee"}),
        );

        let (result, ui) = run(&BuildCommand, &server, &["babette"]);

        assert!(result.unwrap().success);
        assert_eq!(ui.printed(), ["f4c0ffee"]);
        assert!(ui.has_success("Scheduled build of babette"));
    }
}
