//! `gbp logs`: print a build's logs.

use crate::error::{GbpError, Result};
use crate::model::MachineName;
use crate::registry::{CommandContext, CommandResult};

use super::{BuildTarget, BuiltinCommand};

/// Arguments for the `logs` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LogsArgs {
    /// Machine name
    pub machine: MachineName,

    /// Build number, @tag or "latest"
    pub build: BuildTarget,
}

/// The logs command implementation.
pub struct LogsCommand;

impl BuiltinCommand for LogsCommand {
    type Args = LogsArgs;
    const NAME: &'static str = "logs";
    const ABOUT: &'static str = "Show the logs of a build";

    fn run(&self, args: LogsArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let id = args.build.resolve(ctx.client, &args.machine)?;
        let logs = ctx
            .client
            .logs(&id)?
            .ok_or_else(|| GbpError::not_found(format!("logs for build {id}")))?;
        ctx.ui.print(logs.trim_end());
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
    fn prints_logs() {
        let server = MockServer::start();
        let logs = graphql(
            &server,
            queries::LOGS,
            json!({"id": "lighthouse.3113"}),
            json!({"build": {"id": "lighthouse.3113", "logs": "This is a test!\n"}}),
        );

        let (result, ui) = run(&LogsCommand, &server, &["lighthouse", "3113"]);

        assert!(result.unwrap().success);
        logs.assert();
        assert_eq!(ui.printed(), ["This is a test!"]);
    }

    #[test]
    fn missing_build_is_not_found() {
        let server = MockServer::start();
        graphql(
            &server,
            queries::LOGS,
            json!({"id": "lighthouse.9999"}),
            json!({"build": null}),
        );

        let (result, _) = run(&LogsCommand, &server, &["lighthouse", "9999"]);
        assert!(matches!(result, Err(GbpError::NotFound { .. })));
    }
}
