//! `gbp publish`: make a build the published one.

use crate::error::Result;
use crate::model::MachineName;
use crate::registry::{CommandContext, CommandResult};

use super::{BuildTarget, BuiltinCommand};

/// Arguments for the `publish` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PublishArgs {
    /// Machine name
    pub machine: MachineName,

    /// Build number, @tag or "latest"
    #[arg(default_value = "latest")]
    pub build: BuildTarget,
}

/// The publish command implementation.
pub struct PublishCommand;

impl BuiltinCommand for PublishCommand {
    type Args = PublishArgs;
    const NAME: &'static str = "publish";
    const ABOUT: &'static str = "Publish a build (the latest by default)";

    fn run(&self, args: PublishArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let id = args.build.resolve(ctx.client, &args.machine)?;
        ctx.client.publish(&id)?;
        ctx.ui.success(&format!("Published {} {}", id.machine(), id.number()));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{build_json, graphql, run};
    use crate::client::queries;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn publishes_given_build() {
        let server = MockServer::start();
        let publish = graphql(
            &server,
            queries::PUBLISH,
            json!({"id": "x.1"}),
            json!({"publish": {"id": "x.1"}}),
        );

        let (result, ui) = run(&PublishCommand, &server, &["x", "1"]);

        assert!(result.unwrap().success);
        publish.assert();
        assert!(ui.has_success("Published x 1"));
    }

    #[test]
    fn defaults_to_latest() {
        let server = MockServer::start();
        graphql(
            &server,
            queries::LATEST,
            json!({"machine": "x"}),
            json!({"latest": build_json("x.4", false, &[])}),
        );
        let publish = graphql(
            &server,
            queries::PUBLISH,
            json!({"id": "x.4"}),
            json!({"publish": {"id": "x.4"}}),
        );

        let (result, _) = run(&PublishCommand, &server, &["x"]);

        assert!(result.unwrap().success);
        publish.assert();
    }
}
