//! `gbp machines`: list machines and their build counts.

use crate::error::Result;
use crate::registry::{CommandContext, CommandResult};
use crate::ui::Table;

use super::BuiltinCommand;

/// Arguments for the `machines` command.
#[derive(Debug, Clone, clap::Args)]
pub struct MachinesArgs {}

/// The machines command implementation.
pub struct MachinesCommand;

impl BuiltinCommand for MachinesCommand {
    type Args = MachinesArgs;
    const NAME: &'static str = "machines";
    const ABOUT: &'static str = "List machines with builds";

    fn run(&self, _args: MachinesArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let mut machines = ctx.client.machines()?;
        if machines.is_empty() {
            ctx.ui.message("No machines");
            return Ok(CommandResult::success());
        }

        machines.sort_by(|a, b| a.name().cmp(b.name()));
        let mut table = Table::new(vec!["Machine", "Builds"]);
        for machine in &machines {
            table.add_row(vec![
                machine.name().to_string(),
                machine.build_count().to_string(),
            ]);
        }
        ctx.ui.print(&table.render());
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
    fn prints_sorted_table() {
        let server = MockServer::start();
        graphql(
            &server,
            queries::MACHINES,
            json!({}),
            json!({"machines": [
                {"machine": "lighthouse", "buildCount": 3},
                {"machine": "babette", "buildCount": 12},
            ]}),
        );

        let (result, ui) = run(&MachinesCommand, &server, &[]);

        assert!(result.unwrap().success);
        let out = ui.stdout();
        let babette = out.find("babette").unwrap();
        let lighthouse = out.find("lighthouse").unwrap();
        assert!(babette < lighthouse);
        assert!(out.contains("12"));
    }

    #[test]
    fn empty_service_says_so() {
        let server = MockServer::start();
        graphql(&server, queries::MACHINES, json!({}), json!({"machines": []}));

        let (result, ui) = run(&MachinesCommand, &server, &[]);

        assert!(result.unwrap().success);
        assert!(ui.has_message("No machines"));
        assert!(ui.printed().is_empty());
    }
}
