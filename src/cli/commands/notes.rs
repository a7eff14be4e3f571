//! `gbp notes`: show, set or delete a build's note.

use crate::error::{GbpError, Result};
use crate::model::MachineName;
use crate::registry::{CommandContext, CommandResult};

use super::{BuildTarget, BuiltinCommand};

/// Arguments for the `notes` command.
#[derive(Debug, Clone, clap::Args)]
pub struct NotesArgs {
    /// Machine name
    pub machine: MachineName,

    /// Build number, @tag or "latest"
    pub build: BuildTarget,

    /// New note text; shows the current note when omitted
    pub text: Option<String>,

    /// Delete the note
    #[arg(short, long, conflicts_with = "text")]
    pub delete: bool,
}

/// The notes command implementation.
pub struct NotesCommand;

impl BuiltinCommand for NotesCommand {
    type Args = NotesArgs;
    const NAME: &'static str = "notes";
    const ABOUT: &'static str = "Show, set or delete a build note";

    fn run(&self, args: NotesArgs, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let id = args.build.resolve(ctx.client, &args.machine)?;

        if args.delete {
            ctx.client.delete_note(&id)?;
            ctx.ui
                .success(&format!("Deleted note for {} {}", id.machine(), id.number()));
            return Ok(CommandResult::success());
        }

        match args.text {
            Some(text) if text.trim().is_empty() => {
                Err(GbpError::invalid("note text must not be empty; use --delete"))
            }
            Some(text) => {
                ctx.client.set_note(&id, &text)?;
                ctx.ui
                    .success(&format!("Saved note for {} {}", id.machine(), id.number()));
                Ok(CommandResult::success())
            }
            None => {
                match ctx.client.note(&id)? {
                    Some(note) => ctx.ui.print(note.trim_end()),
                    None => ctx
                        .ui
                        .message(&format!("No note for {} {}", id.machine(), id.number())),
                }
                Ok(CommandResult::success())
            }
        }
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
    fn sets_note() {
        let server = MockServer::start();
        let create = graphql(
            &server,
            queries::CREATE_NOTE,
            json!({"id": "x.1", "note": "hello"}),
            json!({"createNote": {"id": "x.1"}}),
        );

        let (result, ui) = run(&NotesCommand, &server, &["x", "1", "hello"]);

        assert!(result.unwrap().success);
        create.assert();
        assert!(ui.has_success("Saved note for x 1"));
    }

    #[test]
    fn shows_note() {
        let server = MockServer::start();
        graphql(
            &server,
            queries::NOTE,
            json!({"id": "x.1"}),
            json!({"build": {"id": "x.1", "notes": "hello\n"}}),
        );

        let (result, ui) = run(&NotesCommand, &server, &["x", "1"]);

        assert!(result.unwrap().success);
        assert_eq!(ui.printed(), ["hello"]);
    }

    #[test]
    fn missing_note_is_reported() {
        let server = MockServer::start();
        graphql(
            &server,
            queries::NOTE,
            json!({"id": "x.1"}),
            json!({"build": {"id": "x.1", "notes": null}}),
        );

        let (result, ui) = run(&NotesCommand, &server, &["x", "1"]);

        assert!(result.unwrap().success);
        assert!(ui.has_message("No note for x 1"));
    }

    #[test]
    fn deletes_note() {
        let server = MockServer::start();
        let delete = graphql(
            &server,
            queries::CREATE_NOTE,
            json!({"id": "x.1", "note": null}),
            json!({"createNote": {"id": "x.1"}}),
        );

        let (result, _) = run(&NotesCommand, &server, &["x", "1", "--delete"]);

        assert!(result.unwrap().success);
        delete.assert();
    }

    #[test]
    fn empty_text_is_invalid() {
        let server = MockServer::start();
        let (result, _) = run(&NotesCommand, &server, &["x", "1", "  "]);
        assert!(matches!(result, Err(GbpError::InvalidArgument { .. })));
    }
}
