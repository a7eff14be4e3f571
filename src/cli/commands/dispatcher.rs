//! Command dispatching.
//!
//! The [`Dispatcher`] looks a subcommand up in the registry, runs it against
//! a fresh [`ApiClient`] and turns whatever happens into an [`Outcome`]:
//! a process exit code plus the single line reported to the user.
//!
//! A dispatcher runs exactly once. It moves from
//! [`Phase::Resolving`] through [`Phase::Executing`] to [`Phase::Done`] and
//! refuses to dispatch again afterwards.

use std::error::Error as _;

use clap::ArgMatches;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{exit_code, GbpError, Result};
use crate::registry::{CommandContext, CommandResult, SubcommandRegistry};
use crate::secrets::OutputMasker;
use crate::ui::UserInterface;

/// Where a dispatcher is in its single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Looking up the subcommand by name.
    Resolving,
    /// The subcommand is running.
    Executing,
    /// Finished; the dispatcher cannot be reused.
    Done,
}

/// What a dispatch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Process exit code.
    pub exit_code: i32,
    /// Error line shown to the user, already masked.
    pub message: Option<String>,
}

impl Outcome {
    fn from_result(result: CommandResult) -> Self {
        Self {
            exit_code: result.exit_code,
            message: None,
        }
    }

    fn failed(exit_code: i32, message: String) -> Self {
        Self {
            exit_code,
            message: Some(message),
        }
    }

    /// Whether the command succeeded.
    pub fn is_success(&self) -> bool {
        self.exit_code == exit_code::SUCCESS
    }
}

/// Routes a subcommand name to its registered implementation.
pub struct Dispatcher<'a> {
    registry: &'a SubcommandRegistry,
    config: &'a Config,
    masker: OutputMasker,
    debug: bool,
    phase: Phase,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher over a fully built registry.
    pub fn new(registry: &'a SubcommandRegistry, config: &'a Config) -> Self {
        Self {
            registry,
            config,
            masker: OutputMasker::for_config(config),
            debug: false,
            phase: Phase::Resolving,
        }
    }

    /// Report the full error chain instead of a single line.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the named subcommand.
    ///
    /// Errors are reported through `ui` and folded into the returned
    /// [`Outcome`]; this never fails.
    pub fn dispatch(
        &mut self,
        name: &str,
        matches: &ArgMatches,
        ui: &mut dyn UserInterface,
    ) -> Outcome {
        if self.phase != Phase::Resolving {
            return self.report(
                ui,
                exit_code::FAILURE,
                "error: dispatcher has already run".to_string(),
            );
        }

        let Some(command) = self.registry.get(name) else {
            self.phase = Phase::Done;
            tracing::debug!(command = name, "unknown subcommand");
            let message = format!(
                "error: unknown command '{}'; available commands: {}",
                name,
                self.registry.names().join(", ")
            );
            return self.report(ui, exit_code::UNKNOWN_COMMAND, message);
        };

        self.phase = Phase::Executing;
        tracing::debug!(command = name, origin = %command.origin(), "executing subcommand");

        let result = self.execute(command, matches, ui);
        self.phase = Phase::Done;

        match result {
            Ok(result) => {
                tracing::debug!(command = name, exit_code = result.exit_code, "subcommand finished");
                Outcome::from_result(result)
            }
            Err(err) => {
                tracing::debug!(command = name, error = %self.masker.mask(&err.to_string()), "subcommand failed");
                let message = self.describe(&err);
                self.report(ui, err.exit_code(), message)
            }
        }
    }

    fn execute(
        &self,
        command: &dyn crate::registry::Subcommand,
        matches: &ArgMatches,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let client = ApiClient::new(self.config)?;
        let mut ctx = CommandContext {
            config: self.config,
            client: &client,
            ui,
        };
        command.execute(matches, &mut ctx)
    }

    fn describe(&self, err: &GbpError) -> String {
        let mut message = format!("error: {err}");
        if self.debug {
            let mut source = err.source();
            while let Some(cause) = source {
                message.push_str(&format!("\n  caused by: {cause}"));
                source = cause.source();
            }
        }
        message
    }

    fn report(&self, ui: &mut dyn UserInterface, exit_code: i32, message: String) -> Outcome {
        let masked = self.masker.mask(&message);
        ui.error(&masked);
        Outcome::failed(exit_code, masked)
    }
}
