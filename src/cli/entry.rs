//! Process entry: configuration, registry, parse, dispatch.

use std::ffi::OsString;

use clap::error::ErrorKind;

use crate::config::{load_config, ENV_API_KEY};
use crate::error::{exit_code, GbpError, Result};
use crate::registry::{BuiltinSource, PluginDirSource, SubcommandRegistry, SubcommandSource};
use crate::secrets::OutputMasker;
use crate::ui::UserInterface;

use super::args::{build_command, GlobalArgs};
use super::commands::Dispatcher;

/// Run the CLI for an argument list and return the process exit code.
pub fn run<I, T>(argv: I, ui: &mut dyn UserInterface) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let globals = GlobalArgs::parse_lenient(argv.iter().cloned());

    let config = match load_config(globals.config_layer(), globals.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return startup_failure(ui, &flag_masker(&globals), &err),
    };

    let registry = match build_registry(&config.plugin_dirs) {
        Ok(registry) => registry,
        Err(err) => return startup_failure(ui, &OutputMasker::for_config(&config), &err),
    };

    let mut cmd = build_command(&registry);
    let matches = match cmd.try_get_matches_from_mut(argv) {
        Ok(matches) => matches,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    ui.print(err.to_string().trim_end());
                    exit_code::SUCCESS
                }
                _ => {
                    ui.error(err.to_string().trim_end());
                    exit_code::INVALID_ARGUMENT
                }
            };
        }
    };

    let Some((name, sub_matches)) = matches.subcommand() else {
        ui.error(cmd.render_help().to_string().trim_end());
        return exit_code::FAILURE;
    };

    Dispatcher::new(&registry, &config)
        .with_debug(globals.debug)
        .dispatch(name, sub_matches, ui)
        .exit_code
}

/// Built-in commands first, then each plugin directory in order.
fn build_registry(plugin_dirs: &[std::path::PathBuf]) -> Result<SubcommandRegistry> {
    let mut sources: Vec<Box<dyn SubcommandSource>> = vec![Box::new(BuiltinSource)];
    for dir in plugin_dirs {
        sources.push(Box::new(PluginDirSource::new(dir)));
    }
    SubcommandRegistry::from_sources(sources)
}

/// Masker for keys given before a configuration could be resolved.
fn flag_masker(globals: &GlobalArgs) -> OutputMasker {
    let mut masker = OutputMasker::new();
    if let Some(key) = &globals.api_key {
        masker.add_secret(key.as_str());
    }
    if let Ok(key) = std::env::var(ENV_API_KEY) {
        masker.add_secret(key);
    }
    masker
}

fn startup_failure(ui: &mut dyn UserInterface, masker: &OutputMasker, err: &GbpError) -> i32 {
    let message = masker.mask(&format!("error: {err}"));
    tracing::debug!(error = %message, "startup failed");
    ui.error(&message);
    err.exit_code()
}
