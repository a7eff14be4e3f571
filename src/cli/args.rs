//! CLI argument definitions.
//!
//! Global options are defined with clap's derive macros in [`GlobalArgs`].
//! The subcommands are not known until the registry has been built, so the
//! full grammar is assembled at runtime by [`build_command`].
//!
//! Global options go before the subcommand name:
//!
//! ```text
//! gbp --url https://gbp.example/ list lighthouse
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Command, FromArgMatches};

use crate::config::ConfigLayer;
use crate::registry::SubcommandRegistry;
use crate::ui::OutputMode;

const ABOUT: &str = "Command-line client for Gentoo Build Publisher";

/// Options accepted before the subcommand name.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Build publisher URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// User name for authentication
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// API key for authentication
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Path to config file (overrides the default location)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to load subcommand plugins from (repeatable)
    #[arg(long = "plugin-dir", value_name = "DIR")]
    pub plugin_dirs: Vec<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging and full error chains
    #[arg(long)]
    pub debug: bool,
}

impl GlobalArgs {
    /// Pick the global options out of a raw argument list.
    ///
    /// Runs before the registry exists, so anything it does not recognise is
    /// ignored here and left for the full parse to report.
    pub fn parse_lenient<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cmd = Self::augment_args(Command::new("gbp"))
            .ignore_errors(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .allow_external_subcommands(true);

        match cmd.try_get_matches_from(argv) {
            Ok(matches) => Self::from_arg_matches(&matches).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// The configuration layer contributed by command-line flags.
    pub fn config_layer(&self) -> ConfigLayer {
        ConfigLayer {
            url: self.url.clone(),
            user: self.user.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout,
            plugin_dirs: if self.plugin_dirs.is_empty() {
                None
            } else {
                Some(self.plugin_dirs.clone())
            },
        }
    }

    /// Output mode selected by `--quiet` / `--verbose`.
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.quiet, self.verbose)
    }
}

/// Build the full command-line grammar for a registry.
///
/// Names that are not registered still parse as external subcommands so the
/// dispatcher can report them with the list of available commands.
pub fn build_command(registry: &SubcommandRegistry) -> Command {
    let mut cmd = GlobalArgs::augment_args(
        Command::new("gbp")
            .version(env!("CARGO_PKG_VERSION"))
            .about(ABOUT),
    )
    .disable_help_subcommand(true)
    .allow_external_subcommands(true);

    for subcommand in registry.iter() {
        let sub = Command::new(subcommand.name().to_string()).about(subcommand.about().to_string());
        cmd = cmd.subcommand(subcommand.augment_args(sub));
    }
    cmd
}
