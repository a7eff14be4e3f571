//! Subcommands provided by external programs.

use std::path::{Path, PathBuf};
use std::process::Command;

use clap::{Arg, ArgAction, ArgMatches};

use crate::config::{ENV_API_KEY, ENV_URL, ENV_USER};
use crate::error::{GbpError, Result};

use super::manifest::{ArgKind, ArgSpec, PluginManifest};
use super::{CommandContext, CommandResult, Subcommand};

/// A subcommand that runs a program declared by a plugin manifest.
///
/// The program receives the manifest's `program_args`, then the user's
/// positional values in declared order, then `--name value` for options and
/// `--name` for flags. The build publisher address and credentials are
/// exported in the same environment variables the CLI reads.
#[derive(Debug, Clone)]
pub struct ExternalSubcommand {
    name: String,
    about: String,
    program: PathBuf,
    program_args: Vec<String>,
    args: Vec<ArgSpec>,
    manifest_path: PathBuf,
}

impl ExternalSubcommand {
    /// Create a subcommand from a validated manifest.
    ///
    /// A relative program path containing a separator is resolved against
    /// the manifest's directory; a bare name is looked up on `PATH`.
    pub fn from_manifest(manifest: PluginManifest, manifest_path: &Path) -> Result<Self> {
        let args = manifest.arg_specs().to_vec();
        let program = manifest.program.ok_or_else(|| {
            GbpError::configuration(format!(
                "plugin {}: missing `program`",
                manifest_path.display()
            ))
        })?;

        let program = PathBuf::from(program);
        let program = if program.is_relative() && program.components().count() > 1 {
            manifest_path
                .parent()
                .map(|dir| dir.join(&program))
                .unwrap_or(program)
        } else {
            program
        };

        Ok(Self {
            about: manifest
                .about
                .unwrap_or_else(|| format!("Run {}", program.display())),
            name: manifest.name,
            program,
            program_args: manifest.program_args,
            args,
            manifest_path: manifest_path.to_path_buf(),
        })
    }

    /// The program this subcommand runs.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command-line arguments for the program, from parsed matches.
    pub fn program_argv(&self, matches: &ArgMatches) -> Vec<String> {
        let mut argv = self.program_args.clone();

        for spec in self.args.iter().filter(|s| s.kind == ArgKind::Positional) {
            if let Some(value) = matches.get_one::<String>(&spec.name) {
                argv.push(value.clone());
            }
        }
        for spec in &self.args {
            match spec.kind {
                ArgKind::Positional => {}
                ArgKind::Option => {
                    if let Some(value) = matches.get_one::<String>(&spec.name) {
                        argv.push(format!("--{}", spec.name));
                        argv.push(value.clone());
                    }
                }
                ArgKind::Flag => {
                    if matches.get_flag(&spec.name) {
                        argv.push(format!("--{}", spec.name));
                    }
                }
            }
        }
        argv
    }
}

impl Subcommand for ExternalSubcommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn about(&self) -> &str {
        &self.about
    }

    fn origin(&self) -> String {
        format!("plugin {}", self.manifest_path.display())
    }

    fn augment_args(&self, mut cmd: clap::Command) -> clap::Command {
        for spec in &self.args {
            let mut arg = Arg::new(spec.name.clone());
            if let Some(help) = &spec.help {
                arg = arg.help(help.clone());
            }
            arg = match spec.kind {
                ArgKind::Positional => arg.required(spec.is_required()),
                ArgKind::Option => arg
                    .long(spec.name.clone())
                    .value_name(spec.name.to_uppercase())
                    .required(spec.is_required()),
                ArgKind::Flag => arg.long(spec.name.clone()).action(ArgAction::SetTrue),
            };
            cmd = cmd.arg(arg);
        }
        cmd
    }

    fn execute(&self, matches: &ArgMatches, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let argv = self.program_argv(matches);

        let mut command = Command::new(&self.program);
        command.args(&argv);
        command.env(ENV_URL, ctx.config.url.as_str());
        command.env_remove(ENV_USER);
        command.env_remove(ENV_API_KEY);
        if let Some(credentials) = &ctx.config.credentials {
            if let Some(user) = &credentials.user {
                command.env(ENV_USER, user);
            }
            command.env(ENV_API_KEY, credentials.api_key.expose());
        }

        tracing::debug!(
            subcommand = %self.name,
            program = %self.program.display(),
            args = argv.len(),
            "running plugin"
        );

        let status = command.status().map_err(|e| {
            GbpError::configuration(format!(
                "plugin {}: cannot run {}: {}",
                self.manifest_path.display(),
                self.program.display(),
                e
            ))
        })?;

        match status.code() {
            Some(code) => Ok(CommandResult::from_status(code)),
            None => {
                ctx.ui.warning(&format!(
                    "plugin {} was terminated by a signal",
                    self.name
                ));
                Ok(CommandResult::failure(crate::error::exit_code::FAILURE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(yaml: &str) -> PluginManifest {
        let manifest: PluginManifest = serde_yaml::from_str(yaml).unwrap();
        manifest.validate(Path::new("/plugins/test.yml")).unwrap();
        manifest
    }

    fn hello() -> ExternalSubcommand {
        let manifest = manifest(
            r#"
extension_point: gbpcli.subcommands/1
name: hello
program: bin/hello
program_args: [--greeting, hi]
args:
  - name: machine
  - name: number
    required: false
  - name: format
    kind: option
  - name: loud
    kind: flag
"#,
        );
        ExternalSubcommand::from_manifest(manifest, Path::new("/plugins/test.yml")).unwrap()
    }

    fn parse(sub: &ExternalSubcommand, argv: &[&str]) -> ArgMatches {
        sub.augment_args(clap::Command::new("hello"))
            .try_get_matches_from(std::iter::once("hello").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn relative_program_resolves_against_manifest_dir() {
        assert_eq!(hello().program(), Path::new("/plugins/bin/hello"));
    }

    #[test]
    fn about_defaults_to_program() {
        assert!(hello().about().contains("hello"));
    }

    #[test]
    fn builds_program_argv_in_order() {
        let sub = hello();
        let matches = parse(&sub, &["--loud", "lighthouse", "--format", "json", "12"]);

        assert_eq!(
            sub.program_argv(&matches),
            vec![
                "--greeting",
                "hi",
                "lighthouse",
                "12",
                "--format",
                "json",
                "--loud"
            ]
        );
    }

    #[test]
    fn omitted_optional_values_are_skipped() {
        let sub = hello();
        let matches = parse(&sub, &["lighthouse"]);
        assert_eq!(
            sub.program_argv(&matches),
            vec!["--greeting", "hi", "lighthouse"]
        );
    }

    #[test]
    fn required_positional_is_enforced() {
        let sub = hello();
        let result = sub
            .augment_args(clap::Command::new("hello"))
            .try_get_matches_from(["hello"]);
        assert!(result.is_err());
    }

    fn run_plugin(yaml: &str) -> (CommandResult, crate::ui::MockUI) {
        let sub = ExternalSubcommand::from_manifest(manifest(yaml), Path::new("/plugins/test.yml"))
            .unwrap();
        let matches = sub
            .augment_args(clap::Command::new(sub.name().to_string()))
            .try_get_matches_from([sub.name()])
            .unwrap();
        let config = crate::config::Config::new("http://gbp.invalid/").unwrap();
        let client = crate::client::ApiClient::new(&config).unwrap();
        let mut ui = crate::ui::MockUI::new();
        let result = {
            let mut ctx = CommandContext {
                config: &config,
                client: &client,
                ui: &mut ui,
            };
            sub.execute(&matches, &mut ctx).unwrap()
        };
        (result, ui)
    }

    #[test]
    fn exit_status_is_passed_through() {
        let (result, ui) = run_plugin(
            "extension_point: gbpcli.subcommands/1\nname: three\nprogram: /bin/sh\nprogram_args: [\"-c\", \"exit 3\"]\nargs: []\n",
        );
        assert_eq!(result, CommandResult::failure(3));
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn killed_plugin_fails_with_warning() {
        let (result, ui) = run_plugin(
            "extension_point: gbpcli.subcommands/1\nname: doomed\nprogram: /bin/sh\nprogram_args: [\"-c\", \"kill -9 $$\"]\nargs: []\n",
        );
        assert_eq!(result, CommandResult::failure(1));
        assert!(ui.has_warning("doomed was terminated by a signal"));
    }

    #[test]
    fn origin_names_manifest() {
        assert!(hello().origin().contains("/plugins/test.yml"));
    }
}
