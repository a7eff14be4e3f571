//! Plugin manifest definitions.
//!
//! A plugin is a YAML file in a plugin directory that declares one
//! subcommand for the `gbpcli.subcommands/1` extension point:
//!
//! ```yaml
//! extension_point: gbpcli.subcommands/1
//! name: hello
//! about: Say hello to a machine
//! program: /usr/libexec/gbp-hello
//! program_args: [--greeting]
//! args:
//!   - name: machine
//!     help: Machine name
//!   - name: loud
//!     kind: flag
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GbpError, Result};

/// The extension point plugin manifests must declare.
pub const EXTENSION_POINT: &str = "gbpcli.subcommands/1";

/// A parsed plugin manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginManifest {
    /// Extension point this manifest targets.
    pub extension_point: String,

    /// Subcommand name.
    pub name: String,

    /// One-line help text.
    #[serde(default)]
    pub about: Option<String>,

    /// Program run when the subcommand is invoked.
    #[serde(default)]
    pub program: Option<String>,

    /// Fixed arguments placed before the user's values.
    #[serde(default)]
    pub program_args: Vec<String>,

    /// Arguments the subcommand accepts.
    #[serde(default)]
    pub args: Option<Vec<ArgSpec>>,
}

/// One argument declared by a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgSpec {
    /// Argument name; also the long option name for options and flags.
    pub name: String,

    /// Help text.
    #[serde(default)]
    pub help: Option<String>,

    /// How the argument is given on the command line.
    #[serde(default)]
    pub kind: ArgKind,

    /// Whether the argument must be given. Defaults to true for
    /// positionals and false otherwise.
    #[serde(default)]
    pub required: Option<bool>,
}

/// How a plugin argument is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    /// A value in position.
    #[default]
    Positional,
    /// `--name <value>`.
    Option,
    /// `--name` with no value.
    Flag,
}

impl ArgSpec {
    /// Whether the argument is required.
    pub fn is_required(&self) -> bool {
        match self.kind {
            ArgKind::Positional => self.required.unwrap_or(true),
            ArgKind::Option => self.required.unwrap_or(false),
            ArgKind::Flag => false,
        }
    }
}

impl PluginManifest {
    /// Parse and validate a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` naming the file if it cannot be parsed, targets
    /// another extension point, lacks `program` or `args`, or declares
    /// unusable arguments.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GbpError::configuration(format!("plugin {}: {}", path.display(), e))
        })?;
        let manifest: Self = serde_yaml::from_str(&content).map_err(|e| {
            GbpError::configuration(format!("plugin {}: {}", path.display(), e))
        })?;
        manifest.validate(path)?;
        Ok(manifest)
    }

    /// Check the manifest's contents.
    pub fn validate(&self, path: &Path) -> Result<()> {
        let fail = |message: String| {
            Err(GbpError::configuration(format!(
                "plugin {}: {}",
                path.display(),
                message
            )))
        };

        if self.extension_point != EXTENSION_POINT {
            return fail(format!(
                "unsupported extension point {:?} (expected {:?})",
                self.extension_point, EXTENSION_POINT
            ));
        }
        match self.program.as_deref() {
            None => return fail("missing `program`".to_string()),
            Some(program) if program.trim().is_empty() => {
                return fail("empty `program`".to_string());
            }
            Some(_) => {}
        }
        let Some(args) = &self.args else {
            return fail("missing `args`".to_string());
        };

        let mut seen = HashSet::new();
        let mut optional_positional = false;
        for arg in args {
            if !is_valid_arg_name(&arg.name) {
                return fail(format!("invalid argument name {:?}", arg.name));
            }
            if !seen.insert(arg.name.as_str()) {
                return fail(format!("duplicate argument {:?}", arg.name));
            }
            if arg.kind == ArgKind::Flag && arg.required == Some(true) {
                return fail(format!("flag {:?} cannot be required", arg.name));
            }
            if arg.kind == ArgKind::Positional {
                if arg.is_required() && optional_positional {
                    return fail(format!(
                        "required argument {:?} follows an optional one",
                        arg.name
                    ));
                }
                optional_positional |= !arg.is_required();
            }
        }
        Ok(())
    }

    /// Declared arguments; empty before validation.
    pub fn arg_specs(&self) -> &[ArgSpec] {
        self.args.as_deref().unwrap_or_default()
    }
}

/// Lowercase letters, digits and inner hyphens; `help` is reserved.
fn is_valid_arg_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    starts_alpha
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        && !name.ends_with('-')
        && name != "help"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(temp: &TempDir, yaml: &str) -> std::path::PathBuf {
        let path = temp.path().join("plugin.yml");
        fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn parses_full_manifest() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            r#"
extension_point: gbpcli.subcommands/1
name: hello
about: Say hello
program: /bin/echo
program_args: [hi]
args:
  - name: machine
    help: Machine name
  - name: format
    kind: option
  - name: loud
    kind: flag
"#,
        );

        let manifest = PluginManifest::from_file(&path).unwrap();

        assert_eq!(manifest.name, "hello");
        assert_eq!(manifest.program_args, vec!["hi"]);
        let specs = manifest.arg_specs();
        assert_eq!(specs.len(), 3);
        assert!(specs[0].is_required());
        assert!(!specs[1].is_required());
        assert_eq!(specs[2].kind, ArgKind::Flag);
    }

    #[test]
    fn missing_program_is_configuration_error() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "extension_point: gbpcli.subcommands/1\nname: hello\nargs: []\n",
        );

        let err = PluginManifest::from_file(&path).unwrap_err();
        assert!(matches!(err, GbpError::Configuration { .. }));
        assert!(err.to_string().contains("program"));
        assert!(err.to_string().contains("plugin.yml"));
    }

    #[test]
    fn missing_args_is_configuration_error() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "extension_point: gbpcli.subcommands/1\nname: hello\nprogram: /bin/true\n",
        );

        let err = PluginManifest::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("args"));
    }

    #[test]
    fn wrong_extension_point_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "extension_point: other/2\nname: hello\nprogram: /bin/true\nargs: []\n",
        );

        assert!(matches!(
            PluginManifest::from_file(&path),
            Err(GbpError::Configuration { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "extension_point: gbpcli.subcommands/1\nname: x\nprogram: p\nargs: []\nentry: y\n",
        );

        assert!(PluginManifest::from_file(&path).is_err());
    }

    #[test]
    fn duplicate_and_reserved_args_are_rejected() {
        let temp = TempDir::new().unwrap();
        for args in [
            "[{name: a}, {name: a}]",
            "[{name: help, kind: flag}]",
            "[{name: Bad}]",
            "[{name: x, kind: flag, required: true}]",
            "[{name: a, required: false}, {name: b}]",
        ] {
            let path = write(
                &temp,
                &format!("extension_point: gbpcli.subcommands/1\nname: x\nprogram: p\nargs: {args}\n"),
            );
            assert!(
                PluginManifest::from_file(&path).is_err(),
                "accepted args {args}"
            );
        }
    }
}
