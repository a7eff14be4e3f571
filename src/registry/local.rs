//! Plugin manifests loaded from local directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GbpError, Result};

use super::{ExternalSubcommand, PluginManifest, Subcommand, SubcommandSource};

/// Source reading `*.yml`/`*.yaml` plugin manifests from one directory.
///
/// Files are read in file-name order. A missing directory contributes
/// nothing; any unreadable or invalid manifest fails the whole source.
#[derive(Debug, Clone)]
pub struct PluginDirSource {
    dir: PathBuf,
}

impl PluginDirSource {
    /// Create a source for a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this source reads.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn manifest_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let unreadable = |e: std::io::Error| {
            GbpError::configuration(format!("plugin directory {}: {}", self.dir.display(), e))
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(unreadable)? {
            let path = entry.map_err(unreadable)?.path();
            let is_manifest = path.is_file()
                && path
                    .extension()
                    .map(|e| e == "yml" || e == "yaml")
                    .unwrap_or(false);
            if is_manifest {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl SubcommandSource for PluginDirSource {
    fn label(&self) -> String {
        format!("plugins in {}", self.dir.display())
    }

    fn discover(&self) -> Result<Vec<Box<dyn Subcommand>>> {
        let mut commands: Vec<Box<dyn Subcommand>> = Vec::new();
        for path in self.manifest_paths()? {
            let manifest = PluginManifest::from_file(&path)?;
            commands.push(Box::new(ExternalSubcommand::from_manifest(manifest, &path)?));
        }
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn plugin(name: &str) -> String {
        format!(
            "extension_point: gbpcli.subcommands/1\nname: {name}\nabout: {name} plugin\nprogram: /bin/true\nargs: []\n"
        )
    }

    #[test]
    fn missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let source = PluginDirSource::new(temp.path().join("nope"));
        assert!(source.discover().unwrap().is_empty());
    }

    #[test]
    fn loads_manifests_in_file_name_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.yml"), plugin("second")).unwrap();
        fs::write(temp.path().join("a.yaml"), plugin("first")).unwrap();
        fs::write(temp.path().join("README.md"), "not a manifest").unwrap();

        let commands = PluginDirSource::new(temp.path()).discover().unwrap();

        let names: Vec<_> = commands.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(commands[0].about(), "first plugin");
    }

    #[test]
    fn invalid_manifest_fails_source() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.yml"), plugin("ok")).unwrap();
        fs::write(
            temp.path().join("b.yml"),
            "extension_point: gbpcli.subcommands/1\nname: broken\nargs: []\n",
        )
        .unwrap();

        let result = PluginDirSource::new(temp.path()).discover();
        assert!(matches!(result, Err(GbpError::Configuration { .. })));
    }

    #[test]
    fn unreadable_manifest_is_configuration_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bad.yml"), b"\xff\xfe").unwrap();

        let err = PluginDirSource::new(temp.path()).discover().err().unwrap();

        assert!(matches!(err, GbpError::Configuration { .. }), "got {err:?}");
        assert!(err.to_string().contains("bad.yml"));
        assert_eq!(err.exit_code(), crate::error::exit_code::CONFIGURATION);
    }

    #[test]
    fn label_names_directory() {
        let source = PluginDirSource::new("/opt/gbp");
        assert_eq!(source.dir(), Path::new("/opt/gbp"));
        assert!(source.label().contains("/opt/gbp"));
    }
}
