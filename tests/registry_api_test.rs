//! Integration tests for the registry public API.

use gbpcli::error::GbpError;
use gbpcli::registry::{
    BuiltinSource, PluginDirSource, Subcommand, SubcommandRegistry, SubcommandSource,
    EXTENSION_POINT,
};
use std::fs;
use tempfile::TempDir;

fn manifest(name: &str, about: &str) -> String {
    format!(
        "extension_point: {EXTENSION_POINT}\nname: {name}\nabout: {about}\nprogram: /bin/true\nargs:\n  - name: target\n    required: false\n"
    )
}

#[test]
fn builtin_registry_has_core_commands() {
    let registry = SubcommandRegistry::from_sources(vec![Box::new(BuiltinSource)]).unwrap();

    for name in ["machines", "list", "publish", "pull", "diff", "tag", "notes"] {
        let command = registry.get(name).unwrap();
        assert_eq!(command.name(), name);
        assert_eq!(command.origin(), "built-in");
    }
}

#[test]
fn plugins_extend_builtins() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("hello.yml"), manifest("hello", "Say hello")).unwrap();
    fs::write(temp.path().join("README.txt"), "not a manifest").unwrap();

    let registry = SubcommandRegistry::from_sources(vec![
        Box::new(BuiltinSource),
        Box::new(PluginDirSource::new(temp.path())),
    ])
    .unwrap();

    let hello = registry.get("hello").unwrap();
    assert_eq!(hello.about(), "Say hello");
    assert!(hello.origin().contains("hello.yml"));
    assert!(registry.get("list").is_some());
}

#[test]
fn plugin_directories_are_read_in_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("a.yml"), manifest("alpha", "first")).unwrap();
    fs::write(second.path().join("b.yaml"), manifest("beta", "second")).unwrap();

    let registry = SubcommandRegistry::from_sources(vec![
        Box::new(PluginDirSource::new(first.path())),
        Box::new(PluginDirSource::new(second.path())),
    ])
    .unwrap();

    let order: Vec<&str> = registry.iter().map(|c| c.name()).collect();
    assert_eq!(order, ["alpha", "beta"]);
}

#[test]
fn same_plugin_in_two_directories_conflicts() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("x.yml"), manifest("sync", "first")).unwrap();
    fs::write(second.path().join("x.yml"), manifest("sync", "second")).unwrap();

    let result = SubcommandRegistry::from_sources(vec![
        Box::new(PluginDirSource::new(first.path())),
        Box::new(PluginDirSource::new(second.path())),
    ]);

    match result {
        Err(GbpError::Conflict { name, existing }) => {
            assert_eq!(name, "sync");
            assert!(existing.contains(&first.path().display().to_string()));
        }
        Err(other) => panic!("expected conflict, got {other}"),
        Ok(_) => panic!("expected conflict"),
    }
}

#[test]
fn wrong_extension_point_is_rejected() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("old.yml"),
        "extension_point: gbpcli.subcommands/0\nname: old\nprogram: /bin/true\nargs: []\n",
    )
    .unwrap();

    let source = PluginDirSource::new(temp.path());
    let err = source.discover().err().unwrap();

    assert!(matches!(err, GbpError::Configuration { .. }));
    assert!(err.to_string().contains("old.yml"));
}

#[test]
fn plugin_arguments_join_the_grammar() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("sync.yml"),
        format!(
            "extension_point: {EXTENSION_POINT}\nname: sync\nprogram: /bin/true\nargs:\n  - name: machine\n  - name: force\n    kind: flag\n"
        ),
    )
    .unwrap();
    let registry =
        SubcommandRegistry::from_sources(vec![Box::new(PluginDirSource::new(temp.path()))])
            .unwrap();
    let sync = registry.get("sync").unwrap();

    let cmd = sync.augment_args(clap::Command::new("sync"));
    let matches = cmd
        .try_get_matches_from(["sync", "lighthouse", "--force"])
        .unwrap();

    assert_eq!(
        matches.get_one::<String>("machine").map(String::as_str),
        Some("lighthouse")
    );
    assert!(matches.get_flag("force"));
}
