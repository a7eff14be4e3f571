//! Name resolution for registered subcommands.

use std::collections::BTreeMap;

use crate::error::{GbpError, Result};

use super::{Subcommand, SubcommandSource};

/// Registry of all available subcommands.
///
/// Built once at startup and only read afterwards.
#[derive(Default)]
pub struct SubcommandRegistry {
    commands: Vec<Box<dyn Subcommand>>,
    by_name: BTreeMap<String, usize>,
}

impl SubcommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from sources, in order.
    ///
    /// Any discovery or registration error aborts the whole build.
    pub fn from_sources(sources: Vec<Box<dyn SubcommandSource>>) -> Result<Self> {
        let mut registry = Self::new();
        for source in sources {
            let commands = source.discover()?;
            tracing::debug!(
                source = %source.label(),
                count = commands.len(),
                "discovered subcommands"
            );
            for command in commands {
                registry.register(command)?;
            }
        }
        Ok(registry)
    }

    /// Register a subcommand.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the name is taken; the first registration is
    /// kept. Returns `Configuration` if the name is not usable on a command
    /// line.
    pub fn register(&mut self, command: Box<dyn Subcommand>) -> Result<()> {
        let name = command.name().to_string();
        validate_name(&name, &command.origin())?;

        if let Some(&index) = self.by_name.get(&name) {
            return Err(GbpError::Conflict {
                name,
                existing: self.commands[index].origin(),
            });
        }

        tracing::debug!(name = %name, origin = %command.origin(), "registered subcommand");
        self.by_name.insert(name, self.commands.len());
        self.commands.push(command);
        Ok(())
    }

    /// Get a subcommand by name.
    pub fn get(&self, name: &str) -> Option<&dyn Subcommand> {
        self.by_name
            .get(name)
            .map(|&index| self.commands[index].as_ref())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.by_name.keys().map(|s| s.as_str()).collect()
    }

    /// Iterate over subcommands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Subcommand> {
        self.commands.iter().map(|c| c.as_ref())
    }

    /// Get the number of registered subcommands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn validate_name(name: &str, origin: &str) -> Result<()> {
    if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
        return Err(GbpError::configuration(format!(
            "{origin}: invalid subcommand name {name:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CommandContext, CommandResult};
    use clap::ArgMatches;

    struct Named {
        name: &'static str,
        origin: &'static str,
    }

    impl Subcommand for Named {
        fn name(&self) -> &str {
            self.name
        }

        fn about(&self) -> &str {
            "test command"
        }

        fn origin(&self) -> String {
            self.origin.to_string()
        }

        fn augment_args(&self, cmd: clap::Command) -> clap::Command {
            cmd
        }

        fn execute(&self, _: &ArgMatches, _: &mut CommandContext<'_>) -> Result<CommandResult> {
            Ok(CommandResult::success())
        }
    }

    fn named(name: &'static str, origin: &'static str) -> Box<dyn Subcommand> {
        Box::new(Named { name, origin })
    }

    struct Fixed(Vec<(&'static str, &'static str)>);

    impl SubcommandSource for Fixed {
        fn label(&self) -> String {
            "fixed".to_string()
        }

        fn discover(&self) -> Result<Vec<Box<dyn Subcommand>>> {
            Ok(self.0.iter().map(|(n, o)| named(n, o)).collect())
        }
    }

    #[test]
    fn duplicate_name_conflicts_and_keeps_first() {
        let mut registry = SubcommandRegistry::new();
        registry.register(named("list", "first")).unwrap();

        let err = registry.register(named("list", "second")).unwrap_err();

        match err {
            GbpError::Conflict { name, existing } => {
                assert_eq!(name, "list");
                assert_eq!(existing, "first");
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("list").unwrap().origin(), "first");
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = SubcommandRegistry::new();
        registry.register(named("publish", "a")).unwrap();
        registry.register(named("list", "a")).unwrap();
        assert_eq!(registry.names(), vec!["list", "publish"]);
    }

    #[test]
    fn iteration_keeps_registration_order() {
        let mut registry = SubcommandRegistry::new();
        registry.register(named("publish", "a")).unwrap();
        registry.register(named("list", "a")).unwrap();
        let order: Vec<_> = registry.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(order, vec!["publish", "list"]);
    }

    #[test]
    fn rejects_unusable_names() {
        let mut registry = SubcommandRegistry::new();
        for bad in ["", "two words", "--flag"] {
            let err = registry
                .register(Box::new(Named {
                    name: bad,
                    origin: "t",
                }))
                .unwrap_err();
            assert!(matches!(err, GbpError::Configuration { .. }));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn from_sources_fails_on_cross_source_duplicate() {
        let sources: Vec<Box<dyn SubcommandSource>> = vec![
            Box::new(Fixed(vec![("list", "built-in")])),
            Box::new(Fixed(vec![("hello", "plugin"), ("list", "plugin")])),
        ];

        let err = SubcommandRegistry::from_sources(sources).err().unwrap();
        assert!(matches!(err, GbpError::Conflict { .. }));
    }

    #[test]
    fn from_sources_registers_all() {
        let sources: Vec<Box<dyn SubcommandSource>> = vec![
            Box::new(Fixed(vec![("list", "built-in")])),
            Box::new(Fixed(vec![("hello", "plugin")])),
        ];

        let registry = SubcommandRegistry::from_sources(sources).unwrap();
        assert_eq!(registry.names(), vec!["hello", "list"]);
    }
}
