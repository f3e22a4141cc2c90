// src/commands/registry.rs
use std::collections::HashMap;

use super::echo::EchoCommand;
use super::help_cmd::HelpCommand;
use super::set_cmd::SetCommand;
use super::types::Command;

/// Name → command table. Builtins have no privilege over host commands: a
/// later registration under the same name replaces either kind.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register `cmd` under `name`, returning the command it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        cmd: Box<dyn Command>,
    ) -> Option<Box<dyn Command>> {
        self.commands.insert(name.into(), cmd)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Names of the commands every shell starts with.
pub const BUILTIN_NAMES: &[&str] = &["echo", "help", "set"];

/// Register the builtin commands.
pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register("echo", Box::new(EchoCommand));
    registry.register("help", Box::new(HelpCommand));
    registry.register("set", Box::new(SetCommand));
}

/// Create a registry holding only the builtins.
pub fn create_builtin_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);
    registry
}
