// src/commands/help_cmd.rs
use crate::commands::{Command, CommandContext};
use crate::interpreter::types::STATUS_SUCCESS;

pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>) -> i32 {
        let mut stdout = String::from("Available commands:\n");
        for name in ctx.commands.names() {
            let description = ctx
                .commands
                .get(name)
                .map(|cmd| cmd.description())
                .unwrap_or_default();
            if description.is_empty() {
                stdout.push_str(&format!("  {}\n", name));
            } else {
                stdout.push_str(&format!("  {:<8} {}\n", name, description));
            }
        }
        ctx.write_out(&stdout);
        STATUS_SUCCESS
    }

    fn description(&self) -> &str {
        "list available commands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::registry::create_builtin_registry;
    use crate::commands::FnCommand;
    use crate::interpreter::environment::Environment;

    fn run(registry: &crate::commands::CommandRegistry) -> String {
        let mut env = Environment::new();
        let mut out = Vec::new();
        let mut ctx = CommandContext {
            args: vec!["help".to_string()],
            env: &mut env,
            stdout: &mut out,
            commands: registry,
        };
        assert_eq!(HelpCommand.execute(&mut ctx), 0);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_help_lists_builtins() {
        let out = run(&create_builtin_registry());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Available commands:");
        assert!(lines[1].starts_with("  echo"));
        assert!(lines[2].starts_with("  help     list available commands"));
        assert!(lines[3].starts_with("  set"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_help_includes_host_commands() {
        let mut registry = create_builtin_registry();
        registry.register("zap", Box::new(FnCommand::new(|_| 0)));
        let out = run(&registry);
        assert!(out.ends_with("  zap\n"));
    }
}
