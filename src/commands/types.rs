// src/commands/types.rs
use std::io::Write;

use crate::commands::registry::CommandRegistry;
use crate::interpreter::environment::Environment;

/// Everything a command can see and touch while it runs
pub struct CommandContext<'a> {
    /// Expanded words: `args[0]` is the command name.
    pub args: Vec<String>,
    /// The environment current for the running script.
    pub env: &'a mut Environment,
    /// Output sink shared by every command of the script.
    pub stdout: &'a mut dyn Write,
    /// The registry the command was found in.
    pub commands: &'a CommandRegistry,
}

impl<'a> CommandContext<'a> {
    pub fn name(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }

    /// Arguments after the command name.
    pub fn operands(&self) -> &[String] {
        self.args.get(1..).unwrap_or_default()
    }

    /// Write to the output sink. A sink that refuses writes does not fail the
    /// command; the error is only logged.
    pub fn write_out(&mut self, text: &str) {
        if let Err(e) = self.stdout.write_all(text.as_bytes()) {
            tracing::warn!(command = %self.name(), error = %e, "failed to write command output");
        }
    }
}

/// A command the shell can dispatch to.
pub trait Command: Send + Sync {
    /// Run the command and return its exit status.
    fn execute(&self, ctx: &mut CommandContext<'_>) -> i32;

    /// One-line summary shown by `help`.
    fn description(&self) -> &str {
        ""
    }
}

/// Adapter turning a closure into a `Command`.
pub struct FnCommand<F> {
    run: F,
    description: String,
}

impl<F> FnCommand<F>
where
    F: Fn(&mut CommandContext<'_>) -> i32 + Send + Sync,
{
    pub fn new(run: F) -> Self {
        Self {
            run,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl<F> Command for FnCommand<F>
where
    F: Fn(&mut CommandContext<'_>) -> i32 + Send + Sync,
{
    fn execute(&self, ctx: &mut CommandContext<'_>) -> i32 {
        (self.run)(ctx)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_command_runs_closure() {
        let cmd = FnCommand::new(|ctx: &mut CommandContext<'_>| {
            let line = format!("{}\n", ctx.operands().len());
            ctx.write_out(&line);
            3
        })
        .with_description("count operands");

        let mut env = Environment::new();
        let mut out = Vec::new();
        let registry = CommandRegistry::new();
        let mut ctx = CommandContext {
            args: vec!["count".into(), "a".into(), "b".into()],
            env: &mut env,
            stdout: &mut out,
            commands: &registry,
        };
        assert_eq!(cmd.execute(&mut ctx), 3);
        assert_eq!(ctx.name(), "count");
        assert_eq!(String::from_utf8(out).unwrap(), "2\n");
        assert_eq!(cmd.description(), "count operands");
    }

    #[test]
    fn test_operands_of_bare_command() {
        let mut env = Environment::new();
        let mut out = Vec::new();
        let registry = CommandRegistry::new();
        let ctx = CommandContext {
            args: vec!["solo".into()],
            env: &mut env,
            stdout: &mut out,
            commands: &registry,
        };
        assert!(ctx.operands().is_empty());
    }
}
