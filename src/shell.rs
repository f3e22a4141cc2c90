//! Shell
//!
//! Main entry point for embedding the scripting engine.
//! Ties together the parser, the evaluator and the command registry.

use std::collections::HashMap;
use std::io::Write;

use tracing::debug;

use crate::commands::{create_builtin_registry, Command, CommandContext, CommandRegistry, FnCommand};
use crate::interpreter::environment::Environment;
use crate::interpreter::execution_engine::ExecutionEngine;
use crate::interpreter::types::{ExecResult, DIAGNOSTIC_PREFIX, STATUS_SYNTAX_ERROR};

/// Options for creating a Shell.
#[derive(Debug, Clone, Default)]
pub struct ShellOptions {
    /// Variables seeded into the top-level scope
    pub env: Option<HashMap<String, String>>,
}

/// A scripting shell: one top-level scope, one command registry and the
/// status of the last statement, all persisting across executions.
pub struct Shell {
    env: Environment,
    commands: CommandRegistry,
}

impl Shell {
    /// Create a shell with the builtins registered and status 0.
    pub fn new() -> Self {
        Self::with_options(ShellOptions::default())
    }

    pub fn with_options(options: ShellOptions) -> Self {
        let env = match options.env {
            Some(vars) => Environment::with_vars(vars),
            None => Environment::new(),
        };
        Self {
            env,
            commands: create_builtin_registry(),
        }
    }

    /// Execute a script, writing command output and diagnostics to `out`.
    ///
    /// A script that fails to parse runs nothing: every error is reported
    /// and the status becomes 2. Otherwise the script runs in a fresh scope
    /// chained to the top level, dropped when this call returns.
    pub fn exec(&mut self, out: &mut dyn Write, script: &str) {
        let program = match crate::parser::parse(script) {
            Ok(program) => program,
            Err(errors) => {
                debug!(errors = errors.len(), "script rejected by parser");
                for error in errors.iter() {
                    if let Err(e) = writeln!(out, "{} {}", DIAGNOSTIC_PREFIX, error) {
                        tracing::warn!(error = %e, "failed to write parse error");
                    }
                }
                self.env.set_status(STATUS_SYNTAX_ERROR);
                return;
            }
        };

        debug!(statements = program.body.len(), "executing script");
        self.env.push_scope();
        ExecutionEngine::new(&self.commands, out).execute_program(&mut self.env, &program);
        self.env.pop_scope();
        debug!(status = self.env.status(), "script finished");
    }

    /// Execute a script and capture its output.
    pub fn run(&mut self, script: &str) -> ExecResult {
        let mut out = Vec::new();
        self.exec(&mut out, script);
        ExecResult::new(String::from_utf8_lossy(&out).into_owned(), self.status())
    }

    /// Register a command, replacing any command of the same name, builtins
    /// included.
    pub fn add_command(&mut self, name: impl Into<String>, command: impl Command + 'static) {
        self.commands.register(name, Box::new(command));
    }

    /// Register a closure as a command.
    pub fn add_command_fn<F>(&mut self, name: impl Into<String>, run: F)
    where
        F: Fn(&mut CommandContext<'_>) -> i32 + Send + Sync + 'static,
    {
        self.add_command(name, FnCommand::new(run));
    }

    /// Status of the last statement executed, or of the last rejected script.
    pub fn status(&self) -> i32 {
        self.env.status()
    }

    /// Read a top-level variable.
    pub fn get_var(&self, name: &str) -> Option<&str> {
        self.env.get_global(name)
    }

    /// Set a top-level variable, visible to every later execution.
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.env.set_global(name, value);
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
