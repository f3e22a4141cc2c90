//! Execution Engine
//!
//! Tree-walking evaluator for parsed programs:
//!
//! execute_program -> execute_statement -> execute_if / execute_block -> execute_command
//!
//! Every statement updates the exit status held by the environment. Failures
//! (unknown command, bad expansion, bad statement) are written to the output
//! sink as diagnostics and never stop the statements that follow.

use std::io::Write;

use tracing::trace;

use crate::ast::types::{BlockStmt, CommandStmt, IfStmt, Program, Stmt};
use crate::commands::{CommandContext, CommandRegistry};
use crate::interpreter::environment::Environment;
use crate::interpreter::types::{
    DIAGNOSTIC_PREFIX, MAX_EXECUTION_DEPTH, STATUS_FAILURE, STATUS_NOT_FOUND, STATUS_SUCCESS,
    STATUS_SYNTAX_ERROR,
};
use crate::interpreter::word_expansion::expand_word;

/// The execution engine that ties the registry, expander and output together.
pub struct ExecutionEngine<'a> {
    commands: &'a CommandRegistry,
    stdout: &'a mut dyn Write,
    /// Number of `if` statements currently being executed
    depth: usize,
}

impl<'a> ExecutionEngine<'a> {
    pub fn new(commands: &'a CommandRegistry, stdout: &'a mut dyn Write) -> Self {
        Self {
            commands,
            stdout,
            depth: 0,
        }
    }

    /// Execute a complete program in `env`, which is the current scope for
    /// every statement, `if` bodies included.
    pub fn execute_program(&mut self, env: &mut Environment, program: &Program) {
        for stmt in &program.body {
            self.execute_statement(env, stmt);
        }
    }

    pub fn execute_statement(&mut self, env: &mut Environment, stmt: &Stmt) {
        match stmt {
            Stmt::Command(cmd) => self.execute_command(env, cmd),
            Stmt::Block(block) => self.execute_block(env, block),
            Stmt::If(if_stmt) => self.execute_if(env, if_stmt),
            Stmt::Bad => self.diagnostic(env, "bad statement", STATUS_SYNTAX_ERROR),
        }
    }

    fn execute_block(&mut self, env: &mut Environment, block: &BlockStmt) {
        for stmt in &block.list {
            self.execute_statement(env, stmt);
        }
    }

    fn execute_if(&mut self, env: &mut Environment, if_stmt: &IfStmt) {
        if self.depth >= MAX_EXECUTION_DEPTH {
            self.diagnostic(env, "maximum nesting depth exceeded", STATUS_SYNTAX_ERROR);
            return;
        }
        self.depth += 1;
        self.execute_if_clause(env, if_stmt);
        self.depth -= 1;
    }

    fn execute_if_clause(&mut self, env: &mut Environment, if_stmt: &IfStmt) {
        self.execute_command(env, &if_stmt.cond);
        if env.status() == STATUS_SUCCESS {
            self.execute_block(env, &if_stmt.body);
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.execute_statement(env, else_branch);
        }
    }

    /// Expand the words of `cmd`, then dispatch to the registered command.
    pub fn execute_command(&mut self, env: &mut Environment, cmd: &CommandStmt) {
        let mut args = Vec::with_capacity(cmd.args.len() + 1);
        for word in cmd.words() {
            match expand_word(env, word) {
                Ok(value) => args.push(value),
                Err(e) => {
                    self.diagnostic(env, &e.to_string(), STATUS_FAILURE);
                    return;
                }
            }
        }

        let commands = self.commands;
        let Some(command) = commands.get(&args[0]) else {
            let message = format!("unknown command {:?}", args[0]);
            self.diagnostic(env, &message, STATUS_NOT_FOUND);
            return;
        };

        trace!(command = %args[0], argc = args.len() - 1, "dispatching command");
        let mut ctx = CommandContext {
            args,
            env: &mut *env,
            stdout: &mut *self.stdout,
            commands,
        };
        let status = command.execute(&mut ctx);
        env.set_status(status);
    }

    fn diagnostic(&mut self, env: &mut Environment, message: &str, status: i32) {
        if let Err(e) = writeln!(self.stdout, "{} {}", DIAGNOSTIC_PREFIX, message) {
            tracing::warn!(error = %e, "failed to write diagnostic");
        }
        env.set_status(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::AST;
    use crate::commands::{create_builtin_registry, FnCommand};
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn run_program(registry: &CommandRegistry, env: &mut Environment, program: &Program) -> String {
        let mut out = Vec::new();
        ExecutionEngine::new(registry, &mut out).execute_program(env, program);
        String::from_utf8(out).unwrap()
    }

    fn run(script: &str) -> (String, i32) {
        let registry = create_builtin_registry();
        let mut env = Environment::new();
        let program = parse(script).unwrap();
        let out = run_program(&registry, &mut env, &program);
        (out, env.status())
    }

    #[test]
    fn test_sequential_commands() {
        assert_eq!(run("set x hello; echo $x"), ("hello\n".to_string(), 0));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            run("frobnicate"),
            ("ghost: unknown command \"frobnicate\"\n".to_string(), 127)
        );
    }

    #[test]
    fn test_unknown_command_does_not_stop_script() {
        assert_eq!(
            run("nope; echo after"),
            ("ghost: unknown command \"nope\"\nafter\n".to_string(), 0)
        );
    }

    #[test]
    fn test_if_takes_else_on_failure() {
        assert_eq!(
            run("if frobnicate; echo yes; else; echo no; end"),
            ("ghost: unknown command \"frobnicate\"\nno\n".to_string(), 0)
        );
    }

    #[test]
    fn test_if_takes_body_on_success() {
        assert_eq!(
            run("if echo cond; echo yes; else; echo no; end"),
            ("cond\nyes\n".to_string(), 0)
        );
    }

    #[test]
    fn test_if_without_else_on_failure_does_nothing() {
        let (out, status) = run("if set; echo yes; end");
        assert_eq!(out, "set: usage: set NAME VALUE\n");
        assert_eq!(status, 1);
    }

    #[test]
    fn test_else_if_chain() {
        let script = "if nope1; echo a; else if nope2; echo b; else if echo c; echo d; else; echo e; end";
        let (out, status) = run(script);
        assert_eq!(
            out,
            "ghost: unknown command \"nope1\"\nghost: unknown command \"nope2\"\nc\nd\n"
        );
        assert_eq!(status, 0);
    }

    #[test]
    fn test_statements_after_failed_if_run() {
        let (out, _) = run("if nope; echo yes; end\necho next");
        assert!(out.ends_with("next\n"));
    }

    #[test]
    fn test_set_inside_if_body_writes_same_scope() {
        assert_eq!(
            run("if echo -n; set x 1; end; echo $x").0,
            "-n\n1\n"
        );
    }

    #[test]
    fn test_status_variable_visible_to_script() {
        assert_eq!(run("nope; echo $?").0, "ghost: unknown command \"nope\"\n127\n");
    }

    #[test]
    fn test_command_name_is_expanded() {
        assert_eq!(run("set cmd echo; $cmd hi").0, "hi\n");
    }

    #[test]
    fn test_expansion_error_skips_command() {
        let (out, status) = run("echo ${broken");
        assert_eq!(out, "ghost: unbalanced { in \"${broken\"\n");
        assert_eq!(status, 1);
    }

    #[test]
    fn test_bad_statement_is_not_fatal() {
        let registry = create_builtin_registry();
        let mut env = Environment::new();
        let program = AST::program(vec![
            Stmt::Bad,
            Stmt::Command(AST::command("echo", &["still", "here"])),
        ]);
        let out = run_program(&registry, &mut env, &program);
        assert_eq!(out, "ghost: bad statement\nstill here\n");
        assert_eq!(env.status(), 0);
    }

    #[test]
    fn test_bad_statement_status() {
        let registry = create_builtin_registry();
        let mut env = Environment::new();
        run_program(&registry, &mut env, &AST::program(vec![Stmt::Bad]));
        assert_eq!(env.status(), STATUS_SYNTAX_ERROR);
    }

    #[test]
    fn test_handler_receives_expanded_args() {
        let mut registry = create_builtin_registry();
        registry.register(
            "args",
            Box::new(FnCommand::new(|ctx| {
                let line = format!("{}\n", ctx.args.join("|"));
                ctx.write_out(&line);
                5
            })),
        );
        let mut env = Environment::with_vars([("v", "x y")]);
        let program = parse(r#"args "$v" 'lit $v' a\ b"#).unwrap();
        let out = run_program(&registry, &mut env, &program);
        assert_eq!(out, "args|x y|lit $v|a b\n");
        assert_eq!(env.status(), 5);
    }

    #[test]
    fn test_program_can_be_evaluated_twice() {
        let registry = create_builtin_registry();
        let mut env = Environment::new();
        let program = parse("echo $n").unwrap();
        env.set("n", "1");
        assert_eq!(run_program(&registry, &mut env, &program), "1\n");
        env.set("n", "2");
        assert_eq!(run_program(&registry, &mut env, &program), "2\n");
    }

    fn nested_if(depth: usize) -> Program {
        let mut stmt = Stmt::Command(AST::command("echo", &["inner"]));
        for _ in 0..depth {
            stmt = Stmt::If(AST::if_stmt(
                AST::command("echo", &[]),
                AST::block(vec![stmt]),
                None,
            ));
        }
        AST::program(vec![stmt, Stmt::Command(AST::command("echo", &["after"]))])
    }

    #[test]
    fn test_nesting_at_limit_runs() {
        let registry = create_builtin_registry();
        let mut env = Environment::new();
        let out = run_program(&registry, &mut env, &nested_if(MAX_EXECUTION_DEPTH));
        assert_eq!(out, format!("{}inner\nafter\n", "\n".repeat(MAX_EXECUTION_DEPTH)));
    }

    #[test]
    fn test_nesting_too_deep_is_reported() {
        let registry = create_builtin_registry();
        let mut env = Environment::new();
        let depth = MAX_EXECUTION_DEPTH + 50;
        let out = run_program(&registry, &mut env, &nested_if(depth));
        assert_eq!(
            out,
            format!(
                "{}ghost: maximum nesting depth exceeded\nafter\n",
                "\n".repeat(MAX_EXECUTION_DEPTH)
            )
        );
        assert_eq!(env.status(), 0);
    }
}
