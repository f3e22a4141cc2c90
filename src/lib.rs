//! ghost-shell - An embeddable command-scripting engine
//!
//! Scripts are sequences of commands with `if`/`else`/`end` branching,
//! shell-style quoting and `$NAME` interpolation. The host registers its own
//! commands next to the builtins (`echo`, `set`, `help`) and feeds whole
//! scripts to a [`Shell`], receiving the text output and an exit status.
//!
//! ```
//! use ghost_shell::Shell;
//!
//! let mut shell = Shell::new();
//! let result = shell.run("set name ghost; echo \"hello, $name\"");
//! assert_eq!(result.stdout, "hello, ghost\n");
//! assert_eq!(result.exit_code, 0);
//! ```

pub mod ast;
pub mod commands;
pub mod config;
pub mod interpreter;
pub mod logging;
pub mod parser;
pub mod relay;
pub mod shell;

pub use ast::types::*;
pub use commands::{Command, CommandContext, CommandRegistry, FnCommand};
pub use config::{Config, ConfigError};
pub use interpreter::{Environment, ExecResult, ExpandError};
pub use parser::{parse, ParseError, ParseErrors, Parser};
pub use relay::ScriptRelay;
pub use shell::{Shell, ShellOptions};
