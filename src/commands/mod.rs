// src/commands/mod.rs
pub mod echo;
pub mod help_cmd;
pub mod registry;
pub mod set_cmd;
pub mod types;

pub use registry::{create_builtin_registry, register_builtins, CommandRegistry};
pub use types::{Command, CommandContext, FnCommand};
