//! Interpreter Types
//!
//! Exit status conventions and the result type returned by the shell facade.

/// Command succeeded.
pub const STATUS_SUCCESS: i32 = 0;
/// Generic failure: bad builtin usage, failed expansion.
pub const STATUS_FAILURE: i32 = 1;
/// The script could not be parsed, or a bad statement was reached.
pub const STATUS_SYNTAX_ERROR: i32 = 2;
/// No command is registered under the requested name.
pub const STATUS_NOT_FOUND: i32 = 127;

/// Max nesting of `if` statements the evaluator walks into.
pub const MAX_EXECUTION_DEPTH: usize = 200;

/// Prefix for every diagnostic line the shell writes.
pub const DIAGNOSTIC_PREFIX: &str = "ghost:";

/// Result of executing a script with captured output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    pub stdout: String,
    pub exit_code: i32,
}

impl ExecResult {
    pub fn new(stdout: String, exit_code: i32) -> Self {
        Self { stdout, exit_code }
    }

    pub fn success(&self) -> bool {
        self.exit_code == STATUS_SUCCESS
    }
}
