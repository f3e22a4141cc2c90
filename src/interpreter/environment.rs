//! Variable Environment
//!
//! Variables live in a chain of scopes. Scope 0 is the top level and lives as
//! long as the shell; each script execution pushes one child scope on top of
//! it and pops it when the execution returns. Lookups walk from the innermost
//! scope toward the top level, writes go to the innermost scope only.
//!
//! The chain is stored as a stack: the parent of every scope is the one below
//! it, so no scope owns or points at another.

use indexmap::IndexMap;

/// Reserved variable mirroring the last exit status.
pub const STATUS_VAR: &str = "?";

#[derive(Debug, Clone)]
pub struct Environment {
    /// `scopes[0]` is the top level, the last entry the current scope.
    scopes: Vec<IndexMap<String, String>>,
    status: i32,
}

impl Environment {
    /// A top-level environment with no variables and status 0.
    pub fn new() -> Self {
        let mut env = Self {
            scopes: vec![IndexMap::new()],
            status: 0,
        };
        env.set_status(0);
        env
    }

    /// Top-level environment seeded with `vars`.
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut env = Self::new();
        for (name, value) in vars {
            env.set_global(name, value);
        }
        env
    }

    /// Open a child scope chained to the current one.
    pub fn push_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    /// Drop the current scope and everything set in it. The top level is
    /// never popped.
    pub fn pop_scope(&mut self) -> Option<IndexMap<String, String>> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Look `name` up from the current scope toward the top level. The
    /// status variable always resolves to the top-level copy.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == STATUS_VAR {
            return self.get_global(name);
        }
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .map(String::as_str)
    }

    /// Set `name` in the current scope. Ancestors are never written.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let scope = self.scopes.len() - 1;
        self.scopes[scope].insert(name.into(), value.into());
    }

    /// Set `name` in the top-level scope, where it outlives the current
    /// execution.
    pub fn set_global(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.scopes[0].insert(name.into(), value.into());
    }

    /// Look `name` up in the top-level scope only.
    pub fn get_global(&self, name: &str) -> Option<&str> {
        self.scopes[0].get(name).map(String::as_str)
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    /// Record the last exit status, mirrored into the top level as `$?`.
    pub fn set_status(&mut self, status: i32) {
        self.status = status;
        self.set_global(STATUS_VAR, status.to_string());
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
