//! Script Relay
//!
//! Connects a message-based host (a chat bot, a line-oriented client) to a
//! single shared [`Shell`]. Messages carrying the command prefix are run as
//! scripts one at a time; everything else is ignored.

use tokio::sync::Mutex;
use tracing::trace;

use crate::commands::Command;
use crate::shell::Shell;

/// Reply sent when a script ran but printed nothing.
pub const NO_OUTPUT: &str = "`no output`";

pub struct ScriptRelay {
    shell: Mutex<Shell>,
    prefix: String,
}

impl ScriptRelay {
    pub fn new(shell: Shell, prefix: impl Into<String>) -> Self {
        Self {
            shell: Mutex::new(shell),
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Run `message` as a script if it starts with the prefix and return the
    /// reply to send back. Scripts from concurrent callers never overlap.
    pub async fn handle(&self, message: &str) -> Option<String> {
        let Some(script) = message.strip_prefix(self.prefix.as_str()) else {
            trace!(len = message.len(), "ignoring message without prefix");
            return None;
        };

        let result = self.shell.lock().await.run(script);
        if result.stdout.trim().is_empty() {
            Some(NO_OUTPUT.to_string())
        } else {
            Some(result.stdout)
        }
    }

    pub async fn add_command(&self, name: impl Into<String>, command: impl Command + 'static) {
        self.shell.lock().await.add_command(name, command);
    }

    /// Status of the last script run through the relay.
    pub async fn status(&self) -> i32 {
        self.shell.lock().await.status()
    }
}
