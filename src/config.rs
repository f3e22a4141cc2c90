//! Configuration
//!
//! Settings for the `ghost` binary, read from TOML:
//!
//! ```toml
//! [shell]
//! prompt = ">> "
//!
//! [relay]
//! prefix = "!"
//!
//! [env]
//! GREETING = "hello"
//! ```
//!
//! Every section and field is optional.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::shell::ShellOptions;

/// System-wide config, checked first.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/ghost/config.toml";
/// File name looked up in the working directory, checked last.
pub const LOCAL_CONFIG_FILE: &str = "ghost.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellSection {
    /// Prompt printed by the interactive loop
    pub prompt: String,
}

impl Default for ShellSection {
    fn default() -> Self {
        Self {
            prompt: ">> ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RelaySection {
    /// Messages must start with this to be run as scripts
    pub prefix: String,
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shell: ShellSection,
    pub relay: RelaySection,
    /// Variables seeded into the top-level scope
    pub env: HashMap<String, String>,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the first config file found in [`Config::search_paths`], or the
    /// defaults when there is none.
    pub fn discover() -> Result<Self, ConfigError> {
        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Candidate config files, in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_FILE)];
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(Path::new(&home).join(".ghost").join("config.toml"));
        }
        paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
        paths
    }

    pub fn shell_options(&self) -> ShellOptions {
        ShellOptions {
            env: Some(self.env.clone()),
        }
    }
}
