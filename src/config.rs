//! User configuration, persisted as TOML.
//!
//! Looked up at `$XDG_CONFIG_HOME/covert-chess/config.toml` unless a path is
//! given explicitly. A missing default file means all defaults.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::links::LinkConfig;
use crate::paths::CovertPaths;

/// Environment variable that overrides the alphabet file location.
pub const ALPHABET_ENV: &str = "COVERT_CHESS_ALPHABET";

/// Errors from configuration loading.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(covert::config::no_home),
        help("Set the HOME environment variable or pass --config and --alphabet explicitly.")
    )]
    NoHome,

    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(covert::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(covert::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// covert-chess configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CovertConfig {
    /// Path of the Unicode `emoji-test.txt` file.
    pub alphabet_path: Option<PathBuf>,
    /// Base URLs for analysis and editor links.
    pub links: LinkConfig,
}

impl CovertConfig {
    /// Parse TOML text.
    pub fn from_toml(content: &str, origin: &Path) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from an explicit file, which must exist.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load the default config file, or defaults if it does not exist.
    pub fn load_or_default(paths: &CovertPaths) -> ConfigResult<Self> {
        let path = paths.config_file();
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Pick the alphabet file: command-line flag, then environment, then
    /// config file, then the XDG data directory.
    pub fn alphabet_path(
        &self,
        flag: Option<&Path>,
        env: Option<PathBuf>,
        paths: &CovertPaths,
    ) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or(env)
            .or_else(|| self.alphabet_path.clone())
            .unwrap_or_else(|| paths.alphabet_file())
    }

    /// Serialize as pretty TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "<memory>".into(),
            message: e.to_string(),
        })
    }
}
