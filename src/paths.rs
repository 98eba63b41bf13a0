//! XDG-compliant path resolution for covert-chess.

use std::path::PathBuf;

use crate::config::{ConfigError, ConfigResult};

const APP_DIR: &str = "covert-chess";

/// Global XDG directories for covert-chess.
#[derive(Debug, Clone)]
pub struct CovertPaths {
    /// `$XDG_CONFIG_HOME/covert-chess/`
    pub config_dir: PathBuf,
    /// `$XDG_DATA_HOME/covert-chess/`
    pub data_dir: PathBuf,
}

impl CovertPaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> ConfigResult<Self> {
        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| ConfigError::NoHome)?;

        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config"))
            .join(APP_DIR);

        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".local/share"))
            .join(APP_DIR);

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Build from explicit directories (tests, embedding).
    pub fn with_dirs(config_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            config_dir,
            data_dir,
        }
    }

    /// `config.toml` inside the config directory.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default alphabet file inside the data directory.
    pub fn alphabet_file(&self) -> PathBuf {
        crate::alphabet::default_path(&self.data_dir)
    }
}
