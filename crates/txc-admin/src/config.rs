use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use txc_client::DEFAULT_BASE_URL;
use txc_console::DEFAULT_PAGE_SIZE;
use txc_observe::{LoggerConfig, LoggerError};

use crate::cli::Cli;

/// Environment variable overriding [`AdminConfig::api_base`].
pub const ENV_API_BASE: &str = "TXC_API_BASE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Logger(#[from] LoggerError),
}

/// Console settings. Layered as: defaults, JSON file, environment, flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Backend API base URL, including the `/v1` prefix.
    pub api_base: String,
    /// Rows per table page.
    pub page_size: usize,
    /// Where DLQ downloads are written.
    pub download_dir: PathBuf,
    pub logger: LoggerConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            download_dir: PathBuf::from("."),
            logger: LoggerConfig::default(),
        }
    }
}

impl AdminConfig {
    /// Resolve the configuration for one invocation.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut cfg = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        cfg.apply_env()?;
        cfg.apply_flags(cli)?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok());
        self.logger.apply_env()?;
        Ok(())
    }

    fn apply_vars(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(base) = get(ENV_API_BASE) {
            self.api_base = base;
        }
    }

    pub fn apply_flags(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(base) = &cli.api_base {
            self.api_base.clone_from(base);
        }
        if let Some(level) = &cli.log_level {
            self.logger.level = level.parse()?;
        }
        if let Some(format) = &cli.log_format {
            self.logger.format = format.parse()?;
        }
        Ok(())
    }
}
