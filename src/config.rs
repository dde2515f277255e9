//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file passed with `--config` (never discovered implicitly)
//! 3. `CLONEX_*` environment variables (e.g. `CLONEX_ALGORITHM=blake3`)
//! 4. Command-line flags
//!
//! # Example
//!
//! ```toml
//! algorithm = "blake3"
//! output = "json"
//! progress_interval = 500
//! skip_hidden = true
//! ignore_patterns = ["*.tmp", "node_modules/"]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{FinderConfig, DEFAULT_PROGRESS_INTERVAL};
use crate::scanner::{HashAlgorithm, WalkerConfig};

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "CLONEX_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content hash algorithm.
    pub algorithm: HashAlgorithm,
    /// Report format.
    pub output: OutputFormat,
    /// Hashed files between progress lines.
    pub progress_interval: usize,
    /// Skip dot-files and dot-directories.
    pub skip_hidden: bool,
    /// Gitignore-style patterns to exclude.
    pub ignore_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            output: OutputFormat::Text,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            skip_hidden: false,
            ignore_patterns: Vec::new(),
        }
    }
}

/// Command-line values that override the configuration when given.
#[derive(Debug, Default, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    algorithm: Option<HashAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress_interval: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ignore_patterns: Option<Vec<String>>,
}

impl From<&Cli> for CliOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            algorithm: cli.algorithm,
            output: cli.output,
            progress_interval: cli.progress_interval,
            skip_hidden: cli.skip_hidden.then_some(true),
            ignore_patterns: (!cli.ignore_patterns.is_empty())
                .then(|| cli.ignore_patterns.clone()),
        }
    }
}

impl Config {
    /// Build the figment for the given layers.
    fn figment(path: Option<&Path>, overrides: &CliOverrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    /// Load the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file does not exist or any layer
    /// holds a value of the wrong type.
    pub fn load(path: Option<&Path>, overrides: &CliOverrides) -> Result<Self> {
        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
        }

        let mut config: Config = Self::figment(path, overrides)
            .extract()
            .context("Invalid configuration")?;
        config.progress_interval = config.progress_interval.max(1);

        log::debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    /// Load the configuration for a parsed command line.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::load(cli.config.as_deref(), &CliOverrides::from(cli))
    }

    /// Walker settings derived from this configuration.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::new(self.skip_hidden, self.ignore_patterns.clone())
    }

    /// Finder settings derived from this configuration, without callback.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_algorithm(self.algorithm)
            .with_walker_config(self.walker_config())
            .with_progress_interval(self.progress_interval)
    }
}
