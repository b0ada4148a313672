//! Layered configuration loading.
//!
//! Later sources override earlier ones; the database URL falls back to the
//! `DB_*` variables only after every layer has been applied.

use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

pub(crate) const CONFIG_DIR_ENV: &str = "AQUAFARM_CONFIG_DIR";
pub(crate) const CONFIG_FILE_ENV: &str = "AQUAFARM_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// `AQUAFARM_DATABASE__MAX_CONNECTIONS` maps to `database.max_connections`
const ENV_PREFIX: &str = "AQUAFARM";
const ENV_SEPARATOR: &str = "__";

/// Held by tests that set or clear process environment variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// A TOML file and whether its absence is fatal
struct FileLayer {
    path: PathBuf,
    required: bool,
}

/// Resolves [`Settings`] from, lowest priority first:
///
/// 1. `default.toml` (required)
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `AQUAFARM_*` environment variables
///
/// A single config file (`AQUAFARM_CONFIG_FILE` or `--config`) replaces
/// layers 1-3.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Reads `AQUAFARM_CONFIG_DIR`, `AQUAFARM_CONFIG_FILE` and
    /// `AQUAFARM_APP_ENV`. Setting both of the first two is an error.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from);
        let config_file = std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{CONFIG_DIR_ENV} and {CONFIG_FILE_ENV} cannot both be set; \
                 use the first for layered files or the second for a single file"
            )));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Merges all sources, fills the database URL and validates the result.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();
        for layer in self.file_layers() {
            if layer.required && !layer.path.exists() {
                return Err(ConfigError::file_not_found(format!(
                    "Required configuration file not found: {}",
                    layer.path.display()
                )));
            }
            builder = builder.add_source(
                File::new(&layer.path.to_string_lossy(), FileFormat::Toml).required(layer.required),
            );
        }

        let merged = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = merged
            .try_deserialize()
            .map_err(|e| {
                ConfigError::ParseError(format!("Failed to deserialize configuration: {e}"))
            })?;

        settings.database.resolve_url_from_env()?;
        settings.validate()?;

        tracing::debug!(
            environment = %self.environment,
            config_file = ?self.config_file,
            "Configuration loaded"
        );
        Ok(settings)
    }

    fn file_layers(&self) -> Vec<FileLayer> {
        if let Some(path) = &self.config_file {
            return vec![FileLayer {
                path: path.clone(),
                required: true,
            }];
        }

        let env_file = format!("{}.toml", self.environment.as_str());
        [("default.toml", true), (env_file.as_str(), false), ("local.toml", false)]
            .into_iter()
            .map(|(name, required)| FileLayer {
                path: self.config_dir.join(name),
                required,
            })
            .collect()
    }
}
