//! Range and format checks for each settings section.
//!
//! `Settings::validate` stops at the first failing field.

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, FileSettings, LoggerSettings, Settings};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["full", "compact", "json"];
const POSTGRES_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

fn ensure(ok: bool, field: &str, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::validation(field, message()))
    }
}

fn one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value.to_ascii_lowercase().as_str())
}

impl DatabaseConfig {
    /// Requires a PostgreSQL URL, non-zero pool bounds with `min <= max`, and
    /// a non-zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(!self.url.trim().is_empty(), "database.url", || {
            "Database URL is required. Set database.url or the DB_USERNAME, DB_PASSWORD, \
             DB_HOST, DB_PORT and DB_DBNAME variables."
                .into()
        })?;
        ensure(
            POSTGRES_SCHEMES.iter().any(|scheme| self.url.starts_with(scheme)),
            "database.url",
            || "Expected postgres://[user:password@]host[:port]/database".into(),
        )?;
        ensure(self.max_connections > 0, "database.max_connections", || {
            "Must be at least 1.".into()
        })?;
        ensure(self.min_connections > 0, "database.min_connections", || {
            "Must be at least 1.".into()
        })?;
        ensure(
            self.min_connections <= self.max_connections,
            "database.min_connections",
            || {
                format!(
                    "{} exceeds max_connections ({}).",
                    self.min_connections, self.max_connections
                )
            },
        )?;
        ensure(self.connection_timeout > 0, "database.connection_timeout", || {
            "Must be at least 1 second.".into()
        })
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(!self.enabled || !self.path.trim().is_empty(), "logger.file.path", || {
            "A path is required when file logging is enabled.".into()
        })?;
        ensure(one_of(&self.format, LOG_FORMATS), "logger.file.format", || {
            format!("'{}' is not one of: {}", self.format, LOG_FORMATS.join(", "))
        })
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(one_of(&self.level, LOG_LEVELS), "logger.level", || {
            format!("'{}' is not one of: {}", self.level, LOG_LEVELS.join(", "))
        })?;
        ensure(self.console.enabled || self.file.enabled, "logger", || {
            "At least one output (console or file) must be enabled.".into()
        })?;
        self.file.validate()
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.logger.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::ConsoleSettings;

    fn valid_database() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://localhost/aquafarm".to_string(),
            ..Default::default()
        }
    }

    fn failing_field(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("Expected ValidationError, got: {:?}", other),
        }
    }

    #[test]
    fn test_database_config_valid() {
        assert!(valid_database().validate().is_ok());

        let config = DatabaseConfig {
            url: "postgresql://farmer:secret@db:5432/aquafarm".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_config_empty_url() {
        let err = DatabaseConfig::default().validate().unwrap_err();
        assert_eq!(failing_field(err), "database.url");
    }

    #[test]
    fn test_database_config_rejects_other_schemes() {
        for url in ["mysql://localhost/db", "sqlite://farm.db", "localhost:5432"] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..Default::default()
            };
            assert_eq!(failing_field(config.validate().unwrap_err()), "database.url", "{}", url);
        }
    }

    #[test]
    fn test_database_config_connection_bounds() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..valid_database()
        };
        assert_eq!(failing_field(config.validate().unwrap_err()), "database.max_connections");

        let config = DatabaseConfig {
            min_connections: 0,
            ..valid_database()
        };
        assert_eq!(failing_field(config.validate().unwrap_err()), "database.min_connections");

        let config = DatabaseConfig {
            min_connections: 5,
            max_connections: 2,
            ..valid_database()
        };
        assert_eq!(failing_field(config.validate().unwrap_err()), "database.min_connections");

        let config = DatabaseConfig {
            connection_timeout: 0,
            ..valid_database()
        };
        assert_eq!(failing_field(config.validate().unwrap_err()), "database.connection_timeout");
    }

    #[test]
    fn test_logger_settings_levels() {
        for level in ["trace", "DEBUG", "info", "warn", "error"] {
            let settings = LoggerSettings {
                level: level.to_string(),
                ..Default::default()
            };
            assert!(settings.validate().is_ok(), "{}", level);
        }

        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert_eq!(failing_field(settings.validate().unwrap_err()), "logger.level");
    }

    #[test]
    fn test_logger_settings_file_checks() {
        let mut settings = LoggerSettings::default();
        settings.file.enabled = true;
        settings.file.path = "  ".to_string();
        assert_eq!(failing_field(settings.validate().unwrap_err()), "logger.file.path");

        let mut settings = LoggerSettings::default();
        settings.file.format = "yaml".to_string();
        assert_eq!(failing_field(settings.validate().unwrap_err()), "logger.file.format");
    }

    #[test]
    fn test_logger_settings_requires_an_output() {
        let settings = LoggerSettings {
            console: ConsoleSettings {
                enabled: false,
                colored: false,
            },
            ..Default::default()
        };
        assert_eq!(failing_field(settings.validate().unwrap_err()), "logger");
    }

    #[test]
    fn test_settings_validate_reports_database_first() {
        let settings = Settings::default();
        assert_eq!(failing_field(settings.validate().unwrap_err()), "database.url");

        let settings = Settings {
            database: valid_database(),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }
}
