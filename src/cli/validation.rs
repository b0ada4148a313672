//! CLI argument validation functions
//!
//! Value parsers for arguments clap cannot check on its own. Pagination
//! strings are deliberately left to the service layer.

use std::fs;
use std::path::PathBuf;

/// Validate that a configuration file exists and is readable
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

/// Validate rollback steps is within 1..=100
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str
        .parse()
        .map_err(|_| {
            format!("Rollback steps must be a valid positive number, got: '{}'", steps_str)
        })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        1..=100 => Ok(steps),
        _ => Err("Rollback steps cannot exceed 100 for safety reasons".to_string()),
    }
}

/// Validate a record id: a positive 32-bit integer
pub fn validate_record_id(id_str: &str) -> Result<i32, String> {
    let id: i32 = id_str
        .trim()
        .parse()
        .map_err(|_| format!("Id must be a positive integer, got: '{}'", id_str))?;

    if id <= 0 {
        return Err(format!("Id must be greater than 0, got: {}", id));
    }
    Ok(id)
}
