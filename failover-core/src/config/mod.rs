//! Configuration for combined backend groups
//!
//! A configuration file names groups of backends, the capability they share,
//! and the scoring policy used to order them. Files may reference environment
//! variables as `${VAR}`; these are resolved before parsing.

mod env;
mod error;
mod schema;
mod validator;

pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{FailoverConfig, GroupConfig, CONFIG_VERSION};
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<FailoverConfig> {
    let path = path.as_ref();
    let interpolated = read_interpolated(path)?;

    let config: FailoverConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    tracing::debug!(path = %path.display(), groups = config.groups.len(), "Loaded config");
    Ok(config)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<FailoverConfig> {
    let path = path.as_ref();
    let interpolated = read_interpolated(path)?;

    let config: FailoverConfig =
        serde_json::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    tracing::debug!(path = %path.display(), groups = config.groups.len(), "Loaded config");
    Ok(config)
}

fn read_interpolated(path: &Path) -> ConfigResult<String> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    env::interpolate_env_vars(&content)
}
