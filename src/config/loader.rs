use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Options, SassVariables};

/// File name of the optional project-level options file.
const OPTIONS_FILE: &str = "vela.toml";

/// Errors that can occur when loading plugin options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read options file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse options file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid run mode '{value}': expected web-client, web-server or ssr-server")]
    InvalidRunMode { value: String },

    #[error("Options validation failed: {message}")]
    ValidationError { message: String },
}

impl Options {
    /// Loads options from `vela.toml` under the project root.
    ///
    /// - If the file doesn't exist, returns `Options::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(OPTIONS_FILE);

        if !path.exists() {
            return Ok(Options::default());
        }

        Self::from_file(&path)
    }

    /// Loads and validates options from an explicit TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let options: Options = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        options.validate()?;
        Ok(options)
    }

    /// Validates the options record.
    ///
    /// Checks that a file-based variables source is not an empty path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let SassVariables::File(path) = &self.sass_variables {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "sassVariables points at an empty path".to_string(),
                });
            }
        }

        Ok(())
    }
}
