//! Configuration for the converter
//!
//! The presentation policy for converted numbers and the screen orientation
//! the view is laid out for. Both can be read from the environment so the
//! shell can be switched without code changes.

pub mod format;

pub use format::FormatConfig;

use thiserror::Error;

use crate::ui::view::Orientation;

pub const ENV_HEX_PREFIX: &str = "RADIX_HEX_PREFIX";
pub const ENV_OCTAL_PREFIX: &str = "RADIX_OCTAL_PREFIX";
pub const ENV_UPPERCASE_HEX: &str = "RADIX_UPPERCASE_HEX";
pub const ENV_ORIENTATION: &str = "RADIX_ORIENTATION";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Everything the shell needs to set up a session and its screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub format: FormatConfig,
    pub orientation: Orientation,
}

impl AppConfig {
    /// Reads the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup
    ///
    /// Missing keys keep their defaults; present but malformed values are
    /// errors rather than silently ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_HEX_PREFIX) {
            config.format.hex_prefix = parse_flag(ENV_HEX_PREFIX, &value)?;
        }
        if let Some(value) = lookup(ENV_OCTAL_PREFIX) {
            config.format.octal_prefix = parse_flag(ENV_OCTAL_PREFIX, &value)?;
        }
        if let Some(value) = lookup(ENV_UPPERCASE_HEX) {
            config.format.uppercase_hex = parse_flag(ENV_UPPERCASE_HEX, &value)?;
        }
        if let Some(value) = lookup(ENV_ORIENTATION) {
            config.orientation = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_ORIENTATION,
                value: value.clone(),
                expected: "portrait or landscape",
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            expected: "a boolean (1/0, true/false, yes/no, on/off)",
        }),
    }
}
