//! Number formatting in a target base
//!
//! This module is completely pure: the same input and base always give the
//! same result, and every failure comes back as data.
//!
//! ## Rules
//! - Empty input renders as an empty string, it is not an error
//! - Input must be ASCII digits forming a value in `0..=i32::MAX`
//! - Anything else is a `ParseFailure` naming the requested base

use std::fmt;

use thiserror::Error;

use crate::config::format::FormatConfig;
use crate::domain::base::TargetBase;

/// The input could not be read as a non-negative 32-bit integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid {base} input")]
pub struct ParseFailure {
    pub base: TargetBase,
}

/// Outcome of a conversion, as displayed on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    /// Formatted number, or empty when nothing was entered
    Success(String),
    Failure(ParseFailure),
}

impl ConversionResult {
    pub fn success(text: impl Into<String>) -> Self {
        ConversionResult::Success(text.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ConversionResult::Failure(_))
    }

    /// Text to show in the result field
    pub fn text(&self) -> String {
        match self {
            ConversionResult::Success(text) => text.clone(),
            ConversionResult::Failure(failure) => failure.to_string(),
        }
    }
}

impl Default for ConversionResult {
    fn default() -> Self {
        ConversionResult::Success(String::new())
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionResult::Success(text) => f.write_str(text),
            ConversionResult::Failure(failure) => write!(f, "{failure}"),
        }
    }
}

impl From<Result<String, ParseFailure>> for ConversionResult {
    fn from(result: Result<String, ParseFailure>) -> Self {
        match result {
            Ok(text) => ConversionResult::Success(text),
            Err(failure) => ConversionResult::Failure(failure),
        }
    }
}

/// Converts decimal digit strings to other bases under a presentation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Converter {
    config: FormatConfig,
}

impl Converter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Renders `input` in `base`
    ///
    /// # Arguments
    /// * `input` - Decimal digits; normally already validated by `NumericInput`
    /// * `base` - Target base
    ///
    /// # Returns
    /// `Success("")` for empty input, the formatted number, or a
    /// `ParseFailure` naming `base`
    pub fn convert(&self, input: &str, base: TargetBase) -> ConversionResult {
        if input.is_empty() {
            return ConversionResult::default();
        }

        parse_decimal(input)
            .map(|value| self.format(value, base))
            .ok_or(ParseFailure { base })
            .into()
    }

    /// Formats an already parsed, non-negative value
    pub fn format(&self, value: i32, base: TargetBase) -> String {
        let prefix = self.config.prefix_for(base, value);
        let digits = match base {
            TargetBase::Decimal => value.to_string(),
            TargetBase::Hexadecimal if self.config.uppercase_hex => format!("{value:X}"),
            TargetBase::Hexadecimal => format!("{value:x}"),
            TargetBase::Octal => format!("{value:o}"),
            TargetBase::Binary => format!("{value:b}"),
        };
        format!("{prefix}{digits}")
    }
}

/// Converts with the default presentation policy (no prefixes, lowercase hex)
pub fn convert(input: &str, base: TargetBase) -> ConversionResult {
    Converter::default().convert(input, base)
}

/// Strict base-10 parse: digits only, no sign, no whitespace, `<= i32::MAX`
fn parse_decimal(input: &str) -> Option<i32> {
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse::<i32>().ok()
}
