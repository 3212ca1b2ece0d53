//! Validated numeric input
//!
//! The entry field only accepts ASCII digits and at most nine of them, so
//! every value that reaches the converter fits in a 32-bit signed integer.
//! Validation happens here, at the point of entry; the converter itself
//! still copes with anything it is handed.

use std::fmt;

use thiserror::Error;

/// Reasons a piece of text is refused by the entry field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Character '{ch}' at position {position} is not a decimal digit")]
    NonDigit { ch: char, position: usize },
    #[error("Input is {len} characters long, at most {max} are allowed")]
    TooLong { len: usize, max: usize },
}

/// Digit string of length 0..=9, empty meaning "no value entered"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NumericInput(String);

impl NumericInput {
    /// Longest accepted input; 999_999_999 is below `i32::MAX`
    pub const MAX_LEN: usize = 9;

    /// Creates an empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `text` against the entry rules
    ///
    /// # Returns
    /// The input, or the first rule the text breaks. Non-digit characters
    /// are reported before length.
    pub fn parse(text: &str) -> Result<Self, InputError> {
        if let Some((position, ch)) = text.chars().enumerate().find(|(_, ch)| !ch.is_ascii_digit()) {
            return Err(InputError::NonDigit { ch, position });
        }

        // All ASCII at this point, so bytes == chars
        if text.len() > Self::MAX_LEN {
            return Err(InputError::TooLong {
                len: text.len(),
                max: Self::MAX_LEN,
            });
        }

        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
