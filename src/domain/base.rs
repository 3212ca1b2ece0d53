//! Target bases for number conversion
//!
//! A `TargetBase` names one of the four radices the converter renders to.
//! It carries the lowercase name used in error messages and the label
//! shown next to the selection widget.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Radix the converted number is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetBase {
    #[default]
    Decimal,
    Hexadecimal,
    Octal,
    Binary,
}

impl TargetBase {
    /// All bases in the order the screen lists them
    pub const ALL: [TargetBase; 4] = [
        TargetBase::Decimal,
        TargetBase::Hexadecimal,
        TargetBase::Octal,
        TargetBase::Binary,
    ];

    /// Numeric radix (2, 8, 10 or 16)
    pub fn radix(self) -> u32 {
        match self {
            TargetBase::Decimal => 10,
            TargetBase::Hexadecimal => 16,
            TargetBase::Octal => 8,
            TargetBase::Binary => 2,
        }
    }

    /// Lowercase name, as used in `Invalid <name> input`
    pub fn name(self) -> &'static str {
        match self {
            TargetBase::Decimal => "decimal",
            TargetBase::Hexadecimal => "hexadecimal",
            TargetBase::Octal => "octal",
            TargetBase::Binary => "binary",
        }
    }

    /// Capitalized label for the selection widget
    pub fn label(self) -> &'static str {
        match self {
            TargetBase::Decimal => "Decimal",
            TargetBase::Hexadecimal => "Hexadecimal",
            TargetBase::Octal => "Octal",
            TargetBase::Binary => "Binary",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            TargetBase::Decimal => "dec",
            TargetBase::Hexadecimal => "hex",
            TargetBase::Octal => "oct",
            TargetBase::Binary => "bin",
        }
    }

    /// Looks a base up by its radix
    pub fn from_radix(radix: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|base| base.radix() == radix)
    }
}

impl fmt::Display for TargetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown base '{0}' (expected decimal, hexadecimal, octal, binary or 2/8/10/16)")]
pub struct UnknownBase(pub String);

impl FromStr for TargetBase {
    type Err = UnknownBase;

    /// Accepts the full name, the three-letter alias or the radix, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();

        if let Ok(radix) = wanted.parse::<u32>() {
            return Self::from_radix(radix).ok_or_else(|| UnknownBase(s.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|base| base.name() == wanted || base.short_name() == wanted)
            .ok_or_else(|| UnknownBase(s.to_string()))
    }
}
