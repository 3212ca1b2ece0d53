use crate::domain::base::TargetBase;

/// Presentation policy for converted numbers
///
/// Whether hexadecimal and octal output carries a prefix is a display
/// choice, not part of the conversion contract. The defaults render bare
/// lowercase digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatConfig {
    /// Prefix hexadecimal output with `0x` (including zero: `0x0`)
    pub hex_prefix: bool,
    /// Prefix non-zero octal output with `0`
    pub octal_prefix: bool,
    /// Render hexadecimal digits as `A-F` instead of `a-f`
    pub uppercase_hex: bool,
}

impl FormatConfig {
    pub const HEX_PREFIX: &'static str = "0x";
    pub const OCTAL_PREFIX: &'static str = "0";

    /// Bare lowercase digits
    pub fn plain() -> Self {
        Self::default()
    }

    /// C-style literals: `0xff`, `0377`
    pub fn prefixed() -> Self {
        Self {
            hex_prefix: true,
            octal_prefix: true,
            uppercase_hex: false,
        }
    }

    pub fn with_hex_prefix(mut self, enabled: bool) -> Self {
        self.hex_prefix = enabled;
        self
    }

    pub fn with_octal_prefix(mut self, enabled: bool) -> Self {
        self.octal_prefix = enabled;
        self
    }

    pub fn with_uppercase_hex(mut self, enabled: bool) -> Self {
        self.uppercase_hex = enabled;
        self
    }

    /// Prefix to put in front of `value` rendered in `base`
    pub fn prefix_for(&self, base: TargetBase, value: i32) -> &'static str {
        match base {
            TargetBase::Hexadecimal if self.hex_prefix => Self::HEX_PREFIX,
            // "00" would read as a typo
            TargetBase::Octal if self.octal_prefix && value != 0 => Self::OCTAL_PREFIX,
            _ => "",
        }
    }
}
