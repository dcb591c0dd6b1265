// ABOUTME: Textual color codes for palette swatches
// ABOUTME: Packs RGB triplets into "#rrggbb" and parses them back

use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit sRGB triplet as returned by the quantizer.
pub type Rgb = Srgb<u8>;

/// Leading marker of every color code.
pub const CODE_MARKER: char = '#';

/// Bit forced above the 24 color bits so the hex rendering is always seven
/// digits long; the first digit is then dropped.
const FORCED_BIT: u32 = 1 << 24;

/// A color code of the form `#rrggbb`, always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexCode(String);

impl HexCode {
    /// Encode a color as `#rrggbb`.
    pub fn from_rgb(rgb: Rgb) -> Self {
        let packed = FORCED_BIT
            + ((rgb.red as u32) << 16)
            + ((rgb.green as u32) << 8)
            + rgb.blue as u32;
        let digits = format!("{packed:x}");
        Self(format!("{CODE_MARKER}{}", &digits[1..]))
    }

    /// Decode back into the three components.
    pub fn to_rgb(&self) -> Rgb {
        // Invariant: the inner string was validated on construction.
        let value = u32::from_str_radix(&self.0[1..], 16).unwrap_or_default();
        Rgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Rgb> for HexCode {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb)
    }
}

impl fmt::Display for HexCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a string is not a color code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseHexError {
    #[error("color code must start with '#'")]
    MissingMarker,
    #[error("color code must have exactly 6 hex digits, got {0}")]
    WrongLength(usize),
    #[error("invalid hex digit in color code")]
    InvalidDigit,
}

impl FromStr for HexCode {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(CODE_MARKER)
            .ok_or(ParseHexError::MissingMarker)?;
        if digits.chars().count() != 6 {
            return Err(ParseHexError::WrongLength(digits.chars().count()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseHexError::InvalidDigit);
        }
        Ok(Self(format!("{CODE_MARKER}{}", digits.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for HexCode {
    type Error = ParseHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexCode> for String {
    fn from(code: HexCode) -> Self {
        code.0
    }
}
