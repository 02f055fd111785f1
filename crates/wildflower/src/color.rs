//! RGB colors written as `#rrggbb` hex strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An opaque RGB color.
///
/// Serializes as its hex string so config files can say `"#e06377"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Missing the leading `#`.
    MissingHash(String),
    /// Not exactly six hex digits after the `#`.
    BadLength(String),
    /// A non-hex character.
    BadDigit(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::MissingHash(s) => write!(f, "color '{}' must start with '#'", s),
            ColorError::BadLength(s) => write!(f, "color '{}' must have six hex digits", s),
            ColorError::BadDigit(s) => write!(f, "color '{}' contains a non-hex digit", s),
        }
    }
}

impl std::error::Error for ColorError {}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::BadLength(s.to_string()));
        }
        // from_str_radix would also accept a sign
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorError::BadDigit(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}
