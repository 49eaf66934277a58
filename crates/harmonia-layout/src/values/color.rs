//! Background colors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorValue {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Default for ColorValue {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl ColorValue {
    /// Fully transparent black, the default box background.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Build a color from its channels.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether painting this color has no visible effect.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 255)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 255)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Look up one of the basic named colors.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgba(255, 0, 0, 255),
            "green" => Self::rgba(0, 128, 0, 255),
            "lime" => Self::rgba(0, 255, 0, 255),
            "blue" => Self::rgba(0, 0, 255, 255),
            "yellow" => Self::rgba(255, 255, 0, 255),
            "cyan" | "aqua" => Self::rgba(0, 255, 255, 255),
            "magenta" | "fuchsia" => Self::rgba(255, 0, 255, 255),
            "gray" | "grey" => Self::rgba(128, 128, 128, 255),
            "silver" => Self::rgba(192, 192, 192, 255),
            "orange" => Self::rgba(255, 165, 0, 255),
            "purple" => Self::rgba(128, 0, 128, 255),
            "navy" => Self::rgba(0, 0, 128, 255),
            "teal" => Self::rgba(0, 128, 128, 255),
            _ => return None,
        };
        Some(color)
    }

    /// Parse a hex or named color.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidColor`] for anything else.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        let parsed = if trimmed.starts_with('#') {
            Self::from_hex(trimmed)
        } else {
            Self::from_named(trimmed)
        };
        parsed.ok_or_else(|| ParseError::InvalidColor(input.to_string()))
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for ColorValue {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.to_string()
    }
}
