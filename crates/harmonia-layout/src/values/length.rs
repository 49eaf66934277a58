//! Unit-tagged lengths and their string form.
//!
//! Percentages and viewport units are stored as fractions: `"50%"` becomes
//! `LengthPair { unit: Percent, magnitude: 0.5 }` and `"25vh"` becomes
//! `LengthPair { unit: ViewportHeight, magnitude: 0.25 }`. Pixels are stored
//! verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// The unit a [`LengthPair`] magnitude is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// No value was declared; resolves to zero pixels.
    #[default]
    Unset,
    /// Absolute pixels.
    Pixel,
    /// Fraction of the parent's content size along the same axis.
    Percent,
    /// Fraction of the viewport width.
    ViewportWidth,
    /// Fraction of the viewport height.
    ViewportHeight,
}

impl Unit {
    /// The suffix written after the number in the string form.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Pixel => "px",
            Self::Percent => "%",
            Self::ViewportWidth => "vw",
            Self::ViewportHeight => "vh",
        }
    }

    /// Factor between the written number and the stored magnitude.
    #[must_use]
    pub const fn scale(self) -> f64 {
        match self {
            Self::Unset | Self::Pixel => 1.0,
            Self::Percent | Self::ViewportWidth | Self::ViewportHeight => 100.0,
        }
    }

    /// Look up a unit by suffix. A bare number counts as pixels.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        if suffix.is_empty() || suffix.eq_ignore_ascii_case("px") {
            Some(Self::Pixel)
        } else if suffix == "%" {
            Some(Self::Percent)
        } else if suffix.eq_ignore_ascii_case("vw") {
            Some(Self::ViewportWidth)
        } else if suffix.eq_ignore_ascii_case("vh") {
            Some(Self::ViewportHeight)
        } else {
            None
        }
    }
}

/// A magnitude paired with its unit.
///
/// Serialized as its string form, so scene files can write `"50%"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LengthPair {
    /// Unit of `magnitude`.
    pub unit: Unit,
    /// Stored magnitude; a fraction for `%`, `vw` and `vh`.
    pub magnitude: f64,
}

impl LengthPair {
    /// The undeclared length.
    pub const UNSET: Self = Self {
        unit: Unit::Unset,
        magnitude: 0.0,
    };

    /// Create a pair from a unit and an already-scaled magnitude.
    #[must_use]
    pub const fn new(unit: Unit, magnitude: f64) -> Self {
        Self { unit, magnitude }
    }

    /// Absolute pixels.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::new(Unit::Pixel, value)
    }

    /// Fraction of the parent content size, e.g. `0.25` for `"25%"`.
    #[must_use]
    pub const fn percent(fraction: f64) -> Self {
        Self::new(Unit::Percent, fraction)
    }

    /// Fraction of the viewport width, e.g. `0.5` for `"50vw"`.
    #[must_use]
    pub const fn vw(fraction: f64) -> Self {
        Self::new(Unit::ViewportWidth, fraction)
    }

    /// Fraction of the viewport height, e.g. `0.5` for `"50vh"`.
    #[must_use]
    pub const fn vh(fraction: f64) -> Self {
        Self::new(Unit::ViewportHeight, fraction)
    }

    /// Whether no value was declared.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.unit == Unit::Unset
    }

    /// Parse `<optional-sign><digits>[.<digits>]<unit-suffix>`.
    ///
    /// Surrounding whitespace is ignored and the keyword `unset` yields
    /// [`LengthPair::UNSET`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the string is empty, has no valid number,
    /// has a number too large for an `f64`, or ends in an unknown suffix.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }
        if trimmed.eq_ignore_ascii_case("unset") {
            return Ok(Self::UNSET);
        }

        let split = numeric_prefix_len(trimmed);
        let (number, suffix) = trimmed.split_at(split);
        if !number.bytes().any(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidNumber(input.to_string()));
        }
        let value: f64 = number
            .parse()
            .map_err(|_| ParseError::InvalidNumber(input.to_string()))?;
        if !value.is_finite() {
            return Err(ParseError::InvalidNumber(input.to_string()));
        }
        let unit = Unit::from_suffix(suffix).ok_or_else(|| ParseError::UnknownUnit {
            input: input.to_string(),
            suffix: suffix.to_string(),
        })?;

        Ok(Self::new(unit, value / unit.scale()))
    }

    /// The number as written in the string form, e.g. `50.0` for `"50%"`.
    #[must_use]
    pub fn written_value(&self) -> f64 {
        self.magnitude * self.unit.scale()
    }
}

/// Length of the `[+-]digits[.digits]` prefix of `s`.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    i
}

impl fmt::Display for LengthPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unset() {
            return f.write_str("unset");
        }
        write!(f, "{}{}", shortest_written(self), self.unit.suffix())
    }
}

/// The shortest written number that parses back to exactly `pair`.
///
/// `{}` already prints the shortest round-trip form of an `f64`, but the
/// written value of a relative unit is the product `magnitude * 100`, which
/// carries rounding noise. Try increasing precision until dividing by the
/// scale lands on the stored magnitude again.
fn shortest_written(pair: &LengthPair) -> f64 {
    let scale = pair.unit.scale();
    let mut written = pair.written_value();
    if written.is_infinite() && pair.magnitude.is_finite() {
        written = f64::MAX.copysign(written);
    }
    for digits in 0..=17 {
        let Ok(candidate) = format!("{written:.digits$e}").parse::<f64>() else {
            continue;
        };
        if candidate / scale == pair.magnitude {
            return candidate;
        }
    }
    written
}

impl FromStr for LengthPair {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LengthPair {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LengthPair> for String {
    fn from(value: LengthPair) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_are_stored_for_relative_units() {
        assert_eq!(LengthPair::parse("50%"), Ok(LengthPair::percent(0.5)));
        assert_eq!(LengthPair::parse("25vh"), Ok(LengthPair::vh(0.25)));
        assert_eq!(LengthPair::parse("-10%"), Ok(LengthPair::percent(-0.1)));
    }

    #[test]
    fn bare_numbers_are_pixels() {
        assert_eq!(LengthPair::parse(" 12 "), Ok(LengthPair::px(12.0)));
        assert_eq!(LengthPair::parse("+.5px"), Ok(LengthPair::px(0.5)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(LengthPair::parse("   "), Err(ParseError::Empty));
        assert!(matches!(
            LengthPair::parse("px"),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            LengthPair::parse("12em"),
            Err(ParseError::UnknownUnit { .. })
        ));
        assert!(matches!(
            LengthPair::parse("1 2px"),
            Err(ParseError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn display_writes_the_declared_number() {
        assert_eq!(LengthPair::percent(0.07).to_string(), "7%");
        assert_eq!(LengthPair::px(12.5).to_string(), "12.5px");
        assert_eq!(LengthPair::UNSET.to_string(), "unset");
    }

    #[test]
    fn display_round_trips_tiny_and_huge_values() {
        for text in ["0.00000012%", "0.0000004px", "33.333333333333336vw"] {
            let pair = LengthPair::parse(text).unwrap();
            assert_eq!(LengthPair::parse(&pair.to_string()), Ok(pair), "{text}");
        }

        let huge = format!("2{}px", "0".repeat(303));
        let pair = LengthPair::parse(&huge).unwrap();
        assert_eq!(pair.to_string(), huge);

        let max = LengthPair::px(f64::MAX);
        assert_eq!(LengthPair::parse(&max.to_string()), Ok(max));
    }

    #[test]
    fn overflowing_numbers_are_rejected() {
        let text = format!("1{}px", "0".repeat(400));
        assert_eq!(
            LengthPair::parse(&text),
            Err(ParseError::InvalidNumber(text.clone()))
        );
    }
}
