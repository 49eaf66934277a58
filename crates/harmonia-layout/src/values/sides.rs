//! Four-sided values and the padding/margin shorthand.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::LengthPair;
use crate::error::ParseError;

/// One length per side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSides {
    /// Top side.
    pub up: LengthPair,
    /// Right side.
    pub right: LengthPair,
    /// Bottom side.
    pub down: LengthPair,
    /// Left side.
    pub left: LengthPair,
}

impl BoxSides {
    /// The same length on every side.
    #[must_use]
    pub const fn uniform(value: LengthPair) -> Self {
        Self {
            up: value,
            right: value,
            down: value,
            left: value,
        }
    }

    /// Parse a 1 to 4 token shorthand, expanded clockwise from the top:
    ///
    /// - `a` sets all four sides
    /// - `a b` sets up/down to `a` and left/right to `b`
    /// - `a b c` sets up to `a`, left/right to `b`, down to `c`
    /// - `a b c d` sets up, right, down, left
    ///
    /// # Errors
    ///
    /// Fails on any other token count or on the first token that is not a
    /// valid length. Nothing is returned partially applied.
    pub fn parse_shorthand(input: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() > 4 {
            return Err(ParseError::ShorthandArity(tokens.len()));
        }
        let lengths = tokens
            .iter()
            .map(|token| LengthPair::parse(token))
            .collect::<Result<Vec<_>, _>>()?;

        let sides = match lengths.as_slice() {
            [all] => Self::uniform(*all),
            [vertical, horizontal] => Self {
                up: *vertical,
                right: *horizontal,
                down: *vertical,
                left: *horizontal,
            },
            [up, horizontal, down] => Self {
                up: *up,
                right: *horizontal,
                down: *down,
                left: *horizontal,
            },
            [up, right, down, left] => Self {
                up: *up,
                right: *right,
                down: *down,
                left: *left,
            },
            _ => return Err(ParseError::ShorthandArity(lengths.len())),
        };
        Ok(sides)
    }
}

impl fmt::Display for BoxSides {
    /// Writes the shortest shorthand that expands back to these sides.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            up,
            right,
            down,
            left,
        } = self;
        if left != right {
            write!(f, "{up} {right} {down} {left}")
        } else if up != down {
            write!(f, "{up} {right} {down}")
        } else if up != right {
            write!(f, "{up} {right}")
        } else {
            write!(f, "{up}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_form_is_written() {
        let sides = BoxSides::parse_shorthand("4px 8px 4px 8px").unwrap();
        assert_eq!(sides.to_string(), "4px 8px");
        let sides = BoxSides::parse_shorthand("1px 2px 3px").unwrap();
        assert_eq!(sides.to_string(), "1px 2px 3px");
    }
}
