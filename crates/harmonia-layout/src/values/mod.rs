//! Declared value types: unit-tagged lengths, four-sided shorthands and colors.

mod color;
mod length;
mod sides;

pub use color::ColorValue;
pub use length::{LengthPair, Unit};
pub use sides::BoxSides;
