//! Painting.
//!
//! Converts resolved geometry into a display list of drawing commands that a
//! host renderer executes in order:
//!
//! ```text
//! Declare → Resolve → Paint → Render
//!                       ↓
//!                  DisplayList
//! ```

mod display_list;
mod painter;

pub use display_list::{DisplayCommand, DisplayList};
pub use painter::Painter;
