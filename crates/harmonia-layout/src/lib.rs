//! Box layout for retained-mode scene trees.
//!
//! # Scope
//!
//! This crate implements:
//! - **Lengths** - pixel, percent, `vw` and `vh` values with a string form
//!   (`"50%"`, `"12px"`) and 1 to 4 value padding/margin shorthands
//! - **Unit conversion** - resolving lengths against the parent's content
//!   size or the viewport, and back again
//! - **Layout boxes** - declared geometry with change notification
//! - **Resolution** - static, relative and absolute placement, anchored
//!   leaf controls, overflow detection
//! - **Scrolling** - content viewports whose scroll range follows overflow
//! - **Painting** - a display list of background fills and clips
//!
//! # Not Implemented
//!
//! - Horizontal flow, wrapping, flex or grid placement
//! - Incremental relayout; every pass recomputes the visited subtree
//! - Text measurement

/// Engine configuration.
pub mod config;
/// Length conversion between units and pixels.
pub mod convert;
/// The engine that owns a scene and runs layout passes.
pub mod engine;
/// Error types.
pub mod error;
/// Change events and observers.
pub mod events;
/// Box model, placement, overflow and scrolling.
pub mod layout;
/// Display list and painting.
pub mod paint;
/// Declared value types.
pub mod values;

pub use config::EngineConfig;
pub use convert::{ViewportContext, convert_from_px, resolve_horizontal, resolve_vertical};
pub use engine::LayoutEngine;
pub use error::{LayoutError, ParseError};
pub use events::{LayoutChangeEvent, LayoutChangeReason, LayoutObserver, ObserverId, Reaction};
pub use layout::{
    AnchorBand, BoxNode, ContentViewport, OverflowBehavior, PositionType, ScrollDirection,
    Visibility,
};
pub use paint::{DisplayCommand, DisplayList};
pub use values::{BoxSides, ColorValue, LengthPair, Unit};
