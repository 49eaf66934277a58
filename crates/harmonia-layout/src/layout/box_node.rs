//! The layout box attached to a container scene node.
//!
//! A [`BoxNode`] holds the declared geometry of one container (width,
//! height, position offsets, padding, margin) as unit-tagged lengths, plus
//! what the last layout pass derived from them. Declared values change only
//! through setters. Each geometry setter records a [`LayoutChangeReason`]
//! unless told not to; the engine drains those records after every edit and
//! turns them into events.

use std::fmt;
use std::mem;

use harmonia_common::warning::warn_once;
use harmonia_dom::NodeId;
use serde::{Deserialize, Serialize};

use super::box_model::ComputedBox;
use super::overflow::{OverflowBehavior, OverflowState};
use super::positioned::PositionType;
use super::viewport::ContentViewport;
use crate::convert::convert_from_px;
use crate::error::ParseError;
use crate::events::LayoutChangeReason;
use crate::values::{BoxSides, ColorValue, LengthPair, Unit};

/// Whether a box is drawn and whether it takes up space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Laid out and painted.
    #[default]
    Visible,
    /// Laid out but its background is not painted.
    Transparent,
    /// Neither laid out nor painted, and takes no space.
    Hidden,
}

/// The cached answer to "which box is my parent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentLink {
    /// Not looked up since the last reparent.
    #[default]
    Unresolved,
    /// No ancestor carries a box; sizes resolve against the viewport.
    Root,
    /// The nearest ancestor box.
    Box(NodeId),
}

/// Which four-sided property a side setter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SideGroup {
    Padding,
    Margin,
}

impl SideGroup {
    const fn reason(self) -> LayoutChangeReason {
        match self {
            Self::Padding => LayoutChangeReason::Padding,
            Self::Margin => LayoutChangeReason::Margin,
        }
    }
}

impl fmt::Display for SideGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Padding => "padding",
            Self::Margin => "margin",
        })
    }
}

/// Declared and derived geometry of one container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxNode {
    width: LengthPair,
    height: LengthPair,
    pos_x: LengthPair,
    pos_y: LengthPair,
    padding: BoxSides,
    margin: BoxSides,
    padding_shorthand: Option<String>,
    margin_shorthand: Option<String>,
    position_type: PositionType,
    overflow_behavior: OverflowBehavior,
    visibility: Visibility,
    background_color: ColorValue,
    debug_outputs: bool,

    parent: ParentLink,
    content_viewport: Option<ContentViewport>,

    computed: ComputedBox,
    overflow: OverflowState,

    changes: Vec<LayoutChangeReason>,
    redraw_requested: bool,
}

impl BoxNode {
    /// A box with every length unset, static positioning, scroll overflow
    /// and a transparent background.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- declared values ---

    /// Declared content width.
    #[must_use]
    pub const fn width(&self) -> LengthPair {
        self.width
    }

    /// Declared content height.
    #[must_use]
    pub const fn height(&self) -> LengthPair {
        self.height
    }

    /// Declared horizontal position offset.
    #[must_use]
    pub const fn pos_x(&self) -> LengthPair {
        self.pos_x
    }

    /// Declared vertical position offset.
    #[must_use]
    pub const fn pos_y(&self) -> LengthPair {
        self.pos_y
    }

    /// Declared padding.
    #[must_use]
    pub const fn padding(&self) -> &BoxSides {
        &self.padding
    }

    /// Declared margin.
    #[must_use]
    pub const fn margin(&self) -> &BoxSides {
        &self.margin
    }

    /// How the box is placed among its siblings.
    #[must_use]
    pub const fn position_type(&self) -> PositionType {
        self.position_type
    }

    /// What happens to content that does not fit.
    #[must_use]
    pub const fn overflow_behavior(&self) -> OverflowBehavior {
        self.overflow_behavior
    }

    /// Visibility mode.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Background fill.
    #[must_use]
    pub const fn background_color(&self) -> ColorValue {
        self.background_color
    }

    /// Whether parse failures and new sizes are reported.
    #[must_use]
    pub const fn debug_outputs(&self) -> bool {
        self.debug_outputs
    }

    // --- string accessors ---

    /// Declared width in string form, e.g. `"50%"`.
    #[must_use]
    pub fn width_string(&self) -> String {
        self.width.to_string()
    }

    /// Declared height in string form.
    #[must_use]
    pub fn height_string(&self) -> String {
        self.height.to_string()
    }

    /// Declared horizontal offset in string form.
    #[must_use]
    pub fn pos_x_string(&self) -> String {
        self.pos_x.to_string()
    }

    /// Declared vertical offset in string form.
    #[must_use]
    pub fn pos_y_string(&self) -> String {
        self.pos_y.to_string()
    }

    /// The last accepted padding shorthand, or the shortest shorthand for
    /// the current sides when they were set individually.
    #[must_use]
    pub fn padding_string(&self) -> String {
        self.padding_shorthand
            .clone()
            .unwrap_or_else(|| self.padding.to_string())
    }

    /// Margin counterpart of [`BoxNode::padding_string`].
    #[must_use]
    pub fn margin_string(&self) -> String {
        self.margin_shorthand
            .clone()
            .unwrap_or_else(|| self.margin.to_string())
    }

    // --- derived values ---

    /// Everything the last layout pass resolved.
    #[must_use]
    pub const fn computed(&self) -> &ComputedBox {
        &self.computed
    }

    /// Resolved content width.
    #[must_use]
    pub const fn width_px(&self) -> f64 {
        self.computed.width_px
    }

    /// Resolved content height.
    #[must_use]
    pub const fn height_px(&self) -> f64 {
        self.computed.height_px
    }

    /// Content width plus horizontal padding.
    #[must_use]
    pub fn total_width_px(&self) -> f64 {
        self.computed.total_width()
    }

    /// Content height plus vertical padding.
    #[must_use]
    pub fn total_height_px(&self) -> f64 {
        self.computed.total_height()
    }

    /// Resolved content width re-expressed in `unit`, against the same
    /// references the last pass used.
    #[must_use]
    pub fn width_in(&self, unit: Unit) -> f64 {
        let c = &self.computed;
        convert_from_px(c.width_px, unit, c.parent_width_px, c.viewport)
    }

    /// Resolved content height re-expressed in `unit`.
    #[must_use]
    pub fn height_in(&self, unit: Unit) -> f64 {
        let c = &self.computed;
        convert_from_px(c.height_px, unit, c.parent_height_px, c.viewport)
    }

    /// Resolved horizontal offset re-expressed in `unit`.
    #[must_use]
    pub fn pos_x_in(&self, unit: Unit) -> f64 {
        let c = &self.computed;
        convert_from_px(c.pos_x_px, unit, c.parent_width_px, c.viewport)
    }

    /// Resolved vertical offset re-expressed in `unit`.
    #[must_use]
    pub fn pos_y_in(&self, unit: Unit) -> f64 {
        let c = &self.computed;
        convert_from_px(c.pos_y_px, unit, c.parent_height_px, c.viewport)
    }

    /// Overflow found by the last pass.
    #[must_use]
    pub const fn overflow(&self) -> &OverflowState {
        &self.overflow
    }

    /// Whether children pass the right content edge.
    #[must_use]
    pub fn is_overflowed_x(&self) -> bool {
        self.overflow.is_overflowed_x()
    }

    /// Whether children pass the bottom content edge.
    #[must_use]
    pub fn is_overflowed_y(&self) -> bool {
        self.overflow.is_overflowed_y()
    }

    /// Scroll offsets, or zero without a content viewport.
    #[must_use]
    pub fn scroll_offset(&self) -> (f64, f64) {
        self.content_viewport
            .as_ref()
            .map_or((0.0, 0.0), |v| (v.scroll_left(), v.scroll_top()))
    }

    /// The scroll state, when the box has a content viewport.
    #[must_use]
    pub const fn content_viewport(&self) -> Option<&ContentViewport> {
        self.content_viewport.as_ref()
    }

    /// Mutable scroll state.
    pub const fn content_viewport_mut(&mut self) -> Option<&mut ContentViewport> {
        self.content_viewport.as_mut()
    }

    /// The cached parent link.
    #[must_use]
    pub const fn parent_link(&self) -> ParentLink {
        self.parent
    }

    // --- geometry setters ---

    /// Set the declared content width.
    pub fn set_width(&mut self, width: LengthPair, notify: bool) {
        if self.width != width {
            self.width = width;
            self.record(LayoutChangeReason::Width, notify);
        }
    }

    /// Set the declared content height.
    pub fn set_height(&mut self, height: LengthPair, notify: bool) {
        if self.height != height {
            self.height = height;
            self.record(LayoutChangeReason::Height, notify);
        }
    }

    /// Set the declared horizontal position offset.
    pub fn set_pos_x(&mut self, pos_x: LengthPair, notify: bool) {
        if self.pos_x != pos_x {
            self.pos_x = pos_x;
            self.record(LayoutChangeReason::Position, notify);
        }
    }

    /// Set the declared vertical position offset.
    pub fn set_pos_y(&mut self, pos_y: LengthPair, notify: bool) {
        if self.pos_y != pos_y {
            self.pos_y = pos_y;
            self.record(LayoutChangeReason::Position, notify);
        }
    }

    /// Set top padding.
    pub fn set_padding_up(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Padding, notify, |s| s.up = value);
    }

    /// Set right padding.
    pub fn set_padding_right(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Padding, notify, |s| s.right = value);
    }

    /// Set bottom padding.
    pub fn set_padding_down(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Padding, notify, |s| s.down = value);
    }

    /// Set left padding.
    pub fn set_padding_left(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Padding, notify, |s| s.left = value);
    }

    /// Set top and bottom padding.
    pub fn set_padding_vertical(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Padding, notify, |s| {
            s.up = value;
            s.down = value;
        });
    }

    /// Set left and right padding.
    pub fn set_padding_horizontal(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Padding, notify, |s| {
            s.left = value;
            s.right = value;
        });
    }

    /// Set every padding side.
    pub fn set_padding_all(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Padding, notify, |s| *s = BoxSides::uniform(value));
    }

    /// Set top margin.
    pub fn set_margin_up(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Margin, notify, |s| s.up = value);
    }

    /// Set right margin.
    pub fn set_margin_right(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Margin, notify, |s| s.right = value);
    }

    /// Set bottom margin.
    pub fn set_margin_down(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Margin, notify, |s| s.down = value);
    }

    /// Set left margin.
    pub fn set_margin_left(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Margin, notify, |s| s.left = value);
    }

    /// Set top and bottom margin.
    pub fn set_margin_vertical(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Margin, notify, |s| {
            s.up = value;
            s.down = value;
        });
    }

    /// Set left and right margin.
    pub fn set_margin_horizontal(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Margin, notify, |s| {
            s.left = value;
            s.right = value;
        });
    }

    /// Set every margin side.
    pub fn set_margin_all(&mut self, value: LengthPair, notify: bool) {
        self.set_sides(SideGroup::Margin, notify, |s| *s = BoxSides::uniform(value));
    }

    // --- string setters ---

    /// Parse and set the width. On failure the old value stays.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] for a malformed length.
    pub fn set_width_str(&mut self, value: &str) -> Result<(), ParseError> {
        let pair = self.parse_length("width", value)?;
        self.set_width(pair, true);
        Ok(())
    }

    /// Parse and set the height. On failure the old value stays.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] for a malformed length.
    pub fn set_height_str(&mut self, value: &str) -> Result<(), ParseError> {
        let pair = self.parse_length("height", value)?;
        self.set_height(pair, true);
        Ok(())
    }

    /// Parse and set the horizontal offset. On failure the old value stays.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] for a malformed length.
    pub fn set_pos_x_str(&mut self, value: &str) -> Result<(), ParseError> {
        let pair = self.parse_length("pos_x", value)?;
        self.set_pos_x(pair, true);
        Ok(())
    }

    /// Parse and set the vertical offset. On failure the old value stays.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] for a malformed length.
    pub fn set_pos_y_str(&mut self, value: &str) -> Result<(), ParseError> {
        let pair = self.parse_length("pos_y", value)?;
        self.set_pos_y(pair, true);
        Ok(())
    }

    /// Apply a 1 to 4 value padding shorthand with a single notification.
    ///
    /// # Errors
    ///
    /// On a bad token count or token nothing changes and no notification
    /// is recorded.
    pub fn set_padding_str(&mut self, value: &str) -> Result<(), ParseError> {
        self.set_shorthand(SideGroup::Padding, value)
    }

    /// Apply a 1 to 4 value margin shorthand with a single notification.
    ///
    /// # Errors
    ///
    /// On a bad token count or token nothing changes and no notification
    /// is recorded.
    pub fn set_margin_str(&mut self, value: &str) -> Result<(), ParseError> {
        self.set_shorthand(SideGroup::Margin, value)
    }

    // --- non-geometry setters ---

    /// Change how the box is placed. Records a position change.
    pub fn set_position_type(&mut self, position_type: PositionType) {
        if self.position_type != position_type {
            self.position_type = position_type;
            self.record(LayoutChangeReason::Position, true);
        }
    }

    /// Change the overflow behavior. Takes effect at the next pass.
    pub fn set_overflow_behavior(&mut self, behavior: OverflowBehavior) {
        self.overflow_behavior = behavior;
        self.redraw_requested = true;
    }

    /// Change the visibility mode.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.record(LayoutChangeReason::Visibility, true);
        }
    }

    /// Change the background fill. Requests a redraw only.
    pub fn set_background_color(&mut self, color: ColorValue) {
        self.background_color = color;
        self.redraw_requested = true;
    }

    /// Parse and set the background fill.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidColor`] and keeps the old fill.
    pub fn set_background_color_str(&mut self, value: &str) -> Result<(), ParseError> {
        match ColorValue::parse(value) {
            Ok(color) => {
                self.set_background_color(color);
                Ok(())
            }
            Err(err) => {
                self.report_parse_failure("background_color", value, &err);
                Err(err)
            }
        }
    }

    /// Enable or disable diagnostic output for this box.
    pub fn set_debug_outputs(&mut self, enabled: bool) {
        self.debug_outputs = enabled;
    }

    // --- engine plumbing ---

    /// Take the change reasons recorded since the last drain.
    pub fn take_changes(&mut self) -> Vec<LayoutChangeReason> {
        mem::take(&mut self.changes)
    }

    /// Take and clear the redraw flag.
    pub fn take_redraw_request(&mut self) -> bool {
        mem::take(&mut self.redraw_requested)
    }

    pub(crate) fn set_parent_link(&mut self, link: ParentLink) {
        self.parent = link;
    }

    pub(crate) fn set_content_viewport(&mut self, viewport: ContentViewport) {
        self.content_viewport = Some(viewport);
    }

    pub(crate) fn set_computed(&mut self, computed: ComputedBox) {
        self.computed = computed;
    }

    pub(crate) fn set_overflow(&mut self, overflow: OverflowState) {
        self.overflow = overflow;
        let behavior = self.overflow_behavior;
        if let Some(viewport) = &mut self.content_viewport {
            viewport.apply_overflow(&overflow, behavior);
        }
    }

    fn record(&mut self, reason: LayoutChangeReason, notify: bool) {
        if notify && !self.changes.contains(&reason) {
            self.changes.push(reason);
        }
        if notify && reason == LayoutChangeReason::Padding {
            self.redraw_requested = true;
        }
    }

    fn sides_mut(&mut self, group: SideGroup) -> &mut BoxSides {
        match group {
            SideGroup::Padding => &mut self.padding,
            SideGroup::Margin => &mut self.margin,
        }
    }

    fn set_sides(&mut self, group: SideGroup, notify: bool, apply: impl FnOnce(&mut BoxSides)) {
        let sides = self.sides_mut(group);
        let before = *sides;
        apply(sides);
        let changed = *sides != before;
        if changed {
            match group {
                SideGroup::Padding => self.padding_shorthand = None,
                SideGroup::Margin => self.margin_shorthand = None,
            }
            self.record(group.reason(), notify);
        }
    }

    fn set_shorthand(&mut self, group: SideGroup, value: &str) -> Result<(), ParseError> {
        let sides = match BoxSides::parse_shorthand(value) {
            Ok(sides) => sides,
            Err(err) => {
                self.report_parse_failure(&group.to_string(), value, &err);
                return Err(err);
            }
        };
        let changed = *self.sides_mut(group) != sides;
        self.set_sides(group, false, |s| *s = sides);
        let stored = Some(value.trim().to_string());
        match group {
            SideGroup::Padding => self.padding_shorthand = stored,
            SideGroup::Margin => self.margin_shorthand = stored,
        }
        if changed {
            self.record(group.reason(), true);
        }
        Ok(())
    }

    fn parse_length(&self, property: &str, value: &str) -> Result<LengthPair, ParseError> {
        LengthPair::parse(value).inspect_err(|err| self.report_parse_failure(property, value, err))
    }

    fn report_parse_failure(&self, property: &str, value: &str, err: &ParseError) {
        if self.debug_outputs {
            tracing::debug!(property, value, %err, "rejected declared value");
            let _ = warn_once(
                "harmonia-layout",
                &format!("ignoring {property} value '{value}': {err}"),
            );
        }
    }
}
