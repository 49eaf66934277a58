//! JSON scene files.
//!
//! A scene is an optional engine `config` plus a list of top-level nodes.
//! Each node is tagged by `type`:
//!
//! ```json
//! {
//!   "config": { "viewport_width": 800, "viewport_height": 600 },
//!   "nodes": [
//!     { "type": "box", "name": "panel", "width": "50%", "padding": "8px",
//!       "background": "#336699", "scroll": { "vertical": true },
//!       "children": [
//!         { "type": "control", "name": "label", "width": 120, "height": 24 }
//!       ] }
//!   ]
//! }
//! ```
//!
//! Box geometry is written the same way it is typed into the engine's string
//! setters, so every value goes through the same parser and error reporting.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use harmonia_common::warning::clear_warnings;
use harmonia_dom::{ControlData, EdgeValues, NodeId, NodeType};
use harmonia_layout::{
    BoxNode, EngineConfig, LayoutEngine, OverflowBehavior, ParseError, PositionType, Visibility,
};
use serde::Deserialize;

type StrSetter = fn(&mut BoxNode, &str) -> Result<(), ParseError>;

/// A parsed scene file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneFile {
    /// Engine settings. Missing fields keep their defaults.
    pub config: EngineConfig,
    /// Children of the window.
    pub nodes: Vec<SceneNode>,
}

/// One node of the scene.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneNode {
    /// A container with a layout box.
    Box(BoxSpec),
    /// A leaf control.
    Control(ControlSpec),
    /// A container without a layout box.
    Node(GroupSpec),
}

/// Which scrollbars a scrolling box shows.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollSpec {
    /// Show the horizontal bar when content overflows sideways.
    pub horizontal: bool,
    /// Show the vertical bar when content overflows downwards.
    pub vertical: bool,
}

/// A layout box and its settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoxSpec {
    /// Scene node name.
    pub name: String,
    /// Width, e.g. `"120px"` or `"50%"`.
    pub width: Option<String>,
    /// Height.
    pub height: Option<String>,
    /// Horizontal position offset.
    pub pos_x: Option<String>,
    /// Vertical position offset.
    pub pos_y: Option<String>,
    /// Padding shorthand with one to four values.
    pub padding: Option<String>,
    /// Margin shorthand with one to four values.
    pub margin: Option<String>,
    /// Positioning mode.
    pub position: Option<PositionType>,
    /// Overflow behavior.
    pub overflow: Option<OverflowBehavior>,
    /// Visibility mode.
    pub visibility: Option<Visibility>,
    /// Background color, hex or named.
    pub background: Option<String>,
    /// Give the box a content viewport.
    pub scroll: Option<ScrollSpec>,
    /// Log rejected values for this box.
    pub debug: Option<bool>,
    /// Child nodes.
    pub children: Vec<SceneNode>,
}

/// A leaf control.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlSpec {
    /// Scene node name.
    pub name: String,
    /// Initial width in pixels.
    pub width: f64,
    /// Initial height in pixels.
    pub height: f64,
    /// Anchors as `[left, top, right, bottom]` fractions.
    pub anchors: Option<[f64; 4]>,
    /// Offsets as `[left, top, right, bottom]` pixels.
    pub offsets: Option<[f64; 4]>,
    /// Child nodes, placed by themselves.
    pub children: Vec<SceneNode>,
}

/// A plain container.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupSpec {
    /// Scene node name.
    pub name: String,
    /// Child nodes.
    pub children: Vec<SceneNode>,
}

impl SceneFile {
    /// Read and parse a scene file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid scene.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid scene {}", path.display()))
    }

    /// Parse a scene from JSON text.
    ///
    /// # Errors
    ///
    /// Fails if the text is not a valid scene.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build an engine holding this scene.
    ///
    /// `viewport` overrides the configured window size when given.
    ///
    /// # Errors
    ///
    /// Fails on the first value the engine rejects, naming the node.
    pub fn build(&self, viewport: Option<(f64, f64)>) -> Result<LayoutEngine> {
        clear_warnings();
        let mut config = self.config.clone();
        if let Some((width, height)) = viewport {
            config.viewport_width = width;
            config.viewport_height = height;
        }
        let mut engine = LayoutEngine::new(config);
        for node in &self.nodes {
            let _ = add_node(&mut engine, NodeId::ROOT, node)?;
        }
        engine.resolve_all()?;
        Ok(engine)
    }
}

fn add_node(engine: &mut LayoutEngine, parent: NodeId, node: &SceneNode) -> Result<NodeId> {
    match node {
        SceneNode::Box(spec) => add_box(engine, parent, spec),
        SceneNode::Control(spec) => {
            let data = ControlData {
                anchors: spec.anchors.map(edges).unwrap_or_default(),
                offsets: spec.offsets.map(edges).unwrap_or_default(),
            };
            let id = engine.add_control(parent, &spec.name, data, spec.width, spec.height)?;
            add_children(engine, id, &spec.children)?;
            Ok(id)
        }
        SceneNode::Node(spec) => {
            let id = engine.add_node(parent, NodeType::Container, &spec.name)?;
            add_children(engine, id, &spec.children)?;
            Ok(id)
        }
    }
}

fn add_children(engine: &mut LayoutEngine, parent: NodeId, children: &[SceneNode]) -> Result<()> {
    for child in children {
        let _ = add_node(engine, parent, child)?;
    }
    Ok(())
}

fn add_box(engine: &mut LayoutEngine, parent: NodeId, spec: &BoxSpec) -> Result<NodeId> {
    let id = engine.add_box(parent, &spec.name)?;
    let name = if spec.name.is_empty() {
        id.to_string()
    } else {
        spec.name.clone()
    };

    if let Some(debug) = spec.debug {
        engine.edit(id, |b| b.set_debug_outputs(debug))?;
    }

    let properties: [(&str, Option<&str>, StrSetter); 7] = [
        ("width", spec.width.as_deref(), BoxNode::set_width_str),
        ("height", spec.height.as_deref(), BoxNode::set_height_str),
        ("pos_x", spec.pos_x.as_deref(), BoxNode::set_pos_x_str),
        ("pos_y", spec.pos_y.as_deref(), BoxNode::set_pos_y_str),
        ("padding", spec.padding.as_deref(), BoxNode::set_padding_str),
        ("margin", spec.margin.as_deref(), BoxNode::set_margin_str),
        ("background", spec.background.as_deref(), BoxNode::set_background_color_str),
    ];
    for (property, value, setter) in properties {
        let Some(value) = value else { continue };
        engine
            .try_edit(id, |b| setter(b, value))
            .with_context(|| format!("{name}: bad {property} {value:?}"))?;
    }

    engine.edit(id, |b| {
        if let Some(position) = spec.position {
            b.set_position_type(position);
        }
        if let Some(overflow) = spec.overflow {
            b.set_overflow_behavior(overflow);
        }
        if let Some(visibility) = spec.visibility {
            b.set_visibility(visibility);
        }
    })?;

    if let Some(scroll) = spec.scroll {
        let _ = engine.enable_scrolling(id, scroll.horizontal, scroll.vertical)?;
    }
    add_children(engine, id, &spec.children)?;
    tracing::debug!(node = %id, name = %name, "box added");
    Ok(id)
}

const fn edges([left, top, right, bottom]: [f64; 4]) -> EdgeValues {
    EdgeValues::new(left, top, right, bottom)
}
