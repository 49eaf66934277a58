//! Printing resolved scenes.

use harmonia_dom::{NodeId, NodeType};
use harmonia_layout::{DisplayCommand, DisplayList, LayoutEngine, Visibility};
use owo_colors::OwoColorize;
use serde::Serialize;

/// One node of the resolved scene, for `--json` output.
#[derive(Debug, Serialize)]
pub struct NodeReport {
    /// Scene node name.
    pub name: String,
    /// `window`, `box`, `node`, `control` or `content`.
    pub kind: &'static str,
    /// Host position relative to the host parent.
    pub x: f64,
    /// Host position relative to the host parent.
    pub y: f64,
    /// Host width.
    pub width: f64,
    /// Host height.
    pub height: f64,
    /// Layout details, present for boxes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<BoxReport>,
    /// Child nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeReport>,
}

/// The declared and resolved values of a box.
#[derive(Debug, Serialize)]
pub struct BoxReport {
    /// Declared width.
    pub width: String,
    /// Declared height.
    pub height: String,
    /// Declared padding shorthand.
    pub padding: String,
    /// Declared margin shorthand.
    pub margin: String,
    /// Overflow past the right edge of the content area.
    pub overflow_x: f64,
    /// Overflow past the bottom edge of the content area.
    pub overflow_y: f64,
    /// Current scroll offset, left then top.
    pub scroll: (f64, f64),
    /// Visibility mode.
    pub visibility: Visibility,
}

/// Collect `id` and its subtree.
#[must_use]
pub fn collect(engine: &LayoutEngine, id: NodeId) -> NodeReport {
    let tree = engine.tree();
    let node = tree.get(id);
    let rect = tree.rect(id).unwrap_or_default();
    let layout = engine.box_node(id).ok().map(|b| BoxReport {
        width: b.width_string(),
        height: b.height_string(),
        padding: b.padding_string(),
        margin: b.margin_string(),
        overflow_x: b.overflow().x_px,
        overflow_y: b.overflow().y_px,
        scroll: b.scroll_offset(),
        visibility: b.visibility(),
    });
    NodeReport {
        name: node.map(|n| n.name.clone()).unwrap_or_default(),
        kind: kind_name(node.map(|n| &n.node_type), layout.is_some()),
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        layout,
        children: tree
            .children(id)
            .iter()
            .map(|&child| collect(engine, child))
            .collect(),
    }
}

const fn kind_name(node_type: Option<&NodeType>, has_box: bool) -> &'static str {
    match node_type {
        Some(NodeType::Window) => "window",
        Some(NodeType::Container) if has_box => "box",
        Some(NodeType::Container) | None => "node",
        Some(NodeType::Control(_)) => "control",
        Some(NodeType::ContentViewport) => "content",
    }
}

/// Print a resolved node tree with indentation.
pub fn print_tree(report: &NodeReport, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = if report.name.is_empty() {
        report.kind.to_string()
    } else {
        format!("{} {}", report.kind, report.name)
    };
    println!(
        "{indent}[{}] {}",
        label.bold(),
        format!(
            "x={:.1} y={:.1} w={:.1} h={:.1}",
            report.x, report.y, report.width, report.height
        )
        .cyan()
    );

    if let Some(layout) = &report.layout {
        println!(
            "{indent}  {} width={} height={} padding={} margin={}",
            "declared".dimmed(),
            layout.width,
            layout.height,
            layout.padding,
            layout.margin
        );
        if layout.overflow_x > 0.0 || layout.overflow_y > 0.0 {
            println!(
                "{indent}  {} x={:.1} y={:.1} scroll=({:.1}, {:.1})",
                "overflow".yellow(),
                layout.overflow_x,
                layout.overflow_y,
                layout.scroll.0,
                layout.scroll.1
            );
        }
        if layout.visibility != Visibility::Visible {
            println!("{indent}  {} {:?}", "visibility".dimmed(), layout.visibility);
        }
    }

    for child in &report.children {
        print_tree(child, depth + 1);
    }
}

/// Print a display list, one command per line.
pub fn print_display_list(list: &DisplayList) {
    let mut depth = 0_usize;
    for command in list.commands() {
        match command {
            DisplayCommand::FillRect {
                node,
                x,
                y,
                width,
                height,
                color,
            } => println!(
                "{}{} {node} {x:.1},{y:.1} {width:.1}x{height:.1} {color}",
                "  ".repeat(depth),
                "fill".green()
            ),
            DisplayCommand::PushClip {
                x,
                y,
                width,
                height,
            } => {
                println!(
                    "{}{} {x:.1},{y:.1} {width:.1}x{height:.1}",
                    "  ".repeat(depth),
                    "clip".magenta()
                );
                depth += 1;
            }
            DisplayCommand::PopClip => {
                depth = depth.saturating_sub(1);
                println!("{}{}", "  ".repeat(depth), "unclip".magenta());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneFile;

    #[test]
    fn test_report_mirrors_the_tree() {
        let scene = SceneFile::parse(
            r#"{ "nodes": [
                { "type": "box", "name": "list", "height": "10px",
                  "scroll": { "vertical": true },
                  "children": [ { "type": "box", "name": "row", "height": "30px" } ] },
                { "type": "control", "name": "icon", "width": 4, "height": 4 }
            ] }"#,
        )
        .unwrap();
        let engine = scene.build(None).unwrap();
        let report = collect(&engine, NodeId::ROOT);

        assert_eq!(report.kind, "window");
        let kinds: Vec<_> = report.children.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, ["box", "control"]);

        let list = &report.children[0];
        let layout = list.layout.as_ref().unwrap();
        assert_eq!(layout.height, "10px");
        assert_eq!(layout.overflow_y, 20.0);
        assert_eq!(list.children[0].kind, "content");
        assert_eq!(list.children[0].children[0].name, "row");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["children"][0]["layout"]["visibility"], "visible");
        assert!(json["children"][1].get("layout").is_none());
    }
}
