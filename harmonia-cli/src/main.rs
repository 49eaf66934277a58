//! Harmonia CLI
//!
//! Loads a JSON scene, resolves its layout and prints the result.

mod report;
mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use harmonia_dom::NodeId;
use harmonia_layout::ScrollDirection;
use tracing_subscriber::EnvFilter;

use scene::SceneFile;

/// Harmonia: resolve a box layout scene and print its geometry
#[derive(Parser, Debug)]
#[command(name = "harmonia")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the resolved tree
    harmonia demos/panel.json

    # Resolve against a different window size
    harmonia --width 1920 --height 1080 demos/panel.json

    # Scroll a box three steps down before printing
    harmonia --scroll list:down:3 demos/panel.json

    # Machine-readable output and the display list
    harmonia --json demos/panel.json
    harmonia --paint demos/panel.json
"#)]
struct Cli {
    /// Path to a JSON scene file
    #[arg(value_name = "SCENE")]
    path: PathBuf,

    /// Viewport width, overriding the scene config
    #[arg(long, requires = "height")]
    width: Option<f64>,

    /// Viewport height, overriding the scene config
    #[arg(long, requires = "width")]
    height: Option<f64>,

    /// Scroll a box before printing: NAME:DIRECTION[:STEPS]
    #[arg(long, value_name = "NAME:DIR[:N]")]
    scroll: Vec<String>,

    /// Advance the update timer this many seconds before printing
    #[arg(long, value_name = "SECS")]
    tick: Option<f64>,

    /// Print the resolved tree as JSON
    #[arg(long)]
    json: bool,

    /// Print the display list instead of the tree
    #[arg(long)]
    paint: bool,

    /// Log layout activity (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let scene = SceneFile::load(&cli.path)?;
    let viewport = cli.width.zip(cli.height);
    let mut engine = scene.build(viewport)?;

    for request in &cli.scroll {
        let (name, direction, steps) = parse_scroll(request)?;
        let id = engine
            .tree()
            .find_by_name(name)
            .with_context(|| format!("no node named {name:?}"))?;
        for _ in 0..steps {
            if !engine.scroll(id, direction)? {
                break;
            }
        }
    }

    if let Some(seconds) = cli.tick {
        let ran = engine.tick(seconds)?;
        tracing::info!(seconds, ran, "tick");
    }

    if cli.paint {
        report::print_display_list(&engine.paint());
        return Ok(());
    }

    let tree = report::collect(&engine, NodeId::ROOT);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        let viewport = engine.viewport();
        println!("=== Layout ({}x{}) ===\n", viewport.width, viewport.height);
        report::print_tree(&tree, 0);
    }
    Ok(())
}

/// Split a `NAME:DIRECTION[:STEPS]` scroll request.
fn parse_scroll(request: &str) -> Result<(&str, ScrollDirection, u32)> {
    let mut parts = request.split(':');
    let (Some(name), Some(direction)) = (parts.next(), parts.next()) else {
        anyhow::bail!("scroll request {request:?} needs NAME:DIRECTION");
    };
    let direction = match direction.to_ascii_lowercase().as_str() {
        "up" => ScrollDirection::Up,
        "down" => ScrollDirection::Down,
        "left" => ScrollDirection::Left,
        "right" => ScrollDirection::Right,
        other => anyhow::bail!("unknown scroll direction {other:?}"),
    };
    let steps = match parts.next() {
        Some(steps) => steps
            .parse()
            .with_context(|| format!("bad step count in {request:?}"))?,
        None => 1,
    };
    Ok((name, direction, steps))
}
