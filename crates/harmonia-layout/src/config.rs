//! Engine configuration.
//!
//! Every field has a default, so a scene file may give any subset:
//!
//! ```
//! use harmonia_layout::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{ "viewport_width": 800 }"#).unwrap();
//! assert_eq!(config.viewport_width, 800.0);
//! assert_eq!(config.viewport_height, 648.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::convert::ViewportContext;
use crate::layout::AnchorBand;

/// Window width used when no viewport is configured.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1152.0;
/// Window height used when no viewport is configured.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 648.0;

/// Tunables for [`LayoutEngine`](crate::LayoutEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds between periodic layout passes driven by `tick`.
    pub update_interval_secs: f64,
    /// Initial viewport width in pixels.
    pub viewport_width: f64,
    /// Initial viewport height in pixels.
    pub viewport_height: f64,
    /// Which size bounds the vertical anchor band of leaf controls.
    pub anchor_band: AnchorBand,
    /// How many observer-requested relayout rounds may run after one pass.
    pub max_relayout_passes: usize,
    /// Re-resolve a box's layout root as soon as one of its setters fires.
    pub relayout_on_change: bool,
    /// Default for each new box's diagnostic output flag.
    pub debug_outputs: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: 1.0,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            anchor_band: AnchorBand::default(),
            max_relayout_passes: 8,
            relayout_on_change: true,
            debug_outputs: false,
        }
    }
}

impl EngineConfig {
    /// The configured viewport.
    #[must_use]
    pub const fn viewport(&self) -> ViewportContext {
        ViewportContext::new(self.viewport_width, self.viewport_height)
    }
}
