//! Property tests for units, overflow tracking and scroll clamping.

use harmonia_dom::NodeId;
use harmonia_layout::layout::{ContentViewport, OverflowState, OverflowTracker};
use harmonia_layout::{
    BoxSides, EngineConfig, LayoutEngine, LengthPair, OverflowBehavior, Unit, ViewportContext,
    resolve_horizontal, resolve_vertical,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

const UNITS: [Unit; 4] = [
    Unit::Pixel,
    Unit::Percent,
    Unit::ViewportWidth,
    Unit::ViewportHeight,
];

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[quickcheck]
fn string_form_round_trips(hundredths: i32, unit_index: u8) -> bool {
    let unit = UNITS[usize::from(unit_index) % UNITS.len()];
    let written = f64::from(hundredths) / 100.0;
    let Ok(first) = LengthPair::parse(&format!("{written}{}", unit.suffix())) else {
        return false;
    };
    let Ok(second) = LengthPair::parse(&first.to_string()) else {
        return false;
    };
    first.unit == second.unit && close(first.magnitude, second.magnitude)
}

#[quickcheck]
fn any_finite_magnitude_survives_display(magnitude: f64, unit_index: u8) -> TestResult {
    let unit = UNITS[usize::from(unit_index) % UNITS.len()];
    // Relative magnitudes beyond this have no finite written number.
    if !magnitude.is_finite() || magnitude.abs() > f64::MAX / unit.scale() {
        return TestResult::discard();
    }
    let pair = LengthPair::new(unit, magnitude);
    let Ok(parsed) = LengthPair::parse(&pair.to_string()) else {
        return TestResult::failed();
    };
    let tolerance = 4.0 * f64::EPSILON * magnitude.abs();
    TestResult::from_bool(
        parsed.unit == unit
            && (parsed.magnitude == magnitude || (parsed.magnitude - magnitude).abs() <= tolerance),
    )
}

#[quickcheck]
fn pixels_ignore_their_reference(px: i32, parent: u16) -> bool {
    let value = f64::from(px);
    let viewport = ViewportContext::new(640.0, 480.0);
    resolve_horizontal(LengthPair::px(value), f64::from(parent), viewport) == value
        && resolve_vertical(LengthPair::px(value), f64::from(parent), viewport) == value
}

#[quickcheck]
fn full_percent_is_the_parent(parent: u32) -> bool {
    let parent = f64::from(parent);
    resolve_horizontal(LengthPair::percent(1.0), parent, ViewportContext::default()) == parent
}

#[quickcheck]
fn one_token_shorthand_sets_every_side(px: i16) -> bool {
    let text = format!("{px}px");
    BoxSides::parse_shorthand(&text) == Ok(BoxSides::uniform(LengthPair::px(f64::from(px))))
}

#[quickcheck]
fn overflow_never_shrinks_or_goes_negative(extents: Vec<(i16, i16, u8, u8)>) -> bool {
    let mut tracker = OverflowTracker::new(0.0, 0.0, 100.0, 100.0);
    let mut previous = *tracker.state();
    for (x, y, w, h) in extents {
        let (x, y) = (f64::from(x), f64::from(y));
        tracker.observe(x, y, x + f64::from(w), y + f64::from(h));
        let state = *tracker.state();
        let grew = state.x_px >= previous.x_px
            && state.y_px >= previous.y_px
            && state.negative_x_px >= previous.negative_x_px
            && state.negative_y_px >= previous.negative_y_px;
        let non_negative = state.x_px >= 0.0
            && state.y_px >= 0.0
            && state.negative_x_px >= 0.0
            && state.negative_y_px >= 0.0;
        if !grew || !non_negative || state.is_overflowed_x() != (state.x_px > 0.0) {
            return false;
        }
        previous = state;
    }
    true
}

#[quickcheck]
fn scroll_offsets_stay_in_range(overflow: u16, requests: Vec<i32>) -> bool {
    let mut viewport = ContentViewport::new(NodeId(1));
    let state = OverflowState {
        y_px: f64::from(overflow),
        ..Default::default()
    };
    viewport.apply_overflow(&state, OverflowBehavior::Scroll);
    requests.into_iter().all(|request| {
        viewport.set_scroll_top(f64::from(request));
        (0.0..=f64::from(overflow)).contains(&viewport.scroll_top())
    })
}

#[quickcheck]
fn stacked_children_overflow_by_their_total_height(heights: Vec<u8>) -> TestResult {
    let mut heights = heights;
    heights.truncate(20);
    let mut engine = LayoutEngine::new(EngineConfig {
        relayout_on_change: false,
        ..EngineConfig::default()
    });
    let Ok(list) = engine.add_box(NodeId::ROOT, "list") else {
        return TestResult::failed();
    };
    for (index, height) in heights.iter().enumerate() {
        let Ok(child) = engine.add_box(list, &format!("child-{index}")) else {
            return TestResult::failed();
        };
        let height = f64::from(*height);
        if engine
            .edit(child, |b| b.set_height(LengthPair::px(height), true))
            .is_err()
        {
            return TestResult::failed();
        }
    }
    if engine.resolve_all().is_err() {
        return TestResult::failed();
    }
    let total: f64 = heights.iter().map(|h| f64::from(*h)).sum();
    let Ok(node) = engine.box_node(list) else {
        return TestResult::failed();
    };
    TestResult::from_bool(node.overflow().y_px == total && node.is_overflowed_y() == (total > 0.0))
}
