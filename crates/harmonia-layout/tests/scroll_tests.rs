//! Integration tests for content viewports and scrolling.

use harmonia_dom::NodeId;
use harmonia_layout::{
    EngineConfig, LayoutEngine, LengthPair, OverflowBehavior, ScrollDirection,
};

/// Helper: a 100x100 scrolling box holding three 100x50 children.
fn scrolling_list() -> (LayoutEngine, NodeId, Vec<NodeId>) {
    let mut engine = LayoutEngine::new(EngineConfig::default());
    let list = engine.add_box(NodeId::ROOT, "list").unwrap();
    engine
        .edit(list, |b| {
            b.set_width(LengthPair::px(100.0), true);
            b.set_height(LengthPair::px(100.0), true);
        })
        .unwrap();
    let _ = engine.enable_scrolling(list, true, true).unwrap();

    let mut rows = Vec::new();
    for name in ["a", "b", "c"] {
        let row = engine.add_box(list, name).unwrap();
        engine
            .edit(row, |b| {
                b.set_width(LengthPair::px(100.0), true);
                b.set_height(LengthPair::px(50.0), true);
            })
            .unwrap();
        rows.push(row);
    }
    (engine, list, rows)
}

#[test]
fn test_children_move_into_the_content_viewport() {
    let mut engine = LayoutEngine::new(EngineConfig::default());
    let list = engine.add_box(NodeId::ROOT, "list").unwrap();
    let early = engine.add_box(list, "early").unwrap();
    let wrapper = engine.enable_scrolling(list, false, true).unwrap();
    let late = engine.add_box(list, "late").unwrap();

    assert_eq!(engine.tree().children(list), &[wrapper]);
    assert_eq!(engine.tree().children(wrapper), &[early, late]);
    // A second call reuses the wrapper.
    assert_eq!(engine.enable_scrolling(list, true, true).unwrap(), wrapper);
}

#[test]
fn test_scroll_range_equals_overflow() {
    let (engine, list, _) = scrolling_list();
    let node = engine.box_node(list).unwrap();
    let viewport = node.content_viewport().unwrap();

    assert_eq!(node.overflow().y_px, 50.0);
    assert_eq!(viewport.max_scroll_y(), 50.0);
    assert_eq!(viewport.max_scroll_x(), 0.0);
    assert_eq!(viewport.vertical_scrollbar().map(|b| b.visible), Some(true));
    assert_eq!(viewport.horizontal_scrollbar().map(|b| b.visible), Some(false));

    let wrapper = engine.rect(viewport.node()).unwrap();
    assert_eq!((wrapper.x, wrapper.y, wrapper.width, wrapper.height), (0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_wheel_steps_shift_children_and_clamp() {
    let (mut engine, list, rows) = scrolling_list();

    assert!(engine.scroll(list, ScrollDirection::Down).unwrap());
    assert_eq!(engine.box_node(list).unwrap().scroll_offset(), (0.0, 20.0));
    assert_eq!(engine.rect(rows[0]).unwrap().y, -20.0);
    assert_eq!(engine.rect(rows[1]).unwrap().y, 30.0);

    assert!(engine.scroll(list, ScrollDirection::Down).unwrap());
    assert!(engine.scroll(list, ScrollDirection::Down).unwrap());
    assert_eq!(engine.box_node(list).unwrap().scroll_offset(), (0.0, 50.0));
    assert!(!engine.scroll(list, ScrollDirection::Down).unwrap());
    assert!(!engine.scroll(list, ScrollDirection::Right).unwrap());

    // Overflow is measured without the scroll offset.
    assert_eq!(engine.box_node(list).unwrap().overflow().y_px, 50.0);
}

#[test]
fn test_set_scroll_is_clamped() {
    let (mut engine, list, rows) = scrolling_list();
    engine.set_scroll(list, -10.0, 1000.0).unwrap();
    assert_eq!(engine.box_node(list).unwrap().scroll_offset(), (0.0, 50.0));
    assert_eq!(engine.rect(rows[2]).unwrap().y, 50.0);
}

#[test]
fn test_losing_overflow_resets_the_offset() {
    let (mut engine, list, rows) = scrolling_list();
    engine.set_scroll(list, 0.0, 40.0).unwrap();
    assert_eq!(engine.rect(rows[0]).unwrap().y, -40.0);

    engine.detach(rows[2]).unwrap();
    engine.resolve(list).unwrap();

    let node = engine.box_node(list).unwrap();
    assert!(!node.is_overflowed_y());
    assert_eq!(node.scroll_offset(), (0.0, 0.0));
    assert_eq!(engine.rect(rows[0]).unwrap().y, 0.0);
    assert_eq!(engine.rect(rows[1]).unwrap().y, 50.0);
    let viewport = node.content_viewport().unwrap();
    assert_eq!(viewport.vertical_scrollbar().map(|b| b.visible), Some(false));
}

#[test]
fn test_hidden_overflow_clips_without_scrolling() {
    let (mut engine, list, rows) = scrolling_list();
    engine.set_scroll(list, 0.0, 30.0).unwrap();
    engine
        .edit(list, |b| b.set_overflow_behavior(OverflowBehavior::Hidden))
        .unwrap();
    engine.resolve(list).unwrap();

    let node = engine.box_node(list).unwrap();
    assert!(node.is_overflowed_y());
    assert_eq!(node.content_viewport().unwrap().max_scroll_y(), 0.0);
    assert_eq!(node.scroll_offset(), (0.0, 0.0));
    assert_eq!(engine.rect(rows[0]).unwrap().y, 0.0);
}

#[test]
fn test_relative_step_sizes() {
    let (mut engine, list, _) = scrolling_list();
    engine
        .edit(list, |b| {
            if let Some(viewport) = b.content_viewport_mut() {
                viewport.set_step_y(LengthPair::percent(0.3));
            }
        })
        .unwrap();
    assert!(engine.scroll(list, ScrollDirection::Down).unwrap());
    assert_eq!(engine.box_node(list).unwrap().scroll_offset(), (0.0, 30.0));
    assert!(engine.scroll(list, ScrollDirection::Up).unwrap());
    assert_eq!(engine.box_node(list).unwrap().scroll_offset(), (0.0, 0.0));
}

#[test]
fn test_boxes_without_viewport_do_not_scroll() {
    let mut engine = LayoutEngine::new(EngineConfig::default());
    let plain = engine.add_box(NodeId::ROOT, "plain").unwrap();
    assert!(!engine.scroll(plain, ScrollDirection::Down).unwrap());
    engine.set_scroll(plain, 5.0, 5.0).unwrap();
    assert_eq!(engine.box_node(plain).unwrap().scroll_offset(), (0.0, 0.0));
}
