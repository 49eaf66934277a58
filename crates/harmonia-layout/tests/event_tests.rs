//! Integration tests for change notification and relayout requests.

use std::cell::RefCell;
use std::rc::Rc;

use harmonia_dom::NodeId;
use harmonia_layout::{
    ColorValue, EngineConfig, LayoutChangeEvent, LayoutChangeReason, LayoutEngine, LayoutError,
    LengthPair, ParseError, Reaction,
};

/// Helper: an engine that only reports setter changes.
fn quiet_engine() -> LayoutEngine {
    LayoutEngine::new(EngineConfig {
        relayout_on_change: false,
        ..EngineConfig::default()
    })
}

/// Helper: subscribe an observer that records every event.
fn record(engine: &mut LayoutEngine) -> Rc<RefCell<Vec<LayoutChangeEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let _ = engine.subscribe(move |event: &LayoutChangeEvent| {
        sink.borrow_mut().push(*event);
        Reaction::Ignore
    });
    log
}

fn reasons(log: &Rc<RefCell<Vec<LayoutChangeEvent>>>) -> Vec<LayoutChangeReason> {
    log.borrow().iter().map(|e| e.reason).collect()
}

#[test]
fn test_each_setter_notifies_with_its_reason() {
    let mut engine = quiet_engine();
    let node = engine.add_box(NodeId::ROOT, "node").unwrap();
    let log = record(&mut engine);

    engine.try_edit(node, |b| b.set_width_str("10px")).unwrap();
    engine.try_edit(node, |b| b.set_pos_y_str("1px")).unwrap();
    engine.edit(node, |b| b.set_margin_left(LengthPair::px(2.0), true)).unwrap();

    assert_eq!(
        reasons(&log),
        vec![
            LayoutChangeReason::Width,
            LayoutChangeReason::Position,
            LayoutChangeReason::Margin
        ]
    );
    assert!(log.borrow().iter().all(|e| e.node == node));
}

#[test]
fn test_rewriting_the_same_value_is_silent() {
    let mut engine = quiet_engine();
    let node = engine.add_box(NodeId::ROOT, "node").unwrap();
    engine.try_edit(node, |b| b.set_width_str("50%")).unwrap();
    engine.try_edit(node, |b| b.set_margin_str("1px 2px")).unwrap();
    let log = record(&mut engine);

    engine.try_edit(node, |b| b.set_width_str("50.0%")).unwrap();
    engine.try_edit(node, |b| b.set_margin_str("1px 2px 1px")).unwrap();
    assert!(log.borrow().is_empty());

    engine.try_edit(node, |b| b.set_width_str("51%")).unwrap();
    assert_eq!(reasons(&log), vec![LayoutChangeReason::Width]);
}

#[test]
fn test_suppressed_setters_stay_silent() {
    let mut engine = quiet_engine();
    let node = engine.add_box(NodeId::ROOT, "node").unwrap();
    let log = record(&mut engine);

    engine
        .edit(node, |b| {
            b.set_height(LengthPair::px(5.0), false);
            b.set_padding_all(LengthPair::px(5.0), false);
        })
        .unwrap();
    assert!(log.borrow().is_empty());
    assert_eq!(engine.box_node(node).unwrap().height(), LengthPair::px(5.0));
}

#[test]
fn test_shorthand_notifies_once() {
    let mut engine = quiet_engine();
    let node = engine.add_box(NodeId::ROOT, "node").unwrap();
    let log = record(&mut engine);

    engine.try_edit(node, |b| b.set_padding_str("1px 2px 3px")).unwrap();
    assert_eq!(reasons(&log), vec![LayoutChangeReason::Padding]);

    let padding = *engine.box_node(node).unwrap().padding();
    assert_eq!(padding.up, LengthPair::px(1.0));
    assert_eq!(padding.left, LengthPair::px(2.0));
    assert_eq!(padding.right, LengthPair::px(2.0));
    assert_eq!(padding.down, LengthPair::px(3.0));
    assert_eq!(engine.box_node(node).unwrap().padding_string(), "1px 2px 3px");
}

#[test]
fn test_rejected_values_change_nothing() {
    let mut engine = quiet_engine();
    let node = engine.add_box(NodeId::ROOT, "node").unwrap();
    engine.try_edit(node, |b| b.set_margin_str("4px")).unwrap();
    let log = record(&mut engine);

    assert_eq!(
        engine.try_edit(node, |b| b.set_margin_str("1px 2px 3px 4px 5px")),
        Err(LayoutError::Parse(ParseError::ShorthandArity(5)))
    );
    assert!(matches!(
        engine.try_edit(node, |b| b.set_margin_str("10px abc")),
        Err(LayoutError::Parse(ParseError::InvalidNumber(_)))
    ));
    assert!(engine.try_edit(node, |b| b.set_width_str("")).is_err());

    assert!(log.borrow().is_empty());
    let box_node = engine.box_node(node).unwrap();
    assert_eq!(box_node.margin_string(), "4px");
    assert!(box_node.width().is_unset());
}

#[test]
fn test_resolved_geometry_changes_are_reported() {
    let mut engine = LayoutEngine::new(EngineConfig::default());
    let node = engine.add_box(NodeId::ROOT, "node").unwrap();
    let log = record(&mut engine);

    engine.try_edit(node, |b| b.set_width_str("100px")).unwrap();
    // One from the setter, one from the pass that resized the host node.
    assert_eq!(
        reasons(&log),
        vec![LayoutChangeReason::Width, LayoutChangeReason::Width]
    );

    log.borrow_mut().clear();
    engine.resolve_all().unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_relayout_requests_are_drained() {
    let mut engine = LayoutEngine::new(EngineConfig::default());
    let node = engine.add_box(NodeId::ROOT, "node").unwrap();
    let _ = engine.subscribe(|_: &LayoutChangeEvent| Reaction::Relayout);

    let before = engine.pass_count();
    engine.try_edit(node, |b| b.set_height_str("10px")).unwrap();
    // The setter's pass, then one requested pass that changes nothing.
    assert_eq!(engine.pass_count(), before + 2);
    assert_eq!(engine.box_node(node).unwrap().height_px(), 10.0);
}

#[test]
fn test_relayout_requests_are_bounded() {
    let mut engine = LayoutEngine::new(EngineConfig {
        max_relayout_passes: 0,
        ..EngineConfig::default()
    });
    let node = engine.add_box(NodeId::ROOT, "node").unwrap();
    let _ = engine.subscribe(|_: &LayoutChangeEvent| Reaction::Relayout);

    assert_eq!(
        engine.try_edit(node, |b| b.set_width_str("1px")),
        Err(LayoutError::RelayoutLimit(0))
    );
    // The value itself was accepted.
    assert_eq!(engine.box_node(node).unwrap().width_px(), 1.0);
}

#[test]
fn test_unsubscribed_observers_stop_receiving() {
    let mut engine = quiet_engine();
    let node = engine.add_box(NodeId::ROOT, "node").unwrap();
    let count = Rc::new(RefCell::new(0_u32));
    let sink = Rc::clone(&count);
    let id = engine.subscribe(move |_: &LayoutChangeEvent| {
        *sink.borrow_mut() += 1;
        Reaction::Ignore
    });

    engine.try_edit(node, |b| b.set_width_str("1px")).unwrap();
    assert!(engine.unsubscribe(id));
    assert!(!engine.unsubscribe(id));
    engine.try_edit(node, |b| b.set_width_str("2px")).unwrap();

    assert_eq!(*count.borrow(), 1);
    assert_eq!(engine.events_emitted(), 2);
}

#[test]
fn test_redraw_requests() {
    let mut engine = quiet_engine();
    let node = engine.add_box(NodeId::ROOT, "node").unwrap();
    let log = record(&mut engine);

    engine
        .edit(node, |b| b.set_background_color(ColorValue::WHITE))
        .unwrap();
    assert!(log.borrow().is_empty());
    assert_eq!(engine.take_redraw_requests(), vec![node]);

    engine.try_edit(node, |b| b.set_padding_str("2px")).unwrap();
    assert_eq!(engine.take_redraw_requests(), vec![node]);
    assert!(engine.take_redraw_requests().is_empty());

    engine.edit(node, |b| b.set_width(LengthPair::px(3.0), true)).unwrap();
    assert!(engine.take_redraw_requests().is_empty());
}
