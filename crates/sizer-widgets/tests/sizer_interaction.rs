//! End-to-end interaction scenarios against the reference element tree.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use sizer_core::event::{KeyCode, KeyEvent, KeyEventKind, PointerButton};
use sizer_core::geometry::{Orientation, Point, Rect};
use sizer_layout::{DragDirection, ElementId, ElementTree, SizeMode};
use sizer_widgets::{
    AccessibilityAction, CancelPolicy, CaptureCommand, ChangeSource, DispatchOutcome,
    IgnoredReason, SizeChangeEvent, SizerConfig, SizerController, SizerError,
};

struct Fixture {
    tree: ElementTree,
    panel: ElementId,
    handle: ElementId,
    controller: SizerController<ElementId>,
    events: Rc<RefCell<Vec<SizeChangeEvent>>>,
}

impl Fixture {
    /// A 100x300 panel with a 4px vertical handle on its right edge.
    fn new(config: SizerConfig<ElementId>) -> Self {
        let mut tree = ElementTree::new();
        let panel = tree.insert_root(Rect::from_size(100.0, 300.0));
        let handle = tree
            .insert_child(panel, Rect::new(96.0, 0.0, 4.0, 300.0))
            .expect("panel exists");
        let mut controller = SizerController::new(config).expect("valid config");
        controller.attach(&tree, handle);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        controller.subscribe(move |event| sink.borrow_mut().push(*event));
        Self {
            tree,
            panel,
            handle,
            controller,
            events,
        }
    }

    fn width(&self) -> f64 {
        self.tree.rendered_bounds(self.panel).expect("panel").width
    }

    fn events(&self) -> Vec<SizeChangeEvent> {
        self.events.borrow().clone()
    }

    fn down(&mut self, x: f64) -> sizer_widgets::SizerDispatch {
        self.controller
            .pointer_down(&mut self.tree, 1, PointerButton::Primary, Point::new(x, 50.0))
    }

    fn drag_to(&mut self, x: f64) -> sizer_widgets::SizerDispatch {
        self.controller
            .pointer_move(&mut self.tree, 1, Point::new(x, 50.0))
    }

    fn key(&mut self, code: KeyCode) -> sizer_widgets::SizerDispatch {
        self.controller
            .key_down(&mut self.tree, KeyEvent::new(code))
    }
}

fn pointer_change(previous: f64, new: f64) -> SizeChangeEvent {
    SizeChangeEvent {
        previous_size: previous,
        new_size: new,
        orientation: Orientation::Horizontal,
        source: ChangeSource::Pointer,
    }
}

#[test]
fn drag_by_fifty_emits_one_pointer_change() {
    let mut fx = Fixture::new(SizerConfig::new().with_bounds(0.0, 200.0));
    fx.down(98.0);
    let dispatch = fx.drag_to(148.0);
    assert_eq!(dispatch.outcome, DispatchOutcome::Applied);
    fx.controller.pointer_up(1, PointerButton::Primary);

    assert_eq!(fx.events(), vec![pointer_change(100.0, 150.0)]);
    assert_eq!(fx.width(), 150.0);
    assert_eq!(
        fx.tree.size_mode(fx.panel, Orientation::Horizontal),
        Some(SizeMode::Explicit(150.0))
    );
}

#[test]
fn drag_is_clamped_to_maximum() {
    let mut fx = Fixture::new(SizerConfig::new().with_bounds(0.0, 120.0));
    fx.down(98.0);
    fx.drag_to(148.0);
    assert_eq!(fx.events(), vec![pointer_change(100.0, 120.0)]);
    assert_eq!(fx.width(), 120.0);
}

#[test]
fn moves_are_measured_from_gesture_origin() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.down(98.0);
    fx.drag_to(108.0);
    fx.drag_to(128.0);
    fx.drag_to(98.0);
    assert_eq!(
        fx.events(),
        vec![
            pointer_change(100.0, 110.0),
            pointer_change(110.0, 130.0),
            pointer_change(130.0, 100.0),
        ]
    );
}

#[test]
fn moves_that_do_not_change_the_size_emit_nothing() {
    let mut fx = Fixture::new(SizerConfig::new().with_bounds(0.0, 120.0));
    fx.down(98.0);
    fx.drag_to(148.0);
    let pinned = fx.drag_to(178.0);
    assert_eq!(pinned.outcome, DispatchOutcome::Unchanged);
    let orthogonal = fx
        .controller
        .pointer_move(&mut fx.tree, 1, Point::new(148.0, 250.0));
    assert_eq!(orthogonal.outcome, DispatchOutcome::Unchanged);
    assert_eq!(fx.events().len(), 1);
}

#[test]
fn release_adds_no_change() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.down(98.0);
    fx.drag_to(118.0);
    let up = fx.controller.pointer_up(1, PointerButton::Primary);
    assert_eq!(up.change, None);
    assert_eq!(up.capture_command, Some(CaptureCommand::Release { pointer_id: 1 }));
    assert_eq!(fx.events().len(), 1);
    assert!(!fx.controller.state().is_dragging());
}

#[test]
fn cancel_keeps_last_size() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.down(98.0);
    fx.drag_to(138.0);
    let cancel = fx.controller.pointer_cancel(&mut fx.tree, Some(1));
    assert_eq!(cancel.outcome, DispatchOutcome::Transitioned);
    assert_eq!(cancel.capture_command, Some(CaptureCommand::Release { pointer_id: 1 }));
    assert_eq!(fx.width(), 140.0);
    assert_eq!(fx.events(), vec![pointer_change(100.0, 140.0)]);
}

#[test]
fn restore_policy_rolls_back_on_cancel() {
    let mut fx =
        Fixture::new(SizerConfig::new().with_cancel_policy(CancelPolicy::RestoreStartSize));
    fx.down(98.0);
    fx.drag_to(138.0);
    let cancel = fx.controller.pointer_cancel(&mut fx.tree, None);
    assert_eq!(cancel.outcome, DispatchOutcome::Applied);
    assert_eq!(fx.width(), 100.0);
    assert_eq!(
        fx.events(),
        vec![pointer_change(100.0, 140.0), pointer_change(140.0, 100.0)]
    );
    assert_eq!(fx.controller.accessibility().current, Some(100.0));
}

#[test]
fn two_grow_keys_step_by_eight() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.controller.set_focused(true);
    fx.key(KeyCode::Right);
    fx.key(KeyCode::Right);
    let sizes: Vec<(f64, ChangeSource)> = fx
        .events()
        .iter()
        .map(|event| (event.new_size, event.source))
        .collect();
    assert_eq!(
        sizes,
        vec![(108.0, ChangeSource::Keyboard), (116.0, ChangeSource::Keyboard)]
    );
}

#[test]
fn orthogonal_arrow_is_not_consumed() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.controller.set_focused(true);
    for code in [KeyCode::Up, KeyCode::Down] {
        let dispatch = fx.key(code);
        assert!(!dispatch.consumed);
        assert_eq!(dispatch.ignored_reason(), Some(IgnoredReason::KeyNotHandled));
    }
    assert!(fx.events().is_empty());
}

#[test]
fn key_release_and_repeat() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.controller.set_focused(true);
    let release = fx.controller.key_down(
        &mut fx.tree,
        KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Release),
    );
    assert_eq!(release.ignored_reason(), Some(IgnoredReason::KeyRelease));
    let repeat = fx.controller.key_down(
        &mut fx.tree,
        KeyEvent::new(KeyCode::Left).with_kind(KeyEventKind::Repeat),
    );
    assert_eq!(repeat.change.map(|c| c.new_size), Some(92.0));
}

#[test]
fn keyboard_at_bound_is_consumed_without_change() {
    let mut fx = Fixture::new(SizerConfig::new().with_bounds(0.0, 100.0));
    fx.controller.set_focused(true);
    let dispatch = fx.key(KeyCode::Right);
    assert!(dispatch.consumed);
    assert_eq!(dispatch.outcome, DispatchOutcome::Unchanged);
    assert!(fx.events().is_empty());
}

#[test]
fn inverted_direction_grows_when_moving_back() {
    let mut fx = Fixture::new(SizerConfig::new().with_drag_direction(DragDirection::Inverted));
    fx.down(98.0);
    fx.drag_to(78.0);
    assert_eq!(fx.width(), 120.0);
    fx.controller.pointer_up(1, PointerButton::Primary);
    fx.controller.set_focused(true);
    fx.key(KeyCode::Left);
    assert_eq!(fx.width(), 128.0);
}

#[test]
fn missing_target_never_starts_a_gesture() {
    let mut tree = ElementTree::new();
    let lonely = tree.insert_root(Rect::from_size(4.0, 300.0));
    let mut controller =
        SizerController::<ElementId>::new(SizerConfig::new()).expect("valid config");
    controller.attach(&tree, lonely);
    let fired = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&fired);
    controller.subscribe(move |_| *counter.borrow_mut() += 1);

    let down = controller.pointer_down(&mut tree, 1, PointerButton::Primary, Point::default());
    assert_eq!(down.outcome, DispatchOutcome::Failed);
    assert!(matches!(down.error, Some(SizerError::NoTarget(_))));
    assert_eq!(down.capture_command, None);
    assert!(!controller.state().is_dragging());

    let moved = controller.pointer_move(&mut tree, 1, Point::new(60.0, 0.0));
    assert_eq!(moved.ignored_reason(), Some(IgnoredReason::NoActivePointer));

    controller.set_focused(true);
    let key = controller.key_down(&mut tree, KeyEvent::new(KeyCode::Right));
    assert!(!key.consumed);
    assert!(matches!(key.error, Some(SizerError::NoTarget(_))));
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn explicit_target_is_resized_instead_of_parent() {
    let mut tree = ElementTree::new();
    let sidebar = tree.insert_root(Rect::from_size(240.0, 600.0));
    let container = tree.insert_root(Rect::from_size(800.0, 600.0));
    let handle = tree
        .insert_child(container, Rect::new(240.0, 0.0, 4.0, 600.0))
        .expect("container");
    let mut controller =
        SizerController::new(SizerConfig::new().with_target(sidebar)).expect("valid");
    controller.attach(&tree, handle);
    controller.set_focused(true);
    controller.key_down(&mut tree, KeyEvent::new(KeyCode::Right));
    assert_eq!(tree.rendered_bounds(sidebar).map(|r| r.width), Some(248.0));
    assert_eq!(tree.rendered_bounds(container).map(|r| r.width), Some(800.0));
}

#[test]
fn apply_error_cancels_drag_and_leaves_target() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.down(98.0);
    fx.drag_to(118.0);
    fx.tree
        .set_managed(fx.panel, Orientation::Horizontal, true)
        .expect("panel exists");
    let dispatch = fx.drag_to(138.0);
    assert_eq!(dispatch.outcome, DispatchOutcome::Failed);
    assert!(matches!(dispatch.error, Some(SizerError::Apply(_))));
    assert_eq!(dispatch.capture_command, Some(CaptureCommand::Release { pointer_id: 1 }));
    assert!(!fx.controller.state().is_dragging());
    assert_eq!(fx.width(), 120.0);
    assert_eq!(fx.events(), vec![pointer_change(100.0, 120.0)]);

    // Next gesture starts fresh.
    fx.tree
        .set_managed(fx.panel, Orientation::Horizontal, false)
        .expect("panel exists");
    fx.down(98.0);
    fx.drag_to(108.0);
    assert_eq!(fx.width(), 130.0);
}

#[test]
fn managed_axis_rejects_key_and_value_steps() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.controller.set_focused(true);
    fx.tree
        .set_managed(fx.panel, Orientation::Horizontal, true)
        .expect("panel exists");

    let key = fx.key(KeyCode::Right);
    let value = fx.controller.set_value(&mut fx.tree, 160.0);
    for dispatch in [key, value] {
        assert_eq!(dispatch.outcome, DispatchOutcome::Failed);
        assert!(dispatch.consumed);
        assert!(matches!(dispatch.error, Some(SizerError::Apply(_))));
        assert_eq!(dispatch.change, None);
        assert_eq!(dispatch.capture_command, None);
    }
    assert_eq!(fx.width(), 100.0);
    assert_eq!(fx.events(), Vec::new());
    assert_eq!(fx.controller.accessibility().current, Some(100.0));
    assert!(!fx.controller.state().is_dragging());
}

#[test]
fn restore_on_cancel_rejected_by_target_keeps_last_size() {
    let mut fx =
        Fixture::new(SizerConfig::new().with_cancel_policy(CancelPolicy::RestoreStartSize));
    fx.down(98.0);
    fx.drag_to(118.0);
    fx.tree
        .set_managed(fx.panel, Orientation::Horizontal, true)
        .expect("panel exists");

    let cancel = fx.controller.pointer_cancel(&mut fx.tree, Some(1));
    assert_eq!(cancel.outcome, DispatchOutcome::Failed);
    assert!(cancel.consumed);
    assert!(matches!(cancel.error, Some(SizerError::Apply(_))));
    assert_eq!(cancel.capture_command, Some(CaptureCommand::Release { pointer_id: 1 }));
    assert!(!fx.controller.state().is_dragging());
    assert_eq!(fx.width(), 120.0);
    assert_eq!(fx.events(), vec![pointer_change(100.0, 120.0)]);
    assert_eq!(fx.controller.accessibility().current, Some(120.0));
}

#[test]
fn external_resize_between_gestures_is_observed() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.tree
        .set_rendered_bounds(fx.panel, Rect::from_size(180.0, 300.0))
        .expect("panel exists");
    fx.down(98.0);
    fx.drag_to(108.0);
    assert_eq!(fx.events(), vec![pointer_change(180.0, 190.0)]);
}

#[test]
fn leave_before_capture_confirmation_cancels() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.down(98.0);
    let leave = fx.controller.pointer_leave(&mut fx.tree, 1);
    assert!(!fx.controller.state().is_dragging());
    assert_eq!(leave.capture_command, Some(CaptureCommand::Release { pointer_id: 1 }));

    fx.down(98.0);
    fx.controller.capture_acquired(1);
    let leave = fx.controller.pointer_leave(&mut fx.tree, 1);
    assert_eq!(leave.ignored_reason(), Some(IgnoredReason::LeaveWhileCaptured));
    assert!(fx.controller.state().is_dragging());
}

#[test]
fn accessibility_tracks_every_source() {
    let mut fx = Fixture::new(SizerConfig::new().with_bounds(20.0, 400.0));
    fx.controller.set_focused(true);
    fx.down(98.0);
    fx.drag_to(133.0);
    fx.controller.pointer_up(1, PointerButton::Primary);
    fx.key(KeyCode::Left);
    fx.controller
        .perform_accessibility_action(&mut fx.tree, AccessibilityAction::Increment);
    fx.controller.set_value(&mut fx.tree, 1_000.0);

    let events = fx.events();
    let sources: Vec<ChangeSource> = events.iter().map(|event| event.source).collect();
    assert_eq!(
        sources,
        vec![
            ChangeSource::Pointer,
            ChangeSource::Keyboard,
            ChangeSource::Programmatic,
            ChangeSource::Programmatic,
        ]
    );
    let last = events.last().expect("events").new_size;
    assert_eq!(last, 400.0);
    assert_eq!(fx.controller.accessibility().current, Some(last));
    assert_eq!(fx.controller.accessibility().minimum, 20.0);
    assert_eq!(fx.controller.accessibility().maximum, 400.0);
}

#[test]
fn refresh_picks_up_host_changes() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.tree
        .set_rendered_bounds(fx.panel, Rect::from_size(64.0, 300.0))
        .expect("panel exists");
    assert_eq!(fx.controller.accessibility().current, Some(100.0));
    let snapshot = fx.controller.refresh_accessibility(&fx.tree);
    assert_eq!(snapshot.current, Some(64.0));
}

#[test]
fn detached_controller_ignores_input() {
    let mut fx = Fixture::new(SizerConfig::new());
    fx.controller.detach();
    let down = fx.down(98.0);
    assert_eq!(down.ignored_reason(), Some(IgnoredReason::Detached));
    let value = fx.controller.set_value(&mut fx.tree, 50.0);
    assert_eq!(value.ignored_reason(), Some(IgnoredReason::Detached));
    fx.controller.attach(&fx.tree, fx.handle);
    assert_eq!(fx.controller.accessibility().current, Some(100.0));
}
