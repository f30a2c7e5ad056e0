//! Property-based invariant tests for the interaction controller.
//!
//! 1. Every committed size lies inside the configured constraint
//! 2. The accessibility value always equals the most recent change
//! 3. Capture is held exactly while dragging (acquire/release balance)
//! 4. Each change's previous size is the target's size before it
//! 5. Orthogonal arrow keys never change the target

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use sizer_core::event::{KeyCode, KeyEvent, PointerButton};
use sizer_core::geometry::{Orientation, Point, Rect};
use sizer_layout::{ElementId, ElementTree};
use sizer_widgets::{
    AccessibilityAction, CancelPolicy, CaptureCommand, SizeChangeEvent, SizerConfig,
    SizerController,
};

#[derive(Debug, Clone)]
enum Op {
    Down { pointer: u32, x: i16 },
    Move { pointer: u32, x: i16, y: i16 },
    Up { pointer: u32 },
    Cancel,
    Leave { pointer: u32 },
    CaptureAcquired { pointer: u32 },
    CaptureLost { pointer: u32 },
    Key(KeyCode),
    Focus(bool),
    SetValue(i16),
    Increment,
    Decrement,
    ExternalResize(u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let pointer = 1u32..3;
    prop_oneof![
        (pointer.clone(), any::<i16>()).prop_map(|(pointer, x)| Op::Down { pointer, x }),
        (pointer.clone(), any::<i16>(), any::<i16>())
            .prop_map(|(pointer, x, y)| Op::Move { pointer, x, y }),
        pointer.clone().prop_map(|pointer| Op::Up { pointer }),
        Just(Op::Cancel),
        pointer.clone().prop_map(|pointer| Op::Leave { pointer }),
        pointer.clone().prop_map(|pointer| Op::CaptureAcquired { pointer }),
        pointer.prop_map(|pointer| Op::CaptureLost { pointer }),
        prop_oneof![
            Just(KeyCode::Left),
            Just(KeyCode::Right),
            Just(KeyCode::Up),
            Just(KeyCode::Down),
            Just(KeyCode::Escape),
        ]
        .prop_map(Op::Key),
        any::<bool>().prop_map(Op::Focus),
        any::<i16>().prop_map(Op::SetValue),
        Just(Op::Increment),
        Just(Op::Decrement),
        (0u16..1_000).prop_map(Op::ExternalResize),
    ]
}

fn config_strategy() -> impl Strategy<Value = SizerConfig<ElementId>> {
    (
        0.0f64..200.0,
        prop_oneof![Just(f64::INFINITY), 200.0f64..1_000.0],
        1u8..32,
        any::<bool>(),
    )
        .prop_map(|(min, max, step, restore)| {
            SizerConfig::new()
                .with_orientation(Orientation::Horizontal)
                .with_bounds(min, max)
                .with_keyboard_step(f64::from(step))
                .with_cancel_policy(if restore {
                    CancelPolicy::RestoreStartSize
                } else {
                    CancelPolicy::KeepLastSize
                })
        })
}

proptest! {
    #[test]
    fn controller_invariants_hold(
        config in config_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..64),
    ) {
        let mut controller = SizerController::new(config).expect("valid config");
        let constraint = controller.constraint();
        let start_width = constraint.clamp(150.0);
        let mut tree = ElementTree::new();
        let panel = tree.insert_root(Rect::from_size(start_width, 300.0));
        let handle = tree
            .insert_child(panel, Rect::new(start_width - 4.0, 0.0, 4.0, 300.0))
            .expect("panel exists");
        controller.attach(&tree, handle);

        let events: Rc<RefCell<Vec<SizeChangeEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        controller.subscribe(move |event| sink.borrow_mut().push(*event));

        let mut held: Option<u32> = None;
        for op in ops {
            let before = tree.rendered_bounds(panel).expect("panel").width;
            let seen = events.borrow().len();
            let dispatch = match op {
                Op::Down { pointer, x } => controller.pointer_down(
                    &mut tree,
                    pointer,
                    PointerButton::Primary,
                    Point::new(f64::from(x), 0.0),
                ),
                Op::Move { pointer, x, y } => controller.pointer_move(
                    &mut tree,
                    pointer,
                    Point::new(f64::from(x), f64::from(y)),
                ),
                Op::Up { pointer } => controller.pointer_up(pointer, PointerButton::Primary),
                Op::Cancel => controller.pointer_cancel(&mut tree, None),
                Op::Leave { pointer } => controller.pointer_leave(&mut tree, pointer),
                Op::CaptureAcquired { pointer } => controller.capture_acquired(pointer),
                Op::CaptureLost { pointer } => {
                    let dispatch = controller.lost_pointer_capture(&mut tree, pointer);
                    if !controller.state().is_dragging() {
                        held = None;
                    }
                    dispatch
                }
                Op::Key(code) => {
                    let dispatch = controller.key_down(&mut tree, KeyEvent::new(code));
                    if matches!(code, KeyCode::Up | KeyCode::Down) {
                        prop_assert_eq!(dispatch.change, None);
                    }
                    dispatch
                }
                Op::Focus(focused) => controller.set_focused(focused),
                Op::SetValue(value) => controller.set_value(&mut tree, f64::from(value)),
                Op::Increment => controller
                    .perform_accessibility_action(&mut tree, AccessibilityAction::Increment),
                Op::Decrement => controller
                    .perform_accessibility_action(&mut tree, AccessibilityAction::Decrement),
                Op::ExternalResize(width) => {
                    let width = constraint.clamp(f64::from(width));
                    tree.set_rendered_bounds(panel, Rect::from_size(width, 300.0))
                        .expect("panel exists");
                    tree.reset_to_auto(panel, Orientation::Horizontal)
                        .expect("panel exists");
                    controller.refresh_accessibility(&tree);
                    continue;
                }
            };

            match dispatch.capture_command {
                Some(CaptureCommand::Acquire { pointer_id }) => {
                    prop_assert_eq!(held, None);
                    held = Some(pointer_id);
                }
                Some(CaptureCommand::Release { pointer_id }) => {
                    prop_assert_eq!(held, Some(pointer_id));
                    held = None;
                }
                None => {}
            }
            prop_assert_eq!(held.is_some(), controller.state().is_dragging());

            let log = events.borrow();
            if let Some(change) = dispatch.change {
                prop_assert_eq!(log.len(), seen + 1);
                prop_assert_eq!(log.last(), Some(&change));
                prop_assert_eq!(change.previous_size, before);
                prop_assert!(constraint.contains(change.new_size));
                prop_assert_eq!(tree.rendered_bounds(panel).expect("panel").width, change.new_size);
                prop_assert_eq!(controller.accessibility().current, Some(change.new_size));
            } else {
                prop_assert_eq!(log.len(), seen);
            }
        }
    }
}
