#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sizer_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, PointerButton, PointerEvent, PointerEventKind,
};
use sizer_core::geometry::{Orientation, Point, Rect};
use sizer_layout::{DragDirection, ElementTree};
use sizer_widgets::{
    AccessibilityAction, CancelPolicy, CaptureCommand, SizerConfig, SizerController,
};

#[derive(Debug, Arbitrary)]
struct Input {
    minimum: u16,
    span: Option<u16>,
    step: u8,
    vertical: Option<bool>,
    inverted: bool,
    restore_on_cancel: bool,
    managed_after: Option<u8>,
    ops: Vec<Op>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Pointer { kind: u8, pointer_id: u8, button: u8, x: i16, y: i16 },
    Key { code: u8, release: bool },
    Focus(bool),
    CaptureAcquired(u8),
    SetValue(f32),
    Step(bool),
    Detach,
    Attach,
}

fn button(raw: u8) -> PointerButton {
    match raw % 3 {
        0 => PointerButton::Primary,
        1 => PointerButton::Secondary,
        _ => PointerButton::Middle,
    }
}

fn key_code(raw: u8) -> KeyCode {
    match raw % 6 {
        0 => KeyCode::Left,
        1 => KeyCode::Right,
        2 => KeyCode::Up,
        3 => KeyCode::Down,
        4 => KeyCode::Escape,
        _ => KeyCode::Tab,
    }
}

fn pointer_kind(raw: u8, button: PointerButton) -> PointerEventKind {
    match raw % 7 {
        0 => PointerEventKind::Down(button),
        1 | 2 => PointerEventKind::Move,
        3 => PointerEventKind::Up(button),
        4 => PointerEventKind::Cancel,
        5 => PointerEventKind::Leave,
        _ => PointerEventKind::CaptureLost,
    }
}

fuzz_target!(|input: Input| {
    let minimum = f64::from(input.minimum);
    let maximum = input
        .span
        .map_or(f64::INFINITY, |span| minimum + f64::from(span));
    let mut config = SizerConfig::new()
        .with_bounds(minimum, maximum)
        .with_keyboard_step(f64::from(input.step.max(1)))
        .with_drag_direction(if input.inverted {
            DragDirection::Inverted
        } else {
            DragDirection::Standard
        })
        .with_cancel_policy(if input.restore_on_cancel {
            CancelPolicy::RestoreStartSize
        } else {
            CancelPolicy::KeepLastSize
        });
    if let Some(vertical) = input.vertical {
        config = config.with_orientation(if vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        });
    }
    let Ok(mut controller) = SizerController::new(config) else {
        return;
    };
    let constraint = controller.constraint();

    let mut tree = ElementTree::new();
    let panel = tree.insert_root(Rect::from_size(200.0, 200.0));
    let Ok(handle) = tree.insert_child(panel, Rect::new(196.0, 0.0, 4.0, 200.0)) else {
        return;
    };
    controller.attach(&tree, handle);

    let mut held: Option<u32> = None;
    for (index, op) in input.ops.into_iter().take(256).enumerate() {
        if input.managed_after.is_some_and(|after| usize::from(after) == index) {
            let _ = tree.set_managed(panel, Orientation::Horizontal, true);
            let _ = tree.set_managed(panel, Orientation::Vertical, true);
        }
        let dispatch = match op {
            Op::Pointer {
                kind,
                pointer_id,
                button: raw_button,
                x,
                y,
            } => {
                let event = PointerEvent::new(
                    pointer_kind(kind, button(raw_button)),
                    u32::from(pointer_id),
                    Point::new(f64::from(x), f64::from(y)),
                );
                let lost = matches!(event.kind, PointerEventKind::CaptureLost);
                let dispatch = controller.handle_event(&mut tree, &Event::Pointer(event));
                if lost && !controller.state().is_dragging() {
                    held = None;
                }
                dispatch
            }
            Op::Key { code, release } => {
                let kind = if release {
                    KeyEventKind::Release
                } else {
                    KeyEventKind::Press
                };
                let key = KeyEvent::new(key_code(code)).with_kind(kind);
                controller.handle_event(&mut tree, &Event::Key(key))
            }
            Op::Focus(focused) => controller.set_focused(focused),
            Op::CaptureAcquired(pointer_id) => controller.capture_acquired(u32::from(pointer_id)),
            Op::SetValue(value) => controller.set_value(&mut tree, f64::from(value)),
            Op::Step(grow) => controller.perform_accessibility_action(
                &mut tree,
                if grow {
                    AccessibilityAction::Increment
                } else {
                    AccessibilityAction::Decrement
                },
            ),
            Op::Detach => controller.detach(),
            Op::Attach => controller.attach(&tree, handle),
        };

        match dispatch.capture_command {
            Some(CaptureCommand::Acquire { pointer_id }) => {
                assert_eq!(held, None, "acquire while holding capture");
                held = Some(pointer_id);
            }
            Some(CaptureCommand::Release { pointer_id }) => {
                assert_eq!(held, Some(pointer_id), "release of a pointer not held");
                held = None;
            }
            None => {}
        }
        assert_eq!(held.is_some(), controller.state().is_dragging());

        if let Some(change) = dispatch.change {
            assert!(change.new_size.is_finite());
            assert!(
                constraint.contains(change.new_size) || change.new_size == 200.0,
                "size {} escaped constraint",
                change.new_size
            );
            assert_eq!(controller.accessibility().current, Some(change.new_size));
        }
        if dispatch.error.is_some() {
            assert!(!controller.state().is_dragging(), "error left a drag open");
        }
    }
});
