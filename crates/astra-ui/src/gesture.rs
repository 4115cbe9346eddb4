//! Pointer gesture recognition.
//!
//! Turns the raw per-frame button/position snapshot into tap and drag steps:
//! a press emits [`UiEvent::Press`] immediately, moving the held pointer more
//! than [`DRAG_THRESHOLD`] starts a drag, and releasing ends it. Losing the
//! pointer, losing window focus, or pressing Escape cancels an active drag.

use astra_engine::coords::Vec2;
use astra_engine::input::Key;

use crate::event::UiEvent;
use crate::scene::UiInput;

/// Distance in logical pixels the held pointer must travel before a press
/// becomes a drag.
pub const DRAG_THRESHOLD: f32 = 8.0;

#[derive(Debug, Copy, Clone)]
struct ActivePress {
    start: Vec2,
    last: Vec2,
    dragging: bool,
}

#[derive(Debug, Default)]
pub struct GestureTracker {
    active: Option<ActivePress>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while a recognized drag is in progress.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some_and(|p| p.dragging)
    }

    /// Feed one frame of input; returns the gesture events it produced, in order.
    pub fn update(&mut self, input: &UiInput) -> Vec<UiEvent> {
        let mut out = Vec::new();

        let interrupted = input.pointer_left
            || input.focus_lost
            || input.keys_pressed.contains(&Key::Escape);
        if interrupted {
            if let Some(p) = self.active.take() {
                if p.dragging {
                    out.push(UiEvent::DragCancel { start: p.start });
                }
            }
            return out;
        }

        if input.mouse_pressed {
            if let Some(pos) = input.mouse_pos {
                self.active = Some(ActivePress { start: pos, last: pos, dragging: false });
                out.push(UiEvent::Press { pos });
            }
        }

        if let (Some(p), Some(pos)) = (self.active.as_mut(), input.mouse_pos) {
            if input.mouse_down || input.mouse_released {
                if !p.dragging && pos.distance(p.start) > DRAG_THRESHOLD {
                    p.dragging = true;
                    out.push(UiEvent::DragStart { pos, start: p.start });
                    out.push(UiEvent::Drag { pos, start: p.start });
                } else if p.dragging && pos != p.last {
                    out.push(UiEvent::Drag { pos, start: p.start });
                }
                p.last = pos;
            }
        }

        if input.mouse_released {
            if let Some(p) = self.active.take() {
                if p.dragging {
                    out.push(UiEvent::DragEnd { pos: p.last, start: p.start });
                }
            }
        }

        out
    }
}
