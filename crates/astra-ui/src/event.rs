use astra_engine::coords::Vec2;
use astra_engine::input::Key;

pub use astra_engine::input::Modifiers;

/// Input events routed through the widget tree.
///
/// Pointer gestures are recognized by [`UiScene`](crate::scene::UiScene);
/// widgets only see the recognized steps.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Pointer position this frame (fired every frame).
    Hover { pos: Vec2 },
    /// Primary button went down at `pos`.
    Press { pos: Vec2 },
    /// The held pointer moved past the drag slop. `start` is the press position.
    DragStart { pos: Vec2, start: Vec2 },
    /// Pointer moved while a drag is active.
    Drag { pos: Vec2, start: Vec2 },
    /// Primary button released after a drag.
    ///
    /// Fires even when `pos` is outside the widget; use `rect.contains(start)`
    /// to check ownership of the drag.
    DragEnd { pos: Vec2, start: Vec2 },
    /// An active drag was interrupted (pointer left the window, focus loss,
    /// or Escape). Nothing should be committed.
    DragCancel { start: Vec2 },
    /// Named key pressed and not consumed by focus traversal.
    KeyPress { key: Key, modifiers: Modifiers },
}

/// Result returned by [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled: stop routing to siblings / parents.
    Consumed,
    /// Event was not handled: keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
