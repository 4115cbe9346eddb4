use std::cell::RefCell;

use astra_engine::coords::{Rect, Vec2};
use astra_engine::input::{Key, Modifiers};
use astra_engine::scene::DrawList;

use crate::constraints::{Constraints, LayoutCtx, LayoutDirection};
use crate::event::UiEvent;
use crate::focus::{FocusId, FocusManager};
use crate::gesture::GestureTracker;
use crate::painter::Painter;
use crate::widget::Element;

// ── UiInput ───────────────────────────────────────────────────────────────

/// Snapshot of input state for one UI frame.
///
/// Construct this from the engine's `InputState` / `InputFrame` each frame.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Cursor position in logical pixels, `None` when outside the window.
    pub mouse_pos: Option<Vec2>,
    /// `true` while the primary button is held down.
    pub mouse_down: bool,
    /// `true` for exactly one frame when the primary button goes down.
    pub mouse_pressed: bool,
    /// `true` for exactly one frame when the primary button is released.
    pub mouse_released: bool,
    /// Named keys pressed this frame.
    pub keys_pressed: Vec<Key>,
    pub modifiers: Modifiers,
    /// The pointer left the window this frame.
    pub pointer_left: bool,
    /// The window lost keyboard focus this frame.
    pub focus_lost: bool,
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Top-level coordinator that owns per-window UI state across frames.
///
/// Owns the `DrawList` populated by [`frame_ref`](Self::frame_ref), the focus
/// manager and the pointer gesture tracker. The GPU renderer lives in the
/// application and receives the returned `&mut DrawList`.
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = UiScene::new();
/// let mut root: Element = RatingBar::new().num_stars(5).into();
///
/// // In your on_frame callback:
/// let draw_list = ui.frame_ref(&mut root, viewport, &input);
/// mesh_renderer.render(rctx, target, draw_list);
/// ```
pub struct UiScene {
    /// Draw list populated by the most recent frame.
    pub draw_list: DrawList,
    /// Direction inherited by every widget that does not override it.
    pub direction: LayoutDirection,
    /// Physical-to-logical pixel ratio, forwarded to `LayoutCtx` and `Painter`.
    pub scale: f32,
    focus: RefCell<FocusManager>,
    gestures: GestureTracker,
    repaint: bool,
}

impl UiScene {
    pub fn new() -> Self {
        Self {
            draw_list: DrawList::new(),
            direction: LayoutDirection::Ltr,
            scale: 1.0,
            focus: RefCell::new(FocusManager::new()),
            gestures: GestureTracker::new(),
            repaint: false,
        }
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// The widget holding focus after the last frame.
    pub fn focused(&self) -> Option<FocusId> {
        self.focus.borrow().focused()
    }

    /// `true` when the last frame's events changed what the tree would paint.
    ///
    /// Events are routed after painting, so the caller should schedule one
    /// more frame when this is set.
    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.repaint
    }

    /// Measure, paint, and route this frame's input through `root`.
    ///
    /// `root` persists across frames in the caller and is updated in place via
    /// `on_event`. Events are routed after painting, so state changes show up
    /// in the next frame's draw list.
    #[must_use]
    pub fn frame_ref(
        &mut self,
        root: &mut Element,
        viewport: Vec2,
        input: &UiInput,
    ) -> &mut DrawList {
        self.draw_list.clear();
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);
        let ctx = LayoutCtx { scale: self.scale, direction: self.direction, focus: Some(&self.focus) };

        // ── measure ───────────────────────────────────────────────────────
        // The root always occupies the full viewport; this is a warm-up pass.
        let _ = root.measure(Constraints::loose(viewport), &ctx);

        // ── paint ─────────────────────────────────────────────────────────
        {
            let mut painter = Painter::new(&mut self.draw_list, self.direction)
                .with_focus(&self.focus)
                .with_pointer(input.mouse_pos, input.mouse_down);
            painter.scale = self.scale;
            root.paint(&mut painter, rect);
        }

        // ── events ────────────────────────────────────────────────────────
        let mut events = Vec::new();
        if let Some(pos) = input.mouse_pos {
            events.push(UiEvent::Hover { pos });
        }
        events.extend(self.gestures.update(input));

        let focused_before = self.focus.borrow().focused();
        for &key in &input.keys_pressed {
            match key {
                Key::Tab => self.focus.borrow_mut().advance(input.modifiers.shift),
                Key::ArrowDown => self.focus.borrow_mut().advance(false),
                Key::ArrowUp => self.focus.borrow_mut().advance(true),
                Key::Escape => self.focus.borrow_mut().clear(),
                key => events.push(UiEvent::KeyPress { key, modifiers: input.modifiers }),
            }
        }

        self.repaint = false;
        for event in &events {
            let consumed = root.on_event(event, rect, &ctx).is_consumed();
            if consumed && !matches!(event, UiEvent::Hover { .. }) {
                self.repaint = true;
            }
            if !consumed && matches!(event, UiEvent::Press { .. }) {
                // Pressing empty space drops focus.
                self.focus.borrow_mut().clear();
            }
        }

        self.focus.borrow_mut().end_frame();
        self.repaint |= self.focus.borrow().focused() != focused_before;
        &mut self.draw_list
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}
