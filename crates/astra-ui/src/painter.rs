use std::cell::RefCell;

use astra_engine::coords::{Rect, Vec2};
use astra_engine::paint::Color;
use astra_engine::scene::{Border, DrawList, ZIndex};

use crate::constraints::{LayoutCtx, LayoutDirection};
use crate::focus::{FocusId, FocusManager};

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` with a widget-level API and exposes
/// per-frame input state so widgets can express hover / pressed / focused
/// visuals directly in their paint implementations.
pub struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    focus: Option<&'a RefCell<FocusManager>>,
    z: i32,
    /// Physical-to-logical pixel ratio for this frame.
    pub scale: f32,
    /// Direction inherited by widgets that do not override it.
    pub direction: LayoutDirection,
    /// Cursor position in logical pixels, `None` when outside the window.
    pub mouse_pos: Option<Vec2>,
    /// True while the primary button is held down.
    pub mouse_pressed: bool,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, direction: LayoutDirection) -> Self {
        Self {
            draw_list,
            focus: None,
            z: 0,
            scale: 1.0,
            direction,
            mouse_pos: None,
            mouse_pressed: false,
        }
    }

    pub(crate) fn with_focus(mut self, focus: &'a RefCell<FocusManager>) -> Self {
        self.focus = Some(focus);
        self
    }

    pub(crate) fn with_pointer(mut self, pos: Option<Vec2>, pressed: bool) -> Self {
        self.mouse_pos = pos;
        self.mouse_pressed = pressed;
        self
    }

    // ── input queries ─────────────────────────────────────────────────────

    /// Returns `true` if the mouse cursor is inside `rect`.
    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.mouse_pos.is_some_and(|p| rect.contains(p))
    }

    /// Returns `true` if the primary button is held and the cursor is over `rect`.
    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && self.is_hovered(rect)
    }

    // ── focus ─────────────────────────────────────────────────────────────

    /// Enroll `id` in focus traversal for this frame.
    pub fn register_focusable(&mut self, id: FocusId) {
        if let Some(fm) = self.focus {
            fm.borrow_mut().register(id);
        }
    }

    #[inline]
    pub fn is_focused(&self, id: FocusId) -> bool {
        self.focus.is_some_and(|fm| fm.borrow().is_focused(id))
    }

    // ── layout context ────────────────────────────────────────────────────

    /// Returns a [`LayoutCtx`] for re-measuring children during paint.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { scale: self.scale, direction: self.direction, focus: self.focus }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Solid axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, color);
    }

    /// Filled closed polygon.
    pub fn fill_polygon(&mut self, points: Vec<Vec2>, color: Color) {
        let z = self.next_z();
        self.draw_list.push_solid_polygon(z, points, color);
    }

    /// Outline of a closed polygon.
    pub fn stroke_polygon(&mut self, points: Vec<Vec2>, border: Border) {
        let z = self.next_z();
        self.draw_list.push_polygon(z, points, None, Some(border));
    }

    /// Closed polygon with optional fill and optional outline.
    pub fn polygon(&mut self, points: Vec<Vec2>, fill: Option<Color>, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_polygon(z, points, fill, border);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    /// End the most recent scissor region.
    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    // ── internal ──────────────────────────────────────────────────────────

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
