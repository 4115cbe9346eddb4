use std::cell::RefCell;

use astra_engine::coords::{Rect, Vec2};

use crate::focus::{FocusId, FocusManager};

// ── Edges ─────────────────────────────────────────────────────────────────

/// Insets on all four sides (padding, margin).
#[derive(Debug, Clone, Copy, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    #[inline]
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, bottom: vertical, left: horizontal, right: horizontal }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }
}

// ── Constraints ───────────────────────────────────────────────────────────

/// Layout constraints passed down from parent to child during measure.
///
/// A child may return any size in `[min, max]`. Parents enforce their own
/// policy by calling [`Constraints::constrain`] on the returned size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    /// Tight: child must be exactly `size`.
    #[inline]
    pub fn tight(size: Vec2) -> Self {
        Self { min: size, max: size }
    }

    /// Loose: child can be anywhere from zero up to `max`.
    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    /// No constraint: child can take any positive size.
    #[inline]
    pub fn unbounded() -> Self {
        Self { min: Vec2::zero(), max: Vec2::new(f32::INFINITY, f32::INFINITY) }
    }

    /// Clamp a size into `[min, max]`.
    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.max(self.min.x).min(self.max.x),
            size.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Shrink max inward by `edges` (for padding). Min becomes zero.
    #[inline]
    #[must_use]
    pub fn shrink(self, edges: Edges) -> Self {
        Self {
            min: Vec2::zero(),
            max: Vec2::new(
                (self.max.x - edges.h()).max(0.0),
                (self.max.y - edges.v()).max(0.0),
            ),
        }
    }
}

// ── LayoutDirection ───────────────────────────────────────────────────────

/// Reading direction of the surrounding layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl LayoutDirection {
    #[inline]
    pub fn is_rtl(self) -> bool {
        self == LayoutDirection::Rtl
    }

    /// `+1` when "forward" is to the right, `-1` when it is to the left.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            LayoutDirection::Ltr => 1,
            LayoutDirection::Rtl => -1,
        }
    }
}

// ── LayoutCtx ────────────────────────────────────────────────────────────

/// Resources made available to [`Widget::measure`] and [`Widget::on_event`].
///
/// [`Widget::measure`]: crate::widget::Widget::measure
/// [`Widget::on_event`]: crate::widget::Widget::on_event
pub struct LayoutCtx<'a> {
    /// Physical-to-logical pixel ratio of the window.
    pub scale: f32,
    /// Direction inherited by widgets that do not override it.
    pub direction: LayoutDirection,
    /// Focus manager, available during event routing so widgets can request focus.
    ///
    /// `None` in contexts that do not support focus (tests, offscreen measuring).
    pub focus: Option<&'a RefCell<FocusManager>>,
}

impl<'a> LayoutCtx<'a> {
    /// A context without focus support.
    pub fn detached(direction: LayoutDirection) -> Self {
        Self { scale: 1.0, direction, focus: None }
    }

    /// Request that `id` becomes the focused widget.
    ///
    /// The focus change takes effect at end of frame.
    #[inline]
    pub fn request_focus(&self, id: FocusId) {
        if let Some(fm) = self.focus {
            fm.borrow_mut().request_focus(id);
        }
    }

    /// Returns `true` if `id` is currently focused.
    #[inline]
    pub fn is_focused(&self, id: FocusId) -> bool {
        self.focus.is_some_and(|fm| fm.borrow().is_focused(id))
    }
}

// ── rect helper ──────────────────────────────────────────────────────────

/// Shrink a rect by `edges` (padding/inset).
#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.origin.x + edges.left,
        rect.origin.y + edges.top,
        (rect.size.x - edges.h()).max(0.0),
        (rect.size.y - edges.v()).max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Constraints ───────────────────────────────────────────────────────

    #[test]
    fn constrain_clamps_into_range() {
        let c = Constraints { min: Vec2::new(10.0, 10.0), max: Vec2::new(100.0, 100.0) };
        assert_eq!(c.constrain(Vec2::new(5.0, 300.0)), Vec2::new(10.0, 100.0));
        assert_eq!(c.constrain(Vec2::new(20.0, 30.0)), Vec2::new(20.0, 30.0));
    }

    #[test]
    fn unbounded_keeps_natural_size() {
        let c = Constraints::unbounded();
        assert_eq!(c.constrain(Vec2::new(240.0, 32.0)), Vec2::new(240.0, 32.0));
    }

    #[test]
    fn shrink_clamps_to_zero() {
        let c = Constraints::loose(Vec2::new(30.0, 100.0));
        let s = c.shrink(Edges::all(20.0));
        assert_eq!(s.max, Vec2::new(0.0, 60.0));
        assert_eq!(s.min, Vec2::zero());
    }

    // ── inset_rect ────────────────────────────────────────────────────────

    #[test]
    fn inset_rect_asymmetric_padding() {
        let rect = Rect::new(5.0, 5.0, 100.0, 60.0);
        let edges = Edges { top: 4.0, bottom: 8.0, left: 6.0, right: 10.0 };
        let inner = inset_rect(rect, edges);
        assert_eq!(inner, Rect::new(11.0, 9.0, 84.0, 48.0));
    }

    // ── LayoutCtx ─────────────────────────────────────────────────────────

    #[test]
    fn detached_ctx_never_reports_focus() {
        let ctx = LayoutCtx::detached(LayoutDirection::Rtl);
        let id = FocusId::new();
        ctx.request_focus(id);
        assert!(!ctx.is_focused(id));
        assert!(ctx.direction.is_rtl());
    }

    #[test]
    fn focus_request_applies_at_end_of_frame() {
        let fm = RefCell::new(FocusManager::new());
        let ctx = LayoutCtx { scale: 1.0, direction: LayoutDirection::Ltr, focus: Some(&fm) };
        let id = FocusId::new();
        ctx.request_focus(id);
        assert!(!ctx.is_focused(id));
        fm.borrow_mut().end_frame();
        assert!(ctx.is_focused(id));
    }
}
