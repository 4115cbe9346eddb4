//! Keyboard / remote focus.
//!
//! [`FocusManager`] lives on [`crate::scene::UiScene`] and is threaded into
//! [`crate::painter::Painter`] and [`crate::constraints::LayoutCtx`] each frame.
//!
//! 1. During **paint**, focusable widgets call `painter.register_focusable(id)`
//!    to enroll in traversal order, and `painter.is_focused(id)` to style
//!    themselves.
//! 2. During **on_event**, widgets call `ctx.request_focus(id)` when pressed.
//! 3. At **end of frame**, [`FocusManager::end_frame`] applies any pending
//!    request and clears the registered list for the next frame.
//! 4. [`FocusManager::advance`] is called by the scene on traversal keys,
//!    cycling through the list registered by the previous paint.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_FOCUS_ID: AtomicU64 = AtomicU64::new(1);

// ── FocusId ───────────────────────────────────────────────────────────────

/// Unique identifier for a focusable widget, stable for the widget's lifetime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FocusId(u64);

impl FocusId {
    pub fn new() -> Self {
        FocusId(NEXT_FOCUS_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for FocusId {
    fn default() -> Self {
        Self::new()
    }
}

// ── FocusManager ──────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<FocusId>,
    /// Registered during the current paint, in paint order.
    registered: Vec<FocusId>,
    /// Traversal order captured from the last completed frame.
    order: Vec<FocusId>,
    requested: Option<FocusId>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn focused(&self) -> Option<FocusId> {
        self.focused
    }

    #[inline]
    pub fn is_focused(&self, id: FocusId) -> bool {
        self.focused == Some(id)
    }

    /// Request that `id` becomes focused at end of frame.
    #[inline]
    pub fn request_focus(&mut self, id: FocusId) {
        self.requested = Some(id);
    }

    /// Enroll `id` in traversal order. Must be called in paint order.
    #[inline]
    pub fn register(&mut self, id: FocusId) {
        if !self.registered.contains(&id) {
            self.registered.push(id);
        }
    }

    /// Move focus to the next (or previous, if `reverse`) focusable widget.
    pub fn advance(&mut self, reverse: bool) {
        let order = if self.registered.is_empty() { &self.order } else { &self.registered };
        if order.is_empty() {
            return;
        }
        let n = order.len();
        let next = match self.focused.and_then(|cur| order.iter().position(|&x| x == cur)) {
            None => order[if reverse { n - 1 } else { 0 }],
            Some(i) if reverse => order[(i + n - 1) % n],
            Some(i) => order[(i + 1) % n],
        };
        self.focused = Some(next);
        self.requested = None;
    }

    pub fn clear(&mut self) {
        self.focused = None;
        self.requested = None;
    }

    /// Apply the pending request and start a new registration pass.
    ///
    /// Focus on a widget that was not painted this frame is dropped.
    pub fn end_frame(&mut self) {
        if let Some(req) = self.requested.take() {
            self.focused = Some(req);
        }
        if !self.registered.is_empty() {
            self.order = std::mem::take(&mut self.registered);
            if let Some(cur) = self.focused {
                if !self.order.contains(&cur) {
                    self.focused = None;
                }
            }
        }
    }
}
