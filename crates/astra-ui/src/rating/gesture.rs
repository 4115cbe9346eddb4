/// Where a rating gesture currently is.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// A drag is active. `last` is the most recent value proposed by a move,
    /// `None` until the first move arrives.
    Dragging { last: Option<f32> },
}

/// Callback values produced by one gesture step.
///
/// When both are set, `value_change` must be delivered first.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Emission {
    pub value_change: Option<f32>,
    pub rating_changed: Option<f32>,
}

impl Emission {
    #[inline]
    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value_change.is_none() && self.rating_changed.is_none()
    }

    fn proposal(value: f32) -> Self {
        Self { value_change: Some(value), rating_changed: None }
    }

    fn commit(value: f32) -> Self {
        Self { value_change: None, rating_changed: Some(value) }
    }

    fn both(value: f32) -> Self {
        Self { value_change: Some(value), rating_changed: Some(value) }
    }
}

/// Turns pointer gesture steps into rating callbacks.
///
/// The machine only sequences values; mapping a pointer offset to a value is
/// [`RatingGeometry::value_at`](super::RatingGeometry::value_at). A disabled
/// machine stays idle and emits nothing.
#[derive(Debug, Clone, Default)]
pub struct RatingGesture {
    phase: GesturePhase,
    disabled: bool,
}

impl RatingGesture {
    pub fn new(enabled: bool) -> Self {
        Self { phase: GesturePhase::Idle, disabled: !enabled }
    }

    #[inline]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    /// Enables or disables input. Disabling drops any active drag uncommitted.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
        if self.disabled {
            self.phase = GesturePhase::Idle;
        }
    }

    /// A tap went down at a point worth `value`: propose it, then commit it.
    pub fn tap_down(&mut self, value: f32) -> Emission {
        if self.disabled {
            return Emission::none();
        }
        Emission::both(value)
    }

    /// A drag was recognized. Nothing is proposed until the first move.
    pub fn drag_start(&mut self) -> Emission {
        if !self.disabled {
            self.phase = GesturePhase::Dragging { last: None };
        }
        Emission::none()
    }

    /// The dragged pointer moved to a point worth `value`.
    pub fn drag_move(&mut self, value: f32) -> Emission {
        match &mut self.phase {
            GesturePhase::Dragging { last } if !self.disabled => {
                *last = Some(value);
                Emission::proposal(value)
            }
            _ => Emission::none(),
        }
    }

    /// A discrete jump (keyboard, remote) proposes and commits at once.
    /// Ignored while a drag is active.
    pub fn jump(&mut self, value: f32) -> Emission {
        if self.disabled || self.is_dragging() {
            return Emission::none();
        }
        Emission::both(value)
    }

    /// The drag finished normally: commit the last proposed value, if any.
    pub fn drag_end(&mut self) -> Emission {
        let phase = std::mem::take(&mut self.phase);
        match phase {
            GesturePhase::Dragging { last: Some(v) } if !self.disabled => Emission::commit(v),
            _ => Emission::none(),
        }
    }

    /// The drag was interrupted: drop it without committing.
    pub fn drag_cancel(&mut self) -> Emission {
        self.phase = GesturePhase::Idle;
        Emission::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_proposes_then_commits_same_value() {
        let mut g = RatingGesture::new(true);
        let e = g.tap_down(3.5);
        assert_eq!(e.value_change, Some(3.5));
        assert_eq!(e.rating_changed, Some(3.5));
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn drag_start_emits_nothing() {
        let mut g = RatingGesture::new(true);
        assert!(g.drag_start().is_empty());
        assert_eq!(g.phase(), GesturePhase::Dragging { last: None });
    }

    #[test]
    fn drag_commits_last_move_once() {
        let mut g = RatingGesture::new(true);
        g.drag_start();
        assert_eq!(g.drag_move(1.0), Emission { value_change: Some(1.0), rating_changed: None });
        assert_eq!(g.drag_move(2.5), Emission { value_change: Some(2.5), rating_changed: None });

        assert_eq!(g.drag_end(), Emission { value_change: None, rating_changed: Some(2.5) });
        assert_eq!(g.phase(), GesturePhase::Idle);
        // A second end has nothing left to commit.
        assert!(g.drag_end().is_empty());
    }

    #[test]
    fn drag_without_moves_commits_nothing() {
        let mut g = RatingGesture::new(true);
        g.drag_start();
        assert!(g.drag_end().is_empty());
    }

    #[test]
    fn cancel_discards_drag() {
        let mut g = RatingGesture::new(true);
        g.drag_start();
        g.drag_move(4.0);
        assert!(g.drag_cancel().is_empty());
        assert_eq!(g.phase(), GesturePhase::Idle);
        assert!(g.drag_end().is_empty());
    }

    #[test]
    fn moves_outside_a_drag_are_ignored() {
        let mut g = RatingGesture::new(true);
        assert!(g.drag_move(2.0).is_empty());
    }

    #[test]
    fn jump_is_ignored_mid_drag() {
        let mut g = RatingGesture::new(true);
        assert_eq!(g.jump(4.0), Emission { value_change: Some(4.0), rating_changed: Some(4.0) });
        g.drag_start();
        assert!(g.jump(1.0).is_empty());
    }

    #[test]
    fn disabled_emits_nothing() {
        let mut g = RatingGesture::new(false);
        assert!(g.tap_down(1.0).is_empty());
        assert!(g.drag_start().is_empty());
        assert!(g.drag_move(2.0).is_empty());
        assert!(g.drag_end().is_empty());
        assert!(g.jump(3.0).is_empty());
        assert!(!g.is_dragging());
    }

    #[test]
    fn disabling_mid_drag_drops_it() {
        let mut g = RatingGesture::new(true);
        g.drag_start();
        g.drag_move(2.0);
        g.set_enabled(false);
        assert!(!g.is_dragging());
        g.set_enabled(true);
        assert!(g.drag_end().is_empty());
    }
}
