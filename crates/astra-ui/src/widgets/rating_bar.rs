use astra_engine::coords::{Rect, Vec2};
use astra_engine::geom::StarShape;
use astra_engine::input::Key;
use astra_engine::paint::Color;
use astra_engine::scene::Border;

use crate::constraints::{Constraints, LayoutCtx, LayoutDirection};
use crate::event::{EventResult, UiEvent};
use crate::focus::FocusId;
use crate::painter::Painter;
use crate::rating::{fill_fraction, Emission, RatingGeometry, RatingGesture};
use crate::widget::Widget;

/// Star growth while focused.
const FOCUS_SCALE: f32 = 1.1;
/// Gap between the star row and its focus ring.
const FOCUS_RING_GAP: f32 = 3.0;

/// A row of N stars showing a fractional rating, set by tapping or dragging.
///
/// The widget does not own the rating: it renders `value`, proposes every
/// intermediate value through `on_value_change`, and commits through
/// `on_rating_changed` after a tap or at the end of a drag. It keeps the last
/// proposal as its display value so a persistent tree shows live feedback;
/// callers may overwrite it with [`set_value`](Self::set_value).
///
/// When focused (Tab / arrow traversal), Left/Right move the value by one
/// step and Home/End jump to the ends.
///
/// # Example
/// ```rust,ignore
/// RatingBar::new()
///     .num_stars(10)
///     .step_mode(true)
///     .value(6.5)
///     .on_value_change(|v| log::debug!("proposed {v}"))
///     .on_rating_changed(|v| save_rating(v))
/// ```
pub struct RatingBar {
    value: f32,
    /// Value before the current drag, restored if the drag is cancelled.
    committed: f32,
    num_stars: u32,
    star_size: f32,
    star_padding: f32,
    step_mode: bool,
    shape: StarShape,
    stroke_width: f32,
    active_color: Color,
    inactive_color: Color,
    focus_color: Color,
    fill_inactive: bool,
    direction: Option<LayoutDirection>,
    gesture: RatingGesture,
    focus_id: FocusId,
    on_value_change: Option<Box<dyn FnMut(f32)>>,
    on_rating_changed: Option<Box<dyn FnMut(f32)>>,
}

impl RatingBar {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            committed: 0.0,
            num_stars: 5,
            star_size: 32.0,
            star_padding: 2.0,
            step_mode: false,
            shape: StarShape::default(),
            stroke_width: 1.5,
            active_color: Color::from_straight(1.0, 0.76, 0.03, 1.0),
            inactive_color: Color::from_straight(0.45, 0.47, 0.5, 1.0),
            focus_color: Color::from_straight(0.35, 0.65, 1.0, 1.0),
            fill_inactive: false,
            direction: None,
            gesture: RatingGesture::new(true),
            focus_id: FocusId::new(),
            on_value_change: None,
            on_rating_changed: None,
        }
    }

    pub fn value(mut self, v: f32) -> Self {
        self.set_value(v);
        self
    }
    pub fn num_stars(mut self, n: u32) -> Self {
        debug_assert!(n > 0, "a rating bar needs at least one star");
        self.num_stars = n;
        self
    }
    pub fn star_size(mut self, v: f32) -> Self {
        debug_assert!(v >= 0.0, "star_size must be non-negative");
        self.star_size = v;
        self
    }
    pub fn star_padding(mut self, v: f32) -> Self {
        debug_assert!(v >= 0.0, "star_padding must be non-negative");
        self.star_padding = v;
        self
    }
    pub fn step_mode(mut self, v: bool) -> Self { self.step_mode = v; self }
    pub fn shape(mut self, v: StarShape) -> Self { self.shape = v; self }
    pub fn stroke_width(mut self, v: f32) -> Self { self.stroke_width = v; self }
    pub fn active_color(mut self, v: Color) -> Self { self.active_color = v; self }
    pub fn inactive_color(mut self, v: Color) -> Self { self.inactive_color = v; self }
    pub fn focus_color(mut self, v: Color) -> Self { self.focus_color = v; self }
    pub fn fill_inactive(mut self, v: bool) -> Self { self.fill_inactive = v; self }
    pub fn enabled(mut self, v: bool) -> Self {
        self.gesture.set_enabled(v);
        self
    }
    /// Fix the direction instead of inheriting it from the layout.
    pub fn direction(mut self, v: LayoutDirection) -> Self {
        self.direction = Some(v);
        self
    }
    pub fn on_value_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_value_change = Some(Box::new(f));
        self
    }
    pub fn on_rating_changed(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_rating_changed = Some(Box::new(f));
        self
    }

    /// Overwrite the displayed rating. Does not fire callbacks.
    pub fn set_value(&mut self, v: f32) {
        self.value = v;
        self.committed = v;
    }

    /// The rating currently displayed.
    #[inline]
    pub fn rating(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn focus_id(&self) -> FocusId {
        self.focus_id
    }

    fn geometry(&self, inherited: LayoutDirection) -> RatingGeometry {
        RatingGeometry {
            num_stars: self.num_stars,
            star_size: self.star_size,
            star_padding: self.star_padding,
            step_mode: self.step_mode,
            direction: self.direction.unwrap_or(inherited),
        }
    }

    /// The star row inside the allocated `rect`, aligned to the leading edge.
    fn row_rect(rect: Rect, geo: &RatingGeometry) -> Rect {
        let w = geo.row_width();
        let x = match geo.direction {
            LayoutDirection::Ltr => rect.origin.x,
            LayoutDirection::Rtl => rect.origin.x + rect.size.x - w,
        };
        Rect::new(x, rect.origin.y, w, rect.size.y)
    }

    fn value_at(geo: &RatingGeometry, row: Rect, pos: Vec2) -> f32 {
        geo.value_at(pos.x - row.origin.x, row.size.x)
    }

    fn deliver(&mut self, emission: Emission) {
        if let Some(v) = emission.value_change {
            self.value = v;
            if let Some(f) = &mut self.on_value_change { f(v); }
        }
        if let Some(v) = emission.rating_changed {
            self.value = v;
            self.committed = v;
            log::debug!("rating committed: {v} / {}", self.num_stars);
            if let Some(f) = &mut self.on_rating_changed { f(v); }
        }
    }

    fn on_key(&mut self, key: Key, geo: &RatingGeometry) -> EventResult {
        let forward = geo.direction.sign();
        let target = match key {
            Key::ArrowRight => geo.nudge(self.value, forward),
            Key::ArrowLeft => geo.nudge(self.value, -forward),
            Key::Home => 0.0,
            Key::End => self.num_stars as f32,
            _ => return EventResult::Ignored,
        };
        if target != self.value {
            let emission = self.gesture.jump(target);
            self.deliver(emission);
        }
        EventResult::Consumed
    }
}

impl Default for RatingBar { fn default() -> Self { Self::new() } }

impl Widget for RatingBar {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let geo = self.geometry(ctx.direction);
        constraints.constrain(Vec2::new(geo.row_width(), self.star_size))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let geo = self.geometry(painter.direction);
        let row = Self::row_rect(rect, &geo);
        let enabled = self.gesture.is_enabled();

        if enabled {
            painter.register_focusable(self.focus_id);
        }
        let focused = painter.is_focused(self.focus_id);
        let scale = if focused { FOCUS_SCALE } else { 1.0 };

        let inactive = if enabled && painter.is_hovered(row) {
            self.inactive_color.mix(Color::from_straight(1.0, 1.0, 1.0, 1.0), 0.25)
        } else {
            self.inactive_color
        };

        for i in 1..=self.num_stars {
            let star = geo.star_rect(row, i).scaled_about_center(scale);
            let points = self.shape.points(star);

            if self.fill_inactive {
                painter.fill_polygon(points.clone(), inactive);
            } else {
                painter.stroke_polygon(points.clone(), Border::new(self.stroke_width, inactive));
            }

            let fraction = fill_fraction(self.value, i);
            if fraction >= 1.0 {
                painter.fill_polygon(points, self.active_color);
            } else if fraction > 0.0 {
                painter.push_clip(geo.fill_rect(star, fraction));
                painter.fill_polygon(points, self.active_color);
                painter.pop_clip();
            }
        }

        if focused {
            let ring = row.expanded(FOCUS_RING_GAP);
            let max = ring.max();
            let corners = vec![
                ring.origin,
                Vec2::new(max.x, ring.origin.y),
                max,
                Vec2::new(ring.origin.x, max.y),
            ];
            painter.stroke_polygon(corners, Border::new(2.0, self.focus_color));
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        if !self.gesture.is_enabled() {
            return EventResult::Ignored;
        }
        let geo = self.geometry(ctx.direction);
        let row = Self::row_rect(rect, &geo);

        match event {
            UiEvent::Press { pos } if row.contains(*pos) => {
                ctx.request_focus(self.focus_id);
                let emission = self.gesture.tap_down(Self::value_at(&geo, row, *pos));
                self.deliver(emission);
                EventResult::Consumed
            }
            UiEvent::DragStart { start, .. } if row.contains(*start) => {
                let emission = self.gesture.drag_start();
                self.deliver(emission);
                EventResult::Consumed
            }
            UiEvent::Drag { pos, start } if row.contains(*start) && self.gesture.is_dragging() => {
                let emission = self.gesture.drag_move(Self::value_at(&geo, row, *pos));
                self.deliver(emission);
                EventResult::Consumed
            }
            // Fires wherever the pointer was released; `start` proves ownership.
            UiEvent::DragEnd { start, .. } if row.contains(*start) && self.gesture.is_dragging() => {
                let emission = self.gesture.drag_end();
                self.deliver(emission);
                EventResult::Consumed
            }
            UiEvent::DragCancel { start } if row.contains(*start) && self.gesture.is_dragging() => {
                self.gesture.drag_cancel();
                self.value = self.committed;
                log::debug!("rating drag cancelled, back to {}", self.committed);
                EventResult::Consumed
            }
            UiEvent::KeyPress { key, .. } if ctx.is_focused(self.focus_id) => self.on_key(*key, &geo),
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use astra_engine::scene::{DrawCmd, DrawList};

    use super::*;
    use crate::scene::{UiInput, UiScene};
    use crate::widget::Element;

    type Log = Rc<RefCell<Vec<f32>>>;

    /// A bar wired to record every callback.
    fn recorded(bar: RatingBar) -> (Element, Log, Log) {
        let proposals: Log = Rc::default();
        let commits: Log = Rc::default();
        let (p, c) = (proposals.clone(), commits.clone());
        let bar = bar
            .on_value_change(move |v| p.borrow_mut().push(v))
            .on_rating_changed(move |v| c.borrow_mut().push(v));
        (bar.into(), proposals, commits)
    }

    fn ten_half_stars() -> RatingBar {
        RatingBar::new().num_stars(10).step_mode(true).star_size(20.0).star_padding(0.0)
    }

    const VIEWPORT: Vec2 = Vec2::new(400.0, 40.0);

    fn at(x: f32) -> UiInput {
        UiInput { mouse_pos: Some(Vec2::new(x, 20.0)), ..Default::default() }
    }
    fn press(x: f32) -> UiInput {
        UiInput { mouse_pressed: true, mouse_down: true, ..at(x) }
    }
    fn held(x: f32) -> UiInput {
        UiInput { mouse_down: true, ..at(x) }
    }
    fn release(x: f32) -> UiInput {
        UiInput { mouse_released: true, ..at(x) }
    }
    fn keys(keys: &[Key]) -> UiInput {
        UiInput { keys_pressed: keys.to_vec(), ..Default::default() }
    }

    fn run(scene: &mut UiScene, root: &mut Element, frames: &[UiInput]) {
        for input in frames {
            let _ = scene.frame_ref(root, VIEWPORT, input);
        }
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn drag_proposes_and_commits_on_release() {
        let (mut root, proposals, commits) = recorded(ten_half_stars());
        let mut scene = UiScene::new();

        // Tap at 2px: raw 0.1 snaps to 0.5. Drag to 74px: raw 3.7 rounds to 4.
        run(&mut scene, &mut root, &[press(2.0), held(74.0), release(74.0)]);

        assert_eq!(*proposals.borrow(), vec![0.5, 4.0]);
        assert_eq!(*commits.borrow(), vec![0.5, 4.0]);
    }

    #[test]
    fn tap_proposes_then_commits() {
        let (mut root, proposals, commits) = recorded(ten_half_stars());
        let mut scene = UiScene::new();
        run(&mut scene, &mut root, &[press(42.0), release(42.0)]);
        // raw 2.1 -> 2.5
        assert_eq!(*proposals.borrow(), vec![2.5]);
        assert_eq!(*commits.borrow(), vec![2.5]);
    }

    #[test]
    fn handled_input_requests_a_repaint() {
        let (mut root, _, _) = recorded(ten_half_stars());
        let mut scene = UiScene::new();
        run(&mut scene, &mut root, &[at(42.0)]);
        assert!(!scene.needs_repaint());
        run(&mut scene, &mut root, &[press(42.0)]);
        assert!(scene.needs_repaint());
        run(&mut scene, &mut root, &[release(42.0)]);
        assert!(!scene.needs_repaint());
    }

    #[test]
    fn drag_past_the_row_clamps_to_num_stars() {
        let (mut root, _, commits) = recorded(ten_half_stars());
        let mut scene = UiScene::new();
        run(&mut scene, &mut root, &[press(150.0), held(390.0), release(390.0)]);
        assert_eq!(commits.borrow().last().copied(), Some(10.0));
    }

    #[test]
    fn cancelled_drag_commits_nothing() {
        let (mut root, proposals, commits) = recorded(ten_half_stars());
        let mut scene = UiScene::new();
        let leave = UiInput { pointer_left: true, ..Default::default() };
        run(&mut scene, &mut root, &[press(42.0), held(100.0), leave, release(100.0)]);

        // 100px is raw 5.0 exactly, which half-star mode snaps to 5.5.
        assert_eq!(*proposals.borrow(), vec![2.5, 5.5]);
        // Only the tap-down commit survives.
        assert_eq!(*commits.borrow(), vec![2.5]);
    }

    #[test]
    fn disabled_bar_fires_no_callbacks() {
        let (mut root, proposals, commits) = recorded(ten_half_stars().value(3.0).enabled(false));
        let mut scene = UiScene::new();
        run(&mut scene, &mut root, &[
            press(42.0), held(100.0), release(100.0),
            keys(&[Key::Tab]), keys(&[Key::ArrowRight, Key::End]),
        ]);
        assert!(proposals.borrow().is_empty());
        assert!(commits.borrow().is_empty());
        assert_eq!(scene.focused(), None);
    }

    #[test]
    fn rtl_press_is_mirrored() {
        let bar = RatingBar::new().num_stars(5).star_size(20.0).star_padding(0.0);
        let (mut root, _, commits) = recorded(bar);
        let mut scene = UiScene::new().with_direction(LayoutDirection::Rtl);
        // The 100px row sits at the right edge: x in [300, 400).
        run(&mut scene, &mut root, &[press(302.0), release(302.0)]);
        run(&mut scene, &mut root, &[press(399.0), release(399.0)]);
        assert_eq!(*commits.borrow(), vec![5.0, 0.0]);
    }

    #[test]
    fn press_outside_the_row_is_ignored() {
        let bar = RatingBar::new().num_stars(5).star_size(20.0).star_padding(0.0);
        let (mut root, proposals, _) = recorded(bar);
        let mut scene = UiScene::new();
        run(&mut scene, &mut root, &[press(250.0), held(30.0), release(30.0)]);
        assert!(proposals.borrow().is_empty());
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    #[test]
    fn focused_bar_steps_with_arrows() {
        let (mut root, proposals, commits) = recorded(ten_half_stars().value(2.0));
        let mut scene = UiScene::new();
        run(&mut scene, &mut root, &[keys(&[Key::Tab])]);
        assert!(scene.focused().is_some());

        run(&mut scene, &mut root, &[keys(&[Key::ArrowRight]), keys(&[Key::ArrowRight, Key::ArrowLeft])]);
        assert_eq!(*proposals.borrow(), vec![2.5, 3.0, 2.5]);
        assert_eq!(*commits.borrow(), vec![2.5, 3.0, 2.5]);
    }

    #[test]
    fn home_and_end_jump_to_bounds() {
        let (mut root, _, commits) = recorded(ten_half_stars().value(4.0));
        let mut scene = UiScene::new();
        run(&mut scene, &mut root, &[keys(&[Key::Tab]), keys(&[Key::End]), keys(&[Key::End, Key::Home])]);
        // The second End is already at the bound and fires nothing.
        assert_eq!(*commits.borrow(), vec![10.0, 0.0]);
    }

    #[test]
    fn rtl_arrows_are_mirrored() {
        let bar = RatingBar::new().num_stars(5).value(2.0).direction(LayoutDirection::Rtl);
        let (mut root, _, commits) = recorded(bar);
        let mut scene = UiScene::new();
        run(&mut scene, &mut root, &[keys(&[Key::Tab]), keys(&[Key::ArrowRight])]);
        assert_eq!(*commits.borrow(), vec![1.0]);
    }

    #[test]
    fn unfocused_bar_ignores_keys() {
        let (mut root, proposals, _) = recorded(ten_half_stars());
        let mut scene = UiScene::new();
        run(&mut scene, &mut root, &[keys(&[Key::ArrowRight, Key::End])]);
        assert!(proposals.borrow().is_empty());
    }

    // ── paint ─────────────────────────────────────────────────────────────

    fn paint(bar: &RatingBar, rect: Rect) -> DrawList {
        let mut list = DrawList::new();
        {
            let mut painter = Painter::new(&mut list, LayoutDirection::Ltr);
            bar.paint(&mut painter, rect);
        }
        list
    }

    #[test]
    fn partial_star_is_clipped_to_its_fraction() {
        let bar = RatingBar::new().num_stars(5).star_size(20.0).star_padding(0.0).value(2.5);
        let list = paint(&bar, Rect::new(0.0, 0.0, 100.0, 20.0));

        // 5 outlines + 2 full stars + 1 clipped half star.
        assert_eq!(list.len(), 8);
        let clipped: Vec<_> = list.items().iter().filter_map(|i| i.clip_rect).collect();
        assert_eq!(clipped, vec![Rect::new(40.0, 0.0, 10.0, 20.0)]);
    }

    #[test]
    fn inactive_stars_outline_or_fill() {
        let outlined = paint(&RatingBar::new().num_stars(3), Rect::new(0.0, 0.0, 200.0, 40.0));
        let filled = paint(&RatingBar::new().num_stars(3).fill_inactive(true), Rect::new(0.0, 0.0, 200.0, 40.0));

        let has_border = |list: &DrawList| {
            list.items().iter().all(|i| matches!(&i.cmd, DrawCmd::Polygon(p) if p.border.is_some() && p.fill.is_none()))
        };
        assert_eq!(outlined.len(), 3);
        assert!(has_border(&outlined));
        assert_eq!(filled.len(), 3);
        assert!(!has_border(&filled));
    }

    #[test]
    fn rtl_partial_star_clips_from_the_right() {
        let bar = RatingBar::new()
            .num_stars(2)
            .star_size(20.0)
            .star_padding(0.0)
            .value(0.25)
            .direction(LayoutDirection::Rtl);
        let list = paint(&bar, Rect::new(0.0, 0.0, 40.0, 20.0));
        let clipped: Vec<_> = list.items().iter().filter_map(|i| i.clip_rect).collect();
        // Star 1 is the rightmost box [20, 40); a quarter fill covers [35, 40).
        assert_eq!(clipped, vec![Rect::new(35.0, 0.0, 5.0, 20.0)]);
    }

    #[test]
    fn measure_reports_natural_row() {
        let bar = RatingBar::new().num_stars(4).star_size(10.0).star_padding(1.0);
        let ctx = LayoutCtx::detached(LayoutDirection::Ltr);
        assert_eq!(bar.measure(Constraints::unbounded(), &ctx), Vec2::new(48.0, 10.0));
    }
}
