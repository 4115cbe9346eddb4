use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    /// The shorter of width and height.
    #[inline]
    pub fn min_side(self) -> f32 {
        self.size.x.min(self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Grows the rect by `by` on every side (shrinks for negative values).
    #[inline]
    pub fn expanded(self, by: f32) -> Self {
        Rect::new(
            self.origin.x - by,
            self.origin.y - by,
            (self.size.x + by * 2.0).max(0.0),
            (self.size.y + by * 2.0).max(0.0),
        )
    }

    /// Scales the rect by `factor` around its center.
    #[inline]
    pub fn scaled_about_center(self, factor: f32) -> Self {
        let c = self.center();
        let w = self.size.x * factor;
        let h = self.size.y * factor;
        Rect::new(c.x - w * 0.5, c.y - h * 0.5, w, h)
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = (a.origin.x + a.size.x).min(b.origin.x + b.size.x);
        let y1 = (a.origin.y + a.size.y).min(b.origin.y + b.size.y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── containment ───────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(9.9, 9.9)));
        assert!(!rect.contains(Vec2::new(10.0, 5.0)));
        assert!(!rect.contains(Vec2::new(-0.1, 5.0)));
    }

    #[test]
    fn contains_negative_size_rect() {
        assert!(r(10.0, 10.0, -10.0, -10.0).contains(Vec2::new(5.0, 5.0)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let i = r(0.0, 0.0, 10.0, 10.0).intersect(r(5.0, 5.0, 10.0, 10.0)).unwrap();
        assert_eq!(i, r(5.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersect(r(10.0, 0.0, 10.0, 10.0)).is_none());
    }

    // ── derived boxes ─────────────────────────────────────────────────────

    #[test]
    fn scaled_about_center_keeps_center() {
        let rect = r(10.0, 20.0, 40.0, 20.0);
        let s = rect.scaled_about_center(1.5);
        assert_eq!(s.center(), rect.center());
        assert_eq!(s.size, Vec2::new(60.0, 30.0));
    }

    #[test]
    fn expanded_grows_every_side() {
        let e = r(5.0, 5.0, 10.0, 4.0).expanded(2.0);
        assert_eq!(e, r(3.0, 3.0, 14.0, 8.0));
    }

    #[test]
    fn expanded_negative_clamps_size() {
        let e = r(0.0, 0.0, 2.0, 2.0).expanded(-5.0);
        assert!(e.is_empty());
    }

    #[test]
    fn min_side_picks_shorter_axis() {
        assert_eq!(r(0.0, 0.0, 30.0, 12.0).min_side(), 12.0);
    }
}
