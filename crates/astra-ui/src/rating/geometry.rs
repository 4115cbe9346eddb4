use astra_engine::coords::Rect;

use crate::constraints::LayoutDirection;

/// Quantizes a raw star count.
///
/// Whole-star mode rounds to the nearest integer (half away from zero).
/// Half-star mode never snaps down: any excess over a whole star goes to the
/// half mark, and from the half mark on it rounds up to the next star.
/// Exactly `0` stays `0`.
pub fn step_sized(raw: f32, step_mode: bool) -> f32 {
    if !step_mode {
        return raw.round();
    }
    if raw == 0.0 {
        return 0.0;
    }
    let whole = raw.floor();
    if raw < whole + 0.5 { whole + 0.5 } else { raw.round() }
}

/// Fill amount of the 1-based star `index` for `value`, in `[0, 1]`.
#[inline]
pub fn fill_fraction(value: f32, index: u32) -> f32 {
    (value - (index as f32 - 1.0)).clamp(0.0, 1.0)
}

/// Layout and hit-testing parameters of a star row.
///
/// Every star occupies `star_size` of drawing width plus `star_padding` on
/// each side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RatingGeometry {
    pub num_stars: u32,
    pub star_size: f32,
    pub star_padding: f32,
    pub step_mode: bool,
    pub direction: LayoutDirection,
}

impl RatingGeometry {
    /// Natural width of the row: every star plus its padding.
    #[inline]
    pub fn row_width(&self) -> f32 {
        self.num_stars as f32 * (self.star_size + 2.0 * self.star_padding)
    }

    /// Row width minus all horizontal padding.
    #[inline]
    pub fn effective_width(&self, total_width: f32) -> f32 {
        total_width - self.num_stars as f32 * 2.0 * self.star_padding
    }

    /// Value increment of one step: `0.5` in half-star mode, `1` otherwise.
    #[inline]
    pub fn step(&self) -> f32 {
        if self.step_mode { 0.5 } else { 1.0 }
    }

    /// Unquantized star count at offset `x` from the row's leading edge.
    pub fn raw_count(&self, x: f32, total_width: f32) -> f32 {
        let x = x.clamp(0.0, total_width.max(0.0));
        if x == 0.0 {
            return 0.0;
        }
        (x / self.effective_width(total_width)) * self.num_stars as f32
    }

    /// Rating value for a pointer at offset `x` from the row's left edge.
    ///
    /// Clamps `x`, quantizes, clamps to `[0, num_stars]`, and finally mirrors
    /// the result for right-to-left rows.
    pub fn value_at(&self, x: f32, total_width: f32) -> f32 {
        let n = self.num_stars as f32;
        let value = step_sized(self.raw_count(x, total_width), self.step_mode).clamp(0.0, n);
        match self.direction {
            LayoutDirection::Ltr => value,
            LayoutDirection::Rtl => n - value,
        }
    }

    /// Moves `value` by `steps` increments, snapping to the step grid.
    pub fn nudge(&self, value: f32, steps: i32) -> f32 {
        let step = self.step();
        let snapped = (value / step).round() * step;
        (snapped + steps as f32 * step).clamp(0.0, self.num_stars as f32)
    }

    /// Drawing box of the 1-based star `index` inside `row`.
    ///
    /// Star 1 is the leftmost in LTR rows and the rightmost in RTL rows.
    pub fn star_rect(&self, row: Rect, index: u32) -> Rect {
        debug_assert!(index >= 1 && index <= self.num_stars);
        let cell = self.star_size + 2.0 * self.star_padding;
        let slot = match self.direction {
            LayoutDirection::Ltr => index - 1,
            LayoutDirection::Rtl => self.num_stars - index,
        };
        Rect::new(
            row.origin.x + slot as f32 * cell + self.star_padding,
            row.origin.y + (row.size.y - self.star_size) * 0.5,
            self.star_size,
            self.star_size,
        )
    }

    /// Part of `star` covered by `fraction` of fill, anchored at the leading edge.
    pub fn fill_rect(&self, star: Rect, fraction: f32) -> Rect {
        let w = star.size.x * fraction.clamp(0.0, 1.0);
        let x = match self.direction {
            LayoutDirection::Ltr => star.origin.x,
            LayoutDirection::Rtl => star.origin.x + star.size.x - w,
        };
        Rect::new(x, star.origin.y, w, star.size.y)
    }
}
