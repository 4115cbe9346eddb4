use std::f32::consts::PI;

use crate::coords::{Rect, Vec2};

/// Parameters of an N-spike star polygon.
///
/// Radii are fractions of the shorter side of the bounding box the star is
/// generated into, so the same shape scales with the box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StarShape {
    /// Number of outer points.
    pub spikes: u32,
    /// Distance of the outer points from the center, as a fraction of the min side.
    pub outer_radius: f32,
    /// Distance of the inner (valley) points from the center, as a fraction of the min side.
    pub inner_radius: f32,
}

impl Default for StarShape {
    fn default() -> Self {
        Self { spikes: 5, outer_radius: 0.5, inner_radius: 0.2 }
    }
}

impl StarShape {
    /// Number of vertices produced by [`points`](Self::points).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.spikes as usize * 2
    }

    /// Generates the closed outline centered in `bounds`.
    ///
    /// Starts at the top outer point and sweeps clockwise (on screen) through
    /// `2π`, alternating outer and inner radius. The closing edge from the last
    /// vertex back to the first is implicit.
    pub fn points(&self, bounds: Rect) -> Vec<Vec2> {
        debug_assert!(self.spikes >= 2, "a star needs at least two spikes");

        let center = bounds.center();
        let min_side = bounds.min_side();
        let outer = min_side * self.outer_radius;
        let inner = min_side * self.inner_radius;

        let n = self.vertex_count();
        let step = PI / self.spikes as f32;
        // -π/2 is straight up in a +Y-down space.
        let start = -PI * 0.5;

        (0..n)
            .map(|k| {
                let r = if k % 2 == 0 { outer } else { inner };
                center + Vec2::from_angle(start + step * k as f32) * r
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn five_spike_star_has_ten_vertices() {
        let pts = StarShape::default().points(unit_box());
        assert_eq!(pts.len(), 10);
    }

    #[test]
    fn first_vertex_is_top_outer_point() {
        let pts = StarShape::default().points(unit_box());
        assert!((pts[0].x - 50.0).abs() < 1e-4);
        assert!((pts[0].y - 0.0).abs() < 1e-4);
    }

    #[test]
    fn radii_alternate_outer_inner() {
        let shape = StarShape::default();
        let bounds = unit_box();
        let c = bounds.center();
        for (k, p) in shape.points(bounds).iter().enumerate() {
            let expected = if k % 2 == 0 { 50.0 } else { 20.0 };
            assert!((p.distance(c) - expected).abs() < 1e-3, "vertex {k}");
        }
    }

    #[test]
    fn outline_is_mirror_symmetric_about_vertical_axis() {
        let pts = StarShape::default().points(unit_box());
        let n = pts.len();
        for k in 1..n {
            let a = pts[k];
            let b = pts[n - k];
            assert!((a.x + b.x - 100.0).abs() < 1e-3);
            assert!((a.y - b.y).abs() < 1e-3);
        }
    }

    #[test]
    fn radius_follows_shorter_side() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 40.0);
        let pts = StarShape::default().points(bounds);
        assert!((pts[0].distance(bounds.center()) - 20.0).abs() < 1e-3);
    }

    #[test]
    fn spike_count_is_configurable() {
        let shape = StarShape { spikes: 7, ..StarShape::default() };
        assert_eq!(shape.points(unit_box()).len(), 14);
    }
}
