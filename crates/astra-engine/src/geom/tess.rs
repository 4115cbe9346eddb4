//! Triangulation of closed outlines.

use crate::coords::{Rect, Vec2};

/// A triangle in logical pixels.
pub type Triangle = [Vec2; 3];

/// Average of the outline vertices.
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::zero();
    }
    let sum = points.iter().fold(Vec2::zero(), |acc, &p| acc + p);
    sum * (1.0 / points.len() as f32)
}

/// Fan-triangulates a closed outline around its vertex centroid.
///
/// Correct for convex outlines and for outlines that are star-shaped with
/// respect to their centroid (regular stars are). Outlines with fewer than
/// three points produce nothing.
pub fn fill_fan(points: &[Vec2], out: &mut Vec<Triangle>) {
    if points.len() < 3 {
        return;
    }
    let c = centroid(points);
    let n = points.len();
    out.extend((0..n).map(|i| [c, points[i], points[(i + 1) % n]]));
}

/// Triangulates a stroke of `width` centered on a closed outline.
///
/// Each edge becomes a quad; each vertex gets a bevel join so sharp corners
/// do not leave gaps.
pub fn stroke_closed(points: &[Vec2], width: f32, out: &mut Vec<Triangle>) {
    let n = points.len();
    if n < 2 || width <= 0.0 {
        return;
    }
    let hw = width * 0.5;

    let normal_of = |i: usize| (points[(i + 1) % n] - points[i]).normal() * hw;

    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let off = normal_of(i);
        out.push([a + off, b + off, b - off]);
        out.push([a + off, b - off, a - off]);
    }

    for i in 0..n {
        let v = points[i];
        let prev = normal_of((i + n - 1) % n);
        let next = normal_of(i);
        out.push([v, v + prev, v + next]);
        out.push([v, v - prev, v - next]);
    }
}

/// Two triangles covering `rect`.
pub fn rect_triangles(rect: Rect) -> [Triangle; 2] {
    let r = rect.normalized();
    let tl = r.origin;
    let br = r.max();
    let tr = Vec2::new(br.x, tl.y);
    let bl = Vec2::new(tl.x, br.y);
    [[tl, tr, br], [tl, br, bl]]
}

/// Unsigned area of a triangle.
pub fn triangle_area(t: &Triangle) -> f32 {
    let [a, b, c] = *t;
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::StarShape;

    fn shoelace(points: &[Vec2]) -> f32 {
        let n = points.len();
        let twice: f32 = (0..n)
            .map(|i| {
                let a = points[i];
                let b = points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() * 0.5
    }

    // ── fill_fan ──────────────────────────────────────────────────────────

    #[test]
    fn fan_of_star_has_one_triangle_per_vertex() {
        let pts = StarShape::default().points(Rect::new(0.0, 0.0, 64.0, 64.0));
        let mut tris = Vec::new();
        fill_fan(&pts, &mut tris);
        assert_eq!(tris.len(), pts.len());
    }

    #[test]
    fn fan_of_star_covers_exact_area() {
        let pts = StarShape::default().points(Rect::new(0.0, 0.0, 64.0, 64.0));
        let mut tris = Vec::new();
        fill_fan(&pts, &mut tris);
        let area: f32 = tris.iter().map(triangle_area).sum();
        assert!((area - shoelace(&pts)).abs() < 1e-2);
    }

    #[test]
    fn fan_ignores_degenerate_outline() {
        let mut tris = Vec::new();
        fill_fan(&[Vec2::zero(), Vec2::new(1.0, 0.0)], &mut tris);
        assert!(tris.is_empty());
    }

    // ── stroke_closed ─────────────────────────────────────────────────────

    #[test]
    fn stroke_emits_quads_and_joins() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let mut tris = Vec::new();
        stroke_closed(&square, 2.0, &mut tris);
        // 4 edges × 2 + 4 joins × 2
        assert_eq!(tris.len(), 16);
    }

    #[test]
    fn stroke_edge_quads_have_edge_length_times_width_area() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let mut tris = Vec::new();
        stroke_closed(&square, 2.0, &mut tris);
        let quads: f32 = tris[..8].iter().map(triangle_area).sum();
        assert!((quads - 4.0 * 10.0 * 2.0).abs() < 1e-3);
    }

    #[test]
    fn zero_width_stroke_is_empty() {
        let mut tris = Vec::new();
        stroke_closed(&[Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)], 0.0, &mut tris);
        assert!(tris.is_empty());
    }

    // ── rect_triangles ────────────────────────────────────────────────────

    #[test]
    fn rect_triangles_cover_rect_area() {
        let tris = rect_triangles(Rect::new(2.0, 3.0, 8.0, 5.0));
        let area: f32 = tris.iter().map(triangle_area).sum();
        assert!((area - 40.0).abs() < 1e-4);
    }
}
