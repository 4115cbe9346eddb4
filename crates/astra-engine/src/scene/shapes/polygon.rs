use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Closed polygon draw payload.
///
/// `points` is the outline without a repeated closing vertex. The fill is
/// fan-triangulated around the vertex centroid, so fills are only exact for
/// convex or centroid-star-shaped outlines (see `geom::tess::fill_fan`).
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCmd {
    pub points: Vec<Vec2>,
    pub fill: Option<Color>,
    pub border: Option<Border>,
}

impl DrawList {
    /// Records a polygon with an optional fill and optional stroke.
    ///
    /// Commands with neither are dropped.
    pub fn push_polygon(
        &mut self,
        z: ZIndex,
        points: Vec<Vec2>,
        fill: Option<Color>,
        border: Option<Border>,
    ) {
        if fill.is_none() && border.is_none() {
            return;
        }
        self.push(z, DrawCmd::Polygon(PolygonCmd { points, fill, border }));
    }

    /// Records a filled polygon without a stroke.
    #[inline]
    pub fn push_solid_polygon(&mut self, z: ZIndex, points: Vec<Vec2>, color: Color) {
        self.push_polygon(z, points, Some(color), None);
    }
}
