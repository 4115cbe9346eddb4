use crate::coords::Rect;

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = no clipping.
    pub clip_rect: Option<Rect>,
}

/// Recorded draw stream for a frame.
///
/// `push()` is O(1); paint-order iteration reuses an internal index buffer,
/// so a warmed-up list does not allocate per frame.
///
/// # Clipping
///
/// [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) scope
/// commands to a scissor rect. Nested clips intersect with their parent.
///
/// ```ignore
/// draw_list.push_clip(star_fill_rect);
/// draw_list.push_solid_polygon(z, star_points, gold);
/// draw_list.pop_clip();
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Active scissor rects; the top is already intersected with all parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack, keeping capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
        self.clip_stack.clear();
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The clip rect new items will inherit.
    #[inline]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Pushes a draw command at layer `z`; it inherits the current clip.
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey::new(z, self.next_order);
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key, cmd, clip_rect: self.current_clip() });
        self.sorted_dirty = true;
    }

    /// Begins a scissor region, intersected with the enclosing one.
    ///
    /// A clip that does not overlap its parent becomes a zero-area rect, which
    /// renderers skip. Must be balanced with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.current_clip() {
            None => rect.normalized(),
            Some(parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region.
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Iterates items back-to-front without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted_indices.clear();
            self.sorted_indices.extend(0..self.items.len());
            let items = &self.items;
            self.sorted_indices.sort_by_key(|&i| items[i].key);
            self.sorted_dirty = false;
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn white() -> Color {
        Color::from_straight(1.0, 1.0, 1.0, 1.0)
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut dl = DrawList::new();
        dl.push_rect(ZIndex::new(2), Rect::new(0.0, 0.0, 1.0, 1.0), white());
        dl.push_rect(ZIndex::new(0), Rect::new(1.0, 0.0, 1.0, 1.0), white());
        dl.push_rect(ZIndex::new(0), Rect::new(2.0, 0.0, 1.0, 1.0), white());

        let xs: Vec<f32> = dl
            .iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Rect(r) => r.rect.origin.x,
                DrawCmd::Polygon(_) => -1.0,
            })
            .collect();
        assert_eq!(xs, vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn clear_resets_items_and_clips() {
        let mut dl = DrawList::new();
        dl.push_clip(Rect::new(0.0, 0.0, 5.0, 5.0));
        dl.push_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 1.0, 1.0), white());
        dl.clear();
        assert!(dl.is_empty());
        assert_eq!(dl.current_clip(), None);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    #[test]
    fn items_inherit_current_clip() {
        let mut dl = DrawList::new();
        dl.push_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 1.0, 1.0), white());
        dl.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        dl.push_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 1.0, 1.0), white());
        dl.pop_clip();
        dl.push_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 1.0, 1.0), white());

        let clips: Vec<_> = dl.items().iter().map(|i| i.clip_rect).collect();
        assert_eq!(clips, vec![None, Some(Rect::new(0.0, 0.0, 10.0, 10.0)), None]);
    }

    #[test]
    fn nested_clips_intersect() {
        let mut dl = DrawList::new();
        dl.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        dl.push_clip(Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(dl.current_clip(), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        dl.pop_clip();
        assert_eq!(dl.current_clip(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn disjoint_nested_clip_is_empty() {
        let mut dl = DrawList::new();
        dl.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        dl.push_clip(Rect::new(20.0, 20.0, 5.0, 5.0));
        assert!(dl.current_clip().is_some_and(|c| c.is_empty()));
    }

    // ── polygons ──────────────────────────────────────────────────────────

    #[test]
    fn polygon_without_fill_or_border_is_dropped() {
        let mut dl = DrawList::new();
        dl.push_polygon(ZIndex::new(0), vec![Vec2::zero(); 3], None, None);
        assert!(dl.is_empty());
        dl.push_solid_polygon(ZIndex::new(0), vec![Vec2::zero(); 3], white());
        assert_eq!(dl.len(), 1);
    }
}
