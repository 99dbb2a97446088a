use crate::coords::Rect;

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = no clipping (draw everywhere).
    pub clip_rect: Option<Rect>,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// # Clipping
///
/// Use [`push_clip`] / [`pop_clip`] to scope draw commands to a scissor rect.
/// Clips are intersected with the current parent, so nested containers work correctly.
///
/// ```ignore
/// draw_list.push_clip(container_rect);
/// // ... push children ...
/// draw_list.pop_clip();
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Stack of active scissor rects (logical pixels).
    /// The top is always the current effective clip, already intersected with all parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.clip_stack.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    ///
    /// The item inherits the current clip rect from the clip stack.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });

        self.sorted_dirty = true;
    }

    /// Begins a scissor region. All draw commands pushed until [`pop_clip`] are clipped
    /// to `rect` (intersected with any parent clip rect).
    ///
    /// Calls must be balanced with [`pop_clip`].
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // Intersect with the parent; if no overlap, produce a zero-area rect so
            // the renderer skips those draw calls.
            Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region started by [`push_clip`].
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `push_clip`.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Current effective clip rect, if any region is active.
    #[inline]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Intersects every recorded item's clip rect with `base`.
    ///
    /// Items without a clip rect receive `base` directly. Used by surfaces
    /// that carry a surface-wide clip region applied at present time.
    pub fn restrict_to(&mut self, base: Rect) {
        for item in &mut self.items {
            item.clip_rect = Some(match item.clip_rect {
                None => base,
                Some(c) => c.intersect(base).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
            });
        }
    }

    /// Returns indices into `items` in paint order (back-to-front).
    ///
    /// This buffer is owned by `DrawList` and reused across frames.
    pub fn indices_in_paint_order(&mut self) -> &[usize] {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        &self.sorted_indices
    }

    /// Iterates items in paint order without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

// ── tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    fn white() -> Color {
        Color::from_premul(1.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(1), rect(0.0, 0.0, 1.0, 1.0), white());
        list.push_solid_rect(ZIndex(0), rect(0.0, 0.0, 1.0, 1.0), white());
        list.push_solid_rect(ZIndex(1), rect(0.0, 0.0, 1.0, 1.0), white());

        assert_eq!(list.indices_in_paint_order(), &[1, 0, 2]);
    }

    #[test]
    fn items_inherit_current_clip() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(0), rect(0.0, 0.0, 1.0, 1.0), white());

        list.push_clip(rect(0.0, 0.0, 100.0, 100.0));
        list.push_solid_rect(ZIndex(0), rect(0.0, 0.0, 1.0, 1.0), white());
        list.pop_clip();

        assert_eq!(list.items()[0].clip_rect, None);
        assert_eq!(list.items()[1].clip_rect, Some(rect(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn nested_clips_intersect_with_parent() {
        let mut list = DrawList::new();
        list.push_clip(rect(0.0, 0.0, 100.0, 100.0));
        list.push_clip(rect(50.0, 50.0, 100.0, 100.0));
        list.push_solid_rect(ZIndex(0), rect(0.0, 0.0, 1.0, 1.0), white());

        assert_eq!(list.items()[0].clip_rect, Some(rect(50.0, 50.0, 50.0, 50.0)));

        list.pop_clip();
        list.pop_clip();
        assert_eq!(list.current_clip(), None);
    }

    #[test]
    fn disjoint_nested_clip_collapses_to_zero_area() {
        let mut list = DrawList::new();
        list.push_clip(rect(0.0, 0.0, 10.0, 10.0));
        list.push_clip(rect(20.0, 20.0, 10.0, 10.0));

        assert_eq!(list.current_clip(), Some(rect(0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn restrict_to_applies_base_clip_everywhere() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(0), rect(0.0, 0.0, 1.0, 1.0), white());
        list.push_clip(rect(0.0, 0.0, 30.0, 30.0));
        list.push_solid_rect(ZIndex(0), rect(0.0, 0.0, 1.0, 1.0), white());
        list.pop_clip();

        list.restrict_to(rect(10.0, 10.0, 100.0, 100.0));

        assert_eq!(list.items()[0].clip_rect, Some(rect(10.0, 10.0, 100.0, 100.0)));
        assert_eq!(list.items()[1].clip_rect, Some(rect(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn clear_resets_order_and_clips() {
        let mut list = DrawList::new();
        list.push_clip(rect(0.0, 0.0, 10.0, 10.0));
        list.push_solid_rect(ZIndex(0), rect(0.0, 0.0, 1.0, 1.0), white());
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.current_clip(), None);

        list.push_solid_rect(ZIndex(0), rect(0.0, 0.0, 1.0, 1.0), white());
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(list.items()[0].clip_rect, None);
    }
}
