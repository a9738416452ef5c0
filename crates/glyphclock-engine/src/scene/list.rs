use std::rc::Rc;

use core::cmp::Ordering;

use crate::coords::Rect;
use crate::raster::Bitmap;

use super::{DrawCmd, ImageCmd};

/// Z-ordering key for draw items. Higher values appear on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

/// Stable sort key for draw items.
///
/// Ordering rules:
/// 1) `z`: ascending (back-to-front)
/// 2) `order`: ascending (insertion order for equal z)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.z.cmp(&other.z).then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Paint-order iteration reuses an internal index buffer; no per-frame
/// allocation once warmed.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey { z, order },
            cmd,
        });
        self.sorted_dirty = true;
    }

    /// Records a bitmap drawn over `rect` at full opacity.
    #[inline]
    pub fn push_image(&mut self, z: ZIndex, rect: Rect, bitmap: Rc<Bitmap>) {
        self.push(z, DrawCmd::Image(ImageCmd::new(rect, bitmap)));
    }

    /// Iterates items in paint order (back-to-front) without cloning commands.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap() -> Rc<Bitmap> {
        Rc::new(Bitmap::from_premul_rgba(1, 1, vec![0, 0, 0, 255]).unwrap())
    }

    fn x_of(item: &DrawItem) -> f32 {
        let DrawCmd::Image(cmd) = &item.cmd;
        cmd.rect.origin.x
    }

    #[test]
    fn paint_order_is_insertion_order_for_equal_z() {
        let mut dl = DrawList::new();
        for x in [0.0, 10.0, 20.0] {
            dl.push_image(ZIndex(0), Rect::new(x, 0.0, 1.0, 1.0), bitmap());
        }
        let xs: Vec<f32> = dl.iter_in_paint_order().map(x_of).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn higher_z_paints_last() {
        let mut dl = DrawList::new();
        dl.push_image(ZIndex(1), Rect::new(1.0, 0.0, 1.0, 1.0), bitmap());
        dl.push_image(ZIndex(0), Rect::new(2.0, 0.0, 1.0, 1.0), bitmap());
        let xs: Vec<f32> = dl.iter_in_paint_order().map(x_of).collect();
        assert_eq!(xs, vec![2.0, 1.0]);
    }

    #[test]
    fn clear_resets_items() {
        let mut dl = DrawList::new();
        dl.push_image(ZIndex(0), Rect::new(0.0, 0.0, 1.0, 1.0), bitmap());
        dl.clear();
        assert!(dl.is_empty());
        assert_eq!(dl.iter_in_paint_order().count(), 0);
    }
}
