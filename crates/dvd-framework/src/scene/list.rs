use super::{DrawCmd, ZIndex};

/// Paint-order key: z ascending, then insertion order for equal z.
///
/// Field order matters; the derived `Ord` compares `z` first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// `push()` is O(1). Paint-order iteration reuses an internal index buffer, so a
/// list that is cleared and refilled every frame stops allocating once warmed.
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

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Pushes a draw command with the given z-index.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey { z, order },
            cmd,
        });

        self.sorted_dirty = true;
    }

    /// Iterates items in paint order (back-to-front) without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        let items = &self.items;
        self.sorted_indices.sort_by_key(|&i| items[i].key);

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    fn rect_at(x: f32) -> Rect {
        Rect::new(x, 0.0, 1.0, 1.0)
    }

    fn xs_in_paint_order(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Rect(r) => Some(r.rect.origin.x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn lower_z_paints_first() {
        let mut list = DrawList::new();
        list.push_rect(ZIndex(2), rect_at(2.0), Color::WHITE);
        list.push_rect(ZIndex(0), rect_at(0.0), Color::WHITE);
        list.push_rect(ZIndex(1), rect_at(1.0), Color::WHITE);

        assert_eq!(xs_in_paint_order(&mut list), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn equal_z_keeps_insertion_order() {
        let mut list = DrawList::new();
        for x in [5.0, 3.0, 9.0] {
            list.push_rect(ZIndex(0), rect_at(x), Color::WHITE);
        }
        assert_eq!(xs_in_paint_order(&mut list), vec![5.0, 3.0, 9.0]);
    }

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        list.push_rect(ZIndex(0), rect_at(1.0), Color::WHITE);
        list.clear();
        assert!(list.is_empty());

        list.push_rect(ZIndex(0), rect_at(7.0), Color::WHITE);
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(xs_in_paint_order(&mut list), vec![7.0]);
    }
}
