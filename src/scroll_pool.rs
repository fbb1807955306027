//! List virtualization: a fixed pool of cells reused across a long list
//!
//! Cells form a ring: data index `i` is always bound to slot `i % pool_len`.
//! Scrolling by one row therefore rebinds a single cell, and a refresh only
//! touches slots whose bound index changed.

use std::ops::Range;

/// A reusable view cell
pub trait PoolCell {
    fn set_enabled(&mut self, enabled: bool);
}

/// Backing data for a [`ScrollPool`]
pub trait CellDataSource<C> {
    fn item_count(&self) -> usize;

    /// Bind `cell` to the item at `index`
    fn set_cell(&mut self, cell: &mut C, index: usize);

    /// Called after `cell` was disabled because no visible index maps to it
    fn disable_cell(&mut self, _cell: &mut C) {}
}

#[derive(Debug, Clone)]
struct Slot<C> {
    cell: C,
    bound: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ScrollPool<C> {
    slots: Vec<Slot<C>>,
    cell_height: f32,
    viewport_height: f32,
    /// Distance scrolled from the top of the content
    scroll_offset: f32,
    item_count: usize,
}

impl<C: PoolCell> ScrollPool<C> {
    /// Wrap `cells` into a pool. Cells start disabled.
    pub fn new(cells: Vec<C>, cell_height: f32, viewport_height: f32) -> Self {
        let slots = cells
            .into_iter()
            .map(|mut cell| {
                cell.set_enabled(false);
                Slot { cell, bound: None }
            })
            .collect();
        Self {
            slots,
            cell_height: if cell_height.is_finite() && cell_height > 0.0 { cell_height } else { 1.0 },
            viewport_height: sanitize_height(viewport_height),
            scroll_offset: 0.0,
            item_count: 0,
        }
    }

    pub fn pool_len(&self) -> usize {
        self.slots.len()
    }

    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Item count seen by the last refresh
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn content_height(&self) -> f32 {
        self.item_count as f32 * self.cell_height
    }

    fn max_offset(&self) -> f32 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    /// Indices currently shown (partially visible rows included), limited
    /// by the pool size
    pub fn visible_range(&self) -> Range<usize> {
        if self.slots.is_empty() || self.item_count == 0 {
            return 0..0;
        }
        let first = (self.scroll_offset / self.cell_height).floor() as usize;
        let first = first.min(self.item_count);
        let rows = ((self.viewport_height / self.cell_height).ceil() as usize).saturating_add(1);
        let last = first.saturating_add(rows.min(self.slots.len())).min(self.item_count);
        first..last
    }

    /// Y of the item's top edge relative to the viewport top
    pub fn cell_position(&self, index: usize) -> f32 {
        index as f32 * self.cell_height - self.scroll_offset
    }

    /// Data index bound to a slot
    pub fn bound_index(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).and_then(|s| s.bound)
    }

    pub fn cells(&self) -> impl Iterator<Item = &C> {
        self.slots.iter().map(|s| &s.cell)
    }

    /// Cell currently showing `index`, if visible
    pub fn cell_for_index(&self, index: usize) -> Option<&C> {
        let slot = self.slots.get(index % self.slots.len().max(1))?;
        (slot.bound == Some(index)).then_some(&slot.cell)
    }

    fn index_for_slot(slot: usize, pool_len: usize, range: &Range<usize>) -> Option<usize> {
        let start_slot = range.start % pool_len;
        let index = range.start + (slot + pool_len - start_slot) % pool_len;
        (index < range.end).then_some(index)
    }

    /// Recompute visible indices and rebind only the cells whose index
    /// changed. Returns the number of cells touched.
    pub fn refresh<S: CellDataSource<C> + ?Sized>(&mut self, source: &mut S) -> usize {
        self.item_count = source.item_count();
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_offset());

        let pool_len = self.slots.len();
        let range = self.visible_range();
        let mut touched = 0;

        for (slot_index, slot) in self.slots.iter_mut().enumerate() {
            let want = Self::index_for_slot(slot_index, pool_len, &range);
            if slot.bound == want {
                continue;
            }
            match want {
                Some(index) => {
                    if slot.bound.is_none() {
                        slot.cell.set_enabled(true);
                    }
                    source.set_cell(&mut slot.cell, index);
                }
                None => {
                    slot.cell.set_enabled(false);
                    source.disable_cell(&mut slot.cell);
                }
            }
            slot.bound = want;
            touched += 1;
        }

        tracing::trace!(?range, touched, "Scroll pool refreshed");
        touched
    }

    /// Rebind every visible cell (backing data changed in place)
    pub fn refresh_all<S: CellDataSource<C> + ?Sized>(&mut self, source: &mut S) -> usize {
        for slot in &mut self.slots {
            if slot.bound.take().is_some() {
                // Re-enabled by the refresh if still visible
                slot.cell.set_enabled(false);
            }
        }
        self.refresh(source)
    }

    pub fn scroll_to<S: CellDataSource<C> + ?Sized>(&mut self, offset: f32, source: &mut S) -> usize {
        self.scroll_offset = offset;
        self.refresh(source)
    }

    pub fn scroll_by<S: CellDataSource<C> + ?Sized>(&mut self, delta: f32, source: &mut S) -> usize {
        self.scroll_to(self.scroll_offset + delta, source)
    }

    pub fn set_viewport_height<S: CellDataSource<C> + ?Sized>(&mut self, height: f32, source: &mut S) -> usize {
        self.viewport_height = sanitize_height(height);
        self.refresh(source)
    }
}

/// Negative and non-finite heights show nothing
fn sanitize_height(height: f32) -> f32 {
    if height.is_finite() {
        height.max(0.0)
    } else {
        0.0
    }
}
