use crate::fenwick::Fenwick;
use crate::registry::RowHeightRegistry;

/// Scroll-space geometry of `row_count` rows.
///
/// Pairs the [`RowHeightRegistry`] with prefix sums of the effective heights so that offsets
/// and walks stay logarithmic. The two are kept in lockstep: every registry write that lands
/// inside `[0, row_count)` is mirrored into the sums.
#[derive(Clone, Debug)]
pub struct RowLayout {
    registry: RowHeightRegistry,
    sums: Fenwick,
}

impl RowLayout {
    pub fn new(row_count: usize, min_height: u32) -> Self {
        let registry = RowHeightRegistry::new(min_height);
        let sums = Fenwick::from_heights((0..row_count).map(|i| registry.get(i)));
        Self { registry, sums }
    }

    pub fn registry(&self) -> &RowHeightRegistry {
        &self.registry
    }

    pub fn row_count(&self) -> usize {
        self.sums.len()
    }

    pub fn min_height(&self) -> u32 {
        self.registry.min_height()
    }

    /// Effective height of row `index`.
    pub fn height(&self, index: usize) -> u32 {
        self.registry.get(index)
    }

    /// Grows or shrinks the row count. Measurements of rows beyond a shrunken count are kept
    /// and reused if the count grows again.
    pub fn set_row_count(&mut self, row_count: usize) {
        let current = self.row_count();
        if row_count < current {
            self.sums.truncate(row_count);
        } else {
            for i in current..row_count {
                self.sums.push(self.registry.get(i));
            }
        }
    }

    /// Records a measurement. Returns `true` when the effective geometry changed.
    pub fn measure(&mut self, index: usize, height: u32) -> bool {
        let before = self.registry.get(index);
        if !self.registry.set(index, height) {
            return false;
        }
        let delta = height as i64 - before as i64;
        self.sums.add(index, delta);
        true
    }

    pub fn set_min_height(&mut self, min_height: u32) {
        if self.registry.min_height() == min_height {
            return;
        }
        self.registry.set_min_height(min_height);
        self.rebuild();
    }

    pub fn invalidate_from(&mut self, index: usize) -> usize {
        let dropped = self.registry.invalidate_from(index);
        if dropped > 0 {
            self.rebuild();
        }
        dropped
    }

    pub fn clear_measurements(&mut self) {
        self.registry.clear();
        self.rebuild();
    }

    /// Absolute top offset of row `index` (sum of the heights before it).
    pub fn top_pos(&self, index: usize) -> u64 {
        self.sums.prefix(index)
    }

    /// Total scroll-space height.
    pub fn scroll_adjust(&self) -> u64 {
        self.sums.total()
    }

    /// Number of steps the cumulative walk takes from row 0 before `offset` minus the
    /// accumulated heights becomes negative, bounded by the row count.
    pub fn walk(&self, offset: u64) -> usize {
        let n = self.row_count();
        if n == 0 {
            return 0;
        }
        self.sums.rows_within(offset).min(n - 1) + 1
    }

    /// Row whose `[top, top + height)` interval contains `offset`, clamped to the last row.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.walk(offset).checked_sub(1)
    }

    fn rebuild(&mut self) {
        let n = self.row_count();
        let registry = &self.registry;
        self.sums = Fenwick::from_heights((0..n).map(|i| registry.get(i)));
    }
}
