use alloc::vec::Vec;

/// Last-measured height of every row that has been rendered at least once.
///
/// Rows without a measurement report the configured minimum height. A measurement is only
/// recorded when it is strictly greater than the minimum and differs from the stored value,
/// which filters out transient zero-height placeholders and no-op updates.
///
/// Entries are keyed by row index and are not evicted when the row at that index changes
/// identity. Callers that splice or reorder rows can drop stale entries with
/// [`RowHeightRegistry::invalidate_from`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowHeightRegistry {
    min_height: u32,
    heights: Vec<Option<u32>>,
    measured: usize,
}

impl RowHeightRegistry {
    pub fn new(min_height: u32) -> Self {
        Self {
            min_height,
            heights: Vec::new(),
            measured: 0,
        }
    }

    pub fn min_height(&self) -> u32 {
        self.min_height
    }

    /// Effective height of `index`: the measurement if present, else `min_height`.
    pub fn get(&self, index: usize) -> u32 {
        self.measured(index).unwrap_or(self.min_height)
    }

    pub fn measured(&self, index: usize) -> Option<u32> {
        self.heights.get(index).copied().flatten()
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured(index).is_some()
    }

    /// Number of rows with a recorded measurement.
    pub fn measured_len(&self) -> usize {
        self.measured
    }

    /// Records `height` for `index`. Returns `true` when the stored value changed.
    pub fn set(&mut self, index: usize, height: u32) -> bool {
        if height <= self.min_height {
            return false;
        }
        let Some(len) = index.checked_add(1) else {
            return false;
        };
        if self.heights.len() < len {
            self.heights.resize(len, None);
        }
        let slot = &mut self.heights[index];
        match *slot {
            Some(stored) if stored == height => false,
            Some(_) => {
                *slot = Some(height);
                true
            }
            None => {
                *slot = Some(height);
                self.measured += 1;
                true
            }
        }
    }

    /// Drops every measurement at `index` or later.
    pub fn invalidate_from(&mut self, index: usize) -> usize {
        if index >= self.heights.len() {
            return 0;
        }
        let dropped = self.heights[index..].iter().filter(|h| h.is_some()).count();
        self.heights.truncate(index);
        self.measured -= dropped;
        dropped
    }

    pub fn clear(&mut self) {
        self.heights.clear();
        self.measured = 0;
    }

    /// Changes the minimum height. Measurements that no longer exceed it are discarded, since
    /// `set` would have rejected them.
    pub fn set_min_height(&mut self, min_height: u32) {
        self.min_height = min_height;
        for slot in self.heights.iter_mut() {
            if matches!(*slot, Some(h) if h <= min_height) {
                *slot = None;
                self.measured -= 1;
            }
        }
    }

    /// Iterates over `(index, height)` for measured rows, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.heights
            .iter()
            .enumerate()
            .filter_map(|(i, h)| h.map(|h| (i, h)))
    }
}
