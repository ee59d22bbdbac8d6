use alloc::vec::Vec;

/// Binary indexed tree over effective row heights.
///
/// Answers the three scroll-space questions of the engine in `O(log n)`:
/// - `prefix(k)`: top offset of row `k`,
/// - `total()`: height of the whole scroll space,
/// - `rows_within(offset)`: how many leading rows have a top offset `<= offset`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    nodes: Vec<u64>, // 1-indexed, nodes[0] unused
    total: u64,
}

impl Fenwick {
    pub(crate) fn from_heights(heights: impl ExactSizeIterator<Item = u32>) -> Self {
        let n = heights.len();
        let mut nodes = alloc::vec![0u64; n + 1];
        let mut total = 0u64;
        for (pos, height) in (1..=n).zip(heights) {
            let value = height as u64;
            total = total.saturating_add(value);
            nodes[pos] = nodes[pos].saturating_add(value);
            let parent = pos + low_bit(pos);
            if parent <= n {
                nodes[parent] = nodes[parent].saturating_add(nodes[pos]);
            }
        }
        Self { nodes, total }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Appends one row at the end.
    pub(crate) fn push(&mut self, height: u32) {
        let pos = self.len() + 1;
        // nodes[pos] covers the rows (pos - low_bit(pos), pos]; all but the new one exist already.
        let covered_from = pos - low_bit(pos);
        let existing = self
            .prefix(pos - 1)
            .saturating_sub(self.prefix(covered_from));
        self.nodes.push(existing.saturating_add(height as u64));
        self.total = self.total.saturating_add(height as u64);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }
        self.total = self.prefix(len);
        self.nodes.truncate(len + 1);
    }

    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        if index >= n || delta == 0 {
            return;
        }
        self.total = apply_delta(self.total, delta);
        let mut pos = index + 1;
        while pos <= n {
            self.nodes[pos] = apply_delta(self.nodes[pos], delta);
            pos += low_bit(pos);
        }
    }

    /// Sum of the first `count` rows.
    pub(crate) fn prefix(&self, count: usize) -> u64 {
        let mut pos = count.min(self.len());
        let mut sum = 0u64;
        while pos > 0 {
            sum = sum.saturating_add(self.nodes[pos]);
            pos &= pos - 1;
        }
        sum
    }

    /// Largest `k` such that `prefix(k) <= offset`.
    pub(crate) fn rows_within(&self, mut offset: u64) -> usize {
        let n = self.len();
        let mut pos = 0usize;
        let mut step = highest_power_of_two_at_most(n);
        while step != 0 {
            let next = pos + step;
            if next <= n && self.nodes[next] <= offset {
                offset -= self.nodes[next];
                pos = next;
            }
            step >>= 1;
        }
        pos
    }
}

fn apply_delta(value: u64, delta: i64) -> u64 {
    if delta >= 0 {
        value.saturating_add(delta as u64)
    } else {
        debug_assert!(
            value >= delta.unsigned_abs(),
            "fenwick underflow (value={value}, delta={delta})"
        );
        value.saturating_sub(delta.unsigned_abs())
    }
}

fn low_bit(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_at_most(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1usize << (usize::BITS - 1 - n.leading_zeros())
    }
}
