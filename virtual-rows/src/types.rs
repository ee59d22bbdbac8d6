use alloc::vec::Vec;
use core::ops::RangeInclusive;

/// The contiguous, inclusive index range of rows materialized for rendering.
///
/// An empty list has no window; calculators return `None` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl Window {
    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }

    /// Whether the last known row is inside the window.
    pub fn reaches_tail(&self, row_count: usize) -> bool {
        row_count > 0 && self.end_index == row_count - 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Placement of one rendered row in scroll space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowSlot {
    pub index: usize,
    /// Absolute top offset inside the scroll container.
    pub top: u64,
    /// Minimum height the host should reserve for the row.
    pub min_height: u32,
    /// Height currently assumed for the row (measured, or `min_height`).
    pub height: u32,
}

impl RowSlot {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// An invisible marker placed at the end of scroll space so the container gets its full
/// scrollable extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sentinel {
    pub top: u64,
}

/// Everything a host needs to draw one pass: positioned rows plus the sentinel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub rows: Vec<RowSlot>,
    pub sentinel: Sentinel,
}

impl Frame {
    pub fn window(&self) -> Option<Window> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        Some(Window {
            start_index: first.index,
            end_index: last.index,
        })
    }
}
