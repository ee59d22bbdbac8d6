use alloc::vec::Vec;

/// Scroll position and container height, as last reported by the host.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    /// Caller guarantees this stays within `[0, scroll_adjust]`; the engine does not clamp it.
    pub scroll_position: u64,
    pub container_height: u32,
}

/// A persisted copy of the row height registry.
///
/// Restoring it on a fresh engine reproduces the scroll-space geometry of a previous session
/// without re-measuring every row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementSnapshot {
    pub min_height: u32,
    /// `(index, height)` pairs in index order.
    pub entries: Vec<(usize, u32)>,
}
