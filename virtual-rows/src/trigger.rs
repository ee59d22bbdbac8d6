use crate::Window;

/// Whether a "load more" request is currently outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadPhase {
    #[default]
    Idle,
    Requesting,
}

impl LoadPhase {
    pub fn from_in_flight(in_flight: usize) -> Self {
        if in_flight == 0 {
            Self::Idle
        } else {
            Self::Requesting
        }
    }
}

/// Inputs of the bottom-reached predicate, gathered at one recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BottomProbe {
    pub has_more: bool,
    /// Externally supplied loading flag.
    pub loading: bool,
    /// Requests started by the engine and not yet settled.
    pub in_flight: usize,
    pub scroll_position: u64,
    pub container_height: u32,
    pub threshold: u32,
    pub window: Option<Window>,
    pub row_count: usize,
}

impl BottomProbe {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0 || self.loading
    }

    /// `true` when a new data request should be started.
    ///
    /// Requires more data to exist, nothing loading, the scroll position past
    /// `container_height - threshold`, and the last known row inside the window.
    pub fn is_reached(&self) -> bool {
        if !self.has_more || self.is_loading() {
            return false;
        }
        let past_threshold = self.scroll_position.saturating_add(self.threshold as u64)
            > self.container_height as u64;
        past_threshold
            && self
                .window
                .is_some_and(|w| w.reaches_tail(self.row_count))
    }
}
