use alloc::sync::Arc;

use crate::virtual_rows::VirtualRows;

pub const DEFAULT_MIN_HEIGHT: u32 = 60;
pub const DEFAULT_BUFFER_SIZE: usize = 5;
pub const DEFAULT_SCROLL_THROTTLE_MS: u64 = 50;
pub const DEFAULT_BOTTOM_THRESHOLD: u32 = 10;

/// A callback fired after the engine state changed (geometry, viewport or flags).
pub type OnChangeCallback = Arc<dyn Fn(&VirtualRows) + Send + Sync>;

/// Configuration for [`crate::VirtualRows`].
///
/// Cheap to clone: the only heavy field is the `Arc`ed change callback, so hosts can tweak a
/// couple of fields per frame and hand the result to `VirtualRows::set_options`.
pub struct VirtualRowsOptions {
    pub row_count: usize,
    /// Height assumed for unmeasured rows, and the floor a measurement has to exceed.
    pub min_height: u32,
    /// Extra rows rendered beyond the viewport on each side.
    pub buffer_size: usize,
    /// Grow the buffer to one viewport of `min_height` rows when that is larger than
    /// `buffer_size`.
    pub adaptive_buffer: bool,
    /// Whether the data source can deliver more rows.
    pub has_more: bool,
    /// Loading flag owned by the caller, combined with the engine's own in-flight count.
    pub loading: bool,
    /// Minimum interval between applied scroll events.
    pub scroll_throttle_ms: u64,
    /// Slack for the bottom-reached test: a request fires once
    /// `scroll_position > container_height - bottom_threshold`.
    pub bottom_threshold: u32,
    pub on_change: Option<OnChangeCallback>,
}

impl Clone for VirtualRowsOptions {
    fn clone(&self) -> Self {
        Self {
            row_count: self.row_count,
            min_height: self.min_height,
            buffer_size: self.buffer_size,
            adaptive_buffer: self.adaptive_buffer,
            has_more: self.has_more,
            loading: self.loading,
            scroll_throttle_ms: self.scroll_throttle_ms,
            bottom_threshold: self.bottom_threshold,
            on_change: self.on_change.clone(),
        }
    }
}

impl Default for VirtualRowsOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

impl VirtualRowsOptions {
    pub fn new(row_count: usize) -> Self {
        Self {
            row_count,
            min_height: DEFAULT_MIN_HEIGHT,
            buffer_size: DEFAULT_BUFFER_SIZE,
            adaptive_buffer: false,
            has_more: true,
            loading: false,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            bottom_threshold: DEFAULT_BOTTOM_THRESHOLD,
            on_change: None,
        }
    }

    pub fn with_min_height(mut self, min_height: u32) -> Self {
        self.min_height = min_height;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_adaptive_buffer(mut self, adaptive_buffer: bool) -> Self {
        self.adaptive_buffer = adaptive_buffer;
        self
    }

    pub fn with_has_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_scroll_throttle_ms(mut self, interval_ms: u64) -> Self {
        self.scroll_throttle_ms = interval_ms;
        self
    }

    pub fn with_bottom_threshold(mut self, threshold: u32) -> Self {
        self.bottom_threshold = threshold;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&VirtualRows) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for VirtualRowsOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualRowsOptions")
            .field("row_count", &self.row_count)
            .field("min_height", &self.min_height)
            .field("buffer_size", &self.buffer_size)
            .field("adaptive_buffer", &self.adaptive_buffer)
            .field("has_more", &self.has_more)
            .field("loading", &self.loading)
            .field("scroll_throttle_ms", &self.scroll_throttle_ms)
            .field("bottom_threshold", &self.bottom_threshold)
            .finish_non_exhaustive()
    }
}
