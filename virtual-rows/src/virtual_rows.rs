use alloc::vec::Vec;
use core::cell::Cell;

use crate::layout::RowLayout;
use crate::throttle::Throttle;
use crate::trigger::BottomProbe;
use crate::window;
use crate::{
    Align, Frame, MeasurementSink, MeasurementSnapshot, RowHeightRegistry, RowSlot, Sentinel,
    ViewportState, VirtualRowsOptions, Window,
};

/// A headless engine for lists of rows whose heights are learned while scrolling.
///
/// The engine holds no UI objects. The host drives it with:
/// - the container height (`set_container_height`, or the [`MeasurementSink`] impl),
/// - scroll events (`apply_scroll_event` + `tick` for the throttled trailing value),
/// - row measurements (`measure`),
///
/// and reads back the window, the positioned rows and the sentinel through `frame` or
/// `for_each_row`.
#[derive(Clone, Debug)]
pub struct VirtualRows {
    options: VirtualRowsOptions,
    layout: RowLayout,
    viewport: ViewportState,
    scroll: Throttle<u64>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl VirtualRows {
    pub fn new(options: VirtualRowsOptions) -> Self {
        vdebug!(
            row_count = options.row_count,
            min_height = options.min_height,
            buffer_size = options.buffer_size,
            "VirtualRows::new"
        );
        Self {
            layout: RowLayout::new(options.row_count, options.min_height),
            viewport: ViewportState::default(),
            scroll: Throttle::new(options.scroll_throttle_ms),
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &VirtualRowsOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: VirtualRowsOptions) {
        let prev_count = self.options.row_count;
        let prev_min = self.options.min_height;
        self.options = options;
        vtrace!(
            row_count = self.options.row_count,
            has_more = self.options.has_more,
            loading = self.options.loading,
            "VirtualRows::set_options"
        );
        if self.options.min_height != prev_min {
            self.layout.set_min_height(self.options.min_height);
        }
        if self.options.row_count != prev_count {
            self.layout.set_row_count(self.options.row_count);
        }
        self.scroll.set_interval_ms(self.options.scroll_throttle_ms);
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut VirtualRowsOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    /// Coalesces every change made inside `f` into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify();
        }
    }

    pub fn row_count(&self) -> usize {
        self.layout.row_count()
    }

    pub fn set_row_count(&mut self, row_count: usize) {
        if self.options.row_count == row_count {
            return;
        }
        vdebug!(from = self.options.row_count, to = row_count, "set_row_count");
        self.options.row_count = row_count;
        self.layout.set_row_count(row_count);
        self.notify();
    }

    pub fn min_height(&self) -> u32 {
        self.options.min_height
    }

    pub fn set_min_height(&mut self, min_height: u32) {
        if self.options.min_height == min_height {
            return;
        }
        self.options.min_height = min_height;
        self.layout.set_min_height(min_height);
        self.notify();
    }

    pub fn set_buffer_size(&mut self, buffer_size: usize) {
        if self.options.buffer_size == buffer_size {
            return;
        }
        self.options.buffer_size = buffer_size;
        self.notify();
    }

    pub fn has_more(&self) -> bool {
        self.options.has_more
    }

    pub fn set_has_more(&mut self, has_more: bool) {
        if self.options.has_more == has_more {
            return;
        }
        self.options.has_more = has_more;
        self.notify();
    }

    pub fn loading(&self) -> bool {
        self.options.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.options.loading == loading {
            return;
        }
        self.options.loading = loading;
        self.notify();
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn scroll_position(&self) -> u64 {
        self.viewport.scroll_position
    }

    pub fn container_height(&self) -> u32 {
        self.viewport.container_height
    }

    pub fn set_container_height(&mut self, height: u32) {
        if self.viewport.container_height == height {
            return;
        }
        vtrace!(height, "set_container_height");
        self.viewport.container_height = height;
        self.notify();
    }

    /// Sets the scroll position directly, bypassing the rate limiter.
    pub fn set_scroll_position(&mut self, scroll_position: u64) {
        if self.viewport.scroll_position == scroll_position {
            return;
        }
        self.viewport.scroll_position = scroll_position;
        self.notify();
    }

    /// Feeds one scroll event from the host. Returns `true` when it was applied right away;
    /// otherwise it is parked until `tick` releases it.
    pub fn apply_scroll_event(&mut self, scroll_position: u64, now_ms: u64) -> bool {
        vtrace!(scroll_position, now_ms, "apply_scroll_event");
        match self.scroll.offer(scroll_position, now_ms) {
            Some(position) => {
                self.set_scroll_position(position);
                true
            }
            None => false,
        }
    }

    /// Applies a parked trailing scroll event once the throttle interval has elapsed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.scroll.poll(now_ms) {
            Some(position) => {
                self.set_scroll_position(position);
                true
            }
            None => false,
        }
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.scroll.has_pending()
    }

    pub fn restore_viewport(&mut self, viewport: ViewportState) {
        self.scroll.reset();
        self.batch_update(|v| {
            v.set_container_height(viewport.container_height);
            v.set_scroll_position(viewport.scroll_position);
        });
    }

    /// Records a measured height for row `index`. Returns `true` when geometry changed.
    ///
    /// Heights not greater than `min_height`, unchanged heights and indices past the row
    /// count are ignored.
    pub fn measure(&mut self, index: usize, height: u32) -> bool {
        if index >= self.row_count() {
            vwarn!(index, row_count = self.row_count(), "measure: index out of range");
            return false;
        }
        vtrace!(index, height, "measure");
        if !self.layout.measure(index, height) {
            return false;
        }
        self.notify();
        true
    }

    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> bool {
        let mut changed = false;
        self.batch_update(|v| {
            for (index, height) in measurements {
                changed |= v.measure(index, height);
            }
        });
        changed
    }

    pub fn registry(&self) -> &RowHeightRegistry {
        self.layout.registry()
    }

    pub fn row_height(&self, index: usize) -> u32 {
        self.layout.height(index)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.layout.registry().is_measured(index)
    }

    /// Drops measurements of row `index` and every row after it. Use after splicing or
    /// reordering the underlying rows; the engine never does this on its own.
    pub fn invalidate_from(&mut self, index: usize) {
        let dropped = self.layout.invalidate_from(index);
        vdebug!(index, dropped, "invalidate_from");
        if dropped > 0 {
            self.notify();
        }
    }

    pub fn reset_measurements(&mut self) {
        self.layout.clear_measurements();
        self.notify();
    }

    pub fn export_measurements(&self) -> MeasurementSnapshot {
        MeasurementSnapshot {
            min_height: self.layout.min_height(),
            entries: self.layout.registry().iter().collect(),
        }
    }

    /// Replaces all measurements with `snapshot`. Entries past the row count or not
    /// exceeding the current `min_height` are skipped.
    pub fn import_measurements(&mut self, snapshot: &MeasurementSnapshot) {
        vdebug!(entries = snapshot.entries.len(), "import_measurements");
        self.batch_update(|v| {
            v.layout.clear_measurements();
            let row_count = v.row_count();
            for &(index, height) in &snapshot.entries {
                if index >= row_count {
                    vwarn!(index, row_count, "import_measurements: index out of range");
                    continue;
                }
                v.layout.measure(index, height);
            }
            v.notify();
        });
    }

    pub fn effective_buffer(&self) -> usize {
        window::effective_buffer(
            self.options.buffer_size,
            self.options.adaptive_buffer,
            self.viewport.container_height,
            self.options.min_height,
        )
    }

    pub fn start_index(&self, scroll_position: u64) -> usize {
        window::start_index(&self.layout, scroll_position, self.effective_buffer())
    }

    pub fn end_index(&self, scroll_position: u64) -> Option<usize> {
        window::end_index(
            &self.layout,
            scroll_position,
            self.viewport.container_height,
            self.effective_buffer(),
        )
    }

    /// The current window, or `None` for an empty list.
    pub fn window(&self) -> Option<Window> {
        self.window_for(self.viewport.scroll_position, self.viewport.container_height)
    }

    pub fn window_for(&self, scroll_position: u64, container_height: u32) -> Option<Window> {
        let buffer = window::effective_buffer(
            self.options.buffer_size,
            self.options.adaptive_buffer,
            container_height,
            self.options.min_height,
        );
        window::compute_window(&self.layout, scroll_position, container_height, buffer)
    }

    pub fn top_pos(&self, index: usize) -> u64 {
        self.layout.top_pos(index)
    }

    /// Total scroll-space height.
    pub fn scroll_adjust(&self) -> u64 {
        self.layout.scroll_adjust()
    }

    pub fn sentinel(&self) -> Sentinel {
        Sentinel {
            top: self.scroll_adjust(),
        }
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.layout.index_at_offset(offset)
    }

    pub fn max_scroll_position(&self) -> u64 {
        window::max_scroll_position(&self.layout, self.viewport.container_height)
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        window::scroll_to_index_offset(
            &self.layout,
            index,
            align,
            self.viewport.scroll_position,
            self.viewport.container_height,
        )
    }

    /// Moves the scroll position to row `index` (no throttling). Returns the applied offset.
    ///
    /// The host is expected to move its real container to the same offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_position(offset);
        offset
    }

    /// Visits every row of the current window in index order.
    pub fn for_each_row(&self, mut f: impl FnMut(RowSlot)) {
        let Some(window) = self.window() else {
            return;
        };
        let min_height = self.options.min_height;
        let mut top = self.layout.top_pos(window.start_index);
        for index in window.indices() {
            let height = self.layout.height(index);
            f(RowSlot {
                index,
                top,
                min_height,
                height,
            });
            top = top.saturating_add(height as u64);
        }
    }

    /// Collects the rows of the current window into `out` (clears `out` first).
    pub fn collect_rows(&self, out: &mut Vec<RowSlot>) {
        out.clear();
        self.for_each_row(|row| out.push(row));
    }

    pub fn frame(&self) -> Frame {
        let mut rows = Vec::new();
        self.collect_rows(&mut rows);
        Frame {
            rows,
            sentinel: self.sentinel(),
        }
    }

    /// Gathers the inputs of the bottom-reached predicate. `in_flight` is the number of
    /// engine-started requests that have not settled.
    pub fn bottom_probe(&self, in_flight: usize) -> BottomProbe {
        BottomProbe {
            has_more: self.options.has_more,
            loading: self.options.loading,
            in_flight,
            scroll_position: self.viewport.scroll_position,
            container_height: self.viewport.container_height,
            threshold: self.options.bottom_threshold,
            window: self.window(),
            row_count: self.row_count(),
        }
    }

    pub fn bottom_reached(&self, in_flight: usize) -> bool {
        self.bottom_probe(in_flight).is_reached()
    }
}

impl MeasurementSink for VirtualRows {
    fn container_resized(&mut self, height: u32) {
        self.set_container_height(height);
    }

    fn row_resized(&mut self, index: usize, height: u32) {
        self.measure(index, height);
    }
}
