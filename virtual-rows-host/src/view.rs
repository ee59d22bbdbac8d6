use virtual_rows::{
    Align, Frame, LoadPhase, RowSlot, ViewportState, VirtualRows, VirtualRowsOptions, Window,
};

use crate::{
    DataLoader, ElementLifecycle, LoadError, LoadTask, LoaderOptions, MeasurementBridge,
    RequestKind, ResizeObserver, RowHandle,
};

/// A framework-neutral virtualized list: the engine plus everything needed to wire it to a
/// host UI.
///
/// The host drives it by calling:
/// - `register_container` once, then `on_container_resize` / `on_row_resize` from its resize
///   notifications,
/// - `on_scroll` from scroll events and `tick(now_ms)` on every frame or timer tick,
/// - `attach` / `detach` when it mounts or unmounts the element of a row,
/// - `poll_load` after every update, spawning the returned [`LoadTask`] if any,
/// - `dispose` on teardown.
///
/// `frame` returns what to draw: the positioned rows of the window and the sentinel.
#[derive(Debug)]
pub struct VirtualView<H, O, E> {
    rows: VirtualRows,
    bridge: MeasurementBridge<H, O>,
    lifecycle: ElementLifecycle<H>,
    loader: DataLoader<E>,
    mounted: bool,
}

impl<H: RowHandle, O: ResizeObserver<H>, E> VirtualView<H, O, E> {
    pub fn new(options: VirtualRowsOptions, observer: O, loader: LoaderOptions<E>) -> Self {
        Self {
            rows: VirtualRows::new(options),
            bridge: MeasurementBridge::new(observer),
            lifecycle: ElementLifecycle::new(),
            loader: DataLoader::new(loader),
            mounted: true,
        }
    }

    pub fn rows(&self) -> &VirtualRows {
        &self.rows
    }

    pub fn bridge(&self) -> &MeasurementBridge<H, O> {
        &self.bridge
    }

    pub fn observer_mut(&mut self) -> &mut O {
        self.bridge.observer_mut()
    }

    pub fn lifecycle(&self) -> &ElementLifecycle<H> {
        &self.lifecycle
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn viewport(&self) -> ViewportState {
        self.rows.viewport()
    }

    pub fn window(&self) -> Option<Window> {
        self.rows.window()
    }

    pub fn frame(&self) -> Frame {
        self.rows.frame()
    }

    pub fn for_each_row(&self, f: impl FnMut(RowSlot)) {
        self.rows.for_each_row(f);
    }

    /// Engine-started requests still pending.
    pub fn in_flight(&self) -> usize {
        self.loader.in_flight()
    }

    pub fn phase(&self) -> LoadPhase {
        self.loader.phase()
    }

    /// Loading as seen by the bottom trigger: own requests or the caller's flag.
    pub fn is_loading(&self) -> bool {
        self.loader.in_flight() > 0 || self.rows.loading()
    }

    /// Applies caller-side option changes (row count, flags...) in one notification.
    pub fn update_options(&mut self, f: impl FnOnce(&mut VirtualRowsOptions)) {
        if !self.mounted {
            return;
        }
        self.rows.update_options(f);
        self.sync_window();
    }

    pub fn set_row_count(&mut self, row_count: usize) {
        if !self.mounted {
            return;
        }
        self.rows.set_row_count(row_count);
        self.sync_window();
    }

    pub fn set_has_more(&mut self, has_more: bool) {
        if self.mounted {
            self.rows.set_has_more(has_more);
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.mounted {
            self.rows.set_loading(loading);
        }
    }

    pub fn register_container(&mut self, handle: H) {
        if !self.mounted {
            return;
        }
        self.bridge.register_container(handle, &mut self.rows);
        self.sync_window();
    }

    pub fn on_container_resize(&mut self, height: u32) {
        if !self.mounted {
            return;
        }
        if !self.bridge.container_resized(height, &mut self.rows) {
            return;
        }
        // A width change can reflow rows without a per-row notification.
        vtrace!(height, observed = self.lifecycle.len(), "remeasure observed rows");
        let (bridge, lifecycle) = (&self.bridge, &self.lifecycle);
        self.rows.batch_update(|rows| {
            lifecycle.remeasure(bridge, rows);
        });
        self.sync_window();
    }

    pub fn on_row_resize(&mut self, handle: &H, height: u32) {
        if !self.mounted {
            return;
        }
        if self.bridge.row_resized(handle, height, &mut self.rows) {
            self.sync_window();
        }
    }

    /// Feeds a scroll event. Returns `true` when it was applied immediately rather than
    /// parked by the rate limiter.
    pub fn on_scroll(&mut self, scroll_position: u64, now_ms: u64) -> bool {
        if !self.mounted {
            return false;
        }
        let applied = self.rows.apply_scroll_event(scroll_position, now_ms);
        if applied {
            self.sync_window();
        }
        applied
    }

    /// Releases a parked scroll event once the rate limit allows it.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.mounted {
            return false;
        }
        let applied = self.rows.tick(now_ms);
        if applied {
            self.sync_window();
        }
        applied
    }

    /// Moves the engine to row `index` and returns the offset the host should scroll its
    /// container to.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<u64> {
        if !self.mounted {
            return None;
        }
        let offset = self.rows.scroll_to_index(index, align);
        self.sync_window();
        Some(offset)
    }

    /// Binds the host element of row `index` and measures it.
    pub fn attach(&mut self, index: usize, handle: H) -> bool {
        if !self.mounted {
            return false;
        }
        let window = self.rows.window();
        let attached =
            self.lifecycle
                .attach(index, handle, window, &mut self.bridge, &mut self.rows);
        if attached {
            self.sync_window();
        }
        attached
    }

    pub fn detach(&mut self, index: usize) -> Option<H> {
        if !self.mounted {
            return None;
        }
        self.lifecycle.detach(index, &mut self.bridge)
    }

    /// Starts a "load more" request when the bottom-reached condition holds.
    pub fn poll_load(&mut self) -> Result<Option<LoadTask<E>>, LoadError<E>> {
        if !self.mounted || !self.rows.bottom_reached(self.loader.in_flight()) {
            return Ok(None);
        }
        self.loader.request(RequestKind::NextPage)
    }

    /// Issues the mount-time request, regardless of scroll position. Skipped while loading.
    pub fn request_initial(&mut self) -> Result<Option<LoadTask<E>>, LoadError<E>> {
        if !self.mounted || self.is_loading() {
            return Ok(None);
        }
        self.loader.request(RequestKind::Initial)
    }

    /// Tears the view down: drops every subscription and freezes the engine state. Later
    /// host callbacks are ignored. Requests in flight are not cancelled.
    pub fn dispose(&mut self) {
        if !self.mounted {
            return;
        }
        vdebug!(observed = self.lifecycle.len(), "VirtualView::dispose");
        self.mounted = false;
        self.loader.dispose();
        self.bridge.dispose();
        self.lifecycle.clear();
    }

    fn sync_window(&mut self) {
        let window = self.rows.window();
        self.lifecycle.reconcile(window, &mut self.bridge);
    }
}

impl<H, O, E> Drop for VirtualView<H, O, E> {
    fn drop(&mut self) {
        self.loader.dispose();
    }
}
