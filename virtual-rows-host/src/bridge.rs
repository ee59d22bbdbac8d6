use std::collections::HashMap;

use virtual_rows::MeasurementSink;

use crate::{ResizeObserver, RowHandle};

/// Routes size notifications from the host into a [`MeasurementSink`].
///
/// Two channels:
/// - the container channel reports the scroll container's height,
/// - the row channel reports heights of row elements, each tagged with its row index.
///
/// A handle carries at most one tag and a row index is held by at most one handle. Retagging
/// drops the old subscription first, so a resize that arrives while the window slides is never
/// credited to the previous row.
///
/// After [`MeasurementBridge::dispose`] every method is a silent no-op.
#[derive(Debug)]
pub struct MeasurementBridge<H, O> {
    observer: O,
    container: Option<H>,
    tags: HashMap<H, usize>,
    rows: HashMap<usize, H>,
    disposed: bool,
}

impl<H: RowHandle, O: ResizeObserver<H>> MeasurementBridge<H, O> {
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            container: None,
            tags: HashMap::new(),
            rows: HashMap::new(),
            disposed: false,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn container(&self) -> Option<&H> {
        self.container.as_ref()
    }

    /// Number of tagged row handles.
    pub fn tagged_len(&self) -> usize {
        self.tags.len()
    }

    pub fn tagged_index(&self, handle: &H) -> Option<usize> {
        self.tags.get(handle).copied()
    }

    pub fn tagged_handle(&self, index: usize) -> Option<&H> {
        self.rows.get(&index)
    }

    /// Starts observing the scroll container and forwards its current height.
    ///
    /// A previously registered container is unobserved first.
    pub fn register_container(&mut self, handle: H, sink: &mut impl MeasurementSink) {
        if self.disposed {
            vwarn!("register_container after dispose");
            return;
        }
        if let Some(prev) = self.container.take() {
            if prev != handle {
                self.observer.unobserve(&prev);
            }
        }
        self.observer.observe(&handle);
        if let Some(height) = self.observer.height(&handle) {
            sink.container_resized(height);
        }
        self.container = Some(handle);
    }

    /// Container channel: the scroll container now is `height` tall.
    pub fn container_resized(&self, height: u32, sink: &mut impl MeasurementSink) -> bool {
        if self.disposed || self.container.is_none() {
            return false;
        }
        sink.container_resized(height);
        true
    }

    /// Subscribes `handle` as row `index` and forwards an initial height read.
    ///
    /// A previous tag of `handle` and a different handle holding `index` are both dropped
    /// first. Returns the height read, if any.
    pub fn tag_row(
        &mut self,
        index: usize,
        handle: H,
        sink: &mut impl MeasurementSink,
    ) -> Option<u32> {
        if self.disposed {
            vwarn!(index, "tag_row after dispose");
            return None;
        }
        match self.tags.get(&handle).copied() {
            Some(prev) if prev == index => {}
            prev => {
                if let Some(prev) = prev {
                    vtrace!(from = prev, to = index, "retag row handle");
                    self.observer.unobserve(&handle);
                    self.tags.remove(&handle);
                    self.rows.remove(&prev);
                }
                if let Some(holder) = self.rows.remove(&index) {
                    vtrace!(index, "replace row handle");
                    self.observer.unobserve(&holder);
                    self.tags.remove(&holder);
                }
                self.subscribe(index, handle.clone());
            }
        }

        let height = self.observer.height(&handle)?;
        sink.row_resized(index, height);
        Some(height)
    }

    /// Drops the subscription of `handle`. Returns the index it was tagged with.
    pub fn untag(&mut self, handle: &H) -> Option<usize> {
        if self.disposed {
            return None;
        }
        let index = self.tags.remove(handle)?;
        self.rows.remove(&index);
        self.observer.unobserve(handle);
        Some(index)
    }

    /// Row channel: `handle` now is `height` tall. Untagged handles are ignored.
    pub fn row_resized(&self, handle: &H, height: u32, sink: &mut impl MeasurementSink) -> bool {
        if self.disposed {
            return false;
        }
        let Some(&index) = self.tags.get(handle) else {
            return false;
        };
        sink.row_resized(index, height);
        true
    }

    /// Drops every subscription. Later notifications are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        vdebug!(tagged = self.tags.len(), "MeasurementBridge::dispose");
        self.observer.disconnect();
        self.tags.clear();
        self.rows.clear();
        self.container = None;
        self.disposed = true;
    }

    fn subscribe(&mut self, index: usize, handle: H) {
        self.observer.observe(&handle);
        self.rows.insert(index, handle.clone());
        self.tags.insert(handle, index);
    }
}
