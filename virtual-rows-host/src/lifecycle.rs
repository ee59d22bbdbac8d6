use std::collections::BTreeMap;

use virtual_rows::{MeasurementSink, Window};

use crate::{MeasurementBridge, ResizeObserver, RowHandle};

/// Keeps the set of observed row elements in step with the window.
///
/// This is the imperative form of a ref callback: the host calls [`attach`] when it mounts an
/// element for a row and [`detach`] when it unmounts it. Rows that leave the window are
/// unsubscribed on the next [`reconcile`], while their measured heights stay in the registry.
///
/// [`attach`]: ElementLifecycle::attach
/// [`detach`]: ElementLifecycle::detach
/// [`reconcile`]: ElementLifecycle::reconcile
#[derive(Clone, Debug)]
pub struct ElementLifecycle<H> {
    observed: BTreeMap<usize, H>,
}

impl<H> Default for ElementLifecycle<H> {
    fn default() -> Self {
        Self {
            observed: BTreeMap::new(),
        }
    }
}

impl<H: RowHandle> ElementLifecycle<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn observed(&self, index: usize) -> Option<&H> {
        self.observed.get(&index)
    }

    pub fn observed_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.observed.keys().copied()
    }

    /// Binds `handle` to row `index`.
    ///
    /// A different handle already bound to `index` is unsubscribed first. If `handle` was
    /// bound to another row, that binding moves. The bridge then performs an initial height
    /// read so content already at its natural size is measured without waiting for a resize
    /// notification. Returns `false` when nothing changed or `index` is outside the window.
    pub fn attach<O: ResizeObserver<H>>(
        &mut self,
        index: usize,
        handle: H,
        window: Option<Window>,
        bridge: &mut MeasurementBridge<H, O>,
        sink: &mut impl MeasurementSink,
    ) -> bool {
        if !window.is_some_and(|w| w.contains(index)) {
            vwarn!(index, "attach outside of window");
            return false;
        }
        if self.observed.get(&index) == Some(&handle) {
            return false;
        }

        if let Some(prev) = self.observed.remove(&index) {
            bridge.untag(&prev);
        }
        if let Some(moved_from) = bridge.tagged_index(&handle) {
            if self.observed.get(&moved_from) == Some(&handle) {
                self.observed.remove(&moved_from);
            }
        }

        bridge.tag_row(index, handle.clone(), sink);
        self.observed.insert(index, handle);
        true
    }

    /// Unbinds row `index`. Returns the handle that was bound.
    pub fn detach<O: ResizeObserver<H>>(
        &mut self,
        index: usize,
        bridge: &mut MeasurementBridge<H, O>,
    ) -> Option<H> {
        let handle = self.observed.remove(&index)?;
        bridge.untag(&handle);
        Some(handle)
    }

    /// Unbinds every row outside `window`. Returns how many were dropped.
    pub fn reconcile<O: ResizeObserver<H>>(
        &mut self,
        window: Option<Window>,
        bridge: &mut MeasurementBridge<H, O>,
    ) -> usize {
        let before = self.observed.len();
        self.observed.retain(|&index, handle| {
            let keep = window.is_some_and(|w| w.contains(index));
            if !keep {
                bridge.untag(handle);
            }
            keep
        });
        let dropped = before - self.observed.len();
        if dropped > 0 {
            vtrace!(dropped, "reconcile");
        }
        dropped
    }

    /// Reads the current height of every observed row and forwards it to `sink`.
    ///
    /// Used after the container resized: a width change can reflow row content without any
    /// per-row notification. Returns how many heights were read.
    pub fn remeasure<O: ResizeObserver<H>>(
        &self,
        bridge: &MeasurementBridge<H, O>,
        sink: &mut impl MeasurementSink,
    ) -> usize {
        if bridge.is_disposed() {
            return 0;
        }
        let mut read = 0;
        for (&index, handle) in &self.observed {
            if let Some(height) = bridge.observer().height(handle) {
                sink.row_resized(index, height);
                read += 1;
            }
        }
        read
    }

    /// Forgets every binding without touching the bridge (used on teardown).
    pub fn clear(&mut self) {
        self.observed.clear();
    }
}
