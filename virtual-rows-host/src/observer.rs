/// The host's size-change notification primitive.
///
/// `observe` subscribes an element; from then on the host reports its size changes through
/// the matching `VirtualView` (or `MeasurementBridge`) callback until `unobserve` or
/// `disconnect`.
pub trait ResizeObserver<H> {
    fn observe(&mut self, handle: &H);

    fn unobserve(&mut self, handle: &H);

    /// Drops every subscription at once.
    fn disconnect(&mut self) {}

    /// Reads the element's current height, if it is laid out.
    fn height(&self, handle: &H) -> Option<u32>;
}
