/// Receiver of size observations, one method per channel.
///
/// The measurement bridge forwards container and row resize notifications here; the engine
/// implements it by updating the viewport and the row height registry.
pub trait MeasurementSink {
    fn container_resized(&mut self, height: u32);

    fn row_resized(&mut self, index: usize, height: u32);
}
