// Example: persisting learned heights across a remount.
use virtual_rows::{VirtualRows, VirtualRowsOptions};

fn main() {
    let mut v = VirtualRows::new(VirtualRowsOptions::new(200));
    v.set_container_height(500);
    v.measure_many([(0, 90), (1, 140), (2, 75)]);
    v.set_scroll_position(400);

    let snapshot = v.export_measurements();
    let viewport = v.viewport();
    println!("snapshot: {} entries", snapshot.entries.len());

    let mut restored = VirtualRows::new(VirtualRowsOptions::new(200));
    restored.import_measurements(&snapshot);
    restored.restore_viewport(viewport);

    assert_eq!(restored.window(), v.window());
    println!("restored window={:?} scroll_adjust={}", restored.window(), restored.scroll_adjust());
}
