// Example: window, positions and measurement of a variable-height list.
use virtual_rows::{Align, VirtualRows, VirtualRowsOptions};

fn main() {
    let mut v = VirtualRows::new(VirtualRowsOptions::new(10_000).with_min_height(40));
    v.set_container_height(600);
    v.set_scroll_position(12_000);

    println!("window={:?}", v.window());
    println!("sentinel={:?}", v.sentinel());

    // A row reported taller than the minimum pushes every later row down.
    let before = v.top_pos(301);
    v.measure(300, 120);
    println!("top_pos(301): {before} -> {}", v.top_pos(301));

    v.for_each_row(|row| {
        if row.index % 5 == 0 {
            println!("row {} at {}..{}", row.index, row.top, row.bottom());
        }
    });

    let to = v.scroll_to_index(9_999, Align::End);
    println!("scroll_to_index(9999): offset={to} window={:?}", v.window());
}
