// Example: driving a `VirtualView` with a fake host and an async page loader.
use std::cell::RefCell;
use std::rc::Rc;

use virtual_rows_host::virtual_rows::VirtualRowsOptions;
use virtual_rows_host::{DataRequest, LoaderOptions, ResizeObserver, VirtualView};

const CONTAINER: u64 = u64::MAX;

/// Every row element is 80 tall, the container 400.
struct FixedLayout;

impl ResizeObserver<u64> for FixedLayout {
    fn observe(&mut self, _: &u64) {}

    fn unobserve(&mut self, _: &u64) {}

    fn height(&self, handle: &u64) -> Option<u32> {
        Some(if *handle == CONTAINER { 400 } else { 80 })
    }
}

#[derive(Debug)]
struct Offline;

fn main() {
    let pages = Rc::new(RefCell::new(1usize));
    let loader = LoaderOptions::new({
        let pages = Rc::clone(&pages);
        move |kind| {
            println!("request {kind:?}");
            let pages = Rc::clone(&pages);
            DataRequest::pending(async move {
                *pages.borrow_mut() += 1;
                Ok::<(), Offline>(())
            })
        }
    })
    .with_on_load_end(|ok| println!("load end: ok={ok}"));

    let mut view = VirtualView::new(VirtualRowsOptions::new(20), FixedLayout, loader);
    view.register_container(CONTAINER);

    for now_ms in (0..2_000u64).step_by(100) {
        let target = (now_ms * 2).min(view.rows().max_scroll_position());
        view.on_scroll(target, now_ms);
        view.tick(now_ms);

        // Mount an element for every row in the window.
        let frame = view.frame();
        for row in &frame.rows {
            view.attach(row.index, row.index as u64);
        }

        if let Ok(Some(task)) = view.poll_load() {
            if pollster::block_on(task).is_ok() {
                let rows = *pages.borrow() * 20;
                view.set_row_count(rows);
            }
        }
        println!(
            "t={now_ms} window={:?} rows={} sentinel={}",
            view.window(),
            view.rows().row_count(),
            frame.sentinel.top
        );
    }

    view.dispose();
}
