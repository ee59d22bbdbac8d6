use crate::*;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::future;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::Poll;

use proptest::prelude::*;
use virtual_rows::{Align, LoadPhase, VirtualRowsOptions};

const CONTAINER: u32 = 0;

#[derive(Debug, Default)]
struct FakeObserver {
    heights: HashMap<u32, u32>,
    observed: BTreeSet<u32>,
    unobserved: Vec<u32>,
    disconnected: bool,
}

impl FakeObserver {
    fn with_heights(heights: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            heights: heights.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl ResizeObserver<u32> for FakeObserver {
    fn observe(&mut self, handle: &u32) {
        self.observed.insert(*handle);
    }

    fn unobserve(&mut self, handle: &u32) {
        self.observed.remove(handle);
        self.unobserved.push(*handle);
    }

    fn disconnect(&mut self) {
        self.observed.clear();
        self.disconnected = true;
    }

    fn height(&self, handle: &u32) -> Option<u32> {
        self.heights.get(handle).copied()
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("backend unavailable")]
struct Unavailable;

type View = VirtualView<u32, FakeObserver, Unavailable>;

type Gate = Rc<RefCell<Option<Result<(), Unavailable>>>>;

/// A request that stays pending until the test opens the gate.
fn gated(gate: &Gate) -> DataRequest<Unavailable> {
    let gate = Rc::clone(gate);
    DataRequest::pending(future::poll_fn(move |_| match gate.borrow_mut().take() {
        Some(result) => Poll::Ready(result),
        None => Poll::Pending,
    }))
}

fn rows(row_count: usize) -> VirtualRows {
    let mut rows = VirtualRows::new(VirtualRowsOptions::new(row_count));
    rows.set_container_height(500);
    rows
}

fn view_with(row_count: usize, loader: LoaderOptions<Unavailable>) -> View {
    let observer = FakeObserver::with_heights([(CONTAINER, 500)]);
    let mut view = VirtualView::new(VirtualRowsOptions::new(row_count), observer, loader);
    view.register_container(CONTAINER);
    view
}

/// 50 rows of 60 in a 500 container, scrolled to the end: the bottom is reached.
fn view_at_bottom(loader: LoaderOptions<Unavailable>) -> View {
    let mut view = view_with(50, loader);
    assert!(view.on_scroll(2600, 0));
    assert!(view.rows().bottom_reached(0));
    view
}

#[test]
fn bridge_forwards_container_and_row_heights() {
    let mut sink = VirtualRows::new(VirtualRowsOptions::new(20));
    let mut bridge = MeasurementBridge::new(FakeObserver::with_heights([
        (CONTAINER, 480),
        (1, 120),
    ]));

    bridge.register_container(CONTAINER, &mut sink);
    assert_eq!(sink.container_height(), 480);
    assert!(bridge.container_resized(300, &mut sink));
    assert_eq!(sink.container_height(), 300);

    assert_eq!(bridge.tag_row(0, 1, &mut sink), Some(120));
    assert_eq!(sink.row_height(0), 120);
    assert!(bridge.row_resized(&1, 150, &mut sink));
    assert_eq!(sink.row_height(0), 150);

    // Unknown handle: ignored.
    assert!(!bridge.row_resized(&9, 300, &mut sink));
    assert_eq!(sink.registry().measured_len(), 1);
}

#[test]
fn bridge_without_container_ignores_container_channel() {
    let mut sink = VirtualRows::new(VirtualRowsOptions::new(20));
    let bridge = MeasurementBridge::<u32, _>::new(FakeObserver::default());
    assert!(!bridge.container_resized(300, &mut sink));
    assert_eq!(sink.container_height(), 0);
}

#[test]
fn bridge_replaces_container_subscription() {
    let mut sink = VirtualRows::new(VirtualRowsOptions::new(20));
    let mut bridge = MeasurementBridge::new(FakeObserver::with_heights([(10, 400), (11, 700)]));
    bridge.register_container(10, &mut sink);
    bridge.register_container(11, &mut sink);

    assert_eq!(bridge.container(), Some(&11));
    assert_eq!(bridge.observer().unobserved, vec![10]);
    assert_eq!(sink.container_height(), 700);
}

#[test]
fn retagging_a_handle_drops_the_old_tag() {
    let mut sink = VirtualRows::new(VirtualRowsOptions::new(20));
    let mut bridge = MeasurementBridge::new(FakeObserver::with_heights([(7, 120)]));

    bridge.tag_row(0, 7, &mut sink);
    bridge.tag_row(3, 7, &mut sink);
    assert_eq!(bridge.tagged_index(&7), Some(3));
    assert_eq!(bridge.tagged_len(), 1);
    assert_eq!(bridge.observer().unobserved, vec![7]);
    assert!(bridge.observer().observed.contains(&7));

    // A late resize is credited to the new row only.
    assert!(bridge.row_resized(&7, 200, &mut sink));
    assert_eq!(sink.row_height(3), 200);
    assert_eq!(sink.row_height(0), 120);

    // Same index again: no resubscription.
    bridge.tag_row(3, 7, &mut sink);
    assert_eq!(bridge.observer().unobserved.len(), 1);
}

#[test]
fn tagging_a_held_row_drops_the_previous_handle() {
    let mut sink = VirtualRows::new(VirtualRowsOptions::new(20));
    let mut bridge = MeasurementBridge::new(FakeObserver::with_heights([(7, 120), (8, 90)]));

    bridge.tag_row(3, 7, &mut sink);
    bridge.tag_row(3, 8, &mut sink);
    assert_eq!(bridge.tagged_len(), 1);
    assert_eq!(bridge.tagged_index(&7), None);
    assert_eq!(bridge.tagged_handle(3), Some(&8));
    assert!(!bridge.observer().observed.contains(&7));
    assert_eq!(bridge.observer().unobserved, vec![7]);

    // The replaced element no longer reports into row 3.
    assert!(!bridge.row_resized(&7, 300, &mut sink));
    assert_eq!(sink.row_height(3), 90);

    // Moving a handle frees its old row.
    bridge.tag_row(5, 8, &mut sink);
    assert_eq!(bridge.tagged_handle(3), None);
    assert_eq!(bridge.tagged_handle(5), Some(&8));
    assert_eq!(bridge.untag(&8), Some(5));
    assert_eq!(bridge.tagged_handle(5), None);
}

#[test]
fn row_without_layout_is_subscribed_but_not_measured() {
    let mut sink = VirtualRows::new(VirtualRowsOptions::new(20));
    let mut bridge = MeasurementBridge::new(FakeObserver::default());
    assert_eq!(bridge.tag_row(2, 5, &mut sink), None);
    assert_eq!(bridge.tagged_index(&5), Some(2));
    assert!(!sink.is_measured(2));
}

#[test]
fn bridge_is_inert_after_dispose() {
    let mut sink = VirtualRows::new(VirtualRowsOptions::new(20));
    let mut bridge =
        MeasurementBridge::new(FakeObserver::with_heights([(CONTAINER, 500), (1, 90)]));
    bridge.register_container(CONTAINER, &mut sink);
    bridge.tag_row(0, 1, &mut sink);

    bridge.dispose();
    assert!(bridge.is_disposed());
    assert!(bridge.observer().disconnected);
    assert_eq!(bridge.tagged_len(), 0);

    assert!(!bridge.container_resized(100, &mut sink));
    assert!(!bridge.row_resized(&1, 300, &mut sink));
    assert_eq!(bridge.tag_row(1, 1, &mut sink), None);
    assert_eq!(sink.container_height(), 500);
    assert_eq!(sink.row_height(0), 90);

    bridge.dispose();
}

#[test]
fn attach_reads_initial_height_inside_window() {
    let mut sink = rows(100);
    let mut bridge = MeasurementBridge::new(FakeObserver::with_heights([(100, 140)]));
    let mut lifecycle = ElementLifecycle::new();

    let window = sink.window();
    assert_eq!(window.map(|w| w.end_index), Some(13));
    assert!(lifecycle.attach(0, 100, window, &mut bridge, &mut sink));
    assert_eq!(sink.row_height(0), 140);
    assert_eq!(lifecycle.observed(0), Some(&100));

    // Same handle, same row: nothing to do.
    assert!(!lifecycle.attach(0, 100, sink.window(), &mut bridge, &mut sink));

    // Outside the window: refused.
    assert!(!lifecycle.attach(20, 101, sink.window(), &mut bridge, &mut sink));
    assert_eq!(bridge.tagged_index(&101), None);
}

#[test]
fn attach_replaces_and_moves_bindings() {
    let mut sink = rows(100);
    let mut bridge = MeasurementBridge::new(FakeObserver::default());
    let mut lifecycle = ElementLifecycle::new();

    lifecycle.attach(1, 100, sink.window(), &mut bridge, &mut sink);
    // A new element for row 1 replaces the old one.
    lifecycle.attach(1, 101, sink.window(), &mut bridge, &mut sink);
    assert_eq!(lifecycle.observed(1), Some(&101));
    assert_eq!(bridge.tagged_index(&100), None);
    assert_eq!(bridge.observer().unobserved, vec![100]);

    // The element is reused for row 4.
    lifecycle.attach(4, 101, sink.window(), &mut bridge, &mut sink);
    assert_eq!(lifecycle.observed(1), None);
    assert_eq!(lifecycle.observed(4), Some(&101));
    assert_eq!(bridge.tagged_index(&101), Some(4));
    assert_eq!(lifecycle.len(), bridge.tagged_len());

    assert_eq!(lifecycle.detach(4, &mut bridge), Some(101));
    assert!(lifecycle.is_empty());
    assert_eq!(bridge.tagged_len(), 0);
    assert_eq!(lifecycle.detach(4, &mut bridge), None);
}

#[test]
fn reconcile_drops_rows_leaving_the_window_but_keeps_heights() {
    let heights = (0..14).map(|i| (100 + i, 90));
    let mut sink = rows(100);
    let mut bridge = MeasurementBridge::new(FakeObserver::with_heights(heights));
    let mut lifecycle = ElementLifecycle::new();
    for i in 0..14u32 {
        lifecycle.attach(i as usize, 100 + i, sink.window(), &mut bridge, &mut sink);
    }
    assert_eq!(lifecycle.len(), bridge.tagged_len());
    assert!(lifecycle.len() > 0);

    assert_eq!(lifecycle.reconcile(sink.window(), &mut bridge), 0);

    sink.set_scroll_position(4000);
    let attached = lifecycle.len();
    assert_eq!(lifecycle.reconcile(sink.window(), &mut bridge), attached);
    assert!(lifecycle.is_empty());
    assert_eq!(bridge.tagged_len(), 0);
    assert!(bridge.observer().observed.is_empty());
    assert_eq!(sink.row_height(0), 90);
    assert!(sink.is_measured(0));
}

#[test]
fn view_tracks_elements_through_scrolling() {
    let mut view = view_with(100, LoaderOptions::default());
    let window = view.window().unwrap();
    for i in window.indices() {
        assert!(view.attach(i, 100 + i as u32));
    }
    assert_eq!(view.lifecycle().len(), window.len());

    view.on_row_resize(&100, 200);
    assert_eq!(view.rows().row_height(0), 200);
    assert_eq!(view.rows().top_pos(1), 200);

    view.on_scroll(5000, 0);
    assert!(view.lifecycle().is_empty());
    assert_eq!(view.bridge().tagged_len(), 0);
    assert_eq!(view.rows().row_height(0), 200);

    // Resize for an element that was unsubscribed: ignored.
    view.on_row_resize(&101, 300);
    assert!(!view.rows().is_measured(1));
}

#[test]
fn view_scroll_events_are_rate_limited() {
    let mut view = view_with(100, LoaderOptions::default());
    assert!(view.on_scroll(100, 0));
    assert!(!view.on_scroll(200, 10));
    assert!(!view.on_scroll(300, 20));
    assert_eq!(view.viewport().scroll_position, 100);

    assert!(!view.tick(30));
    assert!(view.tick(50));
    assert_eq!(view.viewport().scroll_position, 300);
}

#[test]
fn view_scroll_to_index_moves_window() {
    let mut view = view_with(100, LoaderOptions::default());
    view.attach(0, 100);

    assert_eq!(view.scroll_to_index(50, Align::Start), Some(3000));
    assert_eq!(view.viewport().scroll_position, 3000);
    assert!(view.window().unwrap().contains(50));
    assert!(view.lifecycle().is_empty());
}

#[test]
fn view_container_resize_updates_window() {
    let mut view = view_with(100, LoaderOptions::default());
    assert_eq!(view.window().map(|w| w.end_index), Some(13));
    view.on_container_resize(1000);
    assert_eq!(view.viewport().container_height, 1000);
    assert_eq!(view.window().map(|w| w.end_index), Some(21));
}

#[test]
fn container_resize_remeasures_observed_rows() {
    let mut view = view_with(100, LoaderOptions::default());
    for i in 0..3u32 {
        assert!(view.attach(i as usize, 100 + i));
    }
    assert_eq!(view.rows().registry().measured_len(), 0);

    // Rows reflow after a width change; only the container reports.
    view.observer_mut().heights.extend([(100, 150), (101, 90)]);
    view.on_container_resize(400);

    assert_eq!(view.viewport().container_height, 400);
    assert_eq!(view.rows().row_height(0), 150);
    assert_eq!(view.rows().row_height(1), 90);
    assert!(!view.rows().is_measured(2));
    assert_eq!(view.rows().top_pos(2), 240);
}

#[test]
fn container_resize_remeasure_notifies_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let options = VirtualRowsOptions::new(100).with_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &VirtualRows| {
            calls.fetch_add(1, Ordering::SeqCst);
        }
    }));
    let observer = FakeObserver::with_heights([(CONTAINER, 500)]);
    let mut view: View = VirtualView::new(options, observer, LoaderOptions::default());
    view.register_container(CONTAINER);
    view.attach(0, 100);
    view.attach(1, 101);
    view.observer_mut().heights.extend([(100, 150), (101, 90)]);

    calls.store(0, Ordering::SeqCst);
    view.on_container_resize(400);
    // One for the container height, one for the batched row heights.
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn exactly_one_request_while_pending() {
    let calls = Rc::new(Cell::new(0usize));
    let gate: Gate = Rc::default();
    let loader = LoaderOptions::new({
        let calls = Rc::clone(&calls);
        let gate = Rc::clone(&gate);
        move |kind| {
            assert_eq!(kind, RequestKind::NextPage);
            calls.set(calls.get() + 1);
            gated(&gate)
        }
    });
    let mut view = view_at_bottom(loader);

    let task = view.poll_load().unwrap().expect("request started");
    assert_eq!(view.in_flight(), 1);
    assert_eq!(view.phase(), LoadPhase::Requesting);
    assert!(view.is_loading());

    for now_ms in [100, 200, 300] {
        view.on_scroll(2600 - now_ms, now_ms);
        view.on_scroll(2600, now_ms + 60);
        assert!(view.poll_load().unwrap().is_none());
    }
    assert_eq!(calls.get(), 1);

    *gate.borrow_mut() = Some(Ok(()));
    assert_eq!(pollster::block_on(task), Ok(()));
    assert_eq!(view.in_flight(), 0);
    assert_eq!(view.phase(), LoadPhase::Idle);

    // Still at the bottom: the next page can be requested.
    let task = view.poll_load().unwrap().expect("second request");
    assert_eq!(calls.get(), 2);

    // Abandoning the task releases the counter.
    drop(task);
    assert_eq!(view.in_flight(), 0);
}

#[test]
fn no_request_without_more_data_or_while_loading_externally() {
    let calls = Rc::new(Cell::new(0usize));
    let loader = LoaderOptions::new({
        let calls = Rc::clone(&calls);
        move |_| {
            calls.set(calls.get() + 1);
            DataRequest::done()
        }
    });
    let mut view = view_at_bottom(loader);

    view.set_has_more(false);
    assert!(view.poll_load().unwrap().is_none());
    view.set_has_more(true);

    view.set_loading(true);
    assert!(view.is_loading());
    assert!(view.poll_load().unwrap().is_none());
    assert!(view.request_initial().unwrap().is_none());
    assert_eq!(calls.get(), 0);

    view.set_loading(false);
    assert!(view.poll_load().unwrap().is_none());
    assert_eq!(calls.get(), 1);
}

#[test]
fn no_request_away_from_the_bottom() {
    let calls = Rc::new(Cell::new(0usize));
    let loader = LoaderOptions::new({
        let calls = Rc::clone(&calls);
        move |_| {
            calls.set(calls.get() + 1);
            DataRequest::done()
        }
    });
    let mut view = view_with(50, loader);
    assert!(view.poll_load().unwrap().is_none());
    assert_eq!(calls.get(), 0);
}

#[test]
fn synchronous_request_fires_hooks_in_order() {
    let events = Rc::new(RefCell::new(Vec::<String>::new()));
    let loader = LoaderOptions::new(|_| DataRequest::done())
        .with_on_load_start({
            let events = Rc::clone(&events);
            move || events.borrow_mut().push("start".into())
        })
        .with_on_load_end({
            let events = Rc::clone(&events);
            move |ok| events.borrow_mut().push(format!("end:{ok}"))
        });
    let mut view = view_at_bottom(loader);

    assert!(view.poll_load().unwrap().is_none());
    assert_eq!(*events.borrow(), ["start", "end:true"]);
    assert_eq!(view.in_flight(), 0);
}

#[test]
fn failed_request_goes_to_fallback_by_default() {
    let events = Rc::new(RefCell::new(Vec::<String>::new()));
    let loader = LoaderOptions::new(|_| DataRequest::Ready(Err(Unavailable)))
        .with_fallback({
            let events = Rc::clone(&events);
            move |e: &Unavailable| events.borrow_mut().push(format!("fallback:{e}"))
        })
        .with_on_load_end({
            let events = Rc::clone(&events);
            move |ok| events.borrow_mut().push(format!("end:{ok}"))
        });
    let mut view = view_at_bottom(loader);

    assert!(view.poll_load().is_ok());
    assert_eq!(
        *events.borrow(),
        ["fallback:backend unavailable", "end:false"]
    );
    assert_eq!(view.in_flight(), 0);
}

#[test]
fn failed_request_is_returned_with_throw_error() {
    let ended = Rc::new(Cell::new(None));
    let fallback_calls = Rc::new(Cell::new(0usize));
    let gate: Gate = Rc::default();
    let loader = LoaderOptions::new({
        let gate = Rc::clone(&gate);
        move |_| gated(&gate)
    })
    .with_throw_error(true)
    .with_fallback({
        let fallback_calls = Rc::clone(&fallback_calls);
        move |_: &Unavailable| fallback_calls.set(fallback_calls.get() + 1)
    })
    .with_on_load_end({
        let ended = Rc::clone(&ended);
        move |ok| ended.set(Some(ok))
    });
    let mut view = view_at_bottom(loader);

    let task = view.poll_load().unwrap().expect("request started");
    *gate.borrow_mut() = Some(Err(Unavailable));
    let err = pollster::block_on(task).unwrap_err();
    assert_eq!(err.to_string(), "data request rejected");
    assert_eq!(err.into_inner(), Unavailable);

    assert_eq!(ended.get(), Some(false));
    assert_eq!(fallback_calls.get(), 0);
    assert_eq!(view.in_flight(), 0);
}

#[test]
fn synchronous_failure_with_throw_error_is_returned_directly() {
    let loader = LoaderOptions::new(|_| DataRequest::Ready(Err(Unavailable))).with_throw_error(true);
    let mut view = view_at_bottom(loader);
    assert!(matches!(
        view.poll_load(),
        Err(LoadError::Rejected(Unavailable))
    ));
    assert_eq!(view.in_flight(), 0);
}

#[test]
fn initial_request_ignores_scroll_position() {
    let kinds = Rc::new(RefCell::new(Vec::new()));
    let gate: Gate = Rc::default();
    let loader = LoaderOptions::new({
        let kinds = Rc::clone(&kinds);
        let gate = Rc::clone(&gate);
        move |kind| {
            kinds.borrow_mut().push(kind);
            gated(&gate)
        }
    });
    let mut view = view_with(0, loader);

    let task = view.request_initial().unwrap().expect("initial request");
    assert!(view.request_initial().unwrap().is_none());
    assert_eq!(*kinds.borrow(), [RequestKind::Initial]);

    *gate.borrow_mut() = Some(Ok(()));
    assert!(pollster::block_on(task).is_ok());
    assert_eq!(view.in_flight(), 0);
}

#[test]
fn loader_without_callback_settles_immediately() {
    let started = Rc::new(Cell::new(false));
    let mut loader = DataLoader::<Unavailable>::new(LoaderOptions::default().with_on_load_start({
        let started = Rc::clone(&started);
        move || started.set(true)
    }));
    assert!(loader.request(RequestKind::NextPage).unwrap().is_none());
    assert!(started.get());
    assert_eq!(loader.in_flight(), 0);
}

#[test]
fn teardown_freezes_state_and_lets_requests_finish() {
    let ended = Rc::new(Cell::new(None));
    let gate: Gate = Rc::default();
    let loader = LoaderOptions::new({
        let gate = Rc::clone(&gate);
        move |_| gated(&gate)
    })
    .with_on_load_end({
        let ended = Rc::clone(&ended);
        move |ok| ended.set(Some(ok))
    });
    let mut view = view_at_bottom(loader);
    let window = view.window().unwrap();
    view.attach(window.end_index, 149);
    view.on_row_resize(&149, 90);
    let task = view.poll_load().unwrap().expect("request started");

    let viewport = view.viewport();
    let measured = view.rows().registry().measured_len();

    view.dispose();
    assert!(!view.is_mounted());
    assert!(view.bridge().is_disposed());
    assert!(view.bridge().observer().disconnected);
    assert!(view.lifecycle().is_empty());

    // Late host callbacks do nothing.
    assert!(!view.on_scroll(0, 1000));
    assert!(!view.tick(2000));
    view.on_container_resize(100);
    view.on_row_resize(&149, 300);
    view.register_container(CONTAINER);
    view.set_row_count(10);
    assert!(!view.attach(window.start_index, 150));
    assert_eq!(view.detach(window.end_index), None);
    assert_eq!(view.scroll_to_index(0, Align::Start), None);
    assert!(view.poll_load().unwrap().is_none());
    assert!(view.request_initial().unwrap().is_none());

    assert_eq!(view.viewport(), viewport);
    assert_eq!(view.rows().registry().measured_len(), measured);
    assert_eq!(view.rows().row_count(), 50);

    // The pending request completes and its hooks still run.
    *gate.borrow_mut() = Some(Ok(()));
    assert_eq!(pollster::block_on(task), Ok(()));
    assert_eq!(ended.get(), Some(true));

    view.dispose();
}

#[test]
fn dropping_the_view_does_not_break_pending_requests() {
    let ended = Rc::new(Cell::new(None));
    let gate: Gate = Rc::default();
    let loader = LoaderOptions::new({
        let gate = Rc::clone(&gate);
        move |_| gated(&gate)
    })
    .with_on_load_end({
        let ended = Rc::clone(&ended);
        move |ok| ended.set(Some(ok))
    });
    let mut view = view_at_bottom(loader);
    let task = view.poll_load().unwrap().expect("request started");
    drop(view);

    *gate.borrow_mut() = Some(Err(Unavailable));
    assert_eq!(pollster::block_on(task), Ok(()));
    assert_eq!(ended.get(), Some(false));
}

#[derive(Clone, Debug)]
enum Op {
    Scroll(u64),
    Container(u32),
    Attach(usize, u32),
    Detach(usize),
    Resize(u32, u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..8000).prop_map(Op::Scroll),
        (0u32..1200).prop_map(Op::Container),
        (0usize..120, 1u32..40).prop_map(|(i, h)| Op::Attach(i, h)),
        (0usize..120).prop_map(Op::Detach),
        (1u32..40, 0u32..300).prop_map(|(h, px)| Op::Resize(h, px)),
    ]
}

proptest! {
    #[test]
    fn observed_rows_stay_inside_the_window(ops in prop::collection::vec(op(), 1..80)) {
        let heights = (1u32..40).map(|h| (h, 30 + h * 5)).chain([(CONTAINER, 500)]);
        let mut view: View = VirtualView::new(
            VirtualRowsOptions::new(120).with_scroll_throttle_ms(0),
            FakeObserver::with_heights(heights),
            LoaderOptions::default(),
        );
        view.register_container(CONTAINER);

        for (now_ms, op) in ops.into_iter().enumerate() {
            match op {
                Op::Scroll(offset) => {
                    view.on_scroll(offset, now_ms as u64);
                }
                Op::Container(h) => view.on_container_resize(h),
                Op::Attach(index, handle) => {
                    view.attach(index, handle);
                }
                Op::Detach(index) => {
                    view.detach(index);
                }
                Op::Resize(handle, px) => view.on_row_resize(&handle, px),
            }

            let window = view.window();
            for index in view.lifecycle().observed_indices() {
                prop_assert!(window.is_some_and(|w| w.contains(index)));
            }
            prop_assert_eq!(view.lifecycle().len(), view.bridge().tagged_len());
        }
    }
}
