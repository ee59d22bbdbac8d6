//! Window calculation: mapping a scroll position to the rows worth materializing.
//!
//! All functions here are pure over a [`RowLayout`] snapshot, so identical inputs always yield
//! identical windows.

use crate::layout::RowLayout;
use crate::{Align, Window};

/// First row to render for `scroll_position`, including `buffer_size` rows above the viewport.
pub fn start_index(layout: &RowLayout, scroll_position: u64, buffer_size: usize) -> usize {
    layout
        .walk(scroll_position)
        .saturating_sub(1)
        .saturating_sub(buffer_size)
}

/// Last row to render for a viewport `[scroll_position, scroll_position + container_height]`,
/// including `buffer_size` rows below it. `None` when there are no rows.
pub fn end_index(
    layout: &RowLayout,
    scroll_position: u64,
    container_height: u32,
    buffer_size: usize,
) -> Option<usize> {
    let last = layout.row_count().checked_sub(1)?;
    let bottom = scroll_position.saturating_add(container_height as u64);
    let steps = layout.walk(bottom);
    Some(
        steps
            .saturating_sub(1)
            .saturating_add(buffer_size)
            .min(last),
    )
}

pub fn compute_window(
    layout: &RowLayout,
    scroll_position: u64,
    container_height: u32,
    buffer_size: usize,
) -> Option<Window> {
    let end = end_index(layout, scroll_position, container_height, buffer_size)?;
    let start = start_index(layout, scroll_position, buffer_size);
    debug_assert!(start <= end, "window inverted (start={start}, end={end})");
    Some(Window {
        start_index: start.min(end),
        end_index: end,
    })
}

/// Buffer actually used for a window.
///
/// With `adaptive` set, the buffer grows to one viewport worth of minimum-height rows when
/// that is larger than `buffer_size`.
pub fn effective_buffer(
    buffer_size: usize,
    adaptive: bool,
    container_height: u32,
    min_height: u32,
) -> usize {
    if !adaptive || min_height == 0 {
        return buffer_size;
    }
    buffer_size.max((container_height / min_height) as usize)
}

/// Scroll offset that brings row `index` into view with the given alignment, clamped to the
/// scrollable range.
pub fn scroll_to_index_offset(
    layout: &RowLayout,
    index: usize,
    align: Align,
    scroll_position: u64,
    container_height: u32,
) -> u64 {
    let Some(last) = layout.row_count().checked_sub(1) else {
        return 0;
    };
    let index = index.min(last);
    let top = layout.top_pos(index);
    let bottom = top.saturating_add(layout.height(index) as u64);
    let view = container_height as u64;

    let target = match align {
        Align::Start => top,
        Align::End => bottom.saturating_sub(view),
        Align::Center => {
            let center = top.saturating_add(layout.height(index) as u64 / 2);
            center.saturating_sub(view / 2)
        }
        Align::Auto => {
            let view_end = scroll_position.saturating_add(view);
            if top >= scroll_position && bottom <= view_end {
                scroll_position
            } else if top < scroll_position {
                top
            } else {
                bottom.saturating_sub(view)
            }
        }
    };

    target.min(max_scroll_position(layout, container_height))
}

pub fn max_scroll_position(layout: &RowLayout, container_height: u32) -> u64 {
    layout
        .scroll_adjust()
        .saturating_sub(container_height as u64)
}
