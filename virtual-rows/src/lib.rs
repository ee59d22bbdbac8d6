//! A headless engine for virtualized lists of variable-height rows.
//!
//! Rows start out at an assumed minimum height and are corrected as the host reports real
//! measurements. From the scroll position, the container height and the learned heights the
//! engine derives:
//! - the window of rows worth materializing (plus a buffer on each side),
//! - each row's absolute top offset and the total scroll-space height,
//! - whether the end of known content is in view, so more data should be requested.
//!
//! It is UI-agnostic. For measurement wiring, element lifecycle and asynchronous loading,
//! see the `virtual-rows-host` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod fenwick;
mod layout;
mod options;
mod registry;
mod sink;
mod state;
mod throttle;
mod trigger;
mod types;
mod virtual_rows;
pub mod window;


pub use layout::RowLayout;
pub use options::{
    DEFAULT_BOTTOM_THRESHOLD, DEFAULT_BUFFER_SIZE, DEFAULT_MIN_HEIGHT, DEFAULT_SCROLL_THROTTLE_MS,
    OnChangeCallback, VirtualRowsOptions,
};
pub use registry::RowHeightRegistry;
pub use sink::MeasurementSink;
pub use state::{MeasurementSnapshot, ViewportState};
pub use throttle::Throttle;
pub use trigger::{BottomProbe, LoadPhase};
pub use types::{Align, Frame, RowSlot, Sentinel, Window};
pub use virtual_rows::VirtualRows;
