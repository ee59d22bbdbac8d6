//! Host-side wiring for the `virtual-rows` engine.
//!
//! The engine is pure state; this crate connects it to a UI without binding to any framework:
//!
//! - a measurement bridge turning resize notifications into engine measurements,
//! - an element lifecycle tracking which row elements are observed,
//! - an asynchronous "load more" loader with start/end/error hooks,
//! - [`VirtualView`], which ties all of the above to one [`VirtualRows`] instance.
//!
//! Host elements are referred to by an opaque handle ([`RowHandle`]); size reads go through a
//! [`ResizeObserver`] the host implements.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod bridge;
mod error;
mod handle;
mod lifecycle;
mod loader;
mod observer;
mod view;

#[cfg(test)]
mod tests;

pub use bridge::MeasurementBridge;
pub use error::LoadError;
pub use handle::RowHandle;
pub use lifecycle::ElementLifecycle;
pub use loader::{
    DataLoader, DataRequest, DataRequestCallback, LoadFuture, LoadTask, LoaderOptions,
    RequestKind,
};
pub use observer::ResizeObserver;
pub use view::VirtualView;

pub use virtual_rows;
pub use virtual_rows::VirtualRows;
