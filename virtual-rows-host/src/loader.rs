use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, ready};

use virtual_rows::LoadPhase;

use crate::LoadError;

/// Why a data request was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// The first request, issued when the view mounts.
    Initial,
    /// The end of known content came into view.
    NextPage,
}

pub type LoadFuture<E> = Pin<Box<dyn Future<Output = Result<(), E>>>>;

/// What a data request callback hands back.
pub enum DataRequest<E> {
    /// The request completed synchronously.
    Ready(Result<(), E>),
    /// The request completes when the future resolves.
    Pending(LoadFuture<E>),
}

impl<E> DataRequest<E> {
    pub fn done() -> Self {
        Self::Ready(Ok(()))
    }

    pub fn pending(future: impl Future<Output = Result<(), E>> + 'static) -> Self {
        Self::Pending(Box::pin(future))
    }
}

impl<E> fmt::Debug for DataRequest<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(r) => f.debug_tuple("Ready").field(&r.is_ok()).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

pub type DataRequestCallback<E> = Box<dyn FnMut(RequestKind) -> DataRequest<E>>;

/// Callbacks around a data request.
///
/// Everything here runs on the host's event loop; none of it needs to be `Send`.
pub struct LoaderOptions<E> {
    pub on_data_request: Option<DataRequestCallback<E>>,
    pub on_load_start: Option<Rc<dyn Fn()>>,
    /// Called once the request settled, with `true` on success.
    pub on_load_end: Option<Rc<dyn Fn(bool)>>,
    /// Receives request errors when `throw_error` is off.
    pub fallback: Option<Rc<dyn Fn(&E)>>,
    /// Hand request errors back to the caller instead of `fallback`.
    pub throw_error: bool,
}

impl<E> Default for LoaderOptions<E> {
    fn default() -> Self {
        Self {
            on_data_request: None,
            on_load_start: None,
            on_load_end: None,
            fallback: None,
            throw_error: false,
        }
    }
}

impl<E> LoaderOptions<E> {
    pub fn new(on_data_request: impl FnMut(RequestKind) -> DataRequest<E> + 'static) -> Self {
        Self {
            on_data_request: Some(Box::new(on_data_request)),
            ..Self::default()
        }
    }

    pub fn with_on_load_start(mut self, f: impl Fn() + 'static) -> Self {
        self.on_load_start = Some(Rc::new(f));
        self
    }

    pub fn with_on_load_end(mut self, f: impl Fn(bool) + 'static) -> Self {
        self.on_load_end = Some(Rc::new(f));
        self
    }

    pub fn with_fallback(mut self, f: impl Fn(&E) + 'static) -> Self {
        self.fallback = Some(Rc::new(f));
        self
    }

    pub fn with_throw_error(mut self, throw_error: bool) -> Self {
        self.throw_error = throw_error;
        self
    }
}

impl<E> fmt::Debug for LoaderOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("on_data_request", &self.on_data_request.is_some())
            .field("on_load_start", &self.on_load_start.is_some())
            .field("on_load_end", &self.on_load_end.is_some())
            .field("fallback", &self.fallback.is_some())
            .field("throw_error", &self.throw_error)
            .finish()
    }
}

struct Hooks<E> {
    on_load_end: Option<Rc<dyn Fn(bool)>>,
    fallback: Option<Rc<dyn Fn(&E)>>,
    throw_error: bool,
}

impl<E> Hooks<E> {
    fn settle(&self, result: Result<(), E>) -> Result<(), LoadError<E>> {
        let is_ok = result.is_ok();
        let outcome = match result {
            Ok(()) => Ok(()),
            Err(e) if self.throw_error => Err(LoadError::Rejected(e)),
            Err(e) => {
                if let Some(fallback) = &self.fallback {
                    fallback(&e);
                }
                Ok(())
            }
        };
        vdebug!(is_ok, "data request settled");
        if let Some(on_load_end) = &self.on_load_end {
            on_load_end(is_ok);
        }
        outcome
    }
}

#[derive(Debug)]
struct Shared {
    in_flight: Cell<usize>,
    mounted: Cell<bool>,
}

/// Holds one unit of the loading counter; releases it when dropped unless the owner was
/// torn down in the meantime.
struct InFlight(Rc<Shared>);

impl InFlight {
    fn acquire(shared: &Rc<Shared>) -> Self {
        if shared.mounted.get() {
            shared.in_flight.set(shared.in_flight.get() + 1);
        }
        Self(Rc::clone(shared))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.0.mounted.get() {
            self.0.in_flight.set(self.0.in_flight.get().saturating_sub(1));
        }
    }
}

/// Runs data requests and tracks how many are in flight.
pub struct DataLoader<E> {
    on_data_request: Option<DataRequestCallback<E>>,
    on_load_start: Option<Rc<dyn Fn()>>,
    hooks: Rc<Hooks<E>>,
    shared: Rc<Shared>,
}

impl<E> DataLoader<E> {
    pub fn new(options: LoaderOptions<E>) -> Self {
        let LoaderOptions {
            on_data_request,
            on_load_start,
            on_load_end,
            fallback,
            throw_error,
        } = options;
        Self {
            on_data_request,
            on_load_start,
            hooks: Rc::new(Hooks {
                on_load_end,
                fallback,
                throw_error,
            }),
            shared: Rc::new(Shared {
                in_flight: Cell::new(0),
                mounted: Cell::new(true),
            }),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.shared.in_flight.get()
    }

    pub fn phase(&self) -> LoadPhase {
        LoadPhase::from_in_flight(self.in_flight())
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.mounted.get()
    }

    /// Starts a request unless one is already in flight.
    ///
    /// Synchronous requests settle before this returns and yield `Ok(None)`. Asynchronous
    /// ones yield a [`LoadTask`] that the host must drive to completion; the loading counter
    /// stays raised until it settles or is dropped.
    pub fn request(&mut self, kind: RequestKind) -> Result<Option<LoadTask<E>>, LoadError<E>> {
        if self.in_flight() > 0 {
            return Ok(None);
        }
        vdebug!(?kind, "data request");
        if let Some(on_load_start) = &self.on_load_start {
            on_load_start();
        }

        let in_flight = InFlight::acquire(&self.shared);
        let request = match self.on_data_request.as_mut() {
            Some(on_data_request) => on_data_request(kind),
            None => DataRequest::done(),
        };

        match request {
            DataRequest::Ready(result) => {
                let outcome = self.hooks.settle(result);
                drop(in_flight);
                outcome.map(|()| None)
            }
            DataRequest::Pending(future) => Ok(Some(LoadTask {
                future: Some(future),
                hooks: Rc::clone(&self.hooks),
                in_flight: Some(in_flight),
            })),
        }
    }

    /// Marks the owner as torn down. Requests still in flight run to completion and fire
    /// their hooks, but no longer touch the counter.
    pub fn dispose(&self) {
        self.shared.mounted.set(false);
    }
}

impl<E> fmt::Debug for DataLoader<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataLoader")
            .field("in_flight", &self.in_flight())
            .field("mounted", &self.is_mounted())
            .field("throw_error", &self.hooks.throw_error)
            .finish_non_exhaustive()
    }
}

/// An in-flight data request.
///
/// Resolves once the underlying future settles, after `fallback`/`on_load_end` ran and the
/// loading counter was released. With `throw_error` the request error is returned as
/// [`LoadError::Rejected`]; otherwise the task always resolves to `Ok(())`.
///
/// Dropping the task early releases the counter without firing `on_load_end`.
///
/// # Panics
///
/// Polling the task again after it returned `Poll::Ready` panics.
#[must_use = "a LoadTask does nothing unless polled"]
pub struct LoadTask<E> {
    future: Option<LoadFuture<E>>,
    hooks: Rc<Hooks<E>>,
    in_flight: Option<InFlight>,
}

impl<E> Future for LoadTask<E> {
    type Output = Result<(), LoadError<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let Some(future) = this.future.as_mut() else {
            panic!("LoadTask polled after completion");
        };
        let result = ready!(future.as_mut().poll(cx));
        this.future = None;
        let outcome = this.hooks.settle(result);
        this.in_flight = None;
        Poll::Ready(outcome)
    }
}

impl<E> fmt::Debug for LoadTask<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadTask")
            .field("settled", &self.future.is_none())
            .finish_non_exhaustive()
    }
}
