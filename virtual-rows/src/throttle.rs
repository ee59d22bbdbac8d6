/// A fixed-rate limiter with leading and trailing emission.
///
/// The first value after a quiet period passes straight through. Values offered within
/// `interval_ms` of the last emission are parked; only the most recent one is kept and it is
/// released by [`Throttle::poll`] once the interval has elapsed. Time is supplied by the
/// caller, so the limiter works with any clock or test harness.
#[derive(Clone, Debug)]
pub struct Throttle<T> {
    interval_ms: u64,
    last_emit_ms: Option<u64>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_emit_ms: None,
            pending: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Offers a value at `now_ms`. Returns it back if it may be applied immediately.
    pub fn offer(&mut self, value: T, now_ms: u64) -> Option<T> {
        if self.is_open(now_ms) {
            self.last_emit_ms = Some(now_ms);
            self.pending = None;
            return Some(value);
        }
        self.pending = Some(value);
        None
    }

    /// Releases the parked trailing value if the interval has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.pending.is_none() || !self.is_open(now_ms) {
            return None;
        }
        self.last_emit_ms = Some(now_ms);
        self.pending.take()
    }

    /// Releases the parked value regardless of timing.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn reset(&mut self) {
        self.last_emit_ms = None;
        self.pending = None;
    }

    fn is_open(&self, now_ms: u64) -> bool {
        match self.last_emit_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }
}
