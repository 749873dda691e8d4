//! Time sources for the recorder.

use std::time::Instant;

/// Monotonic timestamp source in an implementation-chosen unit
pub trait Clock {
    fn now(&self) -> i64;
}

impl<F> Clock for F
where
    F: Fn() -> i64,
{
    fn now(&self) -> i64 {
        self()
    }
}

/// Microseconds elapsed since the clock was created.
///
/// Pair with [`MICROS_PER_MILLI`] to export milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

/// Divisor turning [`MonotonicClock`] units into milliseconds
pub const MICROS_PER_MILLI: f64 = 1000.0;

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}
