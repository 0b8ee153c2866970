//! Time sources for the search deadline.
//!
//! The driver only ever asks a [`Clock`] how much time has passed, once per
//! iteration. [`SystemClock`] measures wall-clock time; [`ManualClock`] is
//! advanced by hand or by a fixed tick per reading, which turns a time
//! budget into an exact iteration budget.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// A monotonic source of elapsed time.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn elapsed(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Starts a clock at the current instant.
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Every call to [`Clock::elapsed`] first advances the clock by `tick`
/// (zero by default) and then reports the new reading.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_bagging::search::{Clock, ManualClock};
///
/// let clock = ManualClock::with_tick(Duration::from_millis(10));
/// assert_eq!(clock.elapsed(), Duration::from_millis(10));
/// assert_eq!(clock.elapsed(), Duration::from_millis(20));
///
/// clock.advance(Duration::from_secs(1));
/// assert_eq!(clock.elapsed(), Duration::from_millis(1030));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    tick: Duration,
}

impl ManualClock {
    /// A frozen clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that advances by `tick` on every reading.
    pub fn with_tick(tick: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            tick,
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.advance(self.tick);
        self.now.get()
    }
}
