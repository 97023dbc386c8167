//! Time sources for deadline checks.
//!
//! Every bounded loop asks a [`Clock`] for the current instant and compares
//! it against a deadline fixed when the loop started. Tests swap in a
//! [`ManualClock`] so deadlines expire after a known number of checks.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Deterministic clock that advances by `tick` every time it is read.
///
/// A zero tick freezes time, which turns deadline-bounded loops into
/// loops bounded only by their own success condition.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Cell<Duration>,
    tick: Duration,
}

impl ManualClock {
    pub fn new(tick: Duration) -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
            tick,
        }
    }

    /// A clock that never moves.
    pub fn frozen() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Time handed out so far, without advancing.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }

    /// Jump forward without counting as a read.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let current = self.origin + self.offset.get();
        self.offset.set(self.offset.get() + self.tick);
        current
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
