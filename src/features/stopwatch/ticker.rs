//! Cancellable recurring tick schedule.
//!
//! The schedule is polled by its owner rather than firing callbacks: the event
//! loop asks how long until the next tick, waits at most that long, then takes
//! every tick that has come due.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Clock reading the system's monotonic time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when advanced. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A recurring schedule with a fixed period. At most one schedule is active.
#[derive(Debug)]
pub struct Ticker<C: Clock = SystemClock> {
    clock: C,
    period: Duration,
    next_due: Option<Instant>,
}

impl<C: Clock> Ticker<C> {
    /// Create an inactive ticker. Periods below 1 ms are raised to 1 ms.
    pub fn new(clock: C, period: Duration) -> Self {
        Self {
            clock,
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// The fixed tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Start the schedule, replacing any active one. The first tick is due one
    /// period from now.
    pub fn schedule(&mut self) {
        if self.cancel() {
            tracing::debug!("replaced active tick schedule");
        }
        self.next_due = Some(self.clock.now() + self.period);
    }

    /// Stop the schedule. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Whether a schedule is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Take every tick that has come due, advancing the schedule past them.
    pub fn take_due(&mut self) -> u64 {
        let Some(due) = self.next_due else {
            return 0;
        };

        let now = self.clock.now();
        if now < due {
            return 0;
        }

        let behind = now.duration_since(due).as_nanos() / self.period.as_nanos();
        let count = u64::try_from(behind).unwrap_or(u64::MAX - 1) + 1;

        let next = u32::try_from(count)
            .ok()
            .and_then(|n| self.period.checked_mul(n))
            .and_then(|advance| due.checked_add(advance));
        self.next_due = Some(next.unwrap_or(now + self.period));

        count
    }

    /// Time until the next tick is due, or `None` when inactive.
    #[must_use]
    pub fn until_next(&self) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(self.clock.now()))
    }
}
