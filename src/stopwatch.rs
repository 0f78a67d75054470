//! Pausable game clock.
//!
//! The stopwatch never spawns threads or timers of its own. The host event
//! loop calls [`Stopwatch::poll`] (usually through `Game::tick`) and the
//! stopwatch publishes the elapsed time once per tick interval while it is
//! running.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;
use core::time::Duration;

use crate::observe::{Signal, SubscriptionId};

/// A monotonic time source.
pub trait Clock {
    /// Returns the time elapsed since an arbitrary, fixed epoch.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`std::time::Instant`].
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Creates a clock whose epoch is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// A clock advanced by hand. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Sets the reading. Readings never move backwards.
    pub fn set(&self, now: Duration) {
        if now > self.now.get() {
            self.now.set(now);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Stopwatch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    /// Frozen at a non-zero or restored value.
    Paused,
    /// Accumulating time.
    Running,
    /// Cleared to zero and idle.
    Reset,
}

/// A pausable, resettable elapsed-time source.
pub struct Stopwatch {
    clock: Box<dyn Clock>,
    interval: Duration,
    state: StopwatchState,
    /// Elapsed time banked at the last pause or restore.
    accumulated: Duration,
    /// Clock reading at the last start.
    started_at: Duration,
    /// Clock reading of the last published tick.
    last_tick: Duration,
    elapsed: Signal<Duration>,
}

impl Stopwatch {
    /// Creates a stopwatch in the [`StopwatchState::Reset`] state.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, interval: Duration) -> Self {
        Self {
            clock,
            interval,
            state: StopwatchState::Reset,
            accumulated: Duration::ZERO,
            started_at: Duration::ZERO,
            last_tick: Duration::ZERO,
            elapsed: Signal::new(Duration::ZERO),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> StopwatchState {
        self.state
    }

    /// Returns `true` while the stopwatch is accumulating time.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == StopwatchState::Running
    }

    /// Returns the tick interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the tick interval.
    pub const fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Returns the elapsed time right now.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self.state {
            StopwatchState::Running => self.running_time(self.clock.now()),
            StopwatchState::Paused | StopwatchState::Reset => self.accumulated,
        }
    }

    fn running_time(&self, now: Duration) -> Duration {
        self.accumulated.saturating_add(now.saturating_sub(self.started_at))
    }

    /// Starts or resumes accumulating time from the banked value.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let now = self.clock.now();
        self.started_at = now;
        self.last_tick = now;
        self.state = StopwatchState::Running;
    }

    /// Freezes the elapsed time and publishes it once.
    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        self.accumulated = self.elapsed();
        self.state = StopwatchState::Paused;
        self.elapsed.set(self.accumulated);
    }

    /// Clears the elapsed time and publishes zero once.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.state = StopwatchState::Reset;
        self.elapsed.set(Duration::ZERO);
    }

    /// Sets the banked time, leaving the stopwatch paused.
    pub fn restore(&mut self, elapsed: Duration) {
        self.accumulated = elapsed;
        self.state = StopwatchState::Paused;
        self.elapsed.set(elapsed);
    }

    /// Publishes the elapsed time if running and a tick interval has passed.
    ///
    /// Returns the published value.
    pub fn poll(&mut self) -> Option<Duration> {
        if !self.is_running() {
            return None;
        }
        let now = self.clock.now();
        if now.saturating_sub(self.last_tick) < self.interval {
            return None;
        }
        self.last_tick = now;
        let elapsed = self.running_time(now);
        log::trace!("stopwatch tick at {elapsed:?}");
        self.elapsed.set(elapsed);
        Some(elapsed)
    }

    /// Returns the last published value.
    #[must_use]
    pub fn published(&self) -> Duration {
        *self.elapsed.get()
    }

    /// Subscribes to published values.
    pub fn subscribe(&mut self, callback: impl FnMut(&Duration) + 'static) -> SubscriptionId {
        self.elapsed.subscribe(callback)
    }

    /// Removes a subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.elapsed.unsubscribe(id)
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("state", &self.state)
            .field("interval", &self.interval)
            .field("elapsed", &self.elapsed())
            .finish_non_exhaustive()
    }
}
