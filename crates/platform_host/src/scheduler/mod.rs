//! Timer scheduling contracts and the no-op adapter.

pub mod manual;

use serde::{Deserialize, Serialize};

/// Callback invoked on every firing of a repeating timer.
pub type IntervalCallback = Box<dyn FnMut()>;

/// Callback invoked once when a one-shot timer elapses.
pub type TimeoutCallback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Distinguishes repeating timers from one-shot timers.
pub enum TimerKind {
    /// Repeating timer started with [`Scheduler::start_interval`].
    Interval,
    /// One-shot timer started with [`Scheduler::start_timeout`].
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Opaque handle for a started timer, used to cancel it.
pub struct TimerHandle {
    /// Scheduler-local identifier.
    pub id: u64,
    /// Kind of timer the handle refers to.
    pub kind: TimerKind,
}

/// Host service for scheduling callbacks on the UI thread.
///
/// Implementations must never invoke a callback synchronously from `start_*` and must release
/// any internal borrows before invoking a callback, so callbacks may start or cancel timers.
pub trait Scheduler {
    /// Starts a repeating timer firing every `period_ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot register the timer.
    fn start_interval(
        &self,
        period_ms: u64,
        callback: IntervalCallback,
    ) -> Result<TimerHandle, String>;

    /// Starts a one-shot timer firing once after `delay_ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot register the timer.
    fn start_timeout(&self, delay_ms: u64, callback: TimeoutCallback)
        -> Result<TimerHandle, String>;

    /// Cancels a timer. Cancelling an elapsed or unknown handle is a no-op.
    fn cancel(&self, handle: TimerHandle);

    /// Number of timers currently registered and not yet cancelled or elapsed.
    fn active_timer_count(&self) -> usize;
}

/// Error reported by [`NoopScheduler`] for every timer request.
pub const NO_TIMER_HOST: &str = "timers unavailable on headless host";

#[derive(Debug, Default, Clone, Copy)]
/// Scheduler for targets without a timer host.
///
/// Every start call fails, so callers take their no-timer path instead of holding handles that
/// would never fire.
pub struct NoopScheduler;

impl Scheduler for NoopScheduler {
    fn start_interval(
        &self,
        _period_ms: u64,
        _callback: IntervalCallback,
    ) -> Result<TimerHandle, String> {
        Err(NO_TIMER_HOST.to_string())
    }

    fn start_timeout(
        &self,
        _delay_ms: u64,
        _callback: TimeoutCallback,
    ) -> Result<TimerHandle, String> {
        Err(NO_TIMER_HOST.to_string())
    }

    fn cancel(&self, _handle: TimerHandle) {}

    fn active_timer_count(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_scheduler_refuses_every_timer() {
        let scheduler = NoopScheduler;
        let interval = scheduler.start_interval(1000, Box::new(|| {}));
        let timeout = scheduler.start_timeout(10, Box::new(|| {}));

        assert_eq!(interval, Err(NO_TIMER_HOST.to_string()));
        assert_eq!(timeout, Err(NO_TIMER_HOST.to_string()));
        assert_eq!(scheduler.active_timer_count(), 0);
    }
}
