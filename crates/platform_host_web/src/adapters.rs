use std::rc::Rc;

use platform_host::{IntervalCallback, NoopScheduler, Scheduler, TimeoutCallback, TimerHandle};

use crate::WebScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters from `platform_host_web`.
    Browser,
    /// No-op adapters for native builds and headless rendering.
    Headless,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(any(feature = "headless-host", not(target_arch = "wasm32")))]
    {
        HostStrategy::Headless
    }

    #[cfg(not(any(feature = "headless-host", not(target_arch = "wasm32"))))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Headless => "headless",
    }
}

/// Adapter enum that erases the concrete timer backend behind [`Scheduler`].
#[derive(Debug)]
pub enum SchedulerAdapter {
    /// Browser `setInterval` / `setTimeout` timers.
    Browser(WebScheduler),
    /// No timer host; every start call fails.
    Headless(NoopScheduler),
}

impl Scheduler for SchedulerAdapter {
    fn start_interval(
        &self,
        period_ms: u64,
        callback: IntervalCallback,
    ) -> Result<TimerHandle, String> {
        match self {
            Self::Browser(scheduler) => scheduler.start_interval(period_ms, callback),
            Self::Headless(scheduler) => scheduler.start_interval(period_ms, callback),
        }
    }

    fn start_timeout(
        &self,
        delay_ms: u64,
        callback: TimeoutCallback,
    ) -> Result<TimerHandle, String> {
        match self {
            Self::Browser(scheduler) => scheduler.start_timeout(delay_ms, callback),
            Self::Headless(scheduler) => scheduler.start_timeout(delay_ms, callback),
        }
    }

    fn cancel(&self, handle: TimerHandle) {
        match self {
            Self::Browser(scheduler) => scheduler.cancel(handle),
            Self::Headless(scheduler) => scheduler.cancel(handle),
        }
    }

    fn active_timer_count(&self) -> usize {
        match self {
            Self::Browser(scheduler) => scheduler.active_timer_count(),
            Self::Headless(scheduler) => scheduler.active_timer_count(),
        }
    }
}

/// Builds the scheduler adapter for the selected host strategy.
pub fn scheduler() -> Rc<dyn Scheduler> {
    let adapter = match selected_host_strategy() {
        HostStrategy::Browser => SchedulerAdapter::Browser(WebScheduler::default()),
        HostStrategy::Headless => SchedulerAdapter::Headless(NoopScheduler),
    };
    Rc::new(adapter)
}
