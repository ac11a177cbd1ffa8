//! Deterministic virtual-clock scheduler.
//!
//! [`ManualScheduler`] never touches wall-clock time. Timers only fire when the owner calls
//! [`ManualScheduler::advance_by`], which makes timer-driven UI logic testable step by step and
//! lets tests assert how many timers were alive at any point.

use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

use super::{IntervalCallback, Scheduler, TimeoutCallback, TimerHandle, TimerKind};

enum PendingCallback {
    Interval(Option<IntervalCallback>),
    Timeout(Option<TimeoutCallback>),
}

enum Firing {
    Interval(u64, IntervalCallback),
    Timeout(TimeoutCallback),
}

struct ManualTimer {
    due_ms: u64,
    period_ms: u64,
    callback: PendingCallback,
}

impl ManualTimer {
    fn kind(&self) -> TimerKind {
        match self.callback {
            PendingCallback::Interval(_) => TimerKind::Interval,
            PendingCallback::Timeout(_) => TimerKind::Timeout,
        }
    }
}

#[derive(Default)]
struct ManualClock {
    now_ms: u64,
    next_id: u64,
    timers: BTreeMap<u64, ManualTimer>,
    started_intervals: usize,
    started_timeouts: usize,
    peak_active_intervals: usize,
}

impl ManualClock {
    fn active(&self, kind: TimerKind) -> usize {
        self.timers.values().filter(|timer| timer.kind() == kind).count()
    }

    fn register(&mut self, delay_ms: u64, period_ms: u64, callback: PendingCallback) -> TimerHandle {
        self.next_id += 1;
        let id = self.next_id;
        let timer = ManualTimer {
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
            callback,
        };
        let kind = timer.kind();
        self.timers.insert(id, timer);
        match kind {
            TimerKind::Interval => {
                self.started_intervals += 1;
                self.peak_active_intervals = self
                    .peak_active_intervals
                    .max(self.active(TimerKind::Interval));
            }
            TimerKind::Timeout => self.started_timeouts += 1,
        }
        TimerHandle { id, kind }
    }

    fn next_due(&self, until_ms: u64) -> Option<(u64, u64)> {
        self.timers
            .iter()
            .filter(|(_, timer)| timer.due_ms <= until_ms)
            .min_by_key(|(id, timer)| (timer.due_ms, **id))
            .map(|(id, timer)| (*id, timer.due_ms))
    }

    fn take_firing(&mut self, id: u64) -> Option<Firing> {
        let timer = self.timers.get_mut(&id)?;
        if let PendingCallback::Interval(callback) = &mut timer.callback {
            let callback = callback.take()?;
            timer.due_ms = timer.due_ms.saturating_add(timer.period_ms);
            return Some(Firing::Interval(id, callback));
        }
        match self.timers.remove(&id)?.callback {
            PendingCallback::Timeout(Some(callback)) => Some(Firing::Timeout(callback)),
            _ => None,
        }
    }
}

#[derive(Clone, Default)]
/// In-memory scheduler driven by an explicit virtual clock.
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualClock>>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.inner.borrow();
        f.debug_struct("ManualScheduler")
            .field("now_ms", &clock.now_ms)
            .field("active_timers", &clock.timers.len())
            .finish()
    }
}

impl ManualScheduler {
    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of live timers of `kind`.
    pub fn active_count(&self, kind: TimerKind) -> usize {
        self.inner.borrow().active(kind)
    }

    /// Number of timers of `kind` ever started on this scheduler.
    pub fn started_count(&self, kind: TimerKind) -> usize {
        let clock = self.inner.borrow();
        match kind {
            TimerKind::Interval => clock.started_intervals,
            TimerKind::Timeout => clock.started_timeouts,
        }
    }

    /// Highest number of simultaneously live repeating timers observed so far.
    pub fn peak_active_intervals(&self) -> usize {
        self.inner.borrow().peak_active_intervals
    }

    /// Virtual time at which the live timer behind `handle` fires next.
    pub fn next_fire_ms(&self, handle: TimerHandle) -> Option<u64> {
        self.inner
            .borrow()
            .timers
            .get(&handle.id)
            .map(|timer| timer.due_ms)
    }

    /// Advances the virtual clock, firing every timer that comes due in chronological order.
    ///
    /// Timers due at the same instant fire in start order. Callbacks run without any internal
    /// borrow held. Returns the number of callbacks invoked.
    pub fn advance_by(&self, elapsed_ms: u64) -> usize {
        let until_ms = self.now_ms().saturating_add(elapsed_ms);
        let mut fired = 0;

        loop {
            let firing = {
                let mut clock = self.inner.borrow_mut();
                let Some((id, due_ms)) = clock.next_due(until_ms) else {
                    break;
                };
                clock.now_ms = clock.now_ms.max(due_ms);
                clock.take_firing(id)
            };

            match firing {
                Some(Firing::Interval(id, mut callback)) => {
                    callback();
                    fired += 1;
                    let mut clock = self.inner.borrow_mut();
                    if let Some(timer) = clock.timers.get_mut(&id) {
                        timer.callback = PendingCallback::Interval(Some(callback));
                    }
                }
                Some(Firing::Timeout(callback)) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }

        let mut clock = self.inner.borrow_mut();
        clock.now_ms = clock.now_ms.max(until_ms);
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn start_interval(
        &self,
        period_ms: u64,
        callback: IntervalCallback,
    ) -> Result<TimerHandle, String> {
        if period_ms == 0 {
            return Err("interval period must be positive".to_string());
        }
        Ok(self.inner.borrow_mut().register(
            period_ms,
            period_ms,
            PendingCallback::Interval(Some(callback)),
        ))
    }

    fn start_timeout(
        &self,
        delay_ms: u64,
        callback: TimeoutCallback,
    ) -> Result<TimerHandle, String> {
        Ok(self
            .inner
            .borrow_mut()
            .register(delay_ms, 0, PendingCallback::Timeout(Some(callback))))
    }

    fn cancel(&self, handle: TimerHandle) {
        self.inner.borrow_mut().timers.remove(&handle.id);
    }

    fn active_timer_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        (count.clone(), count)
    }

    #[test]
    fn interval_fires_once_per_period() {
        let scheduler = ManualScheduler::default();
        let (count, seen) = counter();
        scheduler
            .start_interval(100, Box::new(move || count.set(count.get() + 1)))
            .expect("interval");

        assert_eq!(scheduler.advance_by(99), 0);
        assert_eq!(scheduler.advance_by(1), 1);
        assert_eq!(scheduler.advance_by(250), 2);
        assert_eq!(seen.get(), 3);
        assert_eq!(scheduler.now_ms(), 350);
    }

    #[test]
    fn timeout_fires_once_and_is_released() {
        let scheduler = ManualScheduler::default();
        let (count, seen) = counter();
        scheduler
            .start_timeout(500, Box::new(move || count.set(count.get() + 1)))
            .expect("timeout");

        assert_eq!(scheduler.active_timer_count(), 1);
        scheduler.advance_by(2_000);
        assert_eq!(seen.get(), 1);
        assert_eq!(scheduler.active_timer_count(), 0);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let scheduler = ManualScheduler::default();
        let (count, seen) = counter();
        let handle = scheduler
            .start_interval(10, Box::new(move || count.set(count.get() + 1)))
            .expect("interval");

        scheduler.cancel(handle);
        scheduler.cancel(handle);
        scheduler.advance_by(100);
        assert_eq!(seen.get(), 0);
        assert_eq!(scheduler.active_count(TimerKind::Interval), 0);
    }

    #[test]
    fn callbacks_can_cancel_their_own_interval() {
        let scheduler = ManualScheduler::default();
        let (count, seen) = counter();
        let own_handle = Rc::new(Cell::new(None::<TimerHandle>));
        let cancel_from = scheduler.clone();
        let slot = own_handle.clone();
        let handle = scheduler
            .start_interval(
                10,
                Box::new(move || {
                    count.set(count.get() + 1);
                    if let Some(handle) = slot.get() {
                        cancel_from.cancel(handle);
                    }
                }),
            )
            .expect("interval");
        own_handle.set(Some(handle));

        scheduler.advance_by(100);
        assert_eq!(seen.get(), 1);
        assert_eq!(scheduler.active_timer_count(), 0);
    }

    #[test]
    fn callbacks_can_start_new_timers() {
        let scheduler = ManualScheduler::default();
        let (count, seen) = counter();
        let chained = scheduler.clone();
        scheduler
            .start_timeout(
                10,
                Box::new(move || {
                    let _ = chained.start_timeout(10, Box::new(move || count.set(count.get() + 1)));
                }),
            )
            .expect("timeout");

        scheduler.advance_by(15);
        assert_eq!(seen.get(), 0);
        scheduler.advance_by(5);
        assert_eq!(seen.get(), 1);
        assert_eq!(scheduler.started_count(TimerKind::Timeout), 2);
    }

    #[test]
    fn same_instant_timers_fire_in_start_order() {
        let scheduler = ManualScheduler::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        for label in ["first", "second"] {
            let order = order.clone();
            scheduler
                .start_timeout(50, Box::new(move || order.borrow_mut().push(label)))
                .expect("timeout");
        }

        scheduler.advance_by(50);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn zero_period_interval_is_rejected() {
        let scheduler = ManualScheduler::default();
        assert!(scheduler.start_interval(0, Box::new(|| {})).is_err());
        assert_eq!(scheduler.started_count(TimerKind::Interval), 0);
    }

    #[test]
    fn peak_tracks_overlapping_intervals() {
        let scheduler = ManualScheduler::default();
        let first = scheduler.start_interval(10, Box::new(|| {})).expect("first");
        scheduler.cancel(first);
        let _second = scheduler.start_interval(10, Box::new(|| {})).expect("second");
        assert_eq!(scheduler.peak_active_intervals(), 1);

        let _third = scheduler.start_interval(10, Box::new(|| {})).expect("third");
        assert_eq!(scheduler.peak_active_intervals(), 2);
    }
}
