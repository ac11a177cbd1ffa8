//! Timer-owning carousel controller.
//!
//! [`CarouselController`] is the single owner of a carousel's [`CarouselState`] and of the two
//! timer handles the reducer asks for (autoplay interval and settle timeout). It executes
//! [`CarouselEffect`] values against an injected [`Scheduler`] and routes timer callbacks back
//! through [`reduce_carousel`]. Callbacks hold only a weak reference, so dropping the last
//! [`CarouselHandle`] releases the controller and cancels its timers.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use leptos::logging;
use platform_host::{Scheduler, TimerHandle};

use crate::{
    model::{CarouselConfig, CarouselSnapshot, CarouselState},
    reducer::{reduce_carousel, CarouselAction, CarouselEffect, CarouselError},
};

/// Callback notified with a fresh snapshot after every successful dispatch.
pub type SnapshotObserver = Rc<dyn Fn(&CarouselSnapshot)>;

/// Owns carousel state plus the live timer handles for one carousel instance.
pub struct CarouselController {
    scheduler: Rc<dyn Scheduler>,
    state: CarouselState,
    autoplay: Option<TimerHandle>,
    settle: Option<TimerHandle>,
    observer: Option<SnapshotObserver>,
    this: Weak<RefCell<CarouselController>>,
}

impl fmt::Debug for CarouselController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselController")
            .field("state", &self.state)
            .field("autoplay", &self.autoplay)
            .field("settle", &self.settle)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl CarouselController {
    fn new_shared(scheduler: Rc<dyn Scheduler>) -> Rc<RefCell<Self>> {
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                scheduler,
                state: CarouselState::default(),
                autoplay: None,
                settle: None,
                observer: None,
                this: this.clone(),
            })
        })
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// True while an autoplay interval is registered with the scheduler.
    pub fn autoplay_active(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot::from_state(&self.state, self.autoplay_active())
    }

    fn dispatch(&mut self, action: CarouselAction) -> Result<(), CarouselError> {
        if let CarouselAction::Settle { seq } = action {
            if seq == self.state.settle_seq() {
                self.settle = None;
            }
        }

        let effects = reduce_carousel(&mut self.state, action)?;
        for effect in effects {
            self.run_effect(effect);
        }
        Ok(())
    }

    fn run_effect(&mut self, effect: CarouselEffect) {
        match effect {
            CarouselEffect::StartAutoplay { interval_ms, epoch } => {
                self.start_autoplay(interval_ms, epoch);
            }
            CarouselEffect::CancelAutoplay => self.cancel_autoplay(),
            CarouselEffect::ScheduleSettle { delay_ms, seq } => self.schedule_settle(delay_ms, seq),
            CarouselEffect::CancelSettle => self.cancel_settle(),
        }
    }

    /// Replaces the autoplay interval. The stored handle is always cancelled first, so at most
    /// one interval is ever live for this controller.
    fn start_autoplay(&mut self, interval_ms: u64, epoch: u64) {
        self.cancel_autoplay();
        let controller = self.this.clone();
        let started = self.scheduler.start_interval(
            interval_ms,
            Box::new(move || {
                deliver(&controller, CarouselAction::AutoplayTick { epoch });
            }),
        );
        match started {
            Ok(handle) => self.autoplay = Some(handle),
            Err(err) => logging::warn!(
                "carousel `{}`: autoplay unavailable: {err}",
                self.state.config().carousel_id
            ),
        }
    }

    fn schedule_settle(&mut self, delay_ms: u64, seq: u64) {
        self.cancel_settle();
        let controller = self.this.clone();
        let started = self.scheduler.start_timeout(
            delay_ms,
            Box::new(move || {
                deliver(&controller, CarouselAction::Settle { seq });
            }),
        );
        match started {
            Ok(handle) => self.settle = Some(handle),
            Err(err) => {
                logging::warn!(
                    "carousel `{}`: settle timer unavailable: {err}",
                    self.state.config().carousel_id
                );
                // Without a timer the transition would never end.
                if let Err(err) = reduce_carousel(&mut self.state, CarouselAction::Settle { seq }) {
                    logging::warn!(
                        "carousel `{}`: settle failed: {err}",
                        self.state.config().carousel_id
                    );
                }
            }
        }
    }

    fn cancel_autoplay(&mut self) {
        if let Some(handle) = self.autoplay.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_settle(&mut self) {
        if let Some(handle) = self.settle.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.cancel_autoplay();
        self.cancel_settle();
    }
}

fn deliver(controller: &Weak<RefCell<CarouselController>>, action: CarouselAction) {
    let Some(controller) = controller.upgrade() else {
        return;
    };
    if let Err(err) = dispatch_shared(&controller, action) {
        logging::warn!("carousel timer dispatch failed: {err}");
    }
}

fn dispatch_shared(
    controller: &Rc<RefCell<CarouselController>>,
    action: CarouselAction,
) -> Result<(), CarouselError> {
    let (snapshot, observer) = {
        let Ok(mut controller) = controller.try_borrow_mut() else {
            logging::warn!("carousel dispatch re-entered; dropping {action:?}");
            return Ok(());
        };
        controller.dispatch(action)?;
        (controller.snapshot(), controller.observer.clone())
    };

    if let Some(observer) = observer {
        observer(&snapshot);
    }
    Ok(())
}

#[derive(Clone)]
/// Cloneable entry point for driving a [`CarouselController`].
pub struct CarouselHandle {
    inner: Rc<RefCell<CarouselController>>,
}

impl fmt::Debug for CarouselHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(controller) => controller.fmt(f),
            Err(_) => f.write_str("CarouselHandle(<busy>)"),
        }
    }
}

impl CarouselHandle {
    /// Creates an unmounted controller. It stays idle until [`Self::reconfigure`] succeeds.
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            inner: CarouselController::new_shared(scheduler),
        }
    }

    /// Creates a controller and mounts `config` on it.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidConfig`] when `config` fails validation.
    pub fn mount(
        config: CarouselConfig,
        scheduler: Rc<dyn Scheduler>,
    ) -> Result<Self, CarouselError> {
        let handle = Self::new(scheduler);
        handle.reconfigure(config)?;
        Ok(handle)
    }

    /// Like [`Self::mount`], but notifies `observer` after the mount and every later change.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidConfig`] when `config` fails validation.
    pub fn mount_with_observer(
        config: CarouselConfig,
        scheduler: Rc<dyn Scheduler>,
        observer: SnapshotObserver,
    ) -> Result<Self, CarouselError> {
        let handle = Self::new(scheduler).with_observer(observer);
        handle.reconfigure(config)?;
        Ok(handle)
    }

    pub fn with_observer(self, observer: SnapshotObserver) -> Self {
        self.inner.borrow_mut().observer = Some(observer);
        self
    }

    /// Runs one action through the reducer and executes its timer effects.
    ///
    /// # Errors
    ///
    /// Propagates reducer errors; the carousel state is unchanged in that case.
    pub fn dispatch(&self, action: CarouselAction) -> Result<(), CarouselError> {
        dispatch_shared(&self.inner, action)
    }

    fn send(&self, action: CarouselAction) {
        if let Err(err) = self.dispatch(action) {
            logging::warn!("carousel dispatch failed: {err}");
        }
    }

    pub fn advance(&self) {
        self.send(CarouselAction::Advance);
    }

    pub fn retreat(&self) {
        self.send(CarouselAction::Retreat);
    }

    pub fn jump_to(&self, index: usize) {
        self.send(CarouselAction::JumpTo { index });
    }

    pub fn jump_to_page(&self, page: usize) {
        self.send(CarouselAction::JumpToPage { page });
    }

    /// Swaps in a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidConfig`] and keeps the previous configuration running when
    /// `config` fails validation.
    pub fn reconfigure(&self, config: CarouselConfig) -> Result<(), CarouselError> {
        self.dispatch(CarouselAction::Configure(config))
    }

    /// Cancels every timer and returns the carousel to idle.
    pub fn unmount(&self) {
        self.send(CarouselAction::Unmount);
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        self.inner.borrow().snapshot()
    }

    pub fn state(&self) -> CarouselState {
        self.inner.borrow().state().clone()
    }

    pub fn autoplay_active(&self) -> bool {
        self.inner.borrow().autoplay_active()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use platform_host::{ManualScheduler, NoopScheduler, TimerKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{
        AutoplayConfig, CarouselItem, CarouselPhase, ConfigError, DisplayMode,
        ManualNavigationPolicy,
    };

    fn hero(count: usize) -> CarouselConfig {
        CarouselConfig::new(
            "hero-carousel",
            DisplayMode::SingleFade,
            (0..count)
                .map(|index| {
                    CarouselItem::new(format!("/img/{index}.jpg"), format!("Room {index}"))
                })
                .collect(),
        )
    }

    fn mount(config: CarouselConfig) -> (ManualScheduler, CarouselHandle) {
        let scheduler = ManualScheduler::default();
        let handle = CarouselHandle::mount(config, Rc::new(scheduler.clone())).expect("mount");
        (scheduler, handle)
    }

    #[test]
    fn settle_clears_transition_after_exactly_500ms() {
        let (scheduler, handle) = mount(hero(4).with_autoplay(AutoplayConfig::disabled()));

        handle.advance();
        assert_eq!(handle.state().phase(), CarouselPhase::Transitioning(1));

        scheduler.advance_by(499);
        assert!(handle.state().is_transitioning());
        scheduler.advance_by(1);
        assert_eq!(handle.state().phase(), CarouselPhase::Settled(1));
        assert_eq!(scheduler.active_count(TimerKind::Timeout), 0);
    }

    #[test]
    fn rapid_navigation_keeps_one_settle_timer() {
        let (scheduler, handle) = mount(hero(4).with_autoplay(AutoplayConfig::disabled()));

        handle.advance();
        scheduler.advance_by(300);
        handle.advance();
        assert_eq!(scheduler.active_count(TimerKind::Timeout), 1);

        scheduler.advance_by(300);
        assert_eq!(handle.state().phase(), CarouselPhase::Transitioning(2));
        scheduler.advance_by(200);
        assert_eq!(handle.state().phase(), CarouselPhase::Settled(2));
    }

    #[test]
    fn autoplay_advances_once_per_interval() {
        let (scheduler, handle) = mount(hero(5));

        scheduler.advance_by(4_999);
        assert_eq!(handle.state().current_index(), Some(0));
        scheduler.advance_by(1);
        assert_eq!(handle.state().current_index(), Some(1));
        scheduler.advance_by(10_000);
        assert_eq!(handle.state().current_index(), Some(3));
        assert!(handle.autoplay_active());
    }

    #[test]
    fn reset_policy_restarts_the_countdown() {
        let (scheduler, handle) =
            mount(hero(5).with_manual_policy(ManualNavigationPolicy::ResetAutoplay));

        scheduler.advance_by(4_000);
        handle.advance();
        scheduler.advance_by(4_000);
        assert_eq!(handle.state().current_index(), Some(1));
        scheduler.advance_by(1_000);
        assert_eq!(handle.state().current_index(), Some(2));
        assert_eq!(scheduler.active_count(TimerKind::Interval), 1);
    }

    #[test]
    fn manual_navigation_keeps_the_cadence_by_default() {
        let (scheduler, handle) = mount(hero(5));

        scheduler.advance_by(4_000);
        handle.advance();
        scheduler.advance_by(1_000);
        assert_eq!(handle.state().current_index(), Some(2));
        assert_eq!(scheduler.started_count(TimerKind::Interval), 1);
    }

    #[test]
    fn reconfiguring_never_stacks_autoplay_timers() {
        let (scheduler, handle) = mount(hero(5));

        for interval_ms in [4_000, 3_000, 2_000, 5_000] {
            handle
                .reconfigure(hero(5).with_autoplay(AutoplayConfig {
                    enabled: true,
                    interval_ms,
                }))
                .expect("reconfigure");
            handle.advance();
            assert_eq!(scheduler.active_count(TimerKind::Interval), 1);
        }
        handle.reconfigure(hero(7)).expect("new items");

        assert_eq!(scheduler.active_count(TimerKind::Interval), 1);
        assert_eq!(scheduler.peak_active_intervals(), 1);
    }

    #[test]
    fn short_sequences_never_start_autoplay() {
        for count in [0, 1] {
            let (scheduler, handle) = mount(hero(count));
            handle.advance();
            handle.jump_to(3);
            scheduler.advance_by(60_000);

            assert_eq!(scheduler.started_count(TimerKind::Interval), 0);
            assert!(!handle.autoplay_active());
            assert_eq!(handle.state().current_index(), (count == 1).then_some(0));
        }
    }

    #[test]
    fn unmount_releases_every_timer() {
        let (scheduler, handle) = mount(hero(5));
        handle.advance();
        assert_eq!(scheduler.active_timer_count(), 2);

        handle.unmount();
        assert_eq!(scheduler.active_timer_count(), 0);
        assert_eq!(scheduler.advance_by(30_000), 0);
        assert_eq!(handle.state().phase(), CarouselPhase::Idle);
    }

    #[test]
    fn dropping_the_last_handle_cancels_timers() {
        let (scheduler, handle) = mount(hero(5));
        let clone = handle.clone();
        drop(handle);
        assert_eq!(scheduler.active_timer_count(), 1);

        drop(clone);
        assert_eq!(scheduler.active_timer_count(), 0);
    }

    #[test]
    fn observer_sees_timer_driven_changes() {
        let scheduler = ManualScheduler::default();
        let calls = Rc::new(Cell::new(0usize));
        let last = Rc::new(RefCell::new(CarouselSnapshot::default()));
        let observer: SnapshotObserver = {
            let calls = calls.clone();
            let last = last.clone();
            Rc::new(move |snapshot: &CarouselSnapshot| {
                calls.set(calls.get() + 1);
                *last.borrow_mut() = snapshot.clone();
            })
        };

        let _handle =
            CarouselHandle::mount_with_observer(hero(3), Rc::new(scheduler.clone()), observer)
                .expect("mount");
        assert_eq!(calls.get(), 1);
        assert!(last.borrow().autoplay_active);

        scheduler.advance_by(5_000);
        assert_eq!(last.borrow().current_index, Some(1));
        assert!(last.borrow().is_transitioning);

        scheduler.advance_by(500);
        assert!(!last.borrow().is_transitioning);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn invalid_reconfigure_keeps_the_running_carousel() {
        let (scheduler, handle) = mount(hero(3));
        let mut broken = hero(3);
        broken.carousel_id.clear();

        let err = handle.reconfigure(broken).expect_err("blank id");
        assert_eq!(err, CarouselError::InvalidConfig(ConfigError::BlankCarouselId));
        assert!(handle.autoplay_active());
        scheduler.advance_by(5_000);
        assert_eq!(handle.state().current_index(), Some(1));
    }

    #[test]
    fn scheduler_failures_degrade_to_instant_settle() {
        let handle = CarouselHandle::mount(hero(3), Rc::new(NoopScheduler)).expect("mount");
        assert!(!handle.autoplay_active());

        handle.advance();
        assert_eq!(handle.state().phase(), CarouselPhase::Settled(1));
    }
}
