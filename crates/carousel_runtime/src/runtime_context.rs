//! Leptos bridge for a carousel controller.
//!
//! [`use_carousel_runtime`] creates one [`CarouselHandle`] per component instance, mirrors its
//! snapshots into a signal, reconfigures it when the reactive configuration changes, and
//! unmounts it when the owning scope is cleaned up. Rendering reads the signal and feeds back
//! only through the navigation methods on [`CarouselRuntime`].

use std::rc::Rc;

use leptos::*;
use platform_host::Scheduler;

use crate::{
    controller::{CarouselHandle, SnapshotObserver},
    model::{CarouselConfig, CarouselItem, CarouselSnapshot},
};

#[derive(Clone, Copy)]
/// Reactive handle for reading carousel state and issuing navigation.
pub struct CarouselRuntime {
    /// Controller owned by the current reactive scope.
    pub handle: StoredValue<CarouselHandle>,
    /// Latest snapshot published by the controller.
    pub snapshot: RwSignal<CarouselSnapshot>,
    /// Item sequence, changing only when the configured items change.
    pub items: Memo<Vec<CarouselItem>>,
}

impl CarouselRuntime {
    fn with_handle(&self, f: impl FnOnce(&CarouselHandle)) {
        // The stored value is gone once the scope is disposed; late clicks are ignored.
        let _ = self.handle.try_with_value(f);
    }

    pub fn advance(&self) {
        self.with_handle(CarouselHandle::advance);
    }

    pub fn retreat(&self) {
        self.with_handle(CarouselHandle::retreat);
    }

    pub fn jump_to(&self, index: usize) {
        self.with_handle(|handle| handle.jump_to(index));
    }

    pub fn jump_to_page(&self, page: usize) {
        self.with_handle(|handle| handle.jump_to_page(page));
    }

    /// Tracked read of the current slide.
    pub fn current_index(&self) -> Option<usize> {
        self.snapshot.with(|snapshot| snapshot.current_index)
    }

    /// Tracked read of the transition flag.
    pub fn is_transitioning(&self) -> bool {
        self.snapshot.with(|snapshot| snapshot.is_transitioning)
    }
}

/// Mounts a carousel controller for the current reactive scope.
///
/// The first configuration is applied immediately. Later values of `config` go through
/// [`CarouselHandle::reconfigure`]; an invalid value is logged and the previous configuration
/// keeps running.
pub fn use_carousel_runtime(
    config: MaybeSignal<CarouselConfig>,
    scheduler: Rc<dyn Scheduler>,
) -> CarouselRuntime {
    let snapshot = create_rw_signal(CarouselSnapshot::default());
    let observer: SnapshotObserver = Rc::new(move |next: &CarouselSnapshot| {
        // Timers can outlive the scope by one tick; a disposed signal just drops the update.
        let _ = snapshot.try_set(next.clone());
    });

    let handle = CarouselHandle::new(scheduler).with_observer(observer);
    if let Err(err) = handle.reconfigure(config.get_untracked()) {
        logging::warn!("carousel mount rejected configuration: {err}");
    }

    create_effect({
        let handle = handle.clone();
        move |previous: Option<CarouselConfig>| {
            let next = config.get();
            if previous.as_ref().is_some_and(|previous| previous != &next) {
                if let Err(err) = handle.reconfigure(next.clone()) {
                    logging::warn!("carousel reconfiguration rejected: {err}");
                }
            }
            next
        }
    });

    on_cleanup({
        let handle = handle.clone();
        move || handle.unmount()
    });

    let items = create_memo(move |_| snapshot.with(|snapshot| snapshot.items.clone()));

    CarouselRuntime {
        handle: store_value(handle),
        snapshot,
        items,
    }
}

/// Makes `runtime` available to descendant carousel parts.
pub fn provide_carousel_runtime(runtime: CarouselRuntime) {
    provide_context(runtime);
}

/// Returns the nearest [`CarouselRuntime`].
///
/// # Panics
///
/// Panics if called outside a component tree that ran [`provide_carousel_runtime`].
pub fn use_carousel_context() -> CarouselRuntime {
    use_context::<CarouselRuntime>().expect("CarouselRuntime context missing")
}

#[cfg(test)]
mod tests {
    use platform_host::{ManualScheduler, TimerKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::DisplayMode;

    fn footer(count: usize) -> CarouselConfig {
        CarouselConfig::new(
            "footer-carousel",
            DisplayMode::Strip,
            (0..count)
                .map(|index| {
                    CarouselItem::new(format!("/img/{index}.jpg"), format!("Plate {index}"))
                })
                .collect(),
        )
    }

    #[test]
    fn snapshot_signal_follows_timers_and_navigation() {
        let runtime = create_runtime();
        let scheduler = ManualScheduler::default();
        let carousel =
            use_carousel_runtime(MaybeSignal::Static(footer(6)), Rc::new(scheduler.clone()));

        assert_eq!(carousel.snapshot.get_untracked().current_index, Some(0));
        assert_eq!(carousel.items.get_untracked().len(), 6);

        scheduler.advance_by(5_000);
        assert_eq!(carousel.snapshot.get_untracked().current_index, Some(1));

        carousel.jump_to_page(1);
        let snapshot = carousel.snapshot.get_untracked();
        assert_eq!(snapshot.current_index, Some(4));
        assert_eq!(snapshot.window.visible, vec![4, 5, 0, 1]);
        assert!(snapshot.is_transitioning);

        runtime.dispose();
    }

    #[test]
    fn config_signal_changes_reconfigure_the_controller() {
        let runtime = create_runtime();
        let scheduler = ManualScheduler::default();
        let config = create_rw_signal(footer(6));
        let carousel = use_carousel_runtime(config.into(), Rc::new(scheduler.clone()));

        carousel.advance();
        config.set(footer(3));
        let snapshot = carousel.snapshot.get_untracked();
        assert_eq!(snapshot.current_index, Some(0));
        assert_eq!(snapshot.item_count(), 3);
        assert_eq!(scheduler.active_count(TimerKind::Interval), 1);
        assert_eq!(scheduler.peak_active_intervals(), 1);

        runtime.dispose();
    }
}
