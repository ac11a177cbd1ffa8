use std::rc::Rc;

use carousel_runtime::{
    AutoplayConfig, CarouselConfig, CarouselHandle, CarouselItem, CarouselPhase, DisplayMode,
};
use platform_host::{ManualScheduler, Scheduler, TimerKind};
use pretty_assertions::assert_eq;

fn gallery(count: usize) -> CarouselConfig {
    CarouselConfig::new(
        "hero-carousel",
        DisplayMode::SingleFade,
        (0..count)
            .map(|index| {
                CarouselItem::new(format!("/images/hero-{index}.webp"), format!("Hero {index}"))
            })
            .collect(),
    )
}

#[test]
fn three_ticks_advance_three_slides_with_one_timer() {
    let scheduler = ManualScheduler::default();
    let handle = CarouselHandle::mount(gallery(5), Rc::new(scheduler.clone())).expect("mount");

    for expected in 1..=3 {
        scheduler.advance_by(5_000);
        assert_eq!(handle.state().current_index(), Some(expected));
        assert_eq!(scheduler.active_count(TimerKind::Interval), 1);
    }

    assert_eq!(handle.state().phase(), CarouselPhase::Transitioning(3));
    scheduler.advance_by(500);
    assert_eq!(handle.state().phase(), CarouselPhase::Settled(3));
    assert_eq!(scheduler.started_count(TimerKind::Interval), 1);
    assert_eq!(scheduler.peak_active_intervals(), 1);
}

#[test]
fn autoplay_wraps_and_survives_reconfiguration() {
    let scheduler = ManualScheduler::default();
    let handle = CarouselHandle::mount(gallery(3), Rc::new(scheduler.clone())).expect("mount");

    scheduler.advance_by(15_000);
    assert_eq!(handle.state().current_index(), Some(0));

    handle.jump_to(2);
    handle
        .reconfigure(gallery(3).with_autoplay(AutoplayConfig {
            enabled: true,
            interval_ms: 2_000,
        }))
        .expect("retime");
    assert_eq!(handle.state().current_index(), Some(2));

    scheduler.advance_by(2_000);
    assert_eq!(handle.state().current_index(), Some(0));

    handle
        .reconfigure(gallery(3).with_autoplay(AutoplayConfig::disabled()))
        .expect("disable");
    scheduler.advance_by(10_000);
    assert_eq!(handle.state().current_index(), Some(0));
    assert_eq!(scheduler.active_count(TimerKind::Interval), 0);
    assert_eq!(scheduler.peak_active_intervals(), 1);
}

#[test]
fn unmounted_carousel_leaves_no_timers_behind() {
    let scheduler = ManualScheduler::default();
    let handle = CarouselHandle::mount(gallery(4), Rc::new(scheduler.clone())).expect("mount");
    handle.advance();
    handle.unmount();

    assert_eq!(scheduler.active_timer_count(), 0);
    assert_eq!(scheduler.advance_by(60_000), 0);
}
