use carousel_runtime::{CarouselConfig, CarouselHandle, CarouselItem, CarouselPhase, DisplayMode};
use pretty_assertions::assert_eq;

fn footer(count: usize) -> CarouselConfig {
    let mut config = CarouselConfig::new(
        "footer-carousel",
        DisplayMode::Strip,
        (0..count)
            .map(|index| {
                CarouselItem::new(format!("/images/dish-{index}.webp"), format!("Dish {index}"))
            })
            .collect(),
    );
    config.window_size = 2;
    config
}

#[test]
fn native_host_settles_navigation_without_timers() {
    let scheduler = platform_host_web::scheduler();
    let handle = CarouselHandle::mount(footer(3), scheduler).expect("mount");
    assert!(!handle.autoplay_active());

    handle.advance();
    assert_eq!(handle.state().phase(), CarouselPhase::Settled(1));

    handle.jump_to_page(1);
    assert_eq!(handle.state().phase(), CarouselPhase::Settled(2));
    assert!(!handle.snapshot().is_transitioning);
}
