//! Carousel rendering for the hero (single-fade) and footer (strip) layouts.
//!
//! Views only read the [`CarouselSnapshot`] signal of the surrounding
//! [`CarouselRuntime`](crate::runtime_context::CarouselRuntime) and call its navigation
//! methods; all position and timer logic lives in the controller.

use std::rc::Rc;

use leptos::ev::MouseEvent;
use leptos::*;
use platform_host::Scheduler;
use system_ui::prelude::*;

use crate::{
    model::{CarouselConfig, CarouselItem, CarouselSnapshot, DisplayMode},
    projector::forward_distance,
    runtime_context::{provide_carousel_runtime, use_carousel_context, use_carousel_runtime},
};

/// DOM id of the slide at `index`.
pub fn slide_dom_id(carousel_id: &str, index: usize) -> String {
    format!("{carousel_id}-image-{index}")
}

/// DOM id of the slide indicator dot at `index`.
pub fn dot_dom_id(carousel_id: &str, index: usize) -> String {
    format!("{carousel_id}-dot-{index}")
}

/// DOM id of the page indicator dot at `page`.
pub fn page_dom_id(carousel_id: &str, page: usize) -> String {
    format!("{carousel_id}-page-{page}")
}

fn viewport_dom_id(carousel_id: &str) -> String {
    format!("{carousel_id}-viewport")
}

fn state_token(is_transitioning: bool) -> &'static str {
    if is_transitioning {
        "transitioning"
    } else {
        "settled"
    }
}

/// Only the first slide is fetched eagerly; it is the one painted on load.
fn loading_hint(index: usize) -> &'static str {
    if index == 0 {
        "eager"
    } else {
        "lazy"
    }
}

/// Hero previous/next buttons and slide dots only make sense with something to switch to.
pub fn shows_slide_controls(item_count: usize) -> bool {
    item_count > 1
}

/// The strip pager appears only when the sequence overflows one window.
pub fn shows_page_controls(item_count: usize, window_size: usize) -> bool {
    item_count > window_size
}

/// Dot keys carry the carousel id so a renamed carousel rebuilds its dot ids.
fn keyed_indices(carousel_id: &str, count: usize) -> Vec<(String, usize)> {
    (0..count).map(|index| (carousel_id.to_string(), index)).collect()
}

/// Strip pager labels; the buttons move the window rather than a single slide.
const PAGER_PREVIOUS_LABEL: &str = "Previous images";
const PAGER_NEXT_LABEL: &str = "Next images";

/// On-screen order of `index` within the strip track.
fn slide_order(snapshot: &CarouselSnapshot, index: usize) -> usize {
    match snapshot.current_index {
        Some(current) if snapshot.item_count() > 0 => {
            forward_distance(index, current, snapshot.item_count())
        }
        _ => index,
    }
}

#[component]
/// Image carousel block driven by a reactive configuration.
///
/// Renders nothing while the configuration holds no items. The scheduler defaults to the
/// browser adapter selected by `platform_host_web`.
pub fn ImageCarouselGallery(
    /// Carousel definition; later values reconfigure the running controller.
    #[prop(into)]
    config: MaybeSignal<CarouselConfig>,
    /// Timer host override, mainly for tests and previews.
    #[prop(optional)]
    scheduler: Option<Rc<dyn Scheduler>>,
) -> impl IntoView {
    let scheduler = scheduler.unwrap_or_else(platform_host_web::scheduler);
    let runtime = use_carousel_runtime(config, scheduler);
    provide_carousel_runtime(runtime);

    let mode = create_memo(move |_| runtime.snapshot.with(|snapshot| snapshot.mode));
    let has_items =
        create_memo(move |_| runtime.snapshot.with(|snapshot| snapshot.item_count() > 0));

    view! {
        <Show when=move || has_items.get() fallback=|| ()>
            {move || match mode.get() {
                DisplayMode::SingleFade => view! { <HeroCarousel /> }.into_view(),
                DisplayMode::Strip => view! { <StripCarousel /> }.into_view(),
            }}
        </Show>
    }
}

#[component]
fn HeroCarousel() -> impl IntoView {
    let runtime = use_carousel_context();
    let snapshot = runtime.snapshot;
    let carousel_id = create_memo(move |_| snapshot.with(|snapshot| snapshot.carousel_id.clone()));
    let item_count = create_memo(move |_| snapshot.with(CarouselSnapshot::item_count));
    let viewport_id = Signal::derive(move || viewport_dom_id(&carousel_id.get()));

    view! {
        <section
            class="carousel carousel--hero"
            id=move || carousel_id.get()
            data-ui-kind="image-carousel"
            data-ui-mode=DisplayMode::SingleFade.token()
            data-ui-state=move || state_token(runtime.is_transitioning())
            aria-roledescription="carousel"
        >
            <div class="carousel__viewport" id=move || viewport_id.get() aria-live="off">
                <CarouselSlides />
            </div>
            <Show when=move || shows_slide_controls(item_count.get()) fallback=|| ()>
                <IconButton
                    icon=IconName::ChevronLeft
                    variant=ButtonVariant::Overlay
                    layout_class="carousel__nav carousel__nav--prev"
                    ui_slot="previous"
                    aria_label="Previous slide".to_string()
                    aria_controls=viewport_id
                    on_click=Callback::new(move |_: MouseEvent| runtime.retreat())
                />
                <IconButton
                    icon=IconName::ChevronRight
                    variant=ButtonVariant::Overlay
                    layout_class="carousel__nav carousel__nav--next"
                    ui_slot="next"
                    aria_label="Next slide".to_string()
                    aria_controls=viewport_id
                    on_click=Callback::new(move |_: MouseEvent| runtime.advance())
                />
                <Cluster
                    gap=LayoutGap::Sm
                    justify=LayoutJustify::Center
                    layout_class="carousel__dots"
                    ui_slot="indicators"
                    role="group"
                    aria_label="Choose slide"
                >
                    <For
                        each=move || keyed_indices(&carousel_id.get(), item_count.get())
                        key=|entry| entry.clone()
                        let:entry
                    >
                        <IndicatorDot
                            size=ButtonSize::Sm
                            id=dot_dom_id(&entry.0, entry.1)
                            aria_label=format!("Go to slide {}", entry.1 + 1)
                            selected=Signal::derive(move || runtime.current_index() == Some(entry.1))
                            on_click=Callback::new(move |_: MouseEvent| runtime.jump_to(entry.1))
                        />
                    </For>
                </Cluster>
            </Show>
        </section>
    }
}

#[component]
fn StripCarousel() -> impl IntoView {
    let runtime = use_carousel_context();
    let snapshot = runtime.snapshot;
    let carousel_id = create_memo(move |_| snapshot.with(|snapshot| snapshot.carousel_id.clone()));
    let item_count = create_memo(move |_| snapshot.with(CarouselSnapshot::item_count));
    let window_size = create_memo(move |_| snapshot.with(|snapshot| snapshot.window.window_size));
    let page_count = create_memo(move |_| snapshot.with(|snapshot| snapshot.window.page_count));
    let viewport_id = Signal::derive(move || viewport_dom_id(&carousel_id.get()));

    view! {
        <section
            class="carousel carousel--strip"
            id=move || carousel_id.get()
            style=move || format!("--carousel-window: {}", window_size.get())
            data-ui-kind="image-carousel"
            data-ui-mode=DisplayMode::Strip.token()
            data-ui-state=move || state_token(runtime.is_transitioning())
            aria-roledescription="carousel"
        >
            <div class="carousel__viewport" id=move || viewport_id.get() aria-live="off">
                <div class="carousel__track">
                    <CarouselSlides />
                </div>
            </div>
            <Show
                when=move || shows_page_controls(item_count.get(), window_size.get())
                fallback=|| ()
            >
                <Cluster
                    gap=LayoutGap::Md
                    justify=LayoutJustify::Center
                    layout_class="carousel__pager"
                    ui_slot="pager"
                    role="group"
                    aria_label="Choose page"
                >
                    <IconButton
                        icon=IconName::ChevronLeft
                        size=ButtonSize::Sm
                        ui_slot="previous"
                        aria_label=PAGER_PREVIOUS_LABEL.to_string()
                        aria_controls=viewport_id
                        on_click=Callback::new(move |_: MouseEvent| runtime.retreat())
                    />
                    <For
                        each=move || keyed_indices(&carousel_id.get(), page_count.get())
                        key=|entry| entry.clone()
                        let:entry
                    >
                        <IndicatorDot
                            size=ButtonSize::Sm
                            id=page_dom_id(&entry.0, entry.1)
                            aria_label=format!("Go to page {}", entry.1 + 1)
                            selected=Signal::derive(move || {
                                snapshot.with(|snapshot| snapshot.window.is_current_page(entry.1))
                            })
                            on_click=Callback::new(move |_: MouseEvent| runtime.jump_to_page(entry.1))
                        />
                    </For>
                    <IconButton
                        icon=IconName::ChevronRight
                        size=ButtonSize::Sm
                        ui_slot="next"
                        aria_label=PAGER_NEXT_LABEL.to_string()
                        aria_controls=viewport_id
                        on_click=Callback::new(move |_: MouseEvent| runtime.advance())
                    />
                </Cluster>
            </Show>
        </section>
    }
}

#[component]
fn CarouselSlides() -> impl IntoView {
    let runtime = use_carousel_context();

    view! {
        <For
            each=move || runtime.items.get().into_iter().enumerate()
            key=|(index, item)| (*index, item.src.clone())
            children=move |(index, item)| view! { <CarouselSlide index item /> }
        />
    }
}

#[component]
fn CarouselSlide(index: usize, item: CarouselItem) -> impl IntoView {
    let snapshot = use_carousel_context().snapshot;
    let is_current = move || snapshot.with(|snapshot| snapshot.is_current(index));
    let is_visible = move || snapshot.with(|snapshot| snapshot.is_visible(index));
    let label = item.label(index);

    let image = view! {
        <img
            class="carousel__image"
            src=item.src.clone()
            alt=label.clone()
            loading=loading_hint(index)
            decoding="async"
            draggable="false"
        />
    };
    let body = match item.link_href.clone() {
        Some(href) => view! {
            <a class="carousel__link" href=href aria-label=label>
                {image}
            </a>
        }
        .into_view(),
        None => image.into_view(),
    };

    view! {
        <figure
            class="carousel__slide"
            id=move || snapshot.with(|snapshot| slide_dom_id(&snapshot.carousel_id, index))
            role="group"
            aria-roledescription="slide"
            aria-label=move || {
                snapshot.with(|snapshot| format!("{} of {}", index + 1, snapshot.item_count()))
            }
            aria-hidden=move || bool_token(!is_visible())
            style:order=move || snapshot.with(|snapshot| slide_order(snapshot, index)).to_string()
            data-ui-slide=index
            data-ui-current=move || bool_token(is_current())
            data-ui-visible=move || bool_token(is_visible())
        >
            {body}
        </figure>
    }
}
