//! Image carousel runtime: state model, reducer, window projection, timer-owning controller,
//! and the Leptos components that render hero and strip galleries.

pub mod components;
pub mod controller;
pub mod model;
pub mod projector;
pub mod reducer;
pub mod runtime_context;

pub use components::ImageCarouselGallery;
pub use controller::{CarouselController, CarouselHandle, SnapshotObserver};
pub use model::*;
pub use projector::{project_window, WindowProjection};
pub use reducer::{reduce_carousel, CarouselAction, CarouselEffect, CarouselError};
pub use runtime_context::{use_carousel_runtime, CarouselRuntime};
