//! Reducer actions, timer intents, and transition logic for a single carousel.

use leptos::logging;
use thiserror::Error;

use crate::{
    model::{
        CarouselConfig, CarouselState, ConfigError, ManualNavigationPolicy, SETTLE_DURATION_MS,
    },
    projector::{page_count, page_start},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_carousel`] to mutate [`CarouselState`].
pub enum CarouselAction {
    /// Mount or reconfigure with a new configuration.
    Configure(CarouselConfig),
    /// Move to the next slide, wrapping at the end.
    Advance,
    /// Move to the previous slide, wrapping at the start.
    Retreat,
    /// Jump to a slide by position.
    JumpTo {
        /// Target position; clamped to the last slide when out of range.
        index: usize,
    },
    /// Jump to the first slide of a page of the visible window.
    JumpToPage {
        /// Target page; clamped to the last page when out of range.
        page: usize,
    },
    /// Autoplay timer firing.
    AutoplayTick {
        /// Autoplay generation the firing timer was started under.
        epoch: u64,
    },
    /// Settle timer firing.
    Settle {
        /// Navigation sequence number the settle timer was started for.
        seq: u64,
    },
    /// Tear down the carousel and release its timers.
    Unmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Timer intents emitted by [`reduce_carousel`] for the controller to execute in order.
pub enum CarouselEffect {
    /// Start the repeating autoplay timer, replacing any existing one.
    StartAutoplay {
        /// Tick period.
        interval_ms: u64,
        /// Generation token to attach to every tick.
        epoch: u64,
    },
    /// Cancel the autoplay timer if one is running.
    CancelAutoplay,
    /// Start the one-shot settle timer, replacing any pending one.
    ScheduleSettle {
        /// Delay before the transition flag clears.
        delay_ms: u64,
        /// Sequence token to attach to the settle callback.
        seq: u64,
    },
    /// Cancel the pending settle timer if one exists.
    CancelSettle,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors. The state is left untouched when one is returned.
pub enum CarouselError {
    /// The supplied configuration failed validation.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigationOrigin {
    Manual,
    Autoplay,
}

/// Applies a [`CarouselAction`] to the carousel state and collects the resulting timer intents.
///
/// This function is the only place carousel position and transition state change. Stepping
/// needs at least two slides while jumps only need one. Stale timer callbacks are ignored by
/// comparing their tokens with the current epoch/sequence, and every autoplay start is preceded
/// by a cancel of the previous generation.
///
/// # Errors
///
/// Returns [`CarouselError::InvalidConfig`] when a [`CarouselAction::Configure`] payload fails
/// [`CarouselConfig::validate`].
pub fn reduce_carousel(
    state: &mut CarouselState,
    action: CarouselAction,
) -> Result<Vec<CarouselEffect>, CarouselError> {
    let mut effects = Vec::new();
    match action {
        CarouselAction::Configure(config) => configure(state, config, &mut effects)?,
        CarouselAction::Advance => {
            if let Some(next) = step(state, true) {
                navigate(state, next, NavigationOrigin::Manual, &mut effects);
            }
        }
        CarouselAction::Retreat => {
            if let Some(previous) = step(state, false) {
                navigate(state, previous, NavigationOrigin::Manual, &mut effects);
            }
        }
        CarouselAction::JumpTo { index } => {
            if let Some(target) = clamp_target(state, index) {
                navigate(state, target, NavigationOrigin::Manual, &mut effects);
            }
        }
        CarouselAction::JumpToPage { page } => {
            if let Some(target) = page_target(state, page) {
                navigate(state, target, NavigationOrigin::Manual, &mut effects);
            }
        }
        CarouselAction::AutoplayTick { epoch } => {
            if epoch == state.autoplay_epoch && state.autoplay_requested {
                if let Some(next) = step(state, true) {
                    navigate(state, next, NavigationOrigin::Autoplay, &mut effects);
                }
            }
        }
        CarouselAction::Settle { seq } => {
            if seq == state.settle_seq {
                state.is_transitioning = false;
            }
        }
        CarouselAction::Unmount => unmount(state, &mut effects),
    }
    Ok(effects)
}

fn configure(
    state: &mut CarouselState,
    config: CarouselConfig,
    effects: &mut Vec<CarouselEffect>,
) -> Result<(), CarouselError> {
    config.validate()?;
    if state.mounted && state.config == config {
        return Ok(());
    }

    let new_sequence = !state.mounted || state.config.is_new_sequence(&config);
    let autoplay_changed = state.config.autoplay != config.autoplay;
    state.config = config;
    state.mounted = true;

    if new_sequence {
        state.current_index = 0;
        state.settle_seq += 1;
        if state.is_transitioning {
            state.is_transitioning = false;
            effects.push(CarouselEffect::CancelSettle);
        }
    }
    if new_sequence || autoplay_changed {
        restart_autoplay(state, effects);
    }
    Ok(())
}

fn unmount(state: &mut CarouselState, effects: &mut Vec<CarouselEffect>) {
    effects.push(CarouselEffect::CancelAutoplay);
    effects.push(CarouselEffect::CancelSettle);
    state.autoplay_requested = false;
    state.autoplay_epoch += 1;
    state.settle_seq += 1;
    state.is_transitioning = false;
    state.current_index = 0;
    state.mounted = false;
}

fn restart_autoplay(state: &mut CarouselState, effects: &mut Vec<CarouselEffect>) {
    if state.autoplay_requested {
        effects.push(CarouselEffect::CancelAutoplay);
        state.autoplay_requested = false;
    }
    state.autoplay_epoch += 1;
    if state.autoplay_eligible() {
        state.autoplay_requested = true;
        effects.push(CarouselEffect::StartAutoplay {
            interval_ms: state.config.autoplay.interval_ms,
            epoch: state.autoplay_epoch,
        });
    }
}

fn navigate(
    state: &mut CarouselState,
    target: usize,
    origin: NavigationOrigin,
    effects: &mut Vec<CarouselEffect>,
) {
    state.current_index = target;
    state.is_transitioning = true;
    state.settle_seq += 1;
    effects.push(CarouselEffect::ScheduleSettle {
        delay_ms: SETTLE_DURATION_MS,
        seq: state.settle_seq,
    });

    if origin == NavigationOrigin::Manual
        && state.config.manual_policy == ManualNavigationPolicy::ResetAutoplay
        && state.autoplay_requested
    {
        restart_autoplay(state, effects);
    }
}

fn step(state: &CarouselState, forward: bool) -> Option<usize> {
    let count = state.item_count();
    if count <= 1 {
        return None;
    }
    let current = state.current_index;
    Some(if forward {
        (current + 1) % count
    } else {
        (current + count - 1) % count
    })
}

fn clamp_target(state: &CarouselState, index: usize) -> Option<usize> {
    let count = state.item_count();
    if count == 0 {
        return None;
    }
    if index >= count {
        logging::warn!(
            "carousel `{}`: jump target {index} out of range, clamping to {}",
            state.config.carousel_id,
            count - 1
        );
        return Some(count - 1);
    }
    Some(index)
}

fn page_target(state: &CarouselState, page: usize) -> Option<usize> {
    let count = state.item_count();
    if count == 0 {
        return None;
    }
    let window = state.effective_window();
    let pages = page_count(count, window);
    let page = if page >= pages {
        logging::warn!(
            "carousel `{}`: page {page} out of range, clamping to {}",
            state.config.carousel_id,
            pages - 1
        );
        pages - 1
    } else {
        page
    };
    Some(page_start(page, window).min(count - 1))
}
