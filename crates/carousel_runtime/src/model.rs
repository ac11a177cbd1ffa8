use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::projector::{project_window, WindowProjection};

pub const SETTLE_DURATION_MS: u64 = 500;
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_WINDOW_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselItem {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_href: Option<String>,
}

impl CarouselItem {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            link_href: None,
        }
    }

    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.link_href = Some(href.into());
        self
    }

    /// Accessible label, falling back to the 1-based slide number when `alt` is blank.
    pub fn label(&self, index: usize) -> String {
        if self.alt.trim().is_empty() {
            format!("Slide {}", index + 1)
        } else {
            self.alt.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// One full-bleed slide at a time, cross-fading between slides.
    #[default]
    #[serde(alias = "hero")]
    SingleFade,
    /// Several slides edge-to-edge with a sliding visible window.
    #[serde(alias = "footer")]
    Strip,
}

impl DisplayMode {
    pub fn token(self) -> &'static str {
        match self {
            Self::SingleFade => "single-fade",
            Self::Strip => "strip",
        }
    }

    /// Window size actually projected for this mode. Single-fade shows exactly one slide.
    pub fn effective_window(self, window_size: usize) -> usize {
        match self {
            Self::SingleFade => 1,
            Self::Strip => window_size,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManualNavigationPolicy {
    /// Autoplay keeps its cadence regardless of manual navigation.
    #[default]
    KeepCadence,
    /// Manual navigation restarts the autoplay countdown.
    ResetAutoplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayConfig {
    #[serde(default = "default_autoplay_enabled")]
    pub enabled: bool,
    #[serde(default = "default_autoplay_interval_ms")]
    pub interval_ms: u64,
}

fn default_autoplay_enabled() -> bool {
    true
}

fn default_autoplay_interval_ms() -> u64 {
    DEFAULT_AUTOPLAY_INTERVAL_MS
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: default_autoplay_enabled(),
            interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
        }
    }
}

impl AutoplayConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("carousel id must not be blank")]
    BlankCarouselId,
    #[error("autoplay interval must be positive")]
    ZeroInterval,
    #[error("window size must be positive")]
    ZeroWindowSize,
    #[error("item {index} has a blank image source")]
    BlankImageSource { index: usize },
    #[error("invalid carousel config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub carousel_id: String,
    #[serde(default)]
    pub mode: DisplayMode,
    #[serde(default)]
    pub items: Vec<CarouselItem>,
    #[serde(default)]
    pub autoplay: AutoplayConfig,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default)]
    pub manual_policy: ManualNavigationPolicy,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            carousel_id: String::new(),
            mode: DisplayMode::default(),
            items: Vec::new(),
            autoplay: AutoplayConfig::default(),
            window_size: DEFAULT_WINDOW_SIZE,
            manual_policy: ManualNavigationPolicy::default(),
        }
    }
}

impl CarouselConfig {
    pub fn new(
        carousel_id: impl Into<String>,
        mode: DisplayMode,
        items: Vec<CarouselItem>,
    ) -> Self {
        Self {
            carousel_id: carousel_id.into(),
            mode,
            items,
            ..Self::default()
        }
    }

    pub fn with_autoplay(mut self, autoplay: AutoplayConfig) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_manual_policy(mut self, policy: ManualNavigationPolicy) -> Self {
        self.manual_policy = policy;
        self
    }

    /// Parses and validates a single carousel definition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any [`Self::validate`] error.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the controller relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel_id.trim().is_empty() {
            return Err(ConfigError::BlankCarouselId);
        }
        if self.autoplay.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if let Some(index) = self.items.iter().position(|item| item.src.trim().is_empty()) {
            return Err(ConfigError::BlankImageSource { index });
        }
        Ok(())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// True when a configuration swap must reset position: the item sequence or id changed.
    pub fn is_new_sequence(&self, next: &Self) -> bool {
        self.carousel_id != next.carousel_id || self.items != next.items
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    /// No items to show.
    Idle,
    /// Resting on a slide.
    Settled(usize),
    /// Inside the settle window after a navigation.
    Transitioning(usize),
}

/// Controller-owned position and transition state.
///
/// Only [`crate::reducer::reduce_carousel`] mutates this type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CarouselState {
    pub(crate) config: CarouselConfig,
    pub(crate) current_index: usize,
    pub(crate) is_transitioning: bool,
    pub(crate) mounted: bool,
    pub(crate) autoplay_requested: bool,
    pub(crate) autoplay_epoch: u64,
    pub(crate) settle_seq: u64,
}

impl CarouselState {
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.config.items
    }

    pub fn item_count(&self) -> usize {
        if self.mounted {
            self.config.items.len()
        } else {
            0
        }
    }

    /// Current slide, or `None` while there is nothing to show.
    pub fn current_index(&self) -> Option<usize> {
        (self.item_count() > 0).then_some(self.current_index)
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the reducer expects an autoplay timer to be running.
    pub fn autoplay_requested(&self) -> bool {
        self.autoplay_requested
    }

    /// Generation token carried by autoplay ticks; bumps on every autoplay restart.
    pub fn autoplay_epoch(&self) -> u64 {
        self.autoplay_epoch
    }

    /// Sequence token carried by settle callbacks; bumps on every navigation.
    pub fn settle_seq(&self) -> u64 {
        self.settle_seq
    }

    pub(crate) fn autoplay_eligible(&self) -> bool {
        self.mounted && self.config.autoplay.enabled && self.config.items.len() > 1
    }

    pub fn effective_window(&self) -> usize {
        self.config.mode.effective_window(self.config.window_size)
    }

    pub fn phase(&self) -> CarouselPhase {
        match self.current_index() {
            None => CarouselPhase::Idle,
            Some(index) if self.is_transitioning => CarouselPhase::Transitioning(index),
            Some(index) => CarouselPhase::Settled(index),
        }
    }

    pub fn projection(&self) -> WindowProjection {
        project_window(
            self.current_index,
            self.item_count(),
            self.effective_window(),
        )
    }
}

/// Read-only view of a carousel published to renderers after every dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CarouselSnapshot {
    pub carousel_id: String,
    pub mode: DisplayMode,
    pub items: Vec<CarouselItem>,
    pub current_index: Option<usize>,
    pub is_transitioning: bool,
    pub window: WindowProjection,
    pub autoplay_active: bool,
}

impl CarouselSnapshot {
    pub fn from_state(state: &CarouselState, autoplay_active: bool) -> Self {
        let items = if state.is_mounted() {
            state.items().to_vec()
        } else {
            Vec::new()
        };
        Self {
            carousel_id: state.config().carousel_id.clone(),
            mode: state.config().mode,
            items,
            current_index: state.current_index(),
            is_transitioning: state.is_transitioning(),
            window: state.projection(),
            autoplay_active,
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_current(&self, index: usize) -> bool {
        self.current_index == Some(index)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.window.contains(index)
    }
}
