//! Gallery catalog embedded at build time from `galleries.toml`.

use std::sync::OnceLock;

use carousel_runtime::{CarouselConfig, ConfigError, DisplayMode};
use leptos::logging;
use serde::Deserialize;

include!(concat!(env!("OUT_DIR"), "/gallery_catalog_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// One named gallery and the carousel configuration that renders it.
pub struct GalleryEntry {
    pub title: String,
    #[serde(flatten)]
    pub config: CarouselConfig,
}

/// Parses a catalog payload and validates every entry.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed JSON and the first validation failure otherwise.
pub fn parse_gallery_catalog(raw: &str) -> Result<Vec<GalleryEntry>, ConfigError> {
    let entries: Vec<GalleryEntry> =
        serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
    for entry in &entries {
        entry.config.validate()?;
    }
    Ok(entries)
}

/// Returns the embedded catalog. A rejected catalog is logged once and yields no galleries.
pub fn gallery_catalog() -> &'static [GalleryEntry] {
    static CATALOG: OnceLock<Vec<GalleryEntry>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        parse_gallery_catalog(GALLERY_CATALOG_JSON).unwrap_or_else(|err| {
            logging::warn!("gallery catalog rejected: {err}");
            Vec::new()
        })
    })
}

pub fn gallery(carousel_id: &str) -> Option<&'static GalleryEntry> {
    gallery_catalog()
        .iter()
        .find(|entry| entry.config.carousel_id == carousel_id)
}

/// First gallery of the given display mode, used for the home page slots.
pub fn first_gallery_of(mode: DisplayMode) -> Option<&'static GalleryEntry> {
    gallery_catalog()
        .iter()
        .find(|entry| entry.config.mode == mode)
}

#[cfg(test)]
mod tests {
    use carousel_runtime::ManualNavigationPolicy;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_catalog_has_hero_and_footer_galleries() {
        let hero = first_gallery_of(DisplayMode::SingleFade).expect("hero gallery");
        let footer = first_gallery_of(DisplayMode::Strip).expect("footer gallery");

        assert_eq!(hero.config.carousel_id, "hero-carousel");
        assert_eq!(hero.config.autoplay.interval_ms, 5_000);
        assert_eq!(footer.config.window_size, 4);
        assert!(footer.config.item_count() > footer.config.window_size);
        assert_eq!(
            footer.config.manual_policy,
            ManualNavigationPolicy::ResetAutoplay
        );
        assert_eq!(gallery("footer-carousel"), Some(footer));
        assert_eq!(gallery("missing"), None);
    }

    #[test]
    fn omitted_fields_take_carousel_defaults() {
        let entries = parse_gallery_catalog(
            r#"[{
                "carousel_id": "patio",
                "title": "Patio",
                "mode": "strip",
                "items": [{ "src": "/img/patio.webp", "alt": "" }]
            }]"#,
        )
        .expect("parse");

        let config = &entries[0].config;
        assert_eq!(entries[0].title, "Patio");
        assert!(config.autoplay.enabled);
        assert_eq!(config.window_size, 4);
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let err = parse_gallery_catalog(
            r#"[{
                "carousel_id": "patio",
                "title": "Patio",
                "mode": "hero",
                "autoplay": { "interval_ms": 0 },
                "items": []
            }]"#,
        )
        .expect_err("zero interval");
        assert_eq!(err, ConfigError::ZeroInterval);

        let err = parse_gallery_catalog("[{]").expect_err("malformed");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
