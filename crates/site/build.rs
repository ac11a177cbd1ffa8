use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;
const DISPLAY_MODES: [&str; 4] = ["hero", "footer", "single-fade", "strip"];
const MANUAL_POLICIES: [&str; 2] = ["reset-autoplay", "keep-cadence"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GalleryItem {
    src: String,
    alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link_href: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GalleryAutoplay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GalleryEntry {
    carousel_id: String,
    title: String,
    mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    window_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    autoplay: Option<GalleryAutoplay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    manual_policy: Option<String>,
    items: Vec<GalleryItem>,
}

#[derive(Debug, Deserialize)]
struct GalleryCatalogFile {
    schema_version: u32,
    gallery: Vec<GalleryEntry>,
}

fn validate_entry(entry: &GalleryEntry) -> Result<(), String> {
    if entry.carousel_id.trim().is_empty() {
        return Err("carousel_id must not be blank".to_string());
    }
    if !DISPLAY_MODES.contains(&entry.mode.as_str()) {
        return Err(format!(
            "unknown mode `{}` (expected one of {DISPLAY_MODES:?})",
            entry.mode
        ));
    }
    if entry.window_size == Some(0) {
        return Err("window_size must be positive".to_string());
    }
    if let Some(GalleryAutoplay {
        interval_ms: Some(0),
        ..
    }) = entry.autoplay
    {
        return Err("autoplay.interval_ms must be positive".to_string());
    }
    if let Some(policy) = entry.manual_policy.as_deref() {
        if !MANUAL_POLICIES.contains(&policy) {
            return Err(format!(
                "unknown manual_policy `{policy}` (expected one of {MANUAL_POLICIES:?})"
            ));
        }
    }
    if entry.items.is_empty() {
        return Err("gallery has no items".to_string());
    }
    if let Some(index) = entry.items.iter().position(|item| item.src.trim().is_empty()) {
        return Err(format!("item {index} has a blank src"));
    }
    Ok(())
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("galleries.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: GalleryCatalogFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if catalog.schema_version != SCHEMA_VERSION {
        panic!(
            "gallery schema mismatch in {}: expected {SCHEMA_VERSION} found {}",
            path.display(),
            catalog.schema_version
        );
    }

    let mut seen = BTreeSet::new();
    for entry in &catalog.gallery {
        if let Err(reason) = validate_entry(entry) {
            panic!(
                "invalid gallery `{}` in {}: {reason}",
                entry.carousel_id,
                path.display()
            );
        }
        if !seen.insert(entry.carousel_id.as_str()) {
            panic!(
                "duplicate gallery id `{}` in {}",
                entry.carousel_id,
                path.display()
            );
        }
    }

    let json = serde_json::to_string_pretty(&catalog.gallery).expect("serialize gallery catalog");
    let generated = format!(
        "/// Build-time generated gallery catalog JSON.\n\
pub const GALLERY_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("gallery_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
