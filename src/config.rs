//! Portfolio configuration module.
//!
//! Handles loading, validating, and merging `folio.toml`. Stock defaults are
//! overridden by the user's file in the site root; the file only needs the
//! keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! brand = "Portfolio"                # Default alt text, written by `scan`
//! service_area = ""                  # Free-form tagline stored in gallery.json
//!
//! [paths]
//! manifest = "gallery.json"
//! featured_list = "featured.txt"
//! carousel_list = "carousel.txt"
//! full_dir = "assets/gallery/full"   # Full-size images (scanned)
//! thumb_dir = "assets/gallery/thumb" # Pre-generated thumbnails
//!
//! [layout]
//! gap = 14                           # Pixels between grid items
//! row_height = 260                   # Target row height above all breakpoints
//! fallback_container_width = 1000    # Used when the container reports 0
//! min_available_width = 10           # Floor for a row's usable width
//! fallback_aspect_ratio = 1.5        # Ratio used when an image can't be read
//! resize_debounce_ms = 120
//!
//! [[layout.breakpoints]]
//! max_width = 520
//! row_height = 220
//!
//! [[layout.breakpoints]]
//! max_width = 920
//! row_height = 200
//!
//! [grid]
//! initial_visible = 18
//! load_batch = 18
//!
//! [featured]
//! fallback_count = 6                 # Photos used when featured.txt is missing
//!
//! [carousel]
//! fallback_count = 7                 # Photos used when carousel.txt is missing
//! autoplay_interval_ms = 3000
//! swipe_threshold = 36               # Pixels of horizontal travel for a swipe
//! presentation = "single"            # "single" or "coverflow"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Name of the config file looked up in the site root.
pub const CONFIG_FILENAME: &str = "folio.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Portfolio configuration loaded from `folio.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    pub site: SiteConfig,
    pub paths: PathsConfig,
    pub layout: LayoutConfig,
    pub grid: GridConfig,
    pub featured: FeaturedConfig,
    pub carousel: CarouselConfig,
}

impl FolioConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.row_height == 0 {
            return Err(ConfigError::Validation(
                "layout.row_height must be positive".into(),
            ));
        }
        if !(self.layout.fallback_aspect_ratio > 0.0
            && self.layout.fallback_aspect_ratio.is_finite())
        {
            return Err(ConfigError::Validation(
                "layout.fallback_aspect_ratio must be a positive number".into(),
            ));
        }
        if self.layout.fallback_container_width == 0 {
            return Err(ConfigError::Validation(
                "layout.fallback_container_width must be positive".into(),
            ));
        }
        for pair in self.layout.breakpoints.windows(2) {
            if pair[0].max_width >= pair[1].max_width {
                return Err(ConfigError::Validation(
                    "layout.breakpoints must be sorted by ascending max_width".into(),
                ));
            }
        }
        if self.layout.breakpoints.iter().any(|b| b.row_height == 0) {
            return Err(ConfigError::Validation(
                "layout.breakpoints row_height must be positive".into(),
            ));
        }
        if self.grid.initial_visible == 0 || self.grid.load_batch == 0 {
            return Err(ConfigError::Validation(
                "grid.initial_visible and grid.load_batch must be positive".into(),
            ));
        }
        if self.carousel.autoplay_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.autoplay_interval_ms must be positive".into(),
            ));
        }
        if !(self.carousel.swipe_threshold >= 0.0 && self.carousel.swipe_threshold.is_finite()) {
            return Err(ConfigError::Validation(
                "carousel.swipe_threshold must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Site identity written into the manifest and used as default alt text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub brand: String,
    pub service_area: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            brand: "Portfolio".to_string(),
            service_area: String::new(),
        }
    }
}

/// File locations, all relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub manifest: String,
    pub featured_list: String,
    pub carousel_list: String,
    pub full_dir: String,
    pub thumb_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            manifest: "gallery.json".to_string(),
            featured_list: "featured.txt".to_string(),
            carousel_list: "carousel.txt".to_string(),
            full_dir: "assets/gallery/full".to_string(),
            thumb_dir: "assets/gallery/thumb".to_string(),
        }
    }
}

/// A viewport breakpoint: viewports up to `max_width` use `row_height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    pub max_width: u32,
    pub row_height: u32,
}

/// Justified grid settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub gap: u32,
    /// Target row height for viewports wider than every breakpoint.
    pub row_height: u32,
    pub fallback_container_width: u32,
    pub min_available_width: u32,
    pub fallback_aspect_ratio: f64,
    pub resize_debounce_ms: u64,
    /// Ascending by `max_width`; the first match wins.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: 14,
            row_height: 260,
            fallback_container_width: 1000,
            min_available_width: 10,
            fallback_aspect_ratio: 1.5,
            resize_debounce_ms: 120,
            breakpoints: vec![
                Breakpoint {
                    max_width: 520,
                    row_height: 220,
                },
                Breakpoint {
                    max_width: 920,
                    row_height: 200,
                },
            ],
        }
    }
}

impl LayoutConfig {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

/// Grid pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub initial_visible: usize,
    pub load_batch: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            initial_visible: 18,
            load_batch: 18,
        }
    }
}

/// Featured strip settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeaturedConfig {
    /// Number of leading manifest photos used when the featured list can't be read.
    pub fallback_count: usize,
}

impl Default for FeaturedConfig {
    fn default() -> Self {
        Self { fallback_count: 6 }
    }
}

/// How the hero carousel presents its cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// Only the active card.
    #[default]
    Single,
    /// Active card plus two neighbors on each side.
    Coverflow,
}

/// Hero carousel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Number of leading manifest photos used when the carousel list can't be read.
    pub fallback_count: usize,
    pub autoplay_interval_ms: u64,
    pub swipe_threshold: f64,
    pub presentation: Presentation,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            fallback_count: 7,
            autoplay_interval_ms: 3000,
            swipe_threshold: 36.0,
            presentation: Presentation::Single,
        }
    }
}

impl CarouselConfig {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(FolioConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value (arrays included)
/// replaces the base value entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `folio.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<FolioConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FolioConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `folio.toml` in the site root, falling back to defaults.
pub fn load_config(root: &Path) -> Result<FolioConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `folio.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Used as alt text for scanned photos and carousel entries without one.
brand = "Portfolio"
service_area = ""

# ---------------------------------------------------------------------------
# File locations (relative to the site root)
# ---------------------------------------------------------------------------
[paths]
manifest = "gallery.json"
featured_list = "featured.txt"
carousel_list = "carousel.txt"
full_dir = "assets/gallery/full"
thumb_dir = "assets/gallery/thumb"

# ---------------------------------------------------------------------------
# Justified grid
# ---------------------------------------------------------------------------
[layout]
# Pixels between items in a row.
gap = 14
# Target row height for viewports wider than every breakpoint.
row_height = 260
# Container width assumed when the real one is unknown.
fallback_container_width = 1000
# A row never gets less usable width than this.
min_available_width = 10
# Aspect ratio used for images whose dimensions can't be read.
fallback_aspect_ratio = 1.5
# Quiet period before a resize triggers a re-layout.
resize_debounce_ms = 120

# Narrower viewports get shorter rows. Keep sorted by max_width.
[[layout.breakpoints]]
max_width = 520
row_height = 220

[[layout.breakpoints]]
max_width = 920
row_height = 200

# ---------------------------------------------------------------------------
# Grid pagination
# ---------------------------------------------------------------------------
[grid]
initial_visible = 18
load_batch = 18

# ---------------------------------------------------------------------------
# Featured strip
# ---------------------------------------------------------------------------
[featured]
# Leading manifest photos to feature when featured.txt can't be read.
fallback_count = 6

# ---------------------------------------------------------------------------
# Hero carousel
# ---------------------------------------------------------------------------
[carousel]
# Leading manifest photos to show when carousel.txt can't be read.
fallback_count = 7
autoplay_interval_ms = 3000
# Horizontal travel (px) before a touch counts as a swipe.
swipe_threshold = 36.0
# "single" renders only the active card, "coverflow" adds two neighbors per side.
presentation = "single"
"##
}
