//! Portfolio state: manifest, featured strip, grid pagination, carousel picks
//! and the lightbox.
//!
//! ## Featured and carousel lists
//!
//! Both lists are optional text files resolved through
//! [`selection`](crate::selection). When a list can't be read the store falls
//! back to the leading manifest photos; the two fallbacks have separate sizes
//! (6 featured, 7 carousel by default).
//!
//! ## Grid
//!
//! The grid shows the primary photos minus anything featured (matched by
//! case-insensitive basename), a page at a time. Grid cards keep their
//! manifest index so a click opens the lightbox at the right photo.

use crate::config::FolioConfig;
use crate::selection::{self, BasenameIndex, Resolved};
use crate::types::{GalleryManifest, PhotoItem};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error reading {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Read and parse `gallery.json`.
pub fn load_manifest(path: &Path) -> Result<GalleryManifest, GalleryError> {
    let content = fs::read_to_string(path).map_err(|source| GalleryError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| GalleryError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Where the featured srcs came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// Read from the list file.
    File,
    /// List file unreadable; leading manifest photos used instead.
    Fallback,
}

/// Resolved featured strip.
#[derive(Debug, Clone)]
pub struct Featured {
    pub srcs: Vec<String>,
    /// Lowercased basenames, used to keep featured photos out of the grid.
    pub basenames: HashSet<String>,
    pub source: ListSource,
    pub missing: Vec<String>,
}

impl Featured {
    fn from_srcs(srcs: Vec<String>, source: ListSource, missing: Vec<String>) -> Self {
        let basenames = srcs
            .iter()
            .map(|s| selection::basename(s).to_lowercase())
            .collect();
        Self {
            srcs,
            basenames,
            source,
            missing,
        }
    }

    pub fn contains(&self, photo: &PhotoItem) -> bool {
        self.basenames
            .contains(&selection::basename(&photo.src).to_lowercase())
    }
}

/// Resolve the featured strip from list lines, or fall back when the list
/// couldn't be read.
pub fn resolve_featured(
    photos: &[PhotoItem],
    lines: io::Result<Vec<String>>,
    fallback_count: usize,
) -> Featured {
    match lines {
        Ok(lines) => {
            let index = BasenameIndex::build(photos);
            let selection = selection::resolve_lines(&lines, &index, "featured list");
            let srcs = selection
                .entries
                .iter()
                .map(|r| r.src().to_string())
                .collect();
            Featured::from_srcs(srcs, ListSource::File, selection.missing)
        }
        Err(e) => {
            log::info!("featured list unavailable ({e}); using first {fallback_count} photos");
            let srcs = photos
                .iter()
                .take(fallback_count)
                .map(|p| p.src.clone())
                .filter(|s| !s.is_empty())
                .collect();
            Featured::from_srcs(srcs, ListSource::Fallback, Vec::new())
        }
    }
}

/// Rewrite a full-size path to its thumbnail path when it lives under the
/// full-size directory.
pub fn thumb_for(src: &str, full_dir: &str, thumb_dir: &str) -> String {
    let full = format!("/{}/", full_dir.trim_matches('/'));
    let thumb = format!("/{}/", thumb_dir.trim_matches('/'));
    let padded = format!("/{src}");
    if padded.contains(&full) {
        padded.replacen(&full, &thumb, 1)[1..].to_string()
    } else {
        src.to_string()
    }
}

/// Resolve carousel picks from list lines, or from the leading manifest
/// photos when the list couldn't be read.
///
/// `pool` is the basename lookup source (every category); `fallback_photos`
/// is the primary category. Picks without alt text get `brand`.
pub fn resolve_carousel(
    pool: &[&PhotoItem],
    fallback_photos: &[PhotoItem],
    lines: io::Result<Vec<String>>,
    config: &FolioConfig,
    brand: &str,
) -> Vec<PhotoItem> {
    let lines = lines.unwrap_or_else(|e| {
        let count = config.carousel.fallback_count;
        log::info!("carousel list unavailable ({e}); using first {count} photos");
        fallback_photos
            .iter()
            .take(count)
            .map(|p| p.src.clone())
            .filter(|s| !s.is_empty())
            .collect()
    });

    let index = if pool.is_empty() {
        BasenameIndex::build(fallback_photos)
    } else {
        BasenameIndex::build(pool.iter().copied())
    };

    selection::resolve_lines(&lines, &index, "carousel list")
        .entries
        .into_iter()
        .map(|resolved| match resolved {
            Resolved::Verbatim(src) => PhotoItem {
                thumb: Some(thumb_for(&src, &config.paths.full_dir, &config.paths.thumb_dir)),
                alt: Some(brand.to_string()),
                src,
            },
            Resolved::Matched(photo) => PhotoItem {
                src: photo.src.clone(),
                thumb: Some(photo.display_url().to_string()),
                alt: Some(
                    photo
                        .alt
                        .clone()
                        .filter(|a| !a.is_empty())
                        .unwrap_or_else(|| brand.to_string()),
                ),
            },
        })
        .collect()
}

/// Lightbox viewer state over the primary photos.
#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    len: usize,
    current: Option<usize>,
}

impl Lightbox {
    pub fn new(len: usize) -> Self {
        Self { len, current: None }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Open at `index`; out-of-range indices open the first photo.
    pub fn open(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.current = Some(if index < self.len { index } else { 0 });
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn prev(&mut self) {
        if let Some(i) = self.current {
            self.current = Some((i + self.len - 1) % self.len);
        }
    }

    pub fn next(&mut self) {
        if let Some(i) = self.current {
            self.current = Some((i + 1) % self.len);
        }
    }

    /// Position label, e.g. `"3 / 12"`.
    pub fn counter(&self) -> Option<String> {
        self.current.map(|i| format!("{} / {}", i + 1, self.len))
    }
}

/// Keys the lightbox responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

impl Lightbox {
    /// Apply a key press; ignored while closed.
    pub fn handle_key(&mut self, key: LightboxKey) {
        if !self.is_open() {
            return;
        }
        match key {
            LightboxKey::Escape => self.close(),
            LightboxKey::ArrowLeft => self.prev(),
            LightboxKey::ArrowRight => self.next(),
        }
    }
}

/// Frame orientation derived from an image's natural size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameShape {
    Portrait,
    Square,
    Landscape,
}

impl FrameShape {
    /// Classify by aspect ratio; within ±10% of 1:1 counts as square.
    pub fn classify(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self::from_ratio(width as f64 / height as f64))
    }

    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.90 {
            FrameShape::Portrait
        } else if ratio > 1.10 {
            FrameShape::Landscape
        } else {
            FrameShape::Square
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            FrameShape::Portrait => "portrait",
            FrameShape::Square => "square",
            FrameShape::Landscape => "landscape",
        }
    }
}

/// Everything the portfolio page renders from.
#[derive(Debug, Clone)]
pub struct GalleryStore {
    manifest: GalleryManifest,
    brand: String,
    featured: Featured,
    carousel: Vec<PhotoItem>,
    visible_count: usize,
    load_batch: usize,
    pub lightbox: Lightbox,
}

impl GalleryStore {
    /// Assemble the store from an already-loaded manifest and list contents.
    pub fn new(
        manifest: GalleryManifest,
        featured_lines: io::Result<Vec<String>>,
        carousel_lines: io::Result<Vec<String>>,
        config: &FolioConfig,
    ) -> Self {
        let featured = resolve_featured(
            manifest.primary_photos(),
            featured_lines,
            config.featured.fallback_count,
        );
        let brand = manifest
            .brand
            .clone()
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| config.site.brand.clone());
        let carousel = resolve_carousel(
            &manifest.all_photos(),
            manifest.primary_photos(),
            carousel_lines,
            config,
            &brand,
        );
        let lightbox = Lightbox::new(manifest.primary_photos().len());
        Self {
            manifest,
            brand,
            featured,
            carousel,
            visible_count: config.grid.initial_visible,
            load_batch: config.grid.load_batch,
            lightbox,
        }
    }

    /// Load manifest and lists from a site root using the configured paths.
    ///
    /// A missing manifest is an error; missing lists fall back.
    pub fn load(root: &Path, config: &FolioConfig) -> Result<Self, GalleryError> {
        let manifest = load_manifest(&root.join(&config.paths.manifest))?;
        let featured = selection::read_lines(&root.join(&config.paths.featured_list));
        let carousel = selection::read_lines(&root.join(&config.paths.carousel_list));
        Ok(Self::new(manifest, featured, carousel, config))
    }

    pub fn manifest(&self) -> &GalleryManifest {
        &self.manifest
    }

    pub fn photos(&self) -> &[PhotoItem] {
        self.manifest.primary_photos()
    }

    /// Site brand: the manifest's, else the configured one. Used as the
    /// page title and as alt text for photos without their own.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn featured(&self) -> &Featured {
        &self.featured
    }

    pub fn carousel_items(&self) -> &[PhotoItem] {
        &self.carousel
    }

    /// Manifest index of the photo with this src.
    pub fn index_of(&self, src: &str) -> Option<usize> {
        self.photos().iter().position(|p| p.src == src)
    }

    /// Featured srcs paired with the lightbox index each opens (0 when the
    /// src isn't in the manifest).
    pub fn featured_cards(&self) -> Vec<(&str, usize)> {
        self.featured
            .srcs
            .iter()
            .map(|src| (src.as_str(), self.index_of(src).unwrap_or(0)))
            .collect()
    }

    /// Non-featured photos with their manifest indices.
    pub fn grid_pool(&self) -> Vec<(usize, &PhotoItem)> {
        self.photos()
            .iter()
            .enumerate()
            .filter(|(_, p)| !self.featured.contains(p))
            .collect()
    }

    /// The currently visible page of the grid.
    pub fn grid_items(&self) -> Vec<(usize, &PhotoItem)> {
        let mut pool = self.grid_pool();
        pool.truncate(self.visible_count);
        pool
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Reveal the next batch.
    pub fn load_more(&mut self) {
        self.visible_count += self.load_batch;
    }

    /// Grid photos not yet revealed.
    pub fn remaining(&self) -> usize {
        self.grid_pool().len().saturating_sub(self.visible_count)
    }

    pub fn load_more_label(&self) -> &'static str {
        if self.remaining() > 0 {
            "Load more"
        } else {
            "No more photos"
        }
    }
}
