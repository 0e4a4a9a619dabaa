//! Shared test utilities for the folio test suite.
//!
//! Provides manifest builders and a tiny image writer so tests can exercise
//! real files without checked-in fixtures.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let manifest = manifest_with(numbered_photos(12));
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_image(&tmp.path().join("assets/gallery/thumb/p0.jpg"), 300, 200);
//! ```

use crate::types::{Category, GalleryManifest, PhotoItem};
use std::path::Path;

// =========================================================================
// Manifest builders
// =========================================================================

/// `n` photos named `assets/gallery/full/p{i}.jpg` with no thumb or alt.
pub fn numbered_photos(n: usize) -> Vec<PhotoItem> {
    (0..n)
        .map(|i| PhotoItem::new(format!("assets/gallery/full/p{i}.jpg")))
        .collect()
}

/// A single-category manifest holding `photos`.
pub fn manifest_with(photos: Vec<PhotoItem>) -> GalleryManifest {
    GalleryManifest {
        brand: Some("Portfolio".to_string()),
        service_area: None,
        categories: vec![Category {
            name: "Featured".to_string(),
            slug: "featured".to_string(),
            photos,
        }],
    }
}

// =========================================================================
// Image files
// =========================================================================

/// Write a solid-color RGB image; the format follows the file extension.
///
/// Parent directories are created as needed.
pub fn write_image(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([120, 90, 60]));
    img.save(path)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}
