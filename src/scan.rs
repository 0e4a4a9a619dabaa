//! Manifest generation from an image directory.
//!
//! Walks the full-size image directory and writes `gallery.json`. Thumbnails
//! are **not** generated here; they are expected to exist already under the
//! thumbnail directory, mirroring the full-size layout with a `.jpg`
//! extension:
//!
//! ```text
//! site/
//! ├── gallery.json                       ← written
//! └── assets/gallery/
//!     ├── full/
//!     │   ├── dawn.png
//!     │   └── travel/kyoto.webp
//!     └── thumb/
//!         ├── dawn.jpg                   ← thumb for full/dawn.png
//!         └── travel/kyoto.jpg
//! ```
//!
//! Photos without a thumbnail are listed with `src` only; the portfolio
//! falls back to the full-size image for them.
//!
//! [`import_source`] copies images from an outside folder into the
//! full-size directory first, keeping their subfolders.

use crate::config::FolioConfig;
use crate::types::{Category, GalleryManifest, PhotoItem};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Image directory not found: {0}")]
    MissingImageDir(PathBuf),
    #[error("Import source not found: {0}")]
    MissingSource(PathBuf),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "heic"];

/// Summary of a scan for CLI output.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub photos: usize,
    pub with_thumb: usize,
    /// Site-relative srcs of photos that have no thumbnail.
    pub missing_thumbs: Vec<String>,
    /// Images copied in by [`import_source`]; `None` when nothing was imported.
    pub imported: Option<usize>,
}

fn is_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

/// Site-relative, forward-slash URL for a path.
fn web_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Copy every image under `source` into `full_dir`, keeping relative
/// subfolders and overwriting files of the same name. Returns the number
/// of images copied.
///
/// Files already inside `full_dir` are skipped, so importing from a folder
/// that contains the site is safe.
pub fn import_source(source: &Path, full_dir: &Path) -> Result<usize, ScanError> {
    if !source.is_dir() {
        return Err(ScanError::MissingSource(source.to_path_buf()));
    }
    fs::create_dir_all(full_dir)?;
    let target = full_dir.canonicalize()?;

    // Collect before copying so new files never feed the walk.
    let mut files = Vec::new();
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !is_image(path) || path.canonicalize()?.starts_with(&target) {
            continue;
        }
        if let Ok(rel) = path.strip_prefix(source) {
            files.push((path.to_path_buf(), rel.to_path_buf()));
        }
    }

    for (path, rel) in &files {
        let dest = full_dir.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
        log::debug!("imported {}", web_path(rel));
    }
    Ok(files.len())
}

/// Build the manifest for a site root without writing it.
pub fn scan(root: &Path, config: &FolioConfig) -> Result<(GalleryManifest, ScanReport), ScanError> {
    let full_rel = Path::new(&config.paths.full_dir);
    let thumb_rel = Path::new(&config.paths.thumb_dir);
    let full_dir = root.join(full_rel);
    if !full_dir.is_dir() {
        return Err(ScanError::MissingImageDir(full_dir));
    }

    let mut photos = Vec::new();
    let mut report = ScanReport::default();
    for entry in WalkDir::new(&full_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !is_image(path) {
            continue;
        }
        let Ok(under_full) = path.strip_prefix(&full_dir) else {
            continue;
        };
        let src = web_path(&full_rel.join(under_full));
        let thumb_path = thumb_rel.join(under_full).with_extension("jpg");

        let thumb = if root.join(&thumb_path).is_file() {
            report.with_thumb += 1;
            Some(web_path(&thumb_path))
        } else {
            report.missing_thumbs.push(src.clone());
            None
        };

        photos.push(PhotoItem {
            src,
            thumb,
            alt: Some(config.site.brand.clone()),
        });
    }
    report.photos = photos.len();

    let service_area = Some(config.site.service_area.clone()).filter(|s| !s.is_empty());
    let manifest = GalleryManifest {
        brand: Some(config.site.brand.clone()),
        service_area,
        categories: vec![Category {
            name: "Featured".to_string(),
            slug: "featured".to_string(),
            photos,
        }],
    };
    Ok((manifest, report))
}

/// Scan and write the manifest to its configured path, importing from
/// `source` first when given.
pub fn scan_and_write(
    root: &Path,
    config: &FolioConfig,
    source: Option<&Path>,
) -> Result<(GalleryManifest, ScanReport), ScanError> {
    let imported = source
        .map(|source| import_source(source, &root.join(&config.paths.full_dir)))
        .transpose()?;
    let (manifest, mut report) = scan(root, config)?;
    report.imported = imported;
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(root.join(&config.paths.manifest), json)?;
    Ok((manifest, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_image;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let full = tmp.path().join("assets/gallery/full");
        let thumb = tmp.path().join("assets/gallery/thumb");
        write_image(&full.join("b-dawn.png"), 30, 20);
        write_image(&full.join("a-dusk.png"), 20, 30);
        write_image(&full.join("travel/kyoto.png"), 10, 10);
        fs::write(full.join("notes.txt"), "not an image").unwrap();
        write_image(&thumb.join("b-dawn.jpg"), 3, 2);
        write_image(&thumb.join("travel/kyoto.jpg"), 1, 1);
        tmp
    }

    #[test]
    fn scan_lists_images_sorted_with_thumbs() {
        let tmp = site();
        let (manifest, report) = scan(tmp.path(), &FolioConfig::default()).unwrap();
        let photos = manifest.primary_photos();

        let srcs: Vec<&str> = photos.iter().map(|p| p.src.as_str()).collect();
        assert_eq!(
            srcs,
            vec![
                "assets/gallery/full/a-dusk.png",
                "assets/gallery/full/b-dawn.png",
                "assets/gallery/full/travel/kyoto.png",
            ]
        );
        assert_eq!(photos[0].thumb, None);
        assert_eq!(
            photos[1].thumb.as_deref(),
            Some("assets/gallery/thumb/b-dawn.jpg")
        );
        assert_eq!(
            photos[2].thumb.as_deref(),
            Some("assets/gallery/thumb/travel/kyoto.jpg")
        );
        assert_eq!(report.photos, 3);
        assert_eq!(report.with_thumb, 2);
        assert_eq!(report.missing_thumbs, vec!["assets/gallery/full/a-dusk.png"]);
    }

    #[test]
    fn scan_uses_brand_for_alt_and_manifest() {
        let tmp = site();
        let mut config = FolioConfig::default();
        config.site.brand = "Studio North".into();
        let (manifest, _) = scan(tmp.path(), &config).unwrap();
        assert_eq!(manifest.brand.as_deref(), Some("Studio North"));
        assert_eq!(manifest.service_area, None);
        assert!(
            manifest
                .primary_photos()
                .iter()
                .all(|p| p.alt.as_deref() == Some("Studio North"))
        );
    }

    #[test]
    fn scan_extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let full = tmp.path().join("assets/gallery/full");
        fs::create_dir_all(&full).unwrap();
        fs::write(full.join("UPPER.JPG"), "x").unwrap();
        let (manifest, _) = scan(tmp.path(), &FolioConfig::default()).unwrap();
        assert_eq!(manifest.primary_photos().len(), 1);
    }

    #[test]
    fn scan_missing_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(tmp.path(), &FolioConfig::default());
        assert!(matches!(result, Err(ScanError::MissingImageDir(_))));
    }

    #[test]
    fn scan_and_write_roundtrips_through_loader() {
        let tmp = site();
        let config = FolioConfig::default();
        scan_and_write(tmp.path(), &config, None).unwrap();

        let loaded = crate::gallery::load_manifest(&tmp.path().join("gallery.json")).unwrap();
        assert_eq!(loaded.primary_photos().len(), 3);
        assert_eq!(loaded.categories[0].slug, "featured");
    }

    // =========================================================================
    // Import
    // =========================================================================

    #[test]
    fn import_keeps_subfolders_and_skips_non_images() {
        let src = TempDir::new().unwrap();
        let site = TempDir::new().unwrap();
        write_image(&src.path().join("cover.png"), 4, 3);
        write_image(&src.path().join("trips/iceland/falls.png"), 3, 4);
        fs::write(src.path().join("trips/notes.txt"), "skip me").unwrap();
        let full = site.path().join("assets/gallery/full");

        let copied = import_source(src.path(), &full).unwrap();

        assert_eq!(copied, 2);
        assert!(full.join("cover.png").is_file());
        assert!(full.join("trips/iceland/falls.png").is_file());
        assert!(!full.join("trips/notes.txt").exists());
    }

    #[test]
    fn import_missing_source_is_error() {
        let site = TempDir::new().unwrap();
        let result = import_source(&site.path().join("nowhere"), &site.path().join("full"));
        assert!(matches!(result, Err(ScanError::MissingSource(_))));
    }

    #[test]
    fn import_skips_files_already_in_target() {
        let tmp = site();
        let full = tmp.path().join("assets/gallery/full");
        let copied = import_source(tmp.path(), &full).unwrap();

        // Only the two thumbnails lie outside full/.
        assert_eq!(copied, 2);
        let (_, report) = scan(tmp.path(), &FolioConfig::default()).unwrap();
        assert_eq!(report.photos, 5);
        assert!(full.join("assets/gallery/thumb/b-dawn.jpg").is_file());
        assert!(fs::metadata(full.join("b-dawn.png")).unwrap().len() > 0);
    }

    #[test]
    fn scan_and_write_reports_imported_count() {
        let src = TempDir::new().unwrap();
        let site = TempDir::new().unwrap();
        write_image(&src.path().join("studio/portrait.png"), 2, 3);

        let config = FolioConfig::default();
        let (manifest, report) = scan_and_write(site.path(), &config, Some(src.path())).unwrap();

        assert_eq!(report.imported, Some(1));
        assert_eq!(
            manifest.primary_photos()[0].src,
            "assets/gallery/full/studio/portrait.png"
        );
        assert!(site.path().join("gallery.json").is_file());
    }
}
