//! Shared types read from and written to `gallery.json`.
//!
//! The manifest is produced by [`scan`](crate::scan) (or by hand) and consumed
//! by every other stage, so these shapes must stay stable.

use serde::{Deserialize, Serialize};

/// A single photo as listed in the manifest.
///
/// Identity is `src`. `thumb` points at a pre-generated, smaller rendition
/// used for grids and for aspect-ratio discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoItem {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl PhotoItem {
    /// A photo with only a source path.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            thumb: None,
            alt: None,
        }
    }

    /// URL to show in grids: the thumbnail when present and non-empty, else
    /// the full image.
    pub fn display_url(&self) -> &str {
        self.thumb
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.src)
    }

    /// Alt text, empty when absent.
    pub fn alt_text(&self) -> &str {
        self.alt.as_deref().unwrap_or("")
    }
}

/// A named group of photos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub photos: Vec<PhotoItem>,
}

/// Top-level `gallery.json` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_area: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl GalleryManifest {
    /// Photos of the first category; the portfolio grid only shows these.
    pub fn primary_photos(&self) -> &[PhotoItem] {
        self.categories
            .first()
            .map(|c| c.photos.as_slice())
            .unwrap_or(&[])
    }

    /// Every photo across all categories, in manifest order.
    pub fn all_photos(&self) -> Vec<&PhotoItem> {
        self.categories.iter().flat_map(|c| &c.photos).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_url_prefers_thumb() {
        let mut p = PhotoItem::new("full/a.jpg");
        assert_eq!(p.display_url(), "full/a.jpg");
        p.thumb = Some("thumb/a.jpg".into());
        assert_eq!(p.display_url(), "thumb/a.jpg");
    }

    #[test]
    fn display_url_skips_empty_thumb() {
        let mut p = PhotoItem::new("full/a.jpg");
        p.thumb = Some(String::new());
        assert_eq!(p.display_url(), "full/a.jpg");
    }

    #[test]
    fn parse_manifest_tolerates_extra_fields() {
        let json = r#"{
            "brand": "Studio",
            "categories": [
                {"name": "Featured", "slug": "featured", "photos": [
                    {"src": "a.jpg", "thumb": "t/a.jpg", "alt": "A", "category": "Featured"},
                    {"src": "b.jpg"}
                ]}
            ]
        }"#;
        let m: GalleryManifest = serde_json::from_str(json).unwrap();
        assert_eq!(m.brand.as_deref(), Some("Studio"));
        assert_eq!(m.primary_photos().len(), 2);
        assert_eq!(m.primary_photos()[1].thumb, None);
    }

    #[test]
    fn primary_photos_empty_without_categories() {
        let m: GalleryManifest = serde_json::from_str("{}").unwrap();
        assert!(m.primary_photos().is_empty());
        assert!(m.all_photos().is_empty());
    }

    #[test]
    fn all_photos_spans_categories() {
        let m = GalleryManifest {
            categories: vec![
                Category {
                    photos: vec![PhotoItem::new("a.jpg")],
                    ..Default::default()
                },
                Category {
                    photos: vec![PhotoItem::new("b.jpg"), PhotoItem::new("c.jpg")],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let srcs: Vec<&str> = m.all_photos().iter().map(|p| p.src.as_str()).collect();
        assert_eq!(srcs, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }
}
