//! Dimension probing backends.
//!
//! The [`DimensionProbe`] trait is the seam between the ratio cache and the
//! outside world. The production implementation is [`FsProbe`], which reads
//! image headers from the site directory; tests use the counting mock below.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to read dimensions of {url}: {reason}")]
    Unreadable { url: String, reason: String },
}

/// Intrinsic pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// `width / height`, or `None` when either side is zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.width as f64 / self.height as f64)
        }
    }
}

/// Something that can discover an image's dimensions from its URL.
///
/// Must be `Sync`: batches are probed in parallel on the rayon pool.
pub trait DimensionProbe: Sync {
    fn probe(&self, url: &str) -> Result<Dimensions, ProbeError>;
}

/// Reads image headers from files under a site root.
///
/// Manifest URLs are site-relative (`assets/gallery/thumb/a.jpg`); a leading
/// `/` is treated as the site root as well.
#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        self.root.join(url.trim_start_matches('/'))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DimensionProbe for FsProbe {
    fn probe(&self, url: &str) -> Result<Dimensions, ProbeError> {
        let path = self.path_for(url);
        let (width, height) =
            image::image_dimensions(&path).map_err(|e| ProbeError::Unreadable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Dimensions { width, height })
    }
}
