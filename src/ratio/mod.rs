//! Image aspect-ratio discovery.
//!
//! | Piece | Role |
//! |---|---|
//! | [`DimensionProbe`] | Seam for reading an image's intrinsic size |
//! | [`FsProbe`] | Header-only reads via `image::image_dimensions` |
//! | [`RatioCache`] | Shared, append-only ratio map keyed by lowercase URL |
//! | [`AspectRatioResolver`] | Probe-on-miss, fallback-on-failure, parallel batches |

mod cache;
pub mod probe;

pub use cache::{AspectRatioResolver, FALLBACK_RATIO, RatioCache, cache_key};
pub use probe::{DimensionProbe, Dimensions, FsProbe, ProbeError};
