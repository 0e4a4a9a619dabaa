//! # Folio
//!
//! The engine behind a single-page photography portfolio: a hero carousel,
//! a featured strip and a justified photo grid with a lightbox.
//!
//! # Data Flow
//!
//! ```text
//! assets/gallery/full/  ──scan──▶  gallery.json
//! gallery.json + featured.txt + carousel.txt  ──GalleryStore──▶  page state
//! page state + image headers  ──ratio + layout──▶  justified rows
//! rows + carousel frame + lightbox  ──render──▶  index.html
//! ```
//!
//! Everything between the manifest and the HTML is a pure function of its
//! inputs except aspect-ratio probing, which sits behind the
//! [`ratio::DimensionProbe`] trait so tests can substitute a mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Manifest types shared by every stage (`PhotoItem`, `Category`, `GalleryManifest`) |
//! | [`config`] | `folio.toml` loading, stock defaults, merging and validation |
//! | [`selection`] | Line-list parsing and case-insensitive basename matching |
//! | [`gallery`] | Page state: featured strip, carousel picks, grid pagination, lightbox |
//! | [`ratio`] | Aspect-ratio probing, caching and fallback |
//! | [`layout`] | Justified row packing with exact-fill stretched rows |
//! | [`carousel`] | Hero carousel: navigation, coverflow window, autoplay, swipe |
//! | [`debounce`] | Time-driven debounce primitive used for resize re-layout |
//! | [`render`] | Render plan and Maud HTML for the portfolio page |
//! | [`scan`] | Builds `gallery.json` from the image directory |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Injected Ratio Cache
//!
//! Ratios are remembered in a [`ratio::RatioCache`] handed to the resolver
//! rather than a process-wide static. Tests build a fresh cache; the CLI
//! shares one across a run.
//!
//! ## Time as an Input
//!
//! Autoplay and resize debouncing never read the clock themselves. Callers
//! pass `Instant`s in, which keeps the state machines deterministic under
//! test and leaves scheduling to whatever loop hosts them.
//!
//! ## Fallbacks Over Failures
//!
//! A missing selection list falls back to the first manifest photos; an
//! unreadable image gets a 1.5 aspect ratio. Only a missing or malformed
//! manifest stops the page from being built.

pub mod carousel;
pub mod config;
pub mod debounce;
pub mod gallery;
pub mod layout;
pub mod output;
pub mod ratio;
pub mod render;
pub mod scan;
pub mod selection;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
