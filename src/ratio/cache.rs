//! Aspect-ratio cache and resolver.
//!
//! Layout needs every item's aspect ratio before it can pack a single row.
//! Ratios are discovered by probing the image (thumbnail when available) and
//! remembered for the lifetime of the cache.
//!
//! ## Cache keys
//!
//! The key is the lowercased thumbnail URL, or the lowercased source URL for
//! photos without a thumbnail. `A.JPG` and `a.jpg` therefore share an entry.
//!
//! ## Failures
//!
//! A probe that fails, or reports a zero dimension, resolves to the fallback
//! ratio (1.5 by default). The fallback is cached like any other ratio so a
//! broken image is probed exactly once.
//!
//! ## Sharing
//!
//! [`RatioCache`] is a cheap handle (`Arc` inside). Clone it to share one
//! cache between resolvers; build a fresh one for isolated tests. Entries are
//! append-only: nothing is ever evicted or invalidated.

use super::probe::DimensionProbe;
use crate::types::PhotoItem;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// Ratio used when an image's dimensions can't be determined.
pub const FALLBACK_RATIO: f64 = 1.5;

/// Cache key for a photo: lowercase(thumb ?? src).
pub fn cache_key(item: &PhotoItem) -> String {
    item.display_url().to_lowercase()
}

/// Shared, append-only map from cache key to aspect ratio.
#[derive(Debug, Clone, Default)]
pub struct RatioCache {
    inner: Arc<Mutex<HashMap<String, f64>>>,
}

impl RatioCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, f64>> {
        // A panic while holding the lock can't leave the map half-written,
        // so a poisoned lock is still safe to read.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Look up a ratio by key (case-insensitive).
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries().get(&key.to_lowercase()).copied()
    }

    /// Record a ratio. An existing entry is kept; the first answer wins.
    pub fn insert(&self, key: &str, ratio: f64) -> f64 {
        *self.entries().entry(key.to_lowercase()).or_insert(ratio)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(&key.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Resolves photo aspect ratios through a probe, memoizing in a [`RatioCache`].
pub struct AspectRatioResolver<P: DimensionProbe> {
    probe: P,
    cache: RatioCache,
    fallback: f64,
}

impl<P: DimensionProbe> AspectRatioResolver<P> {
    pub fn new(probe: P, cache: RatioCache) -> Self {
        Self {
            probe,
            cache,
            fallback: FALLBACK_RATIO,
        }
    }

    /// Override the ratio used for unreadable images.
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn cache(&self) -> &RatioCache {
        &self.cache
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Resolve one photo's ratio. Never fails.
    pub fn resolve(&self, item: &PhotoItem) -> f64 {
        let key = cache_key(item);
        if let Some(ratio) = self.cache.get(&key) {
            return ratio;
        }
        let ratio = self.probe_ratio(item.display_url());
        self.cache.insert(&key, ratio)
    }

    /// Resolve every photo's ratio, probing in parallel.
    ///
    /// Returns once every item has a cached ratio. Items sharing a key are
    /// probed once.
    pub fn resolve_all<'a>(&self, items: impl IntoIterator<Item = &'a PhotoItem>) {
        let mut seen = HashSet::new();
        let pending: Vec<&PhotoItem> = items
            .into_iter()
            .filter(|item| {
                let key = cache_key(item);
                !self.cache.contains(&key) && seen.insert(key)
            })
            .collect();

        if pending.is_empty() {
            return;
        }
        log::debug!("probing {} image(s) for aspect ratios", pending.len());

        pending.par_iter().for_each(|item| {
            self.resolve(item);
        });
    }

    /// Cached ratio for a photo, or the fallback when it was never resolved.
    pub fn ratio_for(&self, item: &PhotoItem) -> f64 {
        self.cache.get(&cache_key(item)).unwrap_or(self.fallback)
    }

    fn probe_ratio(&self, url: &str) -> f64 {
        match self.probe.probe(url) {
            Ok(dims) => dims.aspect_ratio().unwrap_or_else(|| {
                log::debug!("{url}: zero dimensions, using fallback ratio");
                self.fallback
            }),
            Err(e) => {
                log::debug!("{e}; using fallback ratio");
                self.fallback
            }
        }
    }
}
