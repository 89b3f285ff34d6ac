//! Cross-call attribution cache keyed by a (content, map) fingerprint.
//!
//! The cache is process-wide shared state owned by the caller, never an
//! engine-internal singleton: whoever drives repeated analyses decides
//! its lifetime and passes it into every call.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::sourcemap::SourceMap;

use super::attribution::PerBundleAttribution;

/// Stable fingerprint of a (content, map) input pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Fingerprint a bundle's generated text together with its map.
    ///
    /// Two artifacts with identical content, `mappings` and `sources`
    /// fingerprint equal regardless of their urls.
    pub fn of(content: &str, map: &SourceMap) -> Self {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        map.mappings.hash(&mut hasher);
        map.sources.hash(&mut hasher);
        Fingerprint(hasher.finish())
    }
}

/// Shared store of per-bundle attributions.
///
/// Lookups and inserts take a short non-poisoning lock, so a single
/// cache is safe to share across concurrently running analyses.
///
/// # Examples
///
/// ```
/// use bundle_dedupe::dedupe::{AnalysisCache, Fingerprint};
/// use bundle_dedupe::sourcemap::SourceMap;
///
/// let cache = AnalysisCache::new();
/// let map = SourceMap::default();
/// assert!(cache.get(Fingerprint::of("var x;", &map)).is_none());
/// ```
#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: Mutex<HashMap<Fingerprint, Arc<PerBundleAttribution>>>,
}

impl AnalysisCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously computed attribution.
    pub fn get(&self, fingerprint: Fingerprint) -> Option<Arc<PerBundleAttribution>> {
        self.entries.lock().get(&fingerprint).cloned()
    }

    /// Store a computed attribution.
    pub fn insert(&self, fingerprint: Fingerprint, attribution: Arc<PerBundleAttribution>) {
        self.entries.lock().insert(fingerprint, attribution);
    }

    /// Number of cached attributions.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop all cached attributions.
    pub fn clear(&self) {
        self.entries.lock().clear()
    }
}
