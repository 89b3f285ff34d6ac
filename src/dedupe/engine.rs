//! Analysis entry point: parallel per-bundle fan-out, sequential fan-in.
//!
//! Decoding and attribution have no data dependency across bundles, so
//! the per-bundle phase scatters over a rayon pool and joins before the
//! aggregation fold runs. A failure in one bundle excludes that bundle
//! only; the engine always produces a report.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use rayon::prelude::*;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::sourcemap::{decode, BundleArtifact, DecodeError};

use super::aggregate::{aggregate, ReportItem};
use super::attribution::{attribute, PerBundleAttribution};
use super::cache::{AnalysisCache, Fingerprint};

/// Default reporting threshold: duplicated groups wasting fewer bytes
/// than this fold into the "Other" row.
pub const DEFAULT_IGNORE_THRESHOLD_IN_BYTES: u64 = 1024;

/// Tunable analysis options.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Groups wasting fewer bytes than this merge into "Other"
    pub ignore_threshold_in_bytes: u64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            ignore_threshold_in_bytes: DEFAULT_IGNORE_THRESHOLD_IN_BYTES,
        }
    }
}

/// Reasons a single bundle was excluded from aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    /// The map's `mappings` field could not be decoded
    #[error("malformed source map: {0}")]
    MalformedMap(#[from] DecodeError),

    /// The artifact carries a map but no generated text
    #[error("script has a source map but no content")]
    MissingContent,
}

/// A per-bundle failure, tagged with the offending bundle's url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFailure {
    /// Url of the excluded bundle
    pub url: String,
    /// What went wrong
    pub error: BundleError,
}

impl Serialize for BundleFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BundleFailure", 2)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

/// Final engine output.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Duplication rows, sorted descending by wasted bytes
    pub items: Vec<ReportItem>,

    /// Cumulative wasted bytes charged to each url. Urls with no
    /// redundant copies carry no entry.
    pub wasted_bytes_by_url: HashMap<String, u64>,

    /// Bundles excluded from aggregation, with the reason
    pub failures: Vec<BundleFailure>,
}

impl AnalysisReport {
    /// Total wasted bytes across all report rows.
    pub fn total_wasted_bytes(&self) -> u64 {
        self.items.iter().map(|item| item.wasted_bytes).sum()
    }
}

/// Per-bundle phase outcome, joined before aggregation.
enum BundleOutcome {
    /// Decoded and attributed; feeds the aggregation fold
    Usable {
        url: String,
        attribution: Arc<PerBundleAttribution>,
    },
    /// Decode or content failure; the bundle sits out aggregation
    Failed(BundleFailure),
    /// No source map, nothing to attribute
    Unmapped,
}

/// Analyze a page's loaded bundles for cross-bundle module duplication.
///
/// The per-bundle phase (decode, attribute) runs in parallel over the
/// input; aggregation runs once all attributions are in. The `cache` is
/// consulted before decoding so identical (content, map) pairs are
/// computed once across calls. With fewer than two mapped bundles the
/// result is empty: no duplicates are possible.
///
/// # Examples
///
/// ```
/// use bundle_dedupe::dedupe::{analyze, AnalysisCache, AnalysisOptions};
/// use bundle_dedupe::sourcemap::{BundleArtifact, SourceMap};
///
/// let map = SourceMap::from_json(
///     r#"{"version": 3, "sources": ["node_modules/left-pad/index.js"], "mappings": "AAAA"}"#,
/// )?;
/// let artifacts = vec![
///     BundleArtifact::new("https://example.com/a.js", Some("var pad;".into()), Some(map.clone())),
///     BundleArtifact::new("https://example.com/b.js", Some("var pad;".into()), Some(map)),
/// ];
///
/// let cache = AnalysisCache::new();
/// let report = analyze(&artifacts, &AnalysisOptions::default(), &cache);
///
/// // 8 duplicated bytes sit below the default threshold: one "Other" row.
/// assert_eq!(report.items.len(), 1);
/// assert_eq!(report.items[0].source, "Other");
/// assert_eq!(report.items[0].wasted_bytes, 8);
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn analyze(
    artifacts: &[BundleArtifact],
    options: &AnalysisOptions,
    cache: &AnalysisCache,
) -> AnalysisReport {
    let outcomes: Vec<BundleOutcome> = artifacts
        .par_iter()
        .map(|artifact| analyze_bundle(artifact, cache))
        .collect();

    let mut usable: Vec<(String, Arc<PerBundleAttribution>)> = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            BundleOutcome::Usable { url, attribution } => usable.push((url, attribution)),
            BundleOutcome::Failed(failure) => {
                warn!("excluding {}: {}", failure.url, failure.error);
                failures.push(failure);
            }
            BundleOutcome::Unmapped => {}
        }
    }

    if usable.len() < 2 {
        return AnalysisReport {
            failures,
            ..AnalysisReport::default()
        };
    }

    let (items, wasted_bytes_by_url) = aggregate(&usable, options.ignore_threshold_in_bytes);
    AnalysisReport {
        items,
        wasted_bytes_by_url,
        failures,
    }
}

fn analyze_bundle(artifact: &BundleArtifact, cache: &AnalysisCache) -> BundleOutcome {
    let map = match &artifact.map {
        Some(map) => map,
        None => return BundleOutcome::Unmapped,
    };
    let content = match &artifact.content {
        Some(content) => content,
        None => {
            return BundleOutcome::Failed(BundleFailure {
                url: artifact.url.clone(),
                error: BundleError::MissingContent,
            })
        }
    };

    let fingerprint = Fingerprint::of(content, map);
    if let Some(attribution) = cache.get(fingerprint) {
        debug!("attribution cache hit for {}", artifact.url);
        return BundleOutcome::Usable {
            url: artifact.url.clone(),
            attribution,
        };
    }

    match decode(map) {
        Ok(entries) => {
            let attribution = Arc::new(attribute(&entries, map, content));
            cache.insert(fingerprint, Arc::clone(&attribution));
            BundleOutcome::Usable {
                url: artifact.url.clone(),
                attribution,
            }
        }
        Err(error) => BundleOutcome::Failed(BundleFailure {
            url: artifact.url.clone(),
            error: error.into(),
        }),
    }
}
