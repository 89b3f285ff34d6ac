//! Cross-bundle duplication aggregation.
//!
//! A sequential fold over the per-bundle attribution tables: collect
//! every canonical key that shows up in at least two bundles, work out
//! how many bytes the redundant copies waste, and partition the result
//! into individually-reported rows and one merged "Other" remainder.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;

use super::attribution::PerBundleAttribution;

/// Synthetic key for groups merged below the reporting threshold.
pub const OTHER_SOURCE: &str = "Other";

/// One row of the final duplication report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    /// Canonical source key, or [`OTHER_SOURCE`] for the merged remainder
    pub source: String,

    /// Occurrence byte counts, sorted descending. Empty for the
    /// "Other" row, whose merged occurrences have no meaningful sizes.
    pub source_bytes: Vec<u64>,

    /// Urls aligned index-for-index with `source_bytes`. For the
    /// "Other" row: every url touched by a merged group, deduplicated
    /// in first-appearance order.
    pub urls: Vec<String>,

    /// Bytes beyond the single largest occurrence
    pub wasted_bytes: u64,
}

/// A canonical key found in two or more bundles.
#[derive(Debug, Clone)]
struct DuplicationGroup {
    key: String,
    /// `(url, bytes)` sorted descending by bytes, ties in input bundle order
    occurrences: Vec<(String, u64)>,
    /// Sum of every occurrence except the largest
    wasted: u64,
}

/// Fold per-bundle attributions into the final duplication report.
///
/// Returns the report rows sorted descending by wasted bytes, plus the
/// per-url waste summary. Each non-largest occurrence charges exactly
/// its own byte count to its own url, including occurrences that end up
/// merged into "Other". Keys with an empty canonical name always fold
/// into "Other": there is no stable key to report them under.
pub fn aggregate(
    per_bundle: &[(String, Arc<PerBundleAttribution>)],
    threshold: u64,
) -> (Vec<ReportItem>, HashMap<String, u64>) {
    let groups = collect_groups(per_bundle);

    let mut wasted_by_url: HashMap<String, u64> = HashMap::new();
    let mut items: Vec<ReportItem> = Vec::new();
    let mut other_wasted = 0u64;
    let mut other_urls: Vec<String> = Vec::new();

    for group in groups {
        for (url, bytes) in &group.occurrences[1..] {
            *wasted_by_url.entry(url.clone()).or_insert(0) += bytes;
        }

        if group.key.is_empty() || group.wasted < threshold {
            other_wasted += group.wasted;
            for (url, _) in &group.occurrences {
                if !other_urls.iter().any(|u| u == url) {
                    other_urls.push(url.clone());
                }
            }
        } else {
            items.push(ReportItem {
                source: group.key,
                source_bytes: group.occurrences.iter().map(|(_, b)| *b).collect(),
                urls: group.occurrences.into_iter().map(|(url, _)| url).collect(),
                wasted_bytes: group.wasted,
            });
        }
    }

    if !other_urls.is_empty() {
        items.push(ReportItem {
            source: OTHER_SOURCE.to_string(),
            source_bytes: Vec::new(),
            urls: other_urls,
            wasted_bytes: other_wasted,
        });
    }

    // Stable: equal waste keeps the partition order from above.
    items.sort_by(|a, b| b.wasted_bytes.cmp(&a.wasted_bytes));

    (items, wasted_by_url)
}

/// Collect keys present with a non-zero count in at least two bundles.
fn collect_groups(per_bundle: &[(String, Arc<PerBundleAttribution>)]) -> Vec<DuplicationGroup> {
    // BTreeMap keeps group enumeration deterministic (key order);
    // occurrence order within a group is input bundle order.
    let mut occurrences: BTreeMap<&str, Vec<(usize, u64)>> = BTreeMap::new();

    for (bundle_index, (_, attribution)) in per_bundle.iter().enumerate() {
        for (key, bytes) in &attribution.by_source {
            if *bytes > 0 {
                occurrences
                    .entry(key.as_str())
                    .or_default()
                    .push((bundle_index, *bytes));
            }
        }
    }

    occurrences
        .into_iter()
        .filter(|(_, occ)| occ.len() >= 2)
        .map(|(key, mut occ)| {
            occ.sort_by(|a, b| b.1.cmp(&a.1));
            let total: u64 = occ.iter().map(|(_, bytes)| bytes).sum();
            let wasted = total - occ[0].1;
            DuplicationGroup {
                key: key.to_string(),
                occurrences: occ
                    .into_iter()
                    .map(|(index, bytes)| (per_bundle[index].0.clone(), bytes))
                    .collect(),
                wasted,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn attribution(entries: &[(&str, u64)]) -> Arc<PerBundleAttribution> {
        let by_source: BTreeMap<String, u64> = entries
            .iter()
            .map(|(key, bytes)| (key.to_string(), *bytes))
            .collect();
        let generated_length = by_source.values().sum();
        Arc::new(PerBundleAttribution {
            by_source,
            unmapped_bytes: 0,
            generated_length,
        })
    }

    fn bundles(input: &[(&str, &[(&str, u64)])]) -> Vec<(String, Arc<PerBundleAttribution>)> {
        input
            .iter()
            .map(|(url, entries)| (url.to_string(), attribution(entries)))
            .collect()
    }

    #[test]
    fn test_aggregate_key_in_one_bundle_is_not_duplication() {
        let per_bundle = bundles(&[
            ("a.js", &[("src/only-in-a.js", 5_000)]),
            ("b.js", &[("src/only-in-b.js", 6_000)]),
        ]);
        let (items, wasted_by_url) = aggregate(&per_bundle, 0);

        assert!(items.is_empty());
        assert!(wasted_by_url.is_empty());
    }

    #[test]
    fn test_aggregate_shared_key_wastes_all_but_largest() {
        let per_bundle = bundles(&[
            ("a.js", &[("src/shared.js", 3_000)]),
            ("b.js", &[("src/shared.js", 2_500)]),
            ("c.js", &[("src/shared.js", 2_800)]),
        ]);
        let (items, wasted_by_url) = aggregate(&per_bundle, 0);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.source, "src/shared.js");
        assert_eq!(item.source_bytes, vec![3_000, 2_800, 2_500]);
        assert_eq!(item.urls, vec!["a.js", "c.js", "b.js"]);
        assert_eq!(item.wasted_bytes, 5_300);

        assert_eq!(wasted_by_url.get("a.js"), None);
        assert_eq!(wasted_by_url.get("b.js"), Some(&2_500));
        assert_eq!(wasted_by_url.get("c.js"), Some(&2_800));
    }

    #[test]
    fn test_aggregate_equal_sizes_keep_input_bundle_order() {
        let per_bundle = bundles(&[
            ("first.js", &[("src/shared.js", 1_000)]),
            ("second.js", &[("src/shared.js", 1_000)]),
        ]);
        let (items, wasted_by_url) = aggregate(&per_bundle, 0);

        assert_eq!(items[0].urls, vec!["first.js", "second.js"]);
        assert_eq!(wasted_by_url.get("first.js"), None);
        assert_eq!(wasted_by_url.get("second.js"), Some(&1_000));
    }

    #[test]
    fn test_aggregate_zero_counts_do_not_create_occurrences() {
        let per_bundle = bundles(&[
            ("a.js", &[("src/shared.js", 2_000)]),
            ("b.js", &[("src/shared.js", 0)]),
        ]);
        let (items, _) = aggregate(&per_bundle, 0);
        assert!(items.is_empty());
    }

    #[test]
    fn test_aggregate_below_threshold_groups_merge_into_other() {
        let per_bundle = bundles(&[
            ("a.js", &[("src/big.js", 9_000), ("src/tiny.js", 100)]),
            ("b.js", &[("src/big.js", 8_000), ("src/tiny.js", 90)]),
        ]);
        let (items, wasted_by_url) = aggregate(&per_bundle, 1_024);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source, "src/big.js");
        assert_eq!(items[0].wasted_bytes, 8_000);

        let other = &items[1];
        assert_eq!(other.source, OTHER_SOURCE);
        assert!(other.source_bytes.is_empty());
        assert_eq!(other.urls, vec!["a.js", "b.js"]);
        assert_eq!(other.wasted_bytes, 90);

        // Waste folded into "Other" still lands in the per-url summary.
        assert_eq!(wasted_by_url.get("b.js"), Some(&8_090));
    }

    #[test]
    fn test_aggregate_no_sub_threshold_groups_emits_no_other() {
        let per_bundle = bundles(&[
            ("a.js", &[("src/big.js", 9_000)]),
            ("b.js", &[("src/big.js", 8_000)]),
        ]);
        let (items, _) = aggregate(&per_bundle, 1_024);

        assert_eq!(items.len(), 1);
        assert!(items.iter().all(|item| item.source != OTHER_SOURCE));
    }

    #[test]
    fn test_aggregate_empty_key_always_folds_into_other() {
        // A namespace-less key above threshold still has no stable name.
        let per_bundle = bundles(&[
            ("a.js", &[("", 50_000)]),
            ("b.js", &[("", 50_000)]),
        ]);
        let (items, wasted_by_url) = aggregate(&per_bundle, 1_024);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, OTHER_SOURCE);
        assert_eq!(items[0].wasted_bytes, 50_000);
        assert_eq!(wasted_by_url.get("b.js"), Some(&50_000));
    }

    #[test]
    fn test_aggregate_items_sort_descending_by_wasted_bytes() {
        let per_bundle = bundles(&[
            (
                "a.js",
                &[
                    ("src/mid.js", 5_000),
                    ("src/large.js", 40_000),
                    ("src/small.js", 2_000),
                ][..],
            ),
            (
                "b.js",
                &[
                    ("src/mid.js", 5_000),
                    ("src/large.js", 40_000),
                    ("src/small.js", 2_000),
                ][..],
            ),
        ]);
        let (items, _) = aggregate(&per_bundle, 1_024);

        let wasted: Vec<u64> = items.iter().map(|item| item.wasted_bytes).collect();
        assert_eq!(wasted, vec![40_000, 5_000, 2_000]);
    }

    #[test]
    fn test_aggregate_other_urls_deduplicate_in_first_appearance_order() {
        let per_bundle = bundles(&[
            ("a.js", &[("src/x.js", 100), ("src/y.js", 200)]),
            ("b.js", &[("src/x.js", 100), ("src/y.js", 150)]),
            ("c.js", &[("src/y.js", 180)]),
        ]);
        let (items, _) = aggregate(&per_bundle, 10_000);

        assert_eq!(items.len(), 1);
        let other = &items[0];
        assert_eq!(other.source, OTHER_SOURCE);
        assert_eq!(other.urls, vec!["a.js", "b.js", "c.js"]);
        // x: 100 wasted; y: 180 + 150 wasted.
        assert_eq!(other.wasted_bytes, 430);
    }

    #[test]
    fn test_aggregate_total_waste_is_invariant_under_threshold() {
        let per_bundle = bundles(&[
            (
                "a.js",
                &[
                    ("src/a.js", 10_000),
                    ("src/b.js", 3_000),
                    ("src/c.js", 500),
                ][..],
            ),
            (
                "b.js",
                &[
                    ("src/a.js", 9_000),
                    ("src/b.js", 2_900),
                    ("src/c.js", 450),
                ][..],
            ),
        ]);

        let totals: Vec<u64> = [0u64, 500, 3_000, 10_000, u64::MAX]
            .iter()
            .map(|&threshold| {
                let (items, _) = aggregate(&per_bundle, threshold);
                items.iter().map(|item| item.wasted_bytes).sum()
            })
            .collect();

        assert!(totals.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(totals[0], 9_000 + 2_900 + 450);
    }

    #[test]
    fn test_aggregate_raising_threshold_only_moves_items_into_other() {
        let per_bundle = bundles(&[
            ("a.js", &[("src/a.js", 10_000), ("src/b.js", 3_000)]),
            ("b.js", &[("src/a.js", 9_000), ("src/b.js", 2_900)]),
        ]);

        let (low, _) = aggregate(&per_bundle, 100);
        let (high, _) = aggregate(&per_bundle, 5_000);

        let named = |items: &[ReportItem]| {
            items
                .iter()
                .filter(|item| item.source != OTHER_SOURCE)
                .map(|item| item.source.clone())
                .collect::<Vec<_>>()
        };
        let low_named = named(&low);
        let high_named = named(&high);
        assert!(high_named.iter().all(|source| low_named.contains(source)));
        assert!(high_named.len() < low_named.len());
    }

    #[test]
    fn test_collect_groups_wasted_excludes_only_the_largest() {
        let per_bundle = bundles(&[
            ("a.js", &[("src/shared.js", 4_000)]),
            ("b.js", &[("src/shared.js", 3_000)]),
            ("c.js", &[("src/shared.js", 1_000)]),
        ]);
        let groups = collect_groups(&per_bundle);

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        let total: u64 = group.occurrences.iter().map(|(_, bytes)| bytes).sum();
        assert_eq!(total, 8_000);
        assert_eq!(group.wasted, total - group.occurrences[0].1);
    }
}
