//! Per-bundle byte attribution from decoded mappings.
//!
//! Consecutive mapping entries carve the generated text into half-open
//! byte spans; each span is charged to the canonical key of the entry
//! that opens it. Module boundaries are not guaranteed to align with
//! segment boundaries, so the result is an estimate, but it is the
//! only signal the map provides.

use std::collections::BTreeMap;

use crate::sourcemap::{MappingEntry, SourceMap};

use super::canonical::canonicalize;

/// Byte counts attributable to each canonical source within one bundle.
///
/// Built once per (content, map) pair and read-only afterwards; the
/// aggregator and the cache only ever share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerBundleAttribution {
    /// Canonical source key to generated bytes charged to it.
    /// Zero-byte sources are omitted.
    pub by_source: BTreeMap<String, u64>,

    /// Bytes covered by mapping entries with no source attachment
    pub unmapped_bytes: u64,

    /// Generated length the attribution was computed against
    pub generated_length: u64,
}

impl PerBundleAttribution {
    /// Sum of all per-source byte counts.
    pub fn mapped_bytes(&self) -> u64 {
        self.by_source.values().sum()
    }
}

/// Byte offsets at which each generated line starts.
fn line_start_offsets(content: &str) -> Vec<u64> {
    let mut starts = Vec::with_capacity(64);
    starts.push(0);
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(i as u64 + 1);
        }
    }
    starts
}

/// Map a generated (line, column) back to a byte offset, clamped to the
/// generated length so maps that overshoot their text stay in bounds.
fn byte_offset(starts: &[u64], length: u64, line: u32, column: u32) -> u64 {
    match starts.get(line as usize) {
        Some(&start) => (start + u64::from(column)).min(length),
        None => length,
    }
}

/// Attribute a bundle's generated bytes to canonical sources.
///
/// `entries` must be in ascending generated order, which [`decode`]
/// guarantees. The span of each entry runs to the next entry's offset,
/// the final entry's to the end of the generated text. Entries without
/// a source attachment accumulate into `unmapped_bytes`.
///
/// [`decode`]: crate::sourcemap::decode
pub fn attribute(entries: &[MappingEntry], map: &SourceMap, content: &str) -> PerBundleAttribution {
    let generated_length = content.len() as u64;
    let starts = line_start_offsets(content);

    // Index-addressed sums, folded onto canonical keys at the end.
    let mut by_index: Vec<u64> = vec![0; map.sources.len()];
    let mut unmapped_bytes = 0u64;

    for (i, entry) in entries.iter().enumerate() {
        let start = byte_offset(
            &starts,
            generated_length,
            entry.generated_line,
            entry.generated_column,
        );
        let end = match entries.get(i + 1) {
            Some(next) => byte_offset(
                &starts,
                generated_length,
                next.generated_line,
                next.generated_column,
            ),
            None => generated_length,
        };
        let span = end.saturating_sub(start);

        match entry.source {
            Some(source) => by_index[source.index as usize] += span,
            None => unmapped_bytes += span,
        }
    }

    // Differently-indexed sources can canonicalize onto one key (same
    // module pulled in twice under variant raw paths).
    let mut by_source: BTreeMap<String, u64> = BTreeMap::new();
    for (index, bytes) in by_index.into_iter().enumerate() {
        if bytes > 0 {
            *by_source.entry(canonicalize(&map.sources[index])).or_insert(0) += bytes;
        }
    }

    PerBundleAttribution {
        by_source,
        unmapped_bytes,
        generated_length,
    }
}
