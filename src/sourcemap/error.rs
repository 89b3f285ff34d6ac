//! Error types for source map decoding

use thiserror::Error;

/// Errors raised while decoding a source map's `mappings` field.
///
/// Every variant marks the whole map as unusable for byte attribution;
/// callers exclude the offending bundle and carry on with the rest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Character outside the base64 VLQ alphabet
    #[error("invalid character {character:?} in mappings at offset {offset}")]
    InvalidCharacter {
        /// The offending character
        character: char,
        /// Byte offset into the `mappings` string
        offset: usize,
    },

    /// VLQ digit stream ended with the continuation bit still set
    #[error("truncated VLQ sequence in mappings at offset {offset}")]
    TruncatedVlq {
        /// Byte offset just past the unterminated sequence
        offset: usize,
    },

    /// VLQ value too wide for the coordinate space
    #[error("VLQ value overflow in mappings at offset {offset}")]
    Overflow {
        /// Byte offset of the digit that overflowed
        offset: usize,
    },

    /// A relative delta drove a running coordinate below zero
    #[error("negative {field} after applying delta in generated line {line}")]
    NegativeCoordinate {
        /// Which running counter went negative
        field: &'static str,
        /// Zero-based generated line of the offending segment
        line: u32,
    },

    /// Generated columns regressed within a line
    #[error("generated column regressed in line {line}")]
    ColumnRegression {
        /// Zero-based generated line of the offending segment
        line: u32,
    },

    /// Segment with an impossible field count (must be 1, 4 or 5)
    #[error("segment with {count} fields in line {line} (expected 1, 4 or 5)")]
    BadSegmentLength {
        /// Number of VLQ fields the segment actually carried
        count: usize,
        /// Zero-based generated line of the offending segment
        line: u32,
    },

    /// Mapping references a source index not present in `sources`
    #[error("source index {index} out of range (map has {len} sources)")]
    SourceIndexOutOfRange {
        /// The out-of-range index
        index: u32,
        /// Length of the map's `sources` list
        len: usize,
    },
}
