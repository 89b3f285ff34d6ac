//! Decoding of the compact `mappings` encoding into ordered entries.
//!
//! The `mappings` string is one group per generated line (`;`-separated)
//! of comma-separated segments. Every segment is 1, 4 or 5 VLQ fields,
//! each a delta against the previous segment's value: the generated
//! column resets at every line, the source index and original line and
//! column carry across line boundaries. Decoded entries come out in
//! ascending generated position, which downstream byte attribution
//! relies on.

use super::artifact::SourceMap;
use super::error::DecodeError;
use super::vlq;

/// Original-source attachment of a mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRef {
    /// Index into the map's `sources` list
    pub index: u32,
    /// Zero-based line in the original file
    pub line: u32,
    /// Zero-based column in the original file
    pub column: u32,
}

/// One decoded mapping entry.
///
/// Entries produced by [`decode`] are ordered by
/// `(generated_line, generated_column)`. A 1-field segment carries no
/// source attachment: the generated span it opens belongs to no module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingEntry {
    /// Zero-based line in the generated text
    pub generated_line: u32,
    /// Zero-based column in the generated text
    pub generated_column: u32,
    /// Originating source position, if the segment named one
    pub source: Option<SourceRef>,
}

/// Decode a map's `mappings` string into ordered mapping entries.
///
/// Pure and deterministic. Fails on the first malformed segment: an
/// invalid alphabet character, a truncated VLQ, an impossible field
/// count, a delta that drives a coordinate negative, or a source index
/// outside the map's `sources` list.
pub fn decode(map: &SourceMap) -> Result<Vec<MappingEntry>, DecodeError> {
    decode_mappings(&map.mappings, map.sources.len())
}

fn decode_mappings(mappings: &str, sources_len: usize) -> Result<Vec<MappingEntry>, DecodeError> {
    let mut entries = Vec::new();

    // Running decoder state. The column resets per generated line, the
    // other three persist across segments and line boundaries.
    let mut source_index: i64 = 0;
    let mut original_line: i64 = 0;
    let mut original_column: i64 = 0;

    let mut group_offset = 0usize;
    for (line_no, group) in mappings.split(';').enumerate() {
        let generated_line = line_no as u32;
        let mut generated_column: i64 = 0;
        let mut prev_column: i64 = 0;

        if !group.is_empty() {
            let mut segment_offset = group_offset;
            for segment in group.split(',') {
                let fields = vlq::decode_segment(segment, segment_offset)?;
                match fields.len() {
                    1 | 4 | 5 => {}
                    count => {
                        return Err(DecodeError::BadSegmentLength {
                            count,
                            line: generated_line,
                        })
                    }
                }

                generated_column += fields[0];
                if generated_column < 0 {
                    return Err(DecodeError::NegativeCoordinate {
                        field: "generated column",
                        line: generated_line,
                    });
                }
                if generated_column < prev_column {
                    return Err(DecodeError::ColumnRegression {
                        line: generated_line,
                    });
                }
                prev_column = generated_column;

                let source = if fields.len() >= 4 {
                    source_index += fields[1];
                    original_line += fields[2];
                    original_column += fields[3];
                    if source_index < 0 {
                        return Err(DecodeError::NegativeCoordinate {
                            field: "source index",
                            line: generated_line,
                        });
                    }
                    if original_line < 0 {
                        return Err(DecodeError::NegativeCoordinate {
                            field: "original line",
                            line: generated_line,
                        });
                    }
                    if original_column < 0 {
                        return Err(DecodeError::NegativeCoordinate {
                            field: "original column",
                            line: generated_line,
                        });
                    }
                    if source_index as usize >= sources_len {
                        return Err(DecodeError::SourceIndexOutOfRange {
                            index: source_index as u32,
                            len: sources_len,
                        });
                    }
                    // The optional 5th field is a names-table index; byte
                    // attribution has no use for it.
                    Some(SourceRef {
                        index: source_index as u32,
                        line: original_line as u32,
                        column: original_column as u32,
                    })
                } else {
                    None
                };

                entries.push(MappingEntry {
                    generated_line,
                    generated_column: generated_column as u32,
                    source,
                });
                segment_offset += segment.len() + 1;
            }
        }
        group_offset += group.len() + 1;
    }

    Ok(entries)
}
