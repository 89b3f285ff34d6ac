//! Source map parsing and mapping decoding.
//!
//! Covers the input side of the engine: the artifact model handed in by
//! a provider, JSON parsing of source maps, and decoding of the compact
//! base64-VLQ `mappings` encoding into flat, ordered entry vectors.

pub mod artifact;
pub mod error;
pub mod mappings;
mod vlq;

pub use artifact::{BundleArtifact, SourceMap};
pub use error::DecodeError;
pub use mappings::{decode, MappingEntry, SourceRef};
