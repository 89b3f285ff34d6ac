//! Cross-bundle duplication detection.
//!
//! The pipeline per bundle: decode the map's mappings, canonicalize the
//! source paths, attribute generated bytes to each canonical key. The
//! per-bundle tables then fold into a single duplication report naming
//! the modules shipped redundantly and the bytes they waste.

pub mod aggregate;
pub mod attribution;
pub mod cache;
pub mod canonical;
pub mod engine;

pub use aggregate::{aggregate, ReportItem, OTHER_SOURCE};
pub use attribution::{attribute, PerBundleAttribution};
pub use cache::{AnalysisCache, Fingerprint};
pub use canonical::canonicalize;
pub use engine::{
    analyze, AnalysisOptions, AnalysisReport, BundleError, BundleFailure,
    DEFAULT_IGNORE_THRESHOLD_IN_BYTES,
};
