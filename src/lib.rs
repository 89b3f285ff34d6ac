#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! bundle-dedupe library
//!
//! Detects source modules duplicated across compiled JavaScript bundles
//! by decoding each bundle's source map, attributing generated bytes to
//! their original modules, and matching modules cross-bundle under a
//! canonical key. Usable programmatically in addition to the CLI.
//!
//! # Basic Example
//!
//! Analyzing two bundles that ship the same vendor module:
//!
//! ```
//! use bundle_dedupe::dedupe::{analyze, AnalysisCache, AnalysisOptions};
//! use bundle_dedupe::sourcemap::{BundleArtifact, SourceMap};
//!
//! let map = SourceMap::from_json(r#"{
//!     "version": 3,
//!     "sources": ["node_modules/uuid/index.js"],
//!     "names": [],
//!     "mappings": "AAAA"
//! }"#)?;
//!
//! let content = "f".repeat(2048);
//! let artifacts = vec![
//!     BundleArtifact::new("https://cdn.example/main.js", Some(content.clone()), Some(map.clone())),
//!     BundleArtifact::new("https://cdn.example/admin.js", Some(content), Some(map)),
//! ];
//!
//! let cache = AnalysisCache::new();
//! let report = analyze(&artifacts, &AnalysisOptions::default(), &cache);
//!
//! assert_eq!(report.items[0].source, "node_modules/uuid/index.js");
//! assert_eq!(report.items[0].wasted_bytes, 2048);
//! # Ok::<(), serde_json::Error>(())
//! ```
//!
//! # Advanced Example: Reusing the Cache
//!
//! The attribution cache is owned by the caller, so repeated analyses of
//! unchanged artifacts skip the decode entirely:
//!
//! ```
//! use bundle_dedupe::dedupe::{analyze, AnalysisCache, AnalysisOptions};
//! use bundle_dedupe::sourcemap::{BundleArtifact, SourceMap};
//!
//! let map = SourceMap::from_json(
//!     r#"{"version": 3, "sources": ["src/app.ts"], "mappings": "AAAA"}"#,
//! )?;
//! let artifact = BundleArtifact::new("main.js", Some("let app;".into()), Some(map));
//!
//! let cache = AnalysisCache::new();
//! let options = AnalysisOptions::default();
//! analyze(&[artifact.clone(), artifact.clone()], &options, &cache);
//! assert_eq!(cache.len(), 1);
//!
//! // Second run hits the cache for every bundle.
//! analyze(&[artifact.clone(), artifact], &options, &cache);
//! assert_eq!(cache.len(), 1);
//! # Ok::<(), serde_json::Error>(())
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file loading
pub mod config;
/// Duplication detection engine
pub mod dedupe;
/// CLI error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Report rendering for console and JSON output
pub mod report;
/// Source map parsing and mapping decoding
pub mod sourcemap;
