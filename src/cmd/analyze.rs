//! Analyze command implementation
//!
//! Loads bundle scripts and their source maps from disk, hands them to
//! the engine and renders the duplication report.

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::warn;

use crate::config::ConfigFile;
use crate::dedupe::{analyze, AnalysisCache, AnalysisOptions, DEFAULT_IGNORE_THRESHOLD_IN_BYTES};
use crate::error::CliError;
use crate::report::{print_json_report, print_report};
use crate::sourcemap::{BundleArtifact, SourceMap};

/// Run a duplication analysis over bundle files on disk.
///
/// The reporting threshold resolves CLI flag first, then
/// `.bundle-dedupe.toml`, then the built-in default.
pub fn cmd_analyze(bundles: &[PathBuf], threshold: Option<u64>, json: bool) -> Result<()> {
    let config = ConfigFile::load(Path::new("."))?;
    let ignore_threshold_in_bytes = threshold
        .or(config.ignore_threshold_bytes)
        .unwrap_or(DEFAULT_IGNORE_THRESHOLD_IN_BYTES);

    let artifacts = load_artifacts(bundles)?;

    let cache = AnalysisCache::new();
    let options = AnalysisOptions {
        ignore_threshold_in_bytes,
    };
    let report = analyze(&artifacts, &options, &cache);

    if json {
        print_json_report(&report)?;
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Read each bundle script and its source map from disk.
fn load_artifacts(bundles: &[PathBuf]) -> Result<Vec<BundleArtifact>> {
    let mut artifacts = Vec::with_capacity(bundles.len());
    for path in bundles {
        if !path.exists() {
            return Err(CliError::ScriptNotFound { path: path.clone() }.into());
        }
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            context: format!("reading {}", path.display()),
            source,
        })?;

        let map = match find_map_path(path, &content) {
            Some(map_path) => Some(load_map(&map_path)?),
            None => {
                warn!("no source map found for {}", path.display());
                None
            }
        };

        artifacts.push(BundleArtifact::new(
            path.display().to_string(),
            Some(content),
            map,
        ));
    }
    Ok(artifacts)
}

/// Locate a bundle's map: a trailing `sourceMappingURL` comment wins,
/// a sibling `<bundle>.map` file is the fallback.
fn find_map_path(script_path: &Path, content: &str) -> Option<PathBuf> {
    if let Some(url) = source_mapping_url(content) {
        // Data urls would need inline decoding; the engine accepts any
        // parsed map, but the CLI only resolves file references.
        if !url.starts_with("data:") {
            let resolved = match script_path.parent() {
                Some(parent) => parent.join(url),
                None => PathBuf::from(url),
            };
            if resolved.exists() {
                return Some(resolved);
            }
        }
    }

    let mut sibling = script_path.as_os_str().to_owned();
    sibling.push(".map");
    let sibling = PathBuf::from(sibling);
    sibling.exists().then_some(sibling)
}

/// Extract the url from a trailing `//# sourceMappingURL=` comment.
fn source_mapping_url(content: &str) -> Option<&str> {
    content
        .lines()
        .rev()
        .take(5)
        .find_map(|line| {
            line.trim()
                .strip_prefix("//# sourceMappingURL=")
                .or_else(|| line.trim().strip_prefix("//@ sourceMappingURL="))
        })
        .map(str::trim)
        .filter(|url| !url.is_empty())
}

fn load_map(path: &Path) -> Result<SourceMap> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        context: format!("reading {}", path.display()),
        source,
    })?;
    SourceMap::from_json(&json).map_err(|source| {
        CliError::MapParse {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}
