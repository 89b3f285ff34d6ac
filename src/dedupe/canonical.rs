//! Source path canonicalization for cross-bundle matching.
//!
//! Raw paths recorded in maps vary per build: bundler url schemes,
//! synthetic namespace roots, loader query strings and pinned package
//! versions all get in the way of matching the same logical module
//! across differently-built bundles. Canonicalization collapses those
//! onto one stable key.

use regex::Regex;
use std::sync::OnceLock;

/// Matches `node_modules/<pkg>@<version>/` including scoped packages.
static VERSIONED_PACKAGE_RE: OnceLock<Regex> = OnceLock::new();

/// Normalize a raw source path into a stable cross-bundle key.
///
/// Total: never fails, unrecognized formats pass through after trivial
/// trimming. Applied rules, in order: drop a `scheme://` prefix plus the
/// synthetic namespace segment bundlers insert before the real tree,
/// drop loader query strings, collapse duplicate separators, and strip
/// version qualifiers from `node_modules` paths so differing pins of
/// the same library still match. Idempotent.
///
/// # Examples
///
/// ```
/// use bundle_dedupe::dedupe::canonicalize;
///
/// assert_eq!(
///     canonicalize("webpack:///./src/store/filter-store.ts"),
///     "src/store/filter-store.ts"
/// );
/// assert_eq!(
///     canonicalize("node_modules/lodash@4.17.21/index.js"),
///     "node_modules/lodash/index.js"
/// );
/// ```
pub fn canonicalize(raw_path: &str) -> String {
    let mut path = raw_path.trim();

    if let Some(idx) = path.find("://") {
        path = &path[idx + 3..];
        path = path.trim_start_matches('/');
        // In `webpack://my-app/src/x.js` the leading segment is the
        // bundler's namespace, not part of the source tree. Relative
        // and node_modules roots are already the tree itself.
        if !path.starts_with('.') && !path.starts_with("node_modules/") {
            if let Some(slash) = path.find('/') {
                path = &path[slash + 1..];
            }
        }
    }

    // Loader annotations: `style.css?inline` and webpack's bare `x.js?`.
    if let Some((before, _)) = path.split_once('?') {
        path = before;
    }

    let mut key = path.trim_start_matches("./").to_string();

    while key.contains("//") {
        key = key.replace("//", "/");
    }

    let versioned = VERSIONED_PACKAGE_RE.get_or_init(|| {
        Regex::new(r"(node_modules/(?:@[^/@]+/)?[^/@]+)@[^/]+")
            .expect("versioned package regex is valid")
    });
    versioned.replace_all(&key, "$1").into_owned()
}
