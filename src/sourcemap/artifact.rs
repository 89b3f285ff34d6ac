//! Input artifact model: a loaded script and its parsed source map.

use serde::Deserialize;

/// Parsed source map, the subset of the v3 format the engine consumes.
///
/// `names`, `file` and friends are accepted in the JSON but dropped;
/// only `sources` and `mappings` drive byte attribution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    /// Source file paths, addressed by index from mapping segments
    #[serde(default)]
    pub sources: Vec<String>,

    /// Base64-VLQ encoded positional mappings
    #[serde(default)]
    pub mappings: String,

    /// Original file contents, parallel to `sources`
    #[serde(default)]
    pub sources_content: Option<Vec<Option<String>>>,
}

impl SourceMap {
    /// Parse a source map from its JSON text.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_dedupe::sourcemap::SourceMap;
    ///
    /// let map = SourceMap::from_json(
    ///     r#"{"version": 3, "sources": ["src/app.ts"], "names": [], "mappings": "AAAA"}"#,
    /// )?;
    /// assert_eq!(map.sources, vec!["src/app.ts"]);
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One loaded script: its network url, its generated text and its map.
///
/// Owned by the caller and borrowed by the engine for the duration of an
/// analysis call. A script without a map is skipped; a script with a map
/// but no captured content is reported as a per-bundle failure.
#[derive(Debug, Clone)]
pub struct BundleArtifact {
    /// Url the script was loaded from
    pub url: String,

    /// Generated (compiled) script text, if captured
    pub content: Option<String>,

    /// Parsed source map, if one was found
    pub map: Option<SourceMap>,
}

impl BundleArtifact {
    /// Create an artifact from its parts.
    pub fn new(url: impl Into<String>, content: Option<String>, map: Option<SourceMap>) -> Self {
        Self {
            url: url.into(),
            content,
            map,
        }
    }
}
