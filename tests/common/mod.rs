//! Shared fixture builders for integration tests.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use bundle_dedupe::sourcemap::SourceMap;

const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Encode one VLQ value, the decoder's inverse.
pub fn encode_vlq(value: i64, out: &mut String) {
    let mut raw = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };
    loop {
        let mut digit = (raw & 0x1f) as usize;
        raw >>= 5;
        if raw != 0 {
            digit |= 0x20;
        }
        out.push(BASE64_CHARS[digit] as char);
        if raw == 0 {
            break;
        }
    }
}

/// Build a single-line bundle where each module occupies a contiguous
/// byte run of the given length, in order.
///
/// Returns the generated content plus a map whose segments place every
/// module at its exact byte offset, so per-module attribution equals
/// the requested lengths.
pub fn bundle(modules: &[(&str, usize)]) -> (String, SourceMap) {
    let mut content = String::new();
    let mut mappings = String::new();
    let mut prev_len = 0usize;

    for (index, (_, len)) in modules.iter().enumerate() {
        if index > 0 {
            mappings.push(',');
        }
        let fields: [i64; 4] = if index == 0 {
            [0, 0, 0, 0]
        } else {
            [prev_len as i64, 1, 0, 0]
        };
        for field in fields {
            encode_vlq(field, &mut mappings);
        }
        content.push_str(&"x".repeat(*len));
        prev_len = *len;
    }

    let map = SourceMap {
        sources: modules.iter().map(|(name, _)| name.to_string()).collect(),
        mappings,
        sources_content: None,
    };
    (content, map)
}

/// Serialize a bundle fixture's map as source map JSON.
pub fn map_json(map: &SourceMap) -> String {
    let sources: Vec<serde_json::Value> = map
        .sources
        .iter()
        .map(|s| serde_json::Value::String(s.clone()))
        .collect();
    serde_json::json!({
        "version": 3,
        "sources": sources,
        "names": [],
        "mappings": map.mappings,
    })
    .to_string()
}
