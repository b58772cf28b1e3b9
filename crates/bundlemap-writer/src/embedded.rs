/*
 * embedded.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Source map comments embedded in fragment text.
//!
//! A fragment that was itself generated may end with a
//! `//# sourceMappingURL=...` comment. Inside a bundle that comment is stale,
//! so it is always stripped; when it carries an inline base64 JSON map, the
//! map is decoded first so it can be composed into the bundle's own map.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bundlemap_source_map::SourceMapConsumer;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

/// Prefix of the comment line the bundle writer appends on render.
pub const SOURCE_MAPPING_URL_PREFIX: &str = "//# sourceMappingURL=data:application/json;base64,";

/// Any `//# sourceMappingURL=` line, including the legacy `//@` form.
static SOURCE_MAPPING_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*//[#@]\s*sourceMappingURL=(\S*)\s*$").unwrap());

/// An inline JSON data URL, optionally with a charset parameter.
static INLINE_JSON_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:application/json(?:;charset=[^;,]*)?;base64,(.*)$").unwrap()
});

/// The URL of a source map comment line, if `line` is one.
pub fn source_map_url(line: &str) -> Option<&str> {
    SOURCE_MAPPING_URL_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn is_source_map_comment(line: &str) -> bool {
    source_map_url(line).is_some()
}

/// Remove every source map comment line.
pub fn strip_source_map_comments<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .copied()
        .filter(|line| !is_source_map_comment(line))
        .collect()
}

/// Decode an inline `data:application/json;base64,` URL.
///
/// Returns `Ok(None)` for URLs that point elsewhere (a file, `http:`...),
/// since there is nothing to read in-process.
pub fn decode_inline_source_map(url: &str) -> Result<Option<SourceMapConsumer>> {
    let Some(payload) = INLINE_JSON_URL_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
    else {
        return Ok(None);
    };

    let bytes = STANDARD.decode(payload.as_str())?;
    let json = String::from_utf8(bytes)?;
    Ok(Some(SourceMapConsumer::from_json(&json)?))
}

/// Find and decode the map a fragment carries for itself.
///
/// Lines are scanned from the end; the last source map comment is the one
/// that counts. A payload that cannot be decoded is logged and treated as
/// absent, so the fragment is still written and mapped.
pub fn find_embedded_source_map(fragment: &str, lines: &[&str]) -> Option<SourceMapConsumer> {
    let url = lines.iter().rev().find_map(|line| source_map_url(line))?;

    match decode_inline_source_map(url) {
        Ok(Some(consumer)) => Some(consumer),
        Ok(None) => {
            tracing::debug!(
                fragment,
                "Source map comment does not hold an inline map, ignoring"
            );
            None
        }
        Err(error) => {
            tracing::warn!(fragment, %error, "Ignoring malformed embedded source map");
            None
        }
    }
}

/// The comment line that embeds `json` as an inline source map.
pub fn source_map_comment(json: &str) -> String {
    format!("{}{}", SOURCE_MAPPING_URL_PREFIX, STANDARD.encode(json))
}
