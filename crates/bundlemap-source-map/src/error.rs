//! Error types for reading and writing source maps.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors that can occur while decoding or encoding a source map.
#[derive(Debug, Error)]
pub enum SourceMapError {
    /// The map could not be parsed or written. Covers invalid JSON, bad VLQ
    /// data, out-of-range source and name references and index maps.
    #[error("Invalid source map: {0}")]
    SourceMap(#[from] sourcemap::Error),

    /// The serialized map was not valid UTF-8.
    #[error("Source map is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Result type for source map operations.
pub type Result<T> = std::result::Result<T, SourceMapError>;
