/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for bundle writing.

use bundlemap_source_map::SourceMapError;
use thiserror::Error;

/// Errors that can occur while writing or rendering a bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// A fragment was given an origin on line 0; lines start at 1.
    #[error("Invalid fragment origin: line {line} (lines are 1-based)")]
    InvalidOrigin { line: usize },

    /// Reading or writing a source map failed.
    #[error(transparent)]
    SourceMap(#[from] SourceMapError),

    /// An inline source map payload is not valid base64.
    #[error("Invalid base64 in inline source map: {0}")]
    Base64(#[from] base64::DecodeError),

    /// An inline source map payload is not valid UTF-8.
    #[error("Inline source map is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for bundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;
