/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Concatenate named text fragments into one artifact with a source map.
//!
//! [`BundleWriter`] appends fragments and raw text in caller order while it
//! keeps a running cursor into the output. Every fragment line gets a mapping
//! back to its own source line, and a map already embedded in a fragment
//! (an inline `//# sourceMappingURL=` comment) is stripped from the text and
//! composed into the bundle's map, so positions can be traced through more
//! than one generation step.
//!
//! # Example
//!
//! ```rust
//! use bundlemap_writer::{BundleWriter, Position};
//!
//! let mut writer = BundleWriter::new("bundle.js", true);
//! writer.write_line("/* header */");
//! writer.write_file_content("a.js", "var a=1;\nvar b=2;");
//! writer.new_line();
//! writer.write_file_content("b.js", "var c=3;");
//!
//! let mappings = writer.source_map().unwrap().mappings();
//! assert_eq!(mappings.len(), 3);
//! assert_eq!(mappings[2].generated, Position::new(5, 0));
//!
//! let output = writer.render().unwrap();
//! assert!(output.starts_with("/* header */\nvar a=1;\nvar b=2;\n\nvar c=3;\n//# sourceMappingURL="));
//! ```

pub mod buffer;
pub mod embedded;
pub mod error;
pub mod lines;
pub mod writer;

pub use buffer::OutputBuffer;
pub use bundlemap_source_map::{Mapping, Position, SourceMapConsumer, SourceMapGenerator};
pub use embedded::SOURCE_MAPPING_URL_PREFIX;
pub use error::{BundleError, Result};
pub use writer::BundleWriter;
