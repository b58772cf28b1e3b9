//! Source maps for bundlemap
//!
//! This crate provides the mapping table the bundle writer accumulates while
//! it concatenates fragments, and the reader it uses for maps already
//! embedded in those fragments. Only what composition needs is here: record
//! mappings, compose an upstream map into them, and serialize the result as
//! a version 3 source map. Encoding and decoding of the wire format is done
//! by the `sourcemap` crate.
//!
//! # Overview
//!
//! The core types are:
//! - [`SourceMapGenerator`]: Append-only mapping table for one generated file
//! - [`SourceMapConsumer`]: Decoded map answering original-position lookups
//! - [`Mapping`]: One generated position and where it came from
//!
//! # Example
//!
//! ```rust
//! use bundlemap_source_map::*;
//!
//! let mut generator = SourceMapGenerator::new("bundle.js");
//! generator.add_mapping(Mapping::new("a.js", Position::START, Position::new(2, 0)));
//!
//! let json = generator.to_json().unwrap();
//! let consumer = SourceMapConsumer::from_json(&json).unwrap();
//!
//! let original = consumer.original_position_for(Position::new(2, 0)).unwrap();
//! assert_eq!(original.source, "a.js");
//! assert_eq!(original.position, Position::START);
//! ```

pub mod consumer;
pub mod error;
pub mod generator;
pub mod types;

// Re-export main types
pub use consumer::SourceMapConsumer;
pub use error::{Result, SourceMapError};
pub use generator::SourceMapGenerator;
pub use sourcemap::SourceMap;
pub use types::{Mapping, OriginalLocation, Position};
