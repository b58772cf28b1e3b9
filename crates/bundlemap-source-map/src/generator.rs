//! Building a source map incrementally

use std::collections::{HashMap, HashSet};

use sourcemap::{SourceMap, SourceMapBuilder};

use crate::consumer::SourceMapConsumer;
use crate::error::Result;
use crate::types::{Mapping, OriginalLocation};

/// Insertion-ordered set of strings
#[derive(Debug, Clone, Default)]
struct IndexedStrings {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl IndexedStrings {
    fn add(&mut self, item: &str) {
        if self.seen.insert(item.to_string()) {
            self.items.push(item.to_string());
        }
    }
}

/// Accumulates mappings for one generated file and serializes them as a
/// version 3 source map
///
/// Mappings are append-only. The `sources` and `names` tables are kept in
/// first-seen order, which is the order they are serialized in.
#[derive(Debug, Clone, Default)]
pub struct SourceMapGenerator {
    file: Option<String>,
    mappings: Vec<Mapping>,
    sources: IndexedStrings,
    names: IndexedStrings,
    sources_content: HashMap<String, String>,
}

impl SourceMapGenerator {
    /// Create a generator for the artifact named `file`
    pub fn new(file: impl Into<String>) -> Self {
        SourceMapGenerator {
            file: Some(file.into()),
            ..Default::default()
        }
    }

    /// The declared output file
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Record one mapping
    pub fn add_mapping(&mut self, mapping: Mapping) {
        if let Some(original) = &mapping.original {
            self.sources.add(&original.source);
            if let Some(name) = &original.name {
                self.names.add(name);
            }
        }
        self.mappings.push(mapping);
    }

    /// Attach the original text of `source`
    pub fn set_source_content(&mut self, source: impl Into<String>, content: impl Into<String>) {
        self.sources_content.insert(source.into(), content.into());
    }

    /// All mappings in the order they were recorded
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Source names in first-seen order
    pub fn sources(&self) -> &[String] {
        &self.sources.items
    }

    /// Compose an upstream map into this one
    ///
    /// Every mapping that points into `source_file` is looked up in
    /// `upstream` and, when the lookup resolves, redirected to the location
    /// `upstream` records for it. Mappings that do not resolve keep pointing
    /// at `source_file`. The source content `upstream` carries is copied over.
    pub fn apply_source_map(&mut self, upstream: &SourceMapConsumer, source_file: &str) {
        let mut sources = IndexedStrings::default();
        let mut names = IndexedStrings::default();
        let mut redirected = 0usize;

        for mapping in &mut self.mappings {
            let Some(original) = mapping.original.as_mut() else {
                continue;
            };

            if original.source == source_file {
                if let Some(resolved) = upstream.original_position_for(original.position) {
                    let name = resolved.name.or_else(|| original.name.take());
                    *original = OriginalLocation {
                        source: resolved.source,
                        position: resolved.position,
                        name,
                    };
                    redirected += 1;
                }
            }

            sources.add(&original.source);
            if let Some(name) = &original.name {
                names.add(name);
            }
        }

        if !self.mappings.is_empty() {
            self.sources = sources;
        }
        self.names = names;

        for source in upstream.sources() {
            if let Some(content) = upstream.source_content_for(source) {
                self.set_source_content(source.clone(), content);
            }
        }

        tracing::debug!(
            source = source_file,
            redirected,
            upstream_sources = upstream.sources().len(),
            "Applied upstream source map"
        );
    }

    /// Build the wire representation of this map
    ///
    /// Mappings are emitted sorted by generated position, then origin;
    /// exact duplicates are emitted once.
    pub fn to_source_map(&self) -> SourceMap {
        let mut builder = SourceMapBuilder::new(self.file.as_deref());

        for source in &self.sources.items {
            let id = builder.add_source(source);
            if let Some(content) = self.sources_content.get(source) {
                builder.set_source_contents(id, Some(content.as_str()));
            }
        }
        for name in &self.names.items {
            builder.add_name(name);
        }

        let mut sorted: Vec<&Mapping> = self.mappings.iter().collect();
        sorted.sort_by(|a, b| a.cmp_by_generated(b));
        sorted.dedup();

        for mapping in sorted {
            let (dst_line, dst_col) = mapping.generated.to_wire();
            match &mapping.original {
                Some(original) => {
                    let (src_line, src_col) = original.position.to_wire();
                    builder.add(
                        dst_line,
                        dst_col,
                        src_line,
                        src_col,
                        Some(original.source.as_str()),
                        original.name.as_deref(),
                        false,
                    );
                }
                None => {
                    builder.add_raw(dst_line, dst_col, 0, 0, None, None, false);
                }
            }
        }

        builder.into_sourcemap()
    }

    /// Serialize this map to its JSON text
    pub fn to_json(&self) -> Result<String> {
        let mut out = Vec::new();
        self.to_source_map().to_writer(&mut out)?;
        Ok(String::from_utf8(out)?)
    }
}
