//! Reading an existing source map

use std::collections::HashMap;

use sourcemap::{SourceMap, Token};

use crate::error::Result;
use crate::types::{Mapping, OriginalLocation, Position};

/// Rank of a token among those sharing one generated position; lowest wins.
///
/// Tokens with an origin come first, then lower source index, original
/// line, original column and name index.
type TieRank = (bool, u32, u32, u32, u32);

fn tie_rank(token: &Token<'_>) -> TieRank {
    (
        !token.has_source(),
        token.get_src_id(),
        token.get_src_line(),
        token.get_src_col(),
        token.get_name_id(),
    )
}

/// A decoded source map that can answer "where did this position come from?"
#[derive(Debug, Clone)]
pub struct SourceMapConsumer {
    map: SourceMap,
    sources: Vec<String>,
    /// In token order
    mappings: Vec<Mapping>,
    /// Index into `mappings` of the preferred token at each 0-indexed
    /// generated `(line, column)`
    preferred: HashMap<(u32, u32), (TieRank, usize)>,
}

impl SourceMapConsumer {
    /// Parse a version 3 source map from its JSON text
    ///
    /// Index maps (`sections`) are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let map = SourceMap::from_slice(json.as_bytes())?;
        Ok(Self::from_source_map(map))
    }

    /// Wrap an already-decoded map
    pub fn from_source_map(map: SourceMap) -> Self {
        let sources = map.sources().map(str::to_string).collect();
        let mut mappings = Vec::new();
        let mut preferred: HashMap<(u32, u32), (TieRank, usize)> = HashMap::new();

        for token in map.tokens() {
            let index = mappings.len();
            let rank = tie_rank(&token);
            preferred
                .entry((token.get_dst_line(), token.get_dst_col()))
                .and_modify(|current| {
                    if rank < current.0 {
                        *current = (rank, index);
                    }
                })
                .or_insert((rank, index));
            mappings.push(mapping_of(&token));
        }

        SourceMapConsumer {
            map,
            sources,
            mappings,
            preferred,
        }
    }

    /// Find the original location of a generated position
    ///
    /// Uses the closest mapping at or before `generated` on the same line.
    /// Returns `None` when the line has no such mapping or when that mapping
    /// carries no original location.
    pub fn original_position_for(&self, generated: Position) -> Option<OriginalLocation> {
        if generated.line == 0 {
            return None;
        }
        let (line, column) = generated.to_wire();
        let token = self.map.lookup_token(line, column)?;
        if token.get_dst_line() != line {
            return None;
        }

        let (_, index) = self.preferred.get(&(line, token.get_dst_col()))?;
        self.mappings.get(*index)?.original.clone()
    }

    /// All decoded mappings in the order the map lists them
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Source names, with any `sourceRoot` already applied
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Embedded original text of `source`, if the map carries it
    pub fn source_content_for(&self, source: &str) -> Option<&str> {
        let index = self.sources.iter().position(|s| s == source)?;
        self.map.get_source_contents(u32::try_from(index).ok()?)
    }

    /// The generated file this map describes
    pub fn file(&self) -> Option<&str> {
        self.map.get_file()
    }
}

fn mapping_of(token: &Token<'_>) -> Mapping {
    let generated = Position::from_wire(token.get_dst_line(), token.get_dst_col());
    let original = token.get_source().map(|source| OriginalLocation {
        source: source.to_string(),
        position: Position::from_wire(token.get_src_line(), token.get_src_col()),
        name: token.get_name().map(str::to_string),
    });

    Mapping {
        generated,
        original,
    }
}
