//! Core types for source mapping

/// A position in a text (1-indexed line, 0-indexed column)
///
/// This is the convention of the source map v3 generator API: lines start
/// at 1, columns at 0. The wire format stores lines 0-indexed; conversion
/// happens only when mappings are encoded or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (0-indexed)
    pub column: usize,
}

impl Position {
    /// The first character of a text
    pub const START: Position = Position { line: 1, column: 0 };

    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    /// 0-indexed `(line, column)` as stored in a map, saturating at `u32::MAX`
    pub(crate) fn to_wire(self) -> (u32, u32) {
        let line = u32::try_from(self.line.saturating_sub(1)).unwrap_or(u32::MAX);
        let column = u32::try_from(self.column).unwrap_or(u32::MAX);
        (line, column)
    }

    pub(crate) fn from_wire(line: u32, column: u32) -> Self {
        let line = usize::try_from(line).unwrap_or(usize::MAX);
        let column = usize::try_from(column).unwrap_or(usize::MAX);
        Position::new(line.saturating_add(1), column)
    }
}

/// Where a generated position came from
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OriginalLocation {
    /// Source file name as it appears in the map's `sources`
    pub source: String,
    /// Position in the source
    pub position: Position,
    /// Symbol name, if the mapping carries one
    pub name: Option<String>,
}

impl OriginalLocation {
    pub fn new(source: impl Into<String>, position: Position) -> Self {
        OriginalLocation {
            source: source.into(),
            position,
            name: None,
        }
    }
}

/// A single correspondence between a generated position and its origin
///
/// `original` is `None` for segments that only mark a generated column
/// (1-field segments); such mappings occur in consumed maps but are never
/// produced by the bundle writer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mapping {
    pub generated: Position,
    pub original: Option<OriginalLocation>,
}

impl Mapping {
    /// A mapping from `generated` back to `position` in `source`
    pub fn new(source: impl Into<String>, original: Position, generated: Position) -> Self {
        Mapping {
            generated,
            original: Some(OriginalLocation::new(source, original)),
        }
    }

    /// The source this mapping points at, if any
    pub fn source(&self) -> Option<&str> {
        self.original.as_ref().map(|o| o.source.as_str())
    }

    /// Ordering used when serializing: generated position first, then origin
    pub(crate) fn cmp_by_generated(&self, other: &Mapping) -> std::cmp::Ordering {
        self.generated
            .cmp(&other.generated)
            .then_with(|| self.original.cmp(&other.original))
    }
}
