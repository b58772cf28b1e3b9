/*
 * writer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The bundle writer: concatenation plus mapping bookkeeping.

use bundlemap_source_map::{Mapping, Position, SourceMapGenerator};

use crate::buffer::OutputBuffer;
use crate::embedded::{find_embedded_source_map, source_map_comment, strip_source_map_comments};
use crate::error::{BundleError, Result};
use crate::lines::split_lines;

/// Whether the writer records mappings, decided once at construction.
#[derive(Debug, Clone)]
enum MappingState {
    Disabled,
    Enabled(SourceMapGenerator),
}

/// Assembles one artifact out of named fragments and raw text.
///
/// Fragments written with [`write_file_content`](Self::write_file_content)
/// get one mapping per line; raw text written with
/// [`write_line`](Self::write_line) or [`write_content`](Self::write_content)
/// is not mapped. [`render`](Self::render) produces the final text, ending
/// with an inline source map comment when mapping is enabled.
///
/// # Example
///
/// ```rust
/// use bundlemap_writer::BundleWriter;
///
/// let mut writer = BundleWriter::new("bundle.js", false);
/// writer.write_line("/* header */");
/// writer.write_file_content("a.js", "var a = 1;");
///
/// assert_eq!(writer.render().unwrap(), "/* header */\nvar a = 1;\n");
/// ```
#[derive(Debug, Clone)]
pub struct BundleWriter {
    file: String,
    output: OutputBuffer,
    mapping: MappingState,
    sources_content: bool,
}

impl BundleWriter {
    /// Create a writer for the artifact `file`.
    pub fn new(file: impl Into<String>, use_source_map: bool) -> Self {
        let file = file.into();
        let mapping = if use_source_map {
            MappingState::Enabled(SourceMapGenerator::new(file.clone()))
        } else {
            MappingState::Disabled
        };

        BundleWriter {
            file,
            output: OutputBuffer::new(),
            mapping,
            sources_content: false,
        }
    }

    /// Embed each fragment's text in the map's `sourcesContent`.
    pub fn with_sources_content(mut self, enabled: bool) -> Self {
        self.sources_content = enabled;
        self
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn is_source_map_enabled(&self) -> bool {
        matches!(self.mapping, MappingState::Enabled(_))
    }

    /// The mappings recorded so far, when mapping is enabled.
    pub fn source_map(&self) -> Option<&SourceMapGenerator> {
        match &self.mapping {
            MappingState::Enabled(generator) => Some(generator),
            MappingState::Disabled => None,
        }
    }

    /// Write `line` followed by a line break. Not mapped.
    pub fn write_line(&mut self, line: &str) {
        self.write(&format!("{}\n", line));
    }

    /// Write a block of text followed by a line break. Not mapped.
    pub fn write_content(&mut self, content: &str) {
        self.write(&format!("{}\n", content));
    }

    /// Start a new, empty output line.
    pub fn new_line(&mut self) {
        self.output.push_line();
    }

    /// Write a whole fragment, mapping each of its lines back to `name`.
    ///
    /// The fragment starts at its own line 1, column 0. Its last line is left
    /// open and then closed with an empty new line, so whatever is written
    /// next starts on a line of its own.
    pub fn write_file_content(&mut self, name: &str, content: &str) {
        self.write_fragment_from(name, content, Position::START);
        self.output.push_line();
    }

    /// Write a fragment whose text starts at `origin` in its source.
    ///
    /// Only the first line inherits `origin.column`; every later line starts
    /// at column 0 of its own source line. The last line is left open.
    pub fn write_fragment(&mut self, name: &str, content: &str, origin: Position) -> Result<()> {
        if origin.line == 0 {
            return Err(BundleError::InvalidOrigin { line: origin.line });
        }
        self.write_fragment_from(name, content, origin);
        Ok(())
    }

    /// Where the next character will be written.
    pub fn cursor(&self) -> Position {
        self.output.cursor()
    }

    /// Produce the artifact text.
    ///
    /// Rendering does not change the writer, so calling it again without
    /// intervening writes yields the same text.
    pub fn render(&self) -> Result<String> {
        let comment;
        let mut lines: Vec<&str> = self.output.lines().collect();

        if let MappingState::Enabled(generator) = &self.mapping {
            if lines.last().is_some_and(|line| line.is_empty()) {
                lines.pop();
            }
            comment = source_map_comment(&generator.to_json()?);
            lines.push(&comment);
        }

        Ok(lines.join("\n"))
    }

    fn write(&mut self, text: &str) {
        self.output.write(text);
    }

    fn write_fragment_from(&mut self, name: &str, content: &str, origin: Position) {
        let authored = split_lines(content);

        // Decode against the lines as authored, before the comment is removed
        let upstream = match &mut self.mapping {
            MappingState::Enabled(generator) => {
                if self.sources_content {
                    generator.set_source_content(name, content);
                }
                find_embedded_source_map(name, &authored)
            }
            MappingState::Disabled => None,
        };

        let lines = strip_source_map_comments(&authored);
        let last = lines.len().saturating_sub(1);

        for (i, line) in lines.iter().enumerate() {
            if let MappingState::Enabled(generator) = &mut self.mapping {
                let cursor = self.output.cursor();
                let original = Position::new(
                    origin.line + i,
                    if i == 0 { origin.column } else { 0 },
                );
                let generated = Position::new(cursor.line, if i == 0 { cursor.column } else { 0 });
                generator.add_mapping(Mapping::new(name, original, generated));
            }

            if i == last {
                self.write(line);
            } else {
                self.write_line(line);
            }
        }

        if let (Some(upstream), MappingState::Enabled(generator)) = (&upstream, &mut self.mapping) {
            generator.apply_source_map(upstream, name);
        }

        tracing::debug!(
            fragment = name,
            lines = lines.len(),
            stripped = authored.len() - lines.len(),
            composed = upstream.is_some(),
            "Wrote fragment"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn origins(writer: &BundleWriter) -> Vec<(String, Position, Position)> {
        writer
            .source_map()
            .unwrap()
            .mappings()
            .iter()
            .map(|m| {
                let original = m.original.as_ref().unwrap();
                (original.source.clone(), original.position, m.generated)
            })
            .collect()
    }

    #[test]
    fn test_new_writer_is_empty() {
        let writer = BundleWriter::new("bundle.js", true);
        assert_eq!(writer.cursor(), Position::new(1, 0));
        assert_eq!(writer.file(), "bundle.js");
        assert!(writer.is_source_map_enabled());
        assert_eq!(writer.source_map().unwrap().file(), Some("bundle.js"));
        assert!(writer.source_map().unwrap().mappings().is_empty());
    }

    #[test]
    fn test_raw_writes_are_not_mapped() {
        let mut writer = BundleWriter::new("bundle.js", true);
        writer.write_line("// one");
        writer.write_content("/*\n * two\n */");
        assert_eq!(writer.cursor(), Position::new(5, 0));
        assert!(writer.source_map().unwrap().mappings().is_empty());
    }

    #[test]
    fn test_fragment_lines_are_mapped() {
        let mut writer = BundleWriter::new("bundle.js", true);
        writer.write_line("/* header */");
        writer.write_file_content("a.js", "var a=1;\r\nvar b=2;");

        assert_eq!(
            origins(&writer),
            vec![
                ("a.js".to_string(), Position::new(1, 0), Position::new(2, 0)),
                ("a.js".to_string(), Position::new(2, 0), Position::new(3, 0)),
            ]
        );
        assert_eq!(writer.cursor(), Position::new(4, 0));
    }

    #[test]
    fn test_fragment_continues_open_line() {
        let mut writer = BundleWriter::new("bundle.js", true);
        writer.write_content("prefix(");
        writer.output.write("  ");
        writer.write_file_content("a.js", "x\ny");

        // The first line starts mid-line, later lines at column 0
        assert_eq!(
            origins(&writer),
            vec![
                ("a.js".to_string(), Position::new(1, 0), Position::new(2, 2)),
                ("a.js".to_string(), Position::new(2, 0), Position::new(3, 0)),
            ]
        );
    }

    #[test]
    fn test_write_fragment_inherits_origin_column_once() {
        let mut writer = BundleWriter::new("bundle.js", true);
        writer
            .write_fragment("a.js", "one\ntwo\nthree", Position::new(10, 4))
            .unwrap();

        assert_eq!(
            origins(&writer),
            vec![
                ("a.js".to_string(), Position::new(10, 4), Position::new(1, 0)),
                ("a.js".to_string(), Position::new(11, 0), Position::new(2, 0)),
                ("a.js".to_string(), Position::new(12, 0), Position::new(3, 0)),
            ]
        );
        // The last line is left open
        assert_eq!(writer.cursor(), Position::new(3, 5));
    }

    #[test]
    fn test_write_fragment_rejects_line_zero() {
        let mut writer = BundleWriter::new("bundle.js", true);
        let err = writer
            .write_fragment("a.js", "x", Position::new(0, 0))
            .unwrap_err();
        assert!(matches!(err, BundleError::InvalidOrigin { line: 0 }));
        assert_eq!(writer.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_empty_fragment_writes_one_empty_line() {
        let mut writer = BundleWriter::new("bundle.js", true);
        writer.write_file_content("empty.js", "");
        assert_eq!(
            origins(&writer),
            vec![("empty.js".to_string(), Position::new(1, 0), Position::new(1, 0))]
        );
        assert_eq!(writer.cursor(), Position::new(2, 0));
    }

    #[test]
    fn test_fragment_of_only_a_comment_writes_nothing() {
        let mut writer = BundleWriter::new("bundle.js", true);
        writer.write_file_content("a.js", "//# sourceMappingURL=a.js.map");
        assert!(writer.source_map().unwrap().mappings().is_empty());
        assert_eq!(writer.cursor(), Position::new(2, 0));
    }

    #[test]
    fn test_disabled_writer_records_nothing() {
        let mut writer = BundleWriter::new("bundle.js", false);
        writer.write_file_content("a.js", "var a;\n//# sourceMappingURL=a.js.map");
        assert!(!writer.is_source_map_enabled());
        assert!(writer.source_map().is_none());
        assert_eq!(writer.render().unwrap(), "var a;\n");
    }

    #[test]
    fn test_sources_content() {
        let mut writer = BundleWriter::new("bundle.js", true).with_sources_content(true);
        writer.write_file_content("a.js", "var a;");
        let map = writer.source_map().unwrap().to_source_map();
        assert_eq!(map.get_source_contents(0), Some("var a;"));
    }

    #[test]
    fn test_generated_column_counts_utf16_units() {
        let mut writer = BundleWriter::new("bundle.js", true);
        // The emoji is one char but two UTF-16 units
        writer.output.write("/* 😀 */ ");
        writer
            .write_fragment("a.js", "run()\nstop()", Position::START)
            .unwrap();

        assert_eq!(
            origins(&writer),
            vec![
                ("a.js".to_string(), Position::new(1, 0), Position::new(1, 9)),
                ("a.js".to_string(), Position::new(2, 0), Position::new(2, 0)),
            ]
        );
        assert_eq!(writer.cursor(), Position::new(2, 6));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut writer = BundleWriter::new("bundle.js", true);
        writer.write_file_content("a.js", "var a;");
        let first = writer.render().unwrap();
        let second = writer.render().unwrap();
        assert_eq!(first, second);
        assert_eq!(writer.cursor(), Position::new(2, 0));
    }

    #[test]
    fn test_render_drops_only_one_trailing_empty_line() {
        let mut writer = BundleWriter::new("bundle.js", true);
        writer.write_file_content("a.js", "var a;");
        writer.new_line();

        let rendered = writer.render().unwrap();
        let lines: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "var a;");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with(crate::SOURCE_MAPPING_URL_PREFIX));
    }
}
