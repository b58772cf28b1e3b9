/*
 * buffer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Line-oriented output buffer with a derived cursor.

use std::mem;

use bundlemap_source_map::Position;

use crate::lines::{column_width, split_lines};

/// The artifact under construction, one element per output line.
///
/// Completed lines are stored separately from the open last line, which is
/// the only one that still grows. No element ever contains a line break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    closed: Vec<String>,
    open: String,
}

impl OutputBuffer {
    /// An empty buffer: a single, empty, open line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text that may contain line breaks.
    ///
    /// The first logical line continues the open line; every following one
    /// starts a new line, and the last of them stays open.
    pub fn write(&mut self, text: &str) {
        let mut lines = split_lines(text).into_iter();
        if let Some(first) = lines.next() {
            self.open.push_str(first);
        }
        for line in lines {
            self.push_line();
            self.open.push_str(line);
        }
    }

    /// Close the open line and start an empty one.
    pub fn push_line(&mut self) {
        self.closed.push(mem::take(&mut self.open));
    }

    /// Where the next character will land: 1-based line, 0-based column.
    pub fn cursor(&self) -> Position {
        Position::new(self.closed.len() + 1, column_width(&self.open))
    }

    /// Number of lines, counting the open one.
    pub fn line_count(&self) -> usize {
        self.closed.len() + 1
    }

    /// All lines in order, the open line last.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.closed
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.open.as_str()))
    }

    /// An owned copy of every line, the open line last. Never empty.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines().map(str::to_string).collect()
    }
}
