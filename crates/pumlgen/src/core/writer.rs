//! Indenting text sink for diagram output
//!
//! Every UML node writes itself through a [`UmlWriter`]. The writer tracks the
//! current indentation depth and returns itself from every call so writes chain:
//!
//! ```rust
//! use pumlgen::core::{RenderConfig, UmlWriter};
//!
//! let config = RenderConfig::default();
//! let mut out = UmlWriter::new(&config);
//! out.append("class Foo").whitespace().append('{').newline();
//! out.indented(|out| {
//!     out.append("+bar()").newline();
//! });
//! out.append('}').newline();
//! assert_eq!(out.as_str(), "class Foo {\n  +bar()\n}\n");
//! ```

use std::fmt;

use super::RenderConfig;

/// Indenting writer threaded through a render pass
#[derive(Debug)]
pub struct UmlWriter<'c> {
    config: &'c RenderConfig,
    buffer: String,
    depth: usize,
    at_line_start: bool,
}

impl<'c> UmlWriter<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        Self {
            config,
            buffer: String::new(),
            depth: 0,
            at_line_start: true,
        }
    }

    /// Configuration of the render pass this writer belongs to
    pub fn config(&self) -> &'c RenderConfig {
        self.config
    }

    /// Current indentation depth in levels
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Append text, indenting it when it starts a line
    ///
    /// Embedded `'\n'` characters are treated as [`newline`](Self::newline) calls.
    pub fn append(&mut self, text: impl fmt::Display) -> &mut Self {
        let text = text.to_string();
        let mut lines = text.split('\n').peekable();
        while let Some(line) = lines.next() {
            self.append_line_fragment(line);
            if lines.peek().is_some() {
                self.newline();
            }
        }
        self
    }

    fn append_line_fragment(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        if self.at_line_start {
            let width = self.depth * self.config.indentation;
            self.buffer.extend(std::iter::repeat(' ').take(width));
            self.at_line_start = false;
        }
        self.buffer.push_str(fragment);
    }

    /// Append a single space unless the line is empty or already ends in whitespace
    pub fn whitespace(&mut self) -> &mut Self {
        if !self.at_line_start && !self.buffer.ends_with(char::is_whitespace) {
            self.buffer.push(' ');
        }
        self
    }

    /// Terminate the current line, dropping trailing spaces
    pub fn newline(&mut self) -> &mut Self {
        while self.buffer.ends_with(' ') && !self.at_line_start {
            self.buffer.pop();
        }
        self.buffer.push('\n');
        self.at_line_start = true;
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn unindent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Run `body` one indentation level deeper
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.indent();
        body(self);
        self.unindent()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl fmt::Write for UmlWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}
