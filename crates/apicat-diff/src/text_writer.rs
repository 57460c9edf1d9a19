//! Plain-text rendering of diff trees.
//!
//! Each line starts with the line's marker (`+`, `-`, `~`, or a space) and
//! four spaces per indent level. Inside a line, spans whose kind differs
//! from the line's are delimited word-diff style: `[-removed-]` and
//! `{+added+}`.

use std::io::{self, Write};

use apicat_types::{DiffKind, Token};

use crate::writer::DiffWriter;

const INDENT: &str = "    ";

/// A [`DiffWriter`] producing plain text.
#[derive(Debug)]
pub struct TextDiffWriter<W: Write> {
    out: W,
    indent: usize,
    line: Option<DiffKind>,
    span: Option<DiffKind>,
    buffer: String,
}

impl<W: Write> TextDiffWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            indent: 0,
            line: None,
            span: None,
            buffer: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn marked_span(&self) -> Option<DiffKind> {
        match (self.line, self.span) {
            (Some(line), Some(span)) if line != span && span != DiffKind::Unchanged => Some(span),
            _ => None,
        }
    }
}

impl<W: Write> DiffWriter for TextDiffWriter<W> {
    fn start_line(&mut self, kind: DiffKind) -> io::Result<()> {
        self.line = Some(kind);
        self.buffer.clear();
        self.buffer.push(kind.marker());
        self.buffer.push(' ');
        for _ in 0..self.indent {
            self.buffer.push_str(INDENT);
        }
        Ok(())
    }

    fn end_line(&mut self) -> io::Result<()> {
        self.line = None;
        writeln!(self.out, "{}", self.buffer.trim_end())
    }

    fn start_span(&mut self, kind: DiffKind) -> io::Result<()> {
        self.span = Some(kind);
        match self.marked_span() {
            Some(DiffKind::Added) => self.buffer.push_str("{+"),
            Some(DiffKind::Removed) => self.buffer.push_str("[-"),
            _ => {}
        }
        Ok(())
    }

    fn end_span(&mut self) -> io::Result<()> {
        match self.marked_span() {
            Some(DiffKind::Added) => self.buffer.push_str("+}"),
            Some(DiffKind::Removed) => self.buffer.push_str("-]"),
            _ => {}
        }
        self.span = None;
        Ok(())
    }

    fn write(&mut self, token: &Token) -> io::Result<()> {
        self.buffer.push_str(&token.text);
        Ok(())
    }

    fn indent(&self) -> usize {
        self.indent
    }

    fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }
}
