use std::io::{self, Write};

use apicat_diff::DiffWriter;
use apicat_types::{DiffKind, Token};
use colored::{ColoredString, Colorize};

/// A [`DiffWriter`] that colors lines and spans for a terminal.
pub struct ConsoleDiffWriter<W: Write> {
    out: W,
    indent: usize,
    line: DiffKind,
    span: DiffKind,
    segments: Vec<(DiffKind, String)>,
}

impl<W: Write> ConsoleDiffWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            indent: 0,
            line: DiffKind::Unchanged,
            span: DiffKind::Unchanged,
            segments: Vec::new(),
        }
    }
}

fn paint(text: &str, kind: DiffKind) -> ColoredString {
    match kind {
        DiffKind::Added => text.green(),
        DiffKind::Removed => text.red().strikethrough(),
        DiffKind::Changed => text.yellow(),
        DiffKind::Unchanged => text.normal(),
    }
}

impl<W: Write> DiffWriter for ConsoleDiffWriter<W> {
    fn start_line(&mut self, kind: DiffKind) -> io::Result<()> {
        self.line = kind;
        self.segments.clear();
        Ok(())
    }

    fn end_line(&mut self) -> io::Result<()> {
        let marker = self.line.marker().to_string();
        write!(self.out, "{} {}", paint(&marker, self.line), "    ".repeat(self.indent))?;
        for (kind, text) in &self.segments {
            // Added and removed lines are uniformly colored; only changed
            // lines show their token-level differences.
            let kind = if self.line == DiffKind::Changed {
                *kind
            } else {
                self.line
            };
            write!(self.out, "{}", paint(text, kind))?;
        }
        writeln!(self.out)
    }

    fn start_span(&mut self, kind: DiffKind) -> io::Result<()> {
        self.span = kind;
        self.segments.push((kind, String::new()));
        Ok(())
    }

    fn end_span(&mut self) -> io::Result<()> {
        self.span = DiffKind::Unchanged;
        Ok(())
    }

    fn write(&mut self, token: &Token) -> io::Result<()> {
        match self.segments.last_mut() {
            Some((_, text)) => text.push_str(&token.text),
            None => self.segments.push((self.span, token.text.clone())),
        }
        Ok(())
    }

    fn indent(&self) -> usize {
        self.indent
    }

    fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }
}
