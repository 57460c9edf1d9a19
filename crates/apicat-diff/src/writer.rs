//! Rendering a diff tree through a line/span sink.

use std::io;

use apicat_types::{DiffKind, Token, TokenKind};

use crate::api_diff::ApiDiff;

/// A sink that renders a diff tree.
///
/// Calls are balanced: every `start_line` is closed by `end_line`, every
/// `start_span` by `end_span` inside the same line, and `write` is only
/// called inside a span.
pub trait DiffWriter {
    fn start_line(&mut self, kind: DiffKind) -> io::Result<()>;
    fn end_line(&mut self) -> io::Result<()>;
    fn start_span(&mut self, kind: DiffKind) -> io::Result<()>;
    fn end_span(&mut self) -> io::Result<()>;
    fn write(&mut self, token: &Token) -> io::Result<()>;

    /// Current nesting depth.
    fn indent(&self) -> usize;
    fn set_indent(&mut self, indent: usize);
}

/// Render `diff` depth-first into `writer`.
///
/// Each node's markup becomes one or more lines (a line break token ends the
/// current line and starts another of the same kind). Namespaces and types
/// that hold members wrap their children in `{` / `}` lines; those brackets
/// take the node's kind, except that a changed node's brackets are rendered
/// unchanged.
pub fn write_diff<W>(diff: &ApiDiff<'_>, writer: &mut W) -> io::Result<()>
where
    W: DiffWriter + ?Sized,
{
    writer.start_line(diff.kind())?;
    for entry in &diff.markup_diff() {
        if entry.token.kind == TokenKind::LineBreak {
            writer.end_line()?;
            writer.start_line(diff.kind())?;
            continue;
        }
        writer.start_span(entry.kind)?;
        writer.write(entry.token)?;
        writer.end_span()?;
    }
    writer.end_line()?;

    if diff.api().kind.can_contain_members() {
        let bracket_kind = match diff.kind() {
            DiffKind::Changed => DiffKind::Unchanged,
            other => other,
        };

        write_bracket(writer, bracket_kind, "{")?;
        let indent = writer.indent();
        writer.set_indent(indent + 1);
        for child in diff.children() {
            write_diff(child, writer)?;
        }
        writer.set_indent(indent);
        write_bracket(writer, bracket_kind, "}")?;
    }

    Ok(())
}

fn write_bracket<W>(writer: &mut W, kind: DiffKind, text: &str) -> io::Result<()>
where
    W: DiffWriter + ?Sized,
{
    writer.start_line(kind)?;
    writer.start_span(kind)?;
    writer.write(&Token::punctuation(text))?;
    writer.end_span()?;
    writer.end_line()
}
