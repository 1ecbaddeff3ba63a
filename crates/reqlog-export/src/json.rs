//! Indented JSON rendering

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::record::RequestRecord;

const INDENT: &[u8] = b"    ";

/// JSON rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// Escape `<`, `>` and `&` inside strings as `\u003c`, `\u003e`, `\u0026`
    pub escape_html: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self { escape_html: true }
    }
}

/// Render `record` as a 4-space indented JSON document ending in a newline
pub fn render_json(record: &RequestRecord, options: &JsonOptions) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(1024);
    {
        let formatter = ExportFormatter::new(options.escape_html);
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        record.serialize(&mut serializer)?;
    }
    out.push(b'\n');
    Ok(out)
}

/// Pretty formatter that can additionally escape HTML-sensitive characters.
///
/// U+2028 and U+2029 are always escaped so the output is safe to embed in
/// JavaScript.
struct ExportFormatter<'a> {
    pretty: PrettyFormatter<'a>,
    escape_html: bool,
}

impl<'a> ExportFormatter<'a> {
    fn new(escape_html: bool) -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(INDENT),
            escape_html,
        }
    }

    fn escape_for(&self, c: char) -> Option<&'static [u8]> {
        match c {
            '<' if self.escape_html => Some(b"\\u003c"),
            '>' if self.escape_html => Some(b"\\u003e"),
            '&' if self.escape_html => Some(b"\\u0026"),
            '\u{2028}' => Some(b"\\u2028"),
            '\u{2029}' => Some(b"\\u2029"),
            _ => None,
        }
    }
}

impl<'a> Formatter for ExportFormatter<'a> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if let Some(escaped) = self.escape_for(c) {
                writer.write_all(&fragment.as_bytes()[start..i])?;
                writer.write_all(escaped)?;
                start = i + c.len_utf8();
            }
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}
