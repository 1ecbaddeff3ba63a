//! Parsing of stored MIME-style header blocks

use tracing::warn;

/// Header fields grouped by canonical name.
///
/// Names keep the order in which they first appeared; values keep their
/// order within a name. Callers must not rely on any ordering across names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    fields: Vec<(String, Vec<String>)>,
}

impl HeaderBlock {
    /// Parse a raw header block.
    ///
    /// Folded continuation lines are joined onto the previous value and a
    /// blank line is appended before parsing so unterminated blocks are
    /// accepted. Returns `None` when the block is malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        let lines = unfold(raw);
        let mut buf = Vec::with_capacity(raw.len() + 4);
        for line in &lines {
            buf.extend_from_slice(line.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }
        buf.extend_from_slice(b"\r\n\r\n");

        // One slot per line, so no valid block can overflow
        let mut headers = vec![httparse::EMPTY_HEADER; lines.len() + 1];
        match httparse::parse_headers(&buf, &mut headers[..]) {
            Ok(httparse::Status::Complete((_, parsed))) => {
                let mut block = HeaderBlock::default();
                for header in parsed {
                    let value = String::from_utf8_lossy(header.value);
                    block.append(header.name, value.trim());
                }
                Some(block)
            }
            Ok(httparse::Status::Partial) => {
                warn!("Stored header block is incomplete, ignoring it");
                None
            }
            Err(e) => {
                warn!("Stored header block is malformed, ignoring it: {:?}", e);
                None
            }
        }
    }

    /// Add a value, canonicalizing the name
    pub fn append(&mut self, name: &str, value: &str) {
        let name = canonical_name(name);
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value.to_string()),
            None => self.fields.push((name, vec![value.to_string()])),
        }
    }

    /// Remove every value of `name` (case-insensitive)
    pub fn remove(&mut self, name: &str) {
        self.fields.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every (name, value) pair, one per value
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().flat_map(|(name, values)| {
            values
                .iter()
                .map(move |value| (name.as_str(), value.as_str()))
        })
    }
}

/// Split `raw` into header lines, joining folded continuation lines (those
/// starting with a space or tab) onto the previous line with a single space.
///
/// Stops at the first blank line, which ends a header block.
fn unfold(raw: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in raw.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            break;
        }
        match lines.last_mut() {
            Some(prev) if line.starts_with([' ', '\t']) => {
                let trimmed = prev.trim_end().len();
                prev.truncate(trimmed);
                prev.push(' ');
                prev.push_str(line.trim_start());
            }
            _ => lines.push(line.to_string()),
        }
    }
    lines
}

/// Canonical MIME header name: first letter and every letter after a hyphen
/// upper-cased, the rest lower-cased (`content-type` -> `Content-Type`).
///
/// Names containing characters other than ASCII letters, digits and hyphens
/// are returned unchanged.
pub fn canonical_name(name: &str) -> String {
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    {
        return name.to_string();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}
