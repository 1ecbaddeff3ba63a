//! Reconstruction of a logged request as a `curl` command line

use std::io::{self, Write};

use crate::headers::HeaderBlock;
use crate::record::RequestRecord;

/// Authorization line emitted in place of any stored credentials
pub const API_KEY_HEADER_LINE: &str = r#"-H "Authorization: Bearer $MOONSHOT_API_KEY""#;

/// Headers never replayed: derived from the body, added at ingestion, or secret
const STRIPPED_HEADERS: &[&str] = &["Content-Length", "X-Unix-Micro", "Authorization"];

const CONTINUATION: &str = " \\\n\t";

/// Escape `s` for use inside a single-quoted shell word
pub fn shell_escape(s: &str) -> String {
    s.replace('\'', r#"'"'"'"#)
}

/// Build the argument lines of the command, first line first
fn command_lines(record: &RequestRecord, base_url: &str) -> Vec<String> {
    let mut lines = vec![
        format!(
            "curl -X '{}' '{}'",
            shell_escape(&record.request_method),
            shell_escape(&record.url(base_url))
        ),
        API_KEY_HEADER_LINE.to_string(),
    ];

    if let Some(mut headers) = record.request_header.as_deref().and_then(HeaderBlock::parse) {
        for name in STRIPPED_HEADERS {
            headers.remove(name);
        }
        for (name, value) in headers.iter() {
            lines.push(format!(
                "-H '{}: {}'",
                shell_escape(name),
                shell_escape(value)
            ));
        }
    }

    if let Some(body) = record.request_body.as_deref() {
        lines.push(format!("-d '{}'", shell_escape(body)));
    }

    lines
}

/// Write a shell command that replays `record` against `base_url`.
///
/// Lines are joined with a backslash-newline-tab continuation and the last
/// one ends with a newline. Output already written stays written if a later
/// write fails.
pub fn write_curl_command<W: Write + ?Sized>(
    w: &mut W,
    record: &RequestRecord,
    base_url: &str,
) -> io::Result<()> {
    let lines = command_lines(record, base_url);
    let last = lines.len() - 1;

    for (i, line) in lines.iter().enumerate() {
        w.write_all(line.as_bytes())?;
        if i < last {
            w.write_all(CONTINUATION.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}
