//! Output destinations

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use reqlog_export::{synthesize_filename, ExportError, RequestRecord};
use tracing::debug;

/// Where an export is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Stderr,
    File(PathBuf),
    /// Directory; the file name is synthesized from the record
    Directory(PathBuf),
}

impl OutputTarget {
    /// `directory` wins; otherwise `output` is `stdout`, `stderr` or a path
    pub fn from_args(output: &str, directory: Option<PathBuf>) -> Self {
        if let Some(dir) = directory {
            return OutputTarget::Directory(dir);
        }
        match output {
            "stdout" => OutputTarget::Stdout,
            "stderr" => OutputTarget::Stderr,
            path => OutputTarget::File(PathBuf::from(path)),
        }
    }

    /// Open the destination for `record`
    pub fn open(&self, record: &RequestRecord) -> Result<Sink, ExportError> {
        match self {
            OutputTarget::Stdout => Ok(Sink::new("stdout", Box::new(io::stdout().lock()))),
            OutputTarget::Stderr => Ok(Sink::new("stderr", Box::new(io::stderr().lock()))),
            OutputTarget::File(path) => Sink::create(path.clone()),
            OutputTarget::Directory(dir) => {
                let name = synthesize_filename(record);
                // Stored ids are untrusted; the file must land inside `dir`
                if name.contains(['/', '\\']) || name.starts_with('.') {
                    let label = dir.join(&name).display().to_string();
                    return Err(ExportError::io(
                        label,
                        io::Error::new(
                            io::ErrorKind::InvalidInput,
                            format!("unsafe file name {:?}", name),
                        ),
                    ));
                }
                Sink::create(dir.join(name))
            }
        }
    }
}

/// An open destination.
///
/// Files are closed when the sink is dropped, on success and error alike.
pub struct Sink {
    label: String,
    writer: Box<dyn Write>,
}

impl Sink {
    fn new(label: impl Into<String>, writer: Box<dyn Write>) -> Self {
        Self {
            label: label.into(),
            writer,
        }
    }

    fn create(path: PathBuf) -> Result<Self, ExportError> {
        let label = path.display().to_string();
        debug!("Creating output file {}", label);
        let file = File::create(&path).map_err(|e| ExportError::io(label.clone(), e))?;
        Ok(Self::new(label, Box::new(BufWriter::new(file))))
    }

    /// Human-readable destination name
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn writer(&mut self) -> &mut dyn Write {
        self.writer.as_mut()
    }

    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ExportError> {
        self.writer
            .write_all(buf)
            .map_err(|e| ExportError::io(self.label.clone(), e))
    }

    /// Flush buffered output so late write errors are reported
    pub fn finish(mut self) -> Result<String, ExportError> {
        self.writer
            .flush()
            .map_err(|e| ExportError::io(self.label.clone(), e))?;
        Ok(self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_chatcmpl(chatcmpl: &str) -> RequestRecord {
        RequestRecord {
            id: 1,
            chatcmpl_id: Some(chatcmpl.to_string()),
            external_request_id: None,
            moonshot_uid: None,
            request_method: "POST".to_string(),
            request_path: "/v1/chat/completions".to_string(),
            request_query: None,
            request_header: None,
            request_body: None,
            response_status: None,
            response_header: None,
            response_body: None,
            latency_ms: None,
            created_at: chrono::Utc::now(),
            category: None,
            tags: None,
        }
    }

    #[test]
    fn test_directory_rejects_names_with_separators() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::Directory(dir.path().join("cases"));

        for chatcmpl in ["../escape", "a/b", "..\\up", ".hidden"] {
            let err = target.open(&record_with_chatcmpl(chatcmpl)).err().unwrap();
            assert!(matches!(err, ExportError::Io { .. }));
        }
        assert!(!dir.path().join("escape.json").exists());
    }

    #[test]
    fn test_directory_creates_synthesized_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::Directory(dir.path().to_path_buf());

        let sink = target.open(&record_with_chatcmpl("chatcmpl-ok")).unwrap();
        let destination = sink.finish().unwrap();
        assert_eq!(
            PathBuf::from(destination),
            dir.path().join("chatcmpl-ok.json")
        );
    }

    #[test]
    fn test_from_args() {
        assert_eq!(OutputTarget::from_args("stdout", None), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_args("stderr", None), OutputTarget::Stderr);
        assert_eq!(
            OutputTarget::from_args("out/case.json", None),
            OutputTarget::File(PathBuf::from("out/case.json"))
        );
        assert_eq!(
            OutputTarget::from_args("stdout", Some(PathBuf::from("cases"))),
            OutputTarget::Directory(PathBuf::from("cases"))
        );
    }
}
