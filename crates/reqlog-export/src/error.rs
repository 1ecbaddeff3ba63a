//! Export errors

use reqlog_db::{DbErr, LookupError, Selector};
use thiserror::Error;

/// Errors that end an export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no such record: {0}")]
    NotFound(Selector),

    #[error("storage error: {0}")]
    Storage(#[source] DbErr),

    #[error("failed to render record: {0}")]
    Render(#[from] serde_json::Error),

    #[error("failed to write {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn io(target: impl Into<String>, source: std::io::Error) -> Self {
        ExportError::Io {
            target: target.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ExportError::NotFound(_))
    }
}

impl From<LookupError> for ExportError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(selector) => ExportError::NotFound(selector),
            LookupError::Storage(err) => ExportError::Storage(err),
        }
    }
}
