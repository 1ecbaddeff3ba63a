//! Rendering of logged API requests for archival and replay
//!
//! A stored [`RequestRecord`] can be annotated with a [`Category`] and tags,
//! written out as indented JSON, or reconstructed as a `curl` command line.

pub mod annotate;
pub mod curl;
pub mod error;
pub mod filename;
pub mod headers;
pub mod json;
pub mod record;

pub use annotate::Annotation;
pub use curl::{shell_escape, write_curl_command, API_KEY_HEADER_LINE};
pub use error::ExportError;
pub use filename::synthesize_filename;
pub use headers::HeaderBlock;
pub use json::{render_json, JsonOptions};
pub use record::{Category, Ident, RequestRecord};
