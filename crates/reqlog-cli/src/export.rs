//! The export pipeline: locate, annotate, render, write

use reqlog_db::{RequestLookup, Selector};
use reqlog_export::{
    render_json, write_curl_command, Annotation, ExportError, JsonOptions, RequestRecord,
};
use tracing::{debug, info};

use crate::sink::OutputTarget;

/// How the record is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Json(JsonOptions),
    Curl,
}

/// Everything one export needs
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub selector: Selector,
    pub annotation: Annotation,
    pub mode: RenderMode,
    pub target: OutputTarget,
    pub base_url: String,
}

/// Load the selected record and apply the annotation.
///
/// Annotations only matter for JSON output; curl mode leaves the record as
/// stored.
pub async fn load_record(
    lookup: &dyn RequestLookup,
    options: &ExportOptions,
) -> Result<RequestRecord, ExportError> {
    let model = lookup.get_request(&options.selector).await?;
    let mut record = RequestRecord::from(model);

    if matches!(options.mode, RenderMode::Json(_)) && options.annotation.apply(&mut record) {
        debug!(
            "Annotated {} with category {:?} and tags {:?}",
            options.selector, record.category, record.tags
        );
    }

    Ok(record)
}

/// Run one export, returning the destination that was written.
///
/// JSON is fully rendered before the destination is opened; curl output is
/// streamed.
pub async fn run_export(
    lookup: &dyn RequestLookup,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let record = load_record(lookup, options).await?;

    let sink = match options.mode {
        RenderMode::Json(json_options) => {
            let bytes = render_json(&record, &json_options)?;
            let mut sink = options.target.open(&record)?;
            sink.write_all(&bytes)?;
            sink
        }
        RenderMode::Curl => {
            let mut sink = options.target.open(&record)?;
            write_curl_command(sink.writer(), &record, &options.base_url)
                .map_err(|e| ExportError::io(sink.label().to_string(), e))?;
            sink
        }
    };
    let destination = sink.finish()?;

    info!("Exported {} to {}", options.selector, destination);
    Ok(destination)
}
