//! Archive file names for exported records

use crate::record::{Ident, RequestRecord};

/// API version segment stripped from synthesized names
const API_PREFIX: &str = "/v1/";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Deterministic file name for `record`.
///
/// Symbolic identifiers win: `<chatcmpl>.json`, then
/// `requestid-<id>.json`. Otherwise the name is built from the method, the
/// path without its API version, the caller UID if known, and the creation
/// time in UTC: `post-chat-completions-<uid>-20240309143005.json`.
pub fn synthesize_filename(record: &RequestRecord) -> String {
    match record.ident() {
        Ident::Chatcmpl(chatcmpl) => format!("{}.json", chatcmpl),
        Ident::RequestId(request_id) => format!("requestid-{}.json", request_id),
        Ident::Row(_) => {
            let path = record
                .request_path
                .strip_prefix(API_PREFIX)
                .unwrap_or(&record.request_path)
                .replace('/', "-");

            let mut name = format!("{}-{}", record.request_method.to_lowercase(), path);
            if let Some(uid) = record.moonshot_uid.as_deref() {
                name.push('-');
                name.push_str(uid);
            }
            name.push('-');
            name.push_str(&record.created_at.format(TIMESTAMP_FORMAT).to_string());
            name.push_str(".json");
            name
        }
    }
}
