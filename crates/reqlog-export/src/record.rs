//! Exported view of a logged request

use chrono::{DateTime, Utc};
use reqlog_db::entities::request;
use serde::{Deserialize, Serialize};

/// Manual classification of a chat record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "goodcase")]
    GoodCase,
    #[serde(rename = "badcase")]
    BadCase,
}

/// Primary identifier of a record, most meaningful first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ident<'a> {
    Chatcmpl(&'a str),
    RequestId(&'a str),
    Row(i64),
}

/// A logged request as written to export files.
///
/// Field names are part of the archive format and are re-ingested by other
/// tools; do not rename them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: i64,
    #[serde(rename = "chatcmplId")]
    pub chatcmpl_id: Option<String>,
    #[serde(rename = "externalRequestId")]
    pub external_request_id: Option<String>,
    #[serde(rename = "moonshotUID")]
    pub moonshot_uid: Option<String>,
    #[serde(rename = "requestMethod")]
    pub request_method: String,
    #[serde(rename = "requestPath")]
    pub request_path: String,
    #[serde(rename = "requestQuery")]
    pub request_query: Option<String>,
    #[serde(rename = "requestHeader")]
    pub request_header: Option<String>,
    #[serde(rename = "requestBody")]
    pub request_body: Option<String>,
    #[serde(rename = "responseStatus")]
    pub response_status: Option<i32>,
    #[serde(rename = "responseHeader")]
    pub response_header: Option<String>,
    #[serde(rename = "responseBody")]
    pub response_body: Option<String>,
    #[serde(rename = "latencyMs")]
    pub latency_ms: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Set only by annotation, never stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Set only by annotation, never stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl RequestRecord {
    pub fn ident(&self) -> Ident<'_> {
        if let Some(chatcmpl) = self.chatcmpl_id.as_deref() {
            Ident::Chatcmpl(chatcmpl)
        } else if let Some(request_id) = self.external_request_id.as_deref() {
            Ident::RequestId(request_id)
        } else {
            Ident::Row(self.id)
        }
    }

    pub fn is_chat(&self) -> bool {
        request::is_chat_path(&self.request_path)
    }

    /// Full URL of the original call, rooted at `base_url`
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            self.request_path
        );
        if let Some(query) = self.request_query.as_deref().filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}

impl From<request::Model> for RequestRecord {
    fn from(model: request::Model) -> Self {
        Self {
            id: model.id,
            chatcmpl_id: model.chatcmpl,
            external_request_id: model.request_id,
            moonshot_uid: model.moonshot_uid,
            request_method: model.request_method,
            request_path: model.request_path,
            request_query: model.request_query,
            request_header: model.request_header,
            request_body: model.request_body,
            response_status: model.response_status,
            response_header: model.response_header,
            response_body: model.response_body,
            latency_ms: model.latency_ms,
            created_at: model.created_at,
            category: None,
            tags: None,
        }
    }
}
