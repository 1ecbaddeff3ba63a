//! Request entity: one logged API request and its response

use sea_orm::entity::prelude::*;

/// Path of the chat completions endpoint
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Completion id returned to the caller (`chatcmpl-...`)
    pub chatcmpl: Option<String>,

    /// Request id returned by the upstream API
    pub request_id: Option<String>,

    pub moonshot_uid: Option<String>,

    pub request_method: String,

    /// Always starts with the API version segment, e.g. `/v1/`
    pub request_path: String,

    /// Raw query string, without the leading `?`
    pub request_query: Option<String>,

    /// Raw MIME-style header block
    #[sea_orm(column_type = "Text", nullable)]
    pub request_header: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub request_body: Option<String>,

    pub response_status: Option<i32>,

    #[sea_orm(column_type = "Text", nullable)]
    pub response_header: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub response_body: Option<String>,

    pub latency_ms: Option<i64>,

    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Whether `path` is the chat completions endpoint (a trailing `/` is ignored)
pub fn is_chat_path(path: &str) -> bool {
    path.trim_end_matches('/') == CHAT_COMPLETIONS_PATH
}
