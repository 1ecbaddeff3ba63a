//! Record lookup by identifier

use std::fmt;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use thiserror::Error;
use tracing::debug;

use crate::entities::request;

/// Identifies a single stored request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Numeric row id
    Id(i64),
    /// Completion id (`chatcmpl-...`)
    Chatcmpl(String),
    /// External request id returned by the upstream API
    RequestId(String),
}

impl Selector {
    /// Pick one selector out of the supplied ones.
    ///
    /// Precedence is row id, then completion id, then request id. Returns
    /// `None` when nothing was supplied.
    pub fn resolve(
        id: Option<i64>,
        chatcmpl: Option<String>,
        request_id: Option<String>,
    ) -> Option<Self> {
        id.map(Selector::Id)
            .or_else(|| chatcmpl.map(Selector::Chatcmpl))
            .or_else(|| request_id.map(Selector::RequestId))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "id={}", id),
            Selector::Chatcmpl(id) => write!(f, "chatcmpl={}", id),
            Selector::RequestId(id) => write!(f, "requestid={}", id),
        }
    }
}

/// Errors returned by a lookup
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("no such record: {0}")]
    NotFound(Selector),

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

/// Anything that can load a stored request by selector
#[async_trait]
pub trait RequestLookup: Send + Sync {
    async fn get_request(&self, selector: &Selector) -> Result<request::Model, LookupError>;
}

/// Lookup backed by a SeaORM connection
pub struct RequestStore {
    db: DatabaseConnection,
}

impl RequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl RequestLookup for RequestStore {
    async fn get_request(&self, selector: &Selector) -> Result<request::Model, LookupError> {
        debug!("Looking up request {}", selector);

        let query = match selector {
            Selector::Id(id) => request::Entity::find_by_id(*id),
            Selector::Chatcmpl(id) => {
                request::Entity::find().filter(request::Column::Chatcmpl.eq(id.as_str()))
            }
            Selector::RequestId(id) => {
                request::Entity::find().filter(request::Column::RequestId.eq(id.as_str()))
            }
        };

        // Duplicated external ids resolve to the oldest row
        query
            .order_by_asc(request::Column::Id)
            .one(&self.db)
            .await?
            .ok_or_else(|| LookupError::NotFound(selector.clone()))
    }
}
