//! In-memory classification of chat records

use tracing::debug;

use crate::record::{Category, RequestRecord};

/// Category and tags to attach before export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub category: Option<Category>,
    pub tags: Vec<String>,
}

impl Annotation {
    pub fn new(category: Option<Category>, tags: Vec<String>) -> Self {
        Self { category, tags }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.tags.is_empty()
    }

    /// Apply to `record`, returning whether anything changed.
    ///
    /// Only chat records carry categories and tags; for anything else this is
    /// a no-op. A category replaces the previous one and a non-empty tag list
    /// replaces the previous list.
    pub fn apply(&self, record: &mut RequestRecord) -> bool {
        if self.is_empty() {
            return false;
        }
        if !record.is_chat() {
            debug!(
                "Ignoring annotation for non-chat request {} {}",
                record.request_method, record.request_path
            );
            return false;
        }

        if let Some(category) = self.category {
            record.category = Some(category);
        }
        if !self.tags.is_empty() {
            record.tags = Some(self.tags.clone());
        }
        true
    }
}
