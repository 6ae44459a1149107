//! List query and per-query options forwarded to a [`TaskStore`](crate::storage::TaskStore).

use std::time::Duration;

/// Field name holding a document's primary key.
pub const ID_FIELD: &str = "_id";

/// Sort direction for an `order_by` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A projection plus ordering over the task collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Fields to return; `*` selects everything.
    pub select: Vec<String>,
    /// Sort keys applied in order.
    pub order_by: Vec<(String, SortOrder)>,
}

impl ListQuery {
    /// Select every field, unordered.
    pub fn all() -> Self {
        Self {
            select: vec!["*".to_string()],
            order_by: Vec::new(),
        }
    }

    /// The query behind the task list: every field, open tasks first.
    pub fn by_status_desc() -> Self {
        Self::all().order_by("status", SortOrder::Desc)
    }

    /// Append a sort key.
    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order_by.push((field.into(), order));
        self
    }

    /// Returns true if the projection includes every field.
    pub fn selects_all(&self) -> bool {
        self.select.iter().any(|f| f == "*")
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::all()
    }
}

/// Store options sent with a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Fetch the query plan too. Diagnostic only.
    pub include_query_plan: bool,
    /// Abort the query once it runs longer than this.
    pub timeout: Duration,
    /// Keep the store-native record identifier in each result.
    pub result_as_document: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        crate::config::QueryConfig::default().options()
    }
}
