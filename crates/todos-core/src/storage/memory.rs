use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::document::{task_to_document, Document, Mutation};
use super::error::StorageError;
use super::TaskStore;
use crate::config::DEFAULT_STORE_PATH;
use crate::query::{ListQuery, QueryOptions, SortOrder, ID_FIELD};
use crate::task::Task;

/// In-process document store.
///
/// Documents are kept in key order; nothing survives the process.
pub struct MemoryStore {
    table: String,
    docs: RwLock<BTreeMap<String, Document>>,
}

impl MemoryStore {
    /// Creates an empty store named after the default collection.
    pub fn new() -> Self {
        let table = DEFAULT_STORE_PATH.rsplit('/').next().unwrap_or("todos");
        Self::with_table(table)
    }

    /// Creates an empty store for the given collection name.
    pub fn with_table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            docs: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns a copy of the document with key `id`.
    pub async fn get(&self, id: &str) -> Option<Document> {
        self.docs.read().await.get(id).cloned()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn project(&self, doc: &Document, query: &ListQuery, options: &QueryOptions) -> Document {
        let mut out = if query.selects_all() {
            doc.clone()
        } else {
            query
                .select
                .iter()
                .filter_map(|field| doc.get(field).map(|v| (field.clone(), v.clone())))
                .collect()
        };

        if options.result_as_document {
            if let Some(Value::String(id)) = doc.get(ID_FIELD) {
                out.insert("record".to_string(), Value::String(format!("{}:{}", self.table, id)));
            }
        }
        out
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_or_replace(&self, task: &Task) -> Result<(), StorageError> {
        let document = task_to_document(task)?;
        self.docs.write().await.insert(task.id.clone(), document);
        Ok(())
    }

    /// `options.timeout` bounds only the wait for the read lock; the
    /// in-memory scan and sort themselves are not interrupted.
    async fn find(
        &self,
        query: &ListQuery,
        options: &QueryOptions,
    ) -> Result<Vec<Document>, StorageError> {
        let docs = tokio::time::timeout(options.timeout, self.docs.read())
            .await
            .map_err(|_| StorageError::Timeout(options.timeout.as_millis()))?;

        if options.include_query_plan {
            tracing::debug!(table = %self.table, order_by = ?query.order_by, "query plan: full scan, in-memory sort");
        }

        let mut matched: Vec<&Document> = docs.values().collect();
        matched.sort_by(|a, b| {
            for (field, order) in &query.order_by {
                let ord = compare_values(a.get(field), b.get(field));
                let ord = match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });

        Ok(matched
            .into_iter()
            .map(|doc| self.project(doc, query, options))
            .collect())
    }

    async fn update(&self, id: &str, mutation: &Mutation) -> Result<(), StorageError> {
        mutation.check_fields()?;

        let mut docs = self.docs.write().await;
        let doc = docs
            .get_mut(id)
            .ok_or_else(|| StorageError::TaskNotFound(id.to_string()))?;

        for (field, value) in mutation.changes() {
            doc.insert(field.clone(), value.clone());
        }
        Ok(())
    }
}

/// Total order over JSON values: missing < null < bool < number < string < array < object.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(Value::Array(_)) => 5,
            Some(Value::Object(_)) => 6,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) if rank(a) == rank(b) => x.to_string().cmp(&y.to_string()),
        _ => rank(a).cmp(&rank(b)),
    }
}
