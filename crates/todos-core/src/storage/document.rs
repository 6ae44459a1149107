use serde_json::{Map, Value};

use super::error::StorageError;
use super::location::is_identifier;
use crate::query::ID_FIELD;
use crate::task::Task;

/// A schema-less store document.
pub type Document = Map<String, Value>;

/// Converts a task into its persisted document.
pub(crate) fn task_to_document(task: &Task) -> Result<Document, StorageError> {
    match serde_json::to_value(task)? {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::MalformedDocument(other.to_string())),
    }
}

/// Reads a task back from a document.
pub(crate) fn document_to_task(document: Document) -> Result<Task, StorageError> {
    if !document.contains_key(ID_FIELD) {
        return Err(StorageError::MalformedDocument(format!(
            "missing {} in {}",
            ID_FIELD,
            Value::Object(document)
        )));
    }
    Ok(serde_json::from_value(Value::Object(document))?)
}

impl Task {
    /// Converts a store document into a task.
    pub fn from_document(document: Document) -> Result<Task, StorageError> {
        document_to_task(document)
    }
}

/// A partial update: named fields set to new values, others untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mutation {
    changes: Document,
}

impl Mutation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field` to `value`, creating the field if absent.
    pub fn set_or_replace(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.changes.insert(field.into(), value.into());
        self
    }

    /// The fields this mutation writes.
    pub fn changes(&self) -> &Document {
        &self.changes
    }

    /// Rejects writes to the key fields and names that are not plain identifiers.
    pub(crate) fn check_fields(&self) -> Result<(), StorageError> {
        for field in self.changes.keys() {
            if field == ID_FIELD || field == "id" || !is_identifier(field) {
                return Err(StorageError::InvalidField(field.clone()));
            }
        }
        Ok(())
    }
}
