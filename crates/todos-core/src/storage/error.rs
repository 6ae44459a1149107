use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Query exceeded timeout of {0} ms")]
    Timeout(u128),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Invalid store path: {0}")]
    InvalidStorePath(String),

    #[error("Invalid field name: {0}")]
    InvalidField(String),
}

impl From<surrealdb::Error> for StorageError {
    fn from(err: surrealdb::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}
