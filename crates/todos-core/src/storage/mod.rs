//! Document-store access for tasks.
//!
//! [`TaskStore`] is the seam between the application and the store
//! client. Two backends implement it:
//! - [`SurrealStore`] - SurrealDB, local (`mem://`, `rocksdb://`) or remote
//! - [`MemoryStore`] - in-process map, for tests and throwaway runs
//!
//! Backends deal in schema-less [`Document`]s; conversion to and from
//! [`Task`] happens here and nowhere else.

mod document;
mod error;
mod location;
mod memory;
mod surreal;

pub use document::{Document, Mutation};
pub use error::StorageError;
pub use location::StoreLocation;
pub use memory::MemoryStore;
pub use surreal::SurrealStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ConnectionDescriptor;
use crate::query::{ListQuery, QueryOptions};
use crate::task::Task;

/// Trait for task storage backends.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Writes the document for `task`, replacing any document with the same key.
    async fn insert_or_replace(&self, task: &Task) -> Result<(), StorageError>;

    /// Returns the documents matching `query`.
    async fn find(
        &self,
        query: &ListQuery,
        options: &QueryOptions,
    ) -> Result<Vec<Document>, StorageError>;

    /// Applies a field-level mutation to the document with key `id`.
    ///
    /// Fails with [`StorageError::TaskNotFound`] when no such document exists.
    async fn update(&self, id: &str, mutation: &Mutation) -> Result<(), StorageError>;
}

/// Opens the store named by `descriptor` at `location`.
///
/// Creates the collection if it does not exist yet.
pub async fn open_store(
    descriptor: &ConnectionDescriptor,
    location: &StoreLocation,
) -> Result<Arc<dyn TaskStore>, StorageError> {
    if descriptor.is_memory() {
        tracing::info!(table = %location.table, "Using in-memory task store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = SurrealStore::connect(descriptor, location).await?;
    Ok(Arc::new(store))
}
