//! Core library for Todos: the task model, form validation, store
//! adapters and configuration shared by the web server.

pub mod config;
pub mod form;
pub mod manager;
pub mod query;
pub mod status;
pub mod storage;
pub mod task;

pub use config::{Config, ConfigError, ConnectionDescriptor, QueryConfig, ServerConfig, StoreConfig};
pub use form::{FormErrors, TaskForm};
pub use manager::{ManagerError, TaskManager};
pub use query::{ListQuery, QueryOptions, SortOrder};
pub use status::TaskStatus;
pub use storage::{
    open_store, Document, MemoryStore, Mutation, StorageError, StoreLocation, SurrealStore, TaskStore,
};
pub use task::Task;
