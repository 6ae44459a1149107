use std::sync::Arc;

use thiserror::Error;

use crate::query::{ListQuery, QueryOptions};
use crate::status::TaskStatus;
use crate::storage::{Mutation, StorageError, TaskStore};
use crate::task::Task;

/// Errors from task operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Runs the task operations against a store.
///
/// Holds no task state of its own; every call goes to the store.
#[derive(Clone)]
pub struct TaskManager {
    store: Arc<dyn TaskStore>,
    options: QueryOptions,
}

impl TaskManager {
    /// Creates a manager with default query options.
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self::with_options(store, QueryOptions::default())
    }

    /// Creates a manager that passes `options` with every list query.
    pub fn with_options(store: Arc<dyn TaskStore>, options: QueryOptions) -> Self {
        Self { store, options }
    }

    /// Options sent with list queries.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Lists every task, open tasks first.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ManagerError> {
        let documents = self
            .store
            .find(&ListQuery::by_status_desc(), &self.options)
            .await?;

        let tasks = documents
            .into_iter()
            .map(Task::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Creates or replaces the task keyed by `id`. The stored task is always open.
    pub async fn create_task(&self, id: &str, title: &str) -> Result<Task, ManagerError> {
        let task = Task::new(id, title);
        self.store.insert_or_replace(&task).await?;
        tracing::info!(id = %task.id, "Task saved");
        Ok(task)
    }

    /// Flips the status of task `id` based on the status the client displayed.
    ///
    /// `displayed == "Close"` reopens the task; any other value closes it.
    /// The store's current value is not consulted.
    pub async fn toggle_status(&self, id: &str, displayed: &str) -> Result<TaskStatus, ManagerError> {
        let new_status = TaskStatus::toggle_from(displayed);
        let mutation = Mutation::new().set_or_replace("status", new_status.as_str());

        self.store.update(id, &mutation).await?;
        tracing::info!(id = %id, status = %new_status, "Task status changed");
        Ok(new_status)
    }
}
