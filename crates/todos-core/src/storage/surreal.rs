//! SurrealDB-backed task store.
//!
//! Each task is a record `<table>:<_id>` whose body holds `title` and
//! `status`. The key is exposed back to the application as `_id`.

use async_trait::async_trait;
use serde_json::Value;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;

use super::document::{task_to_document, Document, Mutation};
use super::error::StorageError;
use super::location::{is_identifier, StoreLocation};
use super::TaskStore;
use crate::config::ConnectionDescriptor;
use crate::query::{ListQuery, QueryOptions, ID_FIELD};
use crate::task::Task;

/// Task store backed by a SurrealDB connection.
pub struct SurrealStore {
    db: Surreal<Any>,
    table: String,
}

impl SurrealStore {
    /// Connect, select namespace and database, and make sure the table exists.
    pub async fn connect(
        descriptor: &ConnectionDescriptor,
        location: &StoreLocation,
    ) -> Result<Self, StorageError> {
        let url = descriptor.engine_url().ok_or_else(|| {
            StorageError::Database("descriptor does not name a SurrealDB endpoint".to_string())
        })?;

        tracing::info!(endpoint = %url, "Connecting to document store");
        let db = any::connect(url).await?;

        if let Some((username, password)) = descriptor.credentials() {
            db.signin(Root { username, password }).await?;
        }

        db.use_ns(location.namespace.clone())
            .use_db(location.database.clone())
            .await?;

        let store = Self {
            db,
            table: location.table.clone(),
        };
        store.ensure_table().await?;

        Ok(store)
    }

    /// Name of the task table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns true if the task table is defined in the current database.
    pub async fn table_exists(&self) -> Result<bool, StorageError> {
        let mut response = self.db.query("INFO FOR DB").await?;
        let info: Option<Value> = match response.take(0) {
            Ok(info) => info,
            Err(e) => {
                // A database that was never written to has nothing to report.
                tracing::debug!(error = %e, "INFO FOR DB failed");
                None
            }
        };

        Ok(info
            .as_ref()
            .and_then(|info| info.get("tables"))
            .and_then(|tables| tables.get(&self.table))
            .is_some())
    }

    async fn ensure_table(&self) -> Result<(), StorageError> {
        if self.table_exists().await? {
            tracing::info!(table = %self.table, "Table exists");
            return Ok(());
        }

        // Identifier was validated when the store path was parsed.
        self.db
            .query(format!("DEFINE TABLE IF NOT EXISTS {} SCHEMALESS", self.table))
            .await?
            .check()?;
        tracing::info!(table = %self.table, "Table created");
        Ok(())
    }

    /// Render a list query as SurrealQL.
    fn select_statement(query: &ListQuery, options: &QueryOptions) -> Result<String, StorageError> {
        let mut fields = Vec::new();
        if query.selects_all() {
            fields.push("*".to_string());
            fields.push(format!("meta::id(id) AS {}", ID_FIELD));
        } else {
            for field in &query.select {
                if field == ID_FIELD {
                    fields.push(format!("meta::id(id) AS {}", ID_FIELD));
                } else {
                    fields.push(checked_field(field)?.to_string());
                }
            }
        }
        if options.result_as_document {
            fields.push("string::concat(meta::tb(id), ':', meta::id(id)) AS record".to_string());
        }

        let mut sql = format!("SELECT {}", fields.join(", "));
        if query.selects_all() {
            sql.push_str(" OMIT id");
        }
        sql.push_str(" FROM type::table($table)");

        if !query.order_by.is_empty() {
            let keys = query
                .order_by
                .iter()
                .map(|(field, order)| Ok(format!("{} {}", checked_field(field)?, order.as_keyword())))
                .collect::<Result<Vec<_>, StorageError>>()?;
            sql.push_str(" ORDER BY ");
            sql.push_str(&keys.join(", "));
        }

        let millis = options.timeout.as_millis();
        if millis > 0 {
            sql.push_str(&format!(" TIMEOUT {}ms", millis));
        }

        Ok(sql)
    }

    async fn query_plan(&self, sql: &str) -> Result<Vec<Value>, StorageError> {
        let mut response = self
            .db
            .query(format!("{} EXPLAIN", sql))
            .bind(("table", self.table.clone()))
            .await?;
        Ok(response.take(0)?)
    }

    async fn log_query_plan(&self, sql: &str) {
        match self.query_plan(sql).await {
            Ok(plan) => {
                let plan = Value::Array(plan);
                tracing::debug!(plan = %plan, "query plan");
            }
            Err(e) => tracing::warn!(error = %e, "Could not fetch query plan"),
        }
    }
}

#[async_trait]
impl TaskStore for SurrealStore {
    async fn insert_or_replace(&self, task: &Task) -> Result<(), StorageError> {
        let mut body = task_to_document(task)?;
        body.remove(ID_FIELD);

        self.db
            .query("UPSERT type::thing($table, $id) CONTENT $body")
            .bind(("table", self.table.clone()))
            .bind(("id", task.id.clone()))
            .bind(("body", Value::Object(body)))
            .await?
            .check()?;

        tracing::debug!(id = %task.id, "Task upserted");
        Ok(())
    }

    async fn find(
        &self,
        query: &ListQuery,
        options: &QueryOptions,
    ) -> Result<Vec<Document>, StorageError> {
        let sql = Self::select_statement(query, options)?;

        if options.include_query_plan {
            self.log_query_plan(&sql).await;
        }

        let mut response = self
            .db
            .query(sql)
            .bind(("table", self.table.clone()))
            .await?;
        let rows: Vec<Value> = response.take(0)?;

        rows.into_iter()
            .map(|row| match row {
                Value::Object(document) => Ok(document),
                other => Err(StorageError::MalformedDocument(other.to_string())),
            })
            .collect()
    }

    async fn update(&self, id: &str, mutation: &Mutation) -> Result<(), StorageError> {
        mutation.check_fields()?;

        let mut response = self
            .db
            .query("UPDATE type::thing($table, $id) MERGE $changes RETURN VALUE meta::id(id)")
            .bind(("table", self.table.clone()))
            .bind(("id", id.to_string()))
            .bind(("changes", Value::Object(mutation.changes().clone())))
            .await?;
        let updated: Vec<String> = response.take(0)?;

        if updated.is_empty() {
            return Err(StorageError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }
}

fn checked_field(field: &str) -> Result<&str, StorageError> {
    if field == "id" || !is_identifier(field) {
        return Err(StorageError::InvalidField(field.to_string()));
    }
    Ok(field)
}
