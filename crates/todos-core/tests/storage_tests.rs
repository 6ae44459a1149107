use std::time::Duration;

use todos_core::{
    ConnectionDescriptor, ListQuery, MemoryStore, Mutation, QueryOptions, StorageError,
    StoreLocation, SurrealStore, Task, TaskStatus, TaskStore,
};

fn quiet_options() -> QueryOptions {
    QueryOptions {
        include_query_plan: false,
        timeout: Duration::from_millis(1000),
        result_as_document: false,
    }
}

async fn create_surreal_store() -> SurrealStore {
    let descriptor: ConnectionDescriptor = "mem://".parse().unwrap();
    let location = StoreLocation::parse("todos", "/apps/todos").unwrap();
    SurrealStore::connect(&descriptor, &location).await.unwrap()
}

async fn statuses(store: &dyn TaskStore, options: &QueryOptions) -> Vec<TaskStatus> {
    store
        .find(&ListQuery::by_status_desc(), options)
        .await
        .unwrap()
        .into_iter()
        .map(|doc| Task::from_document(doc).unwrap().status)
        .collect()
}

async fn check_upsert_and_update(store: &dyn TaskStore) {
    store.insert_or_replace(&Task::new("t1", "Buy milk")).await.unwrap();
    store
        .update("t1", &Mutation::new().set_or_replace("status", "Close"))
        .await
        .unwrap();

    let docs = store.find(&ListQuery::all(), &quiet_options()).await.unwrap();
    assert_eq!(docs.len(), 1);
    let task = Task::from_document(docs[0].clone()).unwrap();
    assert_eq!(task.id, "t1");
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.status, TaskStatus::Close);

    // Replace resets every field.
    store.insert_or_replace(&Task::new("t1", "Buy bread")).await.unwrap();
    let docs = store.find(&ListQuery::all(), &quiet_options()).await.unwrap();
    let task = Task::from_document(docs[0].clone()).unwrap();
    assert_eq!(task.title, "Buy bread");
    assert_eq!(task.status, TaskStatus::Open);
}

async fn check_ordering(store: &dyn TaskStore) {
    for id in ["a", "b", "c"] {
        store.insert_or_replace(&Task::new(id, id)).await.unwrap();
    }
    store
        .update("b", &Mutation::new().set_or_replace("status", "Close"))
        .await
        .unwrap();

    assert_eq!(
        statuses(store, &quiet_options()).await,
        vec![TaskStatus::Open, TaskStatus::Open, TaskStatus::Close]
    );
}

async fn check_update_missing(store: &dyn TaskStore) {
    let err = store
        .update("missing", &Mutation::new().set_or_replace("status", "Close"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::TaskNotFound(id) if id == "missing"));
}

async fn check_record_field(store: &dyn TaskStore) {
    store.insert_or_replace(&Task::new("0", "numeric key")).await.unwrap();

    let options = QueryOptions {
        result_as_document: true,
        ..quiet_options()
    };
    let docs = store.find(&ListQuery::all(), &options).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].get("record").and_then(|v| v.as_str()), Some("todos:0"));
    assert_eq!(docs[0].get("_id").and_then(|v| v.as_str()), Some("0"));
}

#[tokio::test]
async fn test_memory_upsert_and_update() {
    check_upsert_and_update(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_memory_ordering() {
    check_ordering(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_memory_update_missing() {
    check_update_missing(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_surreal_upsert_and_update() {
    check_upsert_and_update(&create_surreal_store().await).await;
}

#[tokio::test]
async fn test_surreal_ordering() {
    check_ordering(&create_surreal_store().await).await;
}

#[tokio::test]
async fn test_surreal_update_missing() {
    check_update_missing(&create_surreal_store().await).await;
}

#[tokio::test]
async fn test_memory_record_field() {
    check_record_field(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_surreal_record_field() {
    check_record_field(&create_surreal_store().await).await;
}

#[tokio::test]
async fn test_surreal_query_plan_does_not_change_results() {
    let store = create_surreal_store().await;
    store.insert_or_replace(&Task::new("t1", "x")).await.unwrap();

    let with_plan = QueryOptions {
        include_query_plan: true,
        ..quiet_options()
    };
    assert_eq!(statuses(&store, &with_plan).await, statuses(&store, &quiet_options()).await);
}

#[tokio::test]
async fn test_surreal_table_created_on_connect() {
    let store = create_surreal_store().await;
    assert_eq!(store.table(), "todos");
    assert!(store.table_exists().await.unwrap());
}

#[tokio::test]
async fn test_open_store_memory() {
    let descriptor: ConnectionDescriptor = "memory".parse().unwrap();
    let location = StoreLocation::parse("todos", "/apps/todos").unwrap();
    let store = todos_core::open_store(&descriptor, &location).await.unwrap();

    store.insert_or_replace(&Task::new("t1", "x")).await.unwrap();
    assert_eq!(store.find(&ListQuery::all(), &quiet_options()).await.unwrap().len(), 1);
}
