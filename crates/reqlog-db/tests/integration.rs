//! Integration tests for reqlog-db
//!
//! Tests lookups against a real SQLite in-memory database

use chrono::{TimeZone, Utc};
use reqlog_db::{
    connect, entities::request, migrate, LookupError, RequestLookup, RequestStore, Selector,
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, NotSet, Set};

/// Helper to create a migrated test database
async fn setup_test_store() -> RequestStore {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    migrate(&db).await.expect("Failed to run migrations");

    RequestStore::new(db)
}

fn new_request(chatcmpl: Option<&str>, request_id: Option<&str>) -> request::ActiveModel {
    request::ActiveModel {
        id: NotSet,
        chatcmpl: Set(chatcmpl.map(str::to_string)),
        request_id: Set(request_id.map(str::to_string)),
        moonshot_uid: Set(Some("uid-1".to_string())),
        request_method: Set("POST".to_string()),
        request_path: Set("/v1/chat/completions".to_string()),
        request_query: Set(None),
        request_header: Set(Some("Content-Type: application/json".to_string())),
        request_body: Set(Some(r#"{"model":"moonshot-v1-8k"}"#.to_string())),
        response_status: Set(Some(200)),
        response_header: Set(None),
        response_body: Set(Some(r#"{"id":"chatcmpl-1"}"#.to_string())),
        latency_ms: Set(Some(812)),
        created_at: Set(Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap()),
    }
}

#[tokio::test]
async fn test_database_connection() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let backend = db.get_database_backend();
    assert!(matches!(backend, sea_orm::DatabaseBackend::Sqlite));
}

#[tokio::test]
async fn test_migrations_run_successfully() {
    let db = connect("sqlite::memory:").await.expect("Failed to connect");

    let result = migrate(&db).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_get_request_by_id() {
    let store = setup_test_store().await;

    let inserted = new_request(None, None)
        .insert(store.connection())
        .await
        .expect("Failed to insert");

    let found = store
        .get_request(&Selector::Id(inserted.id))
        .await
        .expect("Request not found");

    assert_eq!(found.id, inserted.id);
    assert_eq!(found.created_at, inserted.created_at);
    assert_eq!(found.request_method, "POST");
    assert_eq!(found.latency_ms, Some(812));
}

#[tokio::test]
async fn test_get_request_by_chatcmpl() {
    let store = setup_test_store().await;

    new_request(None, Some("req-other"))
        .insert(store.connection())
        .await
        .expect("Failed to insert");
    let inserted = new_request(Some("chatcmpl-abc"), None)
        .insert(store.connection())
        .await
        .expect("Failed to insert");

    let found = store
        .get_request(&Selector::Chatcmpl("chatcmpl-abc".to_string()))
        .await
        .expect("Request not found");

    assert_eq!(found.id, inserted.id);
    assert_eq!(found.chatcmpl.as_deref(), Some("chatcmpl-abc"));
}

#[tokio::test]
async fn test_get_request_by_request_id() {
    let store = setup_test_store().await;

    let inserted = new_request(None, Some("req-123"))
        .insert(store.connection())
        .await
        .expect("Failed to insert");

    let found = store
        .get_request(&Selector::RequestId("req-123".to_string()))
        .await
        .expect("Request not found");

    assert_eq!(found.id, inserted.id);
}

#[tokio::test]
async fn test_duplicate_request_id_returns_oldest_row() {
    let store = setup_test_store().await;

    let first = new_request(None, Some("req-dup"))
        .insert(store.connection())
        .await
        .expect("Failed to insert");
    new_request(None, Some("req-dup"))
        .insert(store.connection())
        .await
        .expect("Failed to insert");

    let found = store
        .get_request(&Selector::RequestId("req-dup".to_string()))
        .await
        .expect("Request not found");

    assert_eq!(found.id, first.id);
}

#[tokio::test]
async fn test_missing_id_is_not_found() {
    let store = setup_test_store().await;

    let err = store
        .get_request(&Selector::Id(9999))
        .await
        .expect_err("Lookup should fail");

    match err {
        LookupError::NotFound(selector) => assert_eq!(selector, Selector::Id(9999)),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_storage_fault_is_distinct_from_not_found() {
    // No migrations: the table does not exist
    let db = connect("sqlite::memory:").await.expect("Failed to connect");
    let store = RequestStore::new(db);

    let err = store
        .get_request(&Selector::Id(1))
        .await
        .expect_err("Lookup should fail");

    assert!(matches!(err, LookupError::Storage(_)));
}

#[tokio::test]
async fn test_null_columns_round_trip_as_none() {
    let store = setup_test_store().await;

    let mut model = new_request(None, None);
    model.request_header = Set(None);
    model.request_body = Set(None);
    model.moonshot_uid = Set(None);
    let inserted = model
        .insert(store.connection())
        .await
        .expect("Failed to insert");

    let found = store
        .get_request(&Selector::Id(inserted.id))
        .await
        .expect("Request not found");

    assert!(found.request_header.is_none());
    assert!(found.request_body.is_none());
    assert!(found.moonshot_uid.is_none());
}

#[test]
fn test_is_chat_path_tolerates_trailing_slash() {
    assert!(request::is_chat_path("/v1/chat/completions"));
    assert!(request::is_chat_path("/v1/chat/completions/"));
    assert!(!request::is_chat_path("/v1/files"));
}
