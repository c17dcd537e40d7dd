use rp_storage::{AuthorIdentity, IngestReportRequest, SqliteStore, StoreError};
use rusqlite::Connection;
use serde_json::json;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_storage_dir(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic enough for tests")
        .as_nanos();
    path.push(format!(
        "rp-storage-gate-{label}-{}-{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&path).expect("temp storage dir must be creatable");
    path
}

#[test]
fn storage_open_is_fail_closed_on_alien_schema() {
    let dir = temp_storage_dir("alien-schema");
    let db_path = dir.join("reviewpulse.db");

    let conn = Connection::open(db_path).expect("alien db must open");
    conn.execute("CREATE TABLE legacy_webhooks(id TEXT PRIMARY KEY)", [])
        .expect("alien table should be created");
    drop(conn);

    let err = SqliteStore::open(&dir).expect_err("alien storage must be rejected");
    assert_eq!(err.code(), "RESET_REQUIRED");
    assert!(matches!(
        err,
        StoreError::InvalidInput(message) if message.starts_with("RESET_REQUIRED")
    ));
}

#[test]
fn reopening_a_store_preserves_its_data() {
    let dir = temp_storage_dir("reopen");

    {
        let mut store = SqliteStore::open(&dir).expect("fresh storage should open");
        store
            .ingest_report(IngestReportRequest {
                repository: "acme/api".to_string(),
                pr_number: "1".to_string(),
                pr_link: None,
                title: None,
                author: AuthorIdentity {
                    username: "jdoe".to_string(),
                    name: None,
                    avatar_url: None,
                },
                ai_analysis: json!({}),
                created_at_ms: 100,
            })
            .expect("delivery should ingest");
    }

    let store = SqliteStore::open(&dir).expect("existing storage should reopen");
    assert_eq!(store.report_count().expect("count should succeed"), 1);
    assert!(
        store
            .developer_by_username("jdoe")
            .expect("developer lookup should succeed")
            .is_some()
    );
}

#[test]
fn storage_dir_is_reported_back() {
    let dir = temp_storage_dir("dir-echo");
    let store = SqliteStore::open(&dir).expect("fresh storage should open");
    assert_eq!(store.storage_dir(), dir.as_path());
}
