use rp_storage::{AuthorIdentity, IngestReportRequest, SqliteStore};
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
        "rp-storage-identity-{label}-{}-{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&path).expect("temp storage dir must be creatable");
    path
}

fn delivery(author: AuthorIdentity, pr_number: &str, at: i64) -> IngestReportRequest {
    IngestReportRequest {
        repository: "acme/api".to_string(),
        pr_number: pr_number.to_string(),
        pr_link: None,
        title: None,
        author,
        ai_analysis: json!({}),
        created_at_ms: at,
    }
}

fn author(username: &str, name: Option<&str>, avatar_url: Option<&str>) -> AuthorIdentity {
    AuthorIdentity {
        username: username.to_string(),
        name: name.map(str::to_string),
        avatar_url: avatar_url.map(str::to_string),
    }
}

#[test]
fn same_username_resolves_to_one_developer() {
    let dir = temp_storage_dir("idempotent");
    let mut store = SqliteStore::open(&dir).expect("fresh storage should open");

    let first = store
        .ingest_report(delivery(author("jdoe", Some("Jane Doe"), None), "1", 100))
        .expect("first delivery should ingest");
    let second = store
        .ingest_report(delivery(author("jdoe", Some("Jane Doe"), None), "2", 200))
        .expect("second delivery should ingest");

    assert_eq!(first.developer_id, second.developer_id);
    assert_eq!(store.developer_count().expect("count should succeed"), 1);
}

#[test]
fn changed_name_refreshes_profile_and_keeps_identity() {
    let dir = temp_storage_dir("name-refresh");
    let mut store = SqliteStore::open(&dir).expect("fresh storage should open");

    let first = store
        .ingest_report(delivery(author("jdoe", Some("Jane Doe"), None), "1", 100))
        .expect("first delivery should ingest");
    let second = store
        .ingest_report(delivery(author("jdoe", Some("Jane A. Doe"), None), "2", 200))
        .expect("second delivery should ingest");

    assert_eq!(first.developer_id, second.developer_id);

    let developer = store
        .developer_by_username("jdoe")
        .expect("developer lookup should succeed")
        .expect("developer must exist");
    assert_eq!(developer.id, first.developer_id);
    assert_eq!(developer.username, "jdoe");
    assert_eq!(developer.name.as_deref(), Some("Jane A. Doe"));
}

#[test]
fn absent_profile_fields_do_not_erase_stored_values() {
    let dir = temp_storage_dir("no-erase");
    let mut store = SqliteStore::open(&dir).expect("fresh storage should open");

    store
        .ingest_report(delivery(
            author("jdoe", Some("Jane Doe"), Some("https://example.com/a.png")),
            "1",
            100,
        ))
        .expect("first delivery should ingest");
    store
        .ingest_report(delivery(author("jdoe", None, None), "2", 200))
        .expect("second delivery should ingest");

    let developer = store
        .developer_by_username("jdoe")
        .expect("developer lookup should succeed")
        .expect("developer must exist");
    assert_eq!(developer.name.as_deref(), Some("Jane Doe"));
    assert_eq!(
        developer.avatar_url.as_deref(),
        Some("https://example.com/a.png")
    );
}

#[test]
fn changed_avatar_refreshes_profile() {
    let dir = temp_storage_dir("avatar-refresh");
    let mut store = SqliteStore::open(&dir).expect("fresh storage should open");

    store
        .ingest_report(delivery(
            author("jdoe", Some("Jane Doe"), Some("https://example.com/old.png")),
            "1",
            100,
        ))
        .expect("first delivery should ingest");
    store
        .ingest_report(delivery(
            author("jdoe", Some("Jane Doe"), Some("https://example.com/new.png")),
            "2",
            200,
        ))
        .expect("second delivery should ingest");

    let developer = store
        .developer_by_username("jdoe")
        .expect("developer lookup should succeed")
        .expect("developer must exist");
    assert_eq!(
        developer.avatar_url.as_deref(),
        Some("https://example.com/new.png")
    );
}

#[test]
fn distinct_usernames_create_distinct_developers() {
    let dir = temp_storage_dir("distinct");
    let mut store = SqliteStore::open(&dir).expect("fresh storage should open");

    let jane = store
        .ingest_report(delivery(author("jdoe", Some("Jane Doe"), None), "1", 100))
        .expect("delivery should ingest");
    let bob = store
        .ingest_report(delivery(author("bsmith", Some("Bob Smith"), None), "2", 200))
        .expect("delivery should ingest");

    assert_ne!(jane.developer_id, bob.developer_id);
    assert_eq!(store.developer_count().expect("count should succeed"), 2);
}
