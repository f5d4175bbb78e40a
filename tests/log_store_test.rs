//! Integration tests for log stores and the best-effort logging boundary

use async_trait::async_trait;
use mockito::Matcher;
use std::sync::{Arc, Mutex};
use storylog::adapters::{JsonlLogStore, LogStore, MemoryLogStore, SupabaseLogStore};
use storylog::anonymization::{LeakPolicy, OutboundRecord};
use storylog::config::{secret_string, SupabaseConfig};
use storylog::core::logger::{LogFailure, LogFailureKind, LogRequest, StoryLogger};
use storylog::domain::{
    ChildProfile, GeneratedStory, LogStoreError, RawInput, Result, StorylogError,
};
use tempfile::TempDir;

fn request() -> LogRequest {
    LogRequest::new(
        RawInput {
            children: vec![ChildProfile::named("Lian").with_age(6)],
            day_incident: "Lian spilled juice".to_string(),
            lang: "en".to_string(),
            ..RawInput::default()
        },
        GeneratedStory {
            title: "Lian and the Moon".to_string(),
            content: "Lian flew to the moon.".to_string(),
            moral: "Lian learned patience.".to_string(),
            parent_note: None,
        },
    )
}

fn supabase_config(url: &str) -> SupabaseConfig {
    SupabaseConfig {
        url: url.to_string(),
        api_key: secret_string("anon-key"),
        table: "gunapad_logs".to_string(),
        timeout_seconds: 5,
    }
}

/// Store that always fails
struct RejectingStore;

#[async_trait]
impl LogStore for RejectingStore {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    async fn insert(&self, _record: &OutboundRecord) -> Result<()> {
        Err(LogStoreError::Rejected {
            status: 503,
            message: "unavailable".to_string(),
        }
        .into())
    }
}

/// Store that panics mid-write
struct PanickingStore;

#[async_trait]
impl LogStore for PanickingStore {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn insert(&self, _record: &OutboundRecord) -> Result<()> {
        panic!("driver bug");
    }
}

fn recording_hook() -> (Arc<Mutex<Vec<LogFailure>>>, impl Fn(&LogFailure) + Send + Sync) {
    let failures = Arc::new(Mutex::new(Vec::new()));
    let sink = failures.clone();
    (failures, move |failure: &LogFailure| {
        sink.lock().unwrap().push(failure.clone());
    })
}

#[tokio::test]
async fn test_supabase_insert_sends_anonymized_row() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/gunapad_logs")
        .match_header("apikey", "anon-key")
        .match_header("authorization", "Bearer anon-key")
        .match_header("prefer", "return=minimal")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"^\[\{"#.to_string()),
            Matcher::Regex(r#""story_title":"Child_1 and the Moon""#.to_string()),
            Matcher::Regex(r#""day_incident_short":"user_context_redacted""#.to_string()),
        ]))
        .with_status(201)
        .create_async()
        .await;

    let store = Arc::new(SupabaseLogStore::new(&supabase_config(&server.url())).unwrap());
    let logger = StoryLogger::new(Some(store), "1.0");

    assert!(logger.log_story(&request()).await);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_supabase_rejection_returns_false_and_reports() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/gunapad_logs")
        .with_status(401)
        .with_body(r#"{"message":"Invalid API key"}"#)
        .create_async()
        .await;

    let (failures, hook) = recording_hook();
    let store = Arc::new(SupabaseLogStore::new(&supabase_config(&server.url())).unwrap());
    let logger = StoryLogger::new(Some(store), "1.0").with_failure_hook(hook);

    assert!(!logger.log_story(&request()).await);
    mock.assert_async().await;

    let failures = failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, LogFailureKind::Store);
    assert_eq!(failures[0].store, Some("supabase"));
    assert!(failures[0].message.contains("401"));
}

#[tokio::test]
async fn test_supabase_store_error_type() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/rest/v1/gunapad_logs")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let store = SupabaseLogStore::new(&supabase_config(&server.url())).unwrap();
    let record = StoryLogger::new(None, "1.0").prepare(&request()).unwrap();

    match store.insert(&record).await {
        Err(StorylogError::Store(LogStoreError::Rejected { status, message })) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_supabase_connection_check() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/rest/v1/gunapad_logs".to_string()))
        .match_query(Matcher::UrlEncoded("limit".into(), "0".into()))
        .match_header("apikey", "anon-key")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let store = SupabaseLogStore::new(&supabase_config(&server.url())).unwrap();
    assert!(store.test_connection().await.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_jsonl_store_appends_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("stories.jsonl");
    let store = Arc::new(JsonlLogStore::new(&path));
    let logger = StoryLogger::new(Some(store), "2.0");

    assert!(logger.log_story(&request()).await);
    assert!(logger.log_story(&request()).await);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);

    let record: OutboundRecord = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record.engine_version, "2.0");
    assert_eq!(record.raw_story, "Child_1 flew to the moon.\n\n");
    assert!(!contents.contains("spilled juice"));
}

#[tokio::test]
async fn test_no_store_returns_false_without_hook() {
    let (failures, hook) = recording_hook();
    let logger = StoryLogger::new(None, "1.0").with_failure_hook(hook);

    assert!(!logger.log_story(&request()).await);
    assert!(failures.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_store_failure_is_swallowed() {
    let (failures, hook) = recording_hook();
    let logger = StoryLogger::new(Some(Arc::new(RejectingStore)), "1.0").with_failure_hook(hook);

    assert!(!logger.log_story(&request()).await);

    let failures = failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, LogFailureKind::Store);
    assert_eq!(failures[0].store, Some("rejecting"));
}

#[tokio::test]
async fn test_block_policy_stops_leaking_record() {
    let store = Arc::new(MemoryLogStore::new());
    let (failures, hook) = recording_hook();
    let logger = StoryLogger::new(Some(store.clone()), "1.0")
        .with_leak_policy(LeakPolicy::Block)
        .with_failure_hook(hook);

    let mut leaking = request();
    leaking.raw_input.world = "Lian's treehouse".to_string();

    assert!(!logger.log_story(&leaking).await);
    assert!(store.is_empty());

    let failures = failures.lock().unwrap();
    assert_eq!(failures[0].kind, LogFailureKind::PrivacyLeak);
    assert!(!failures[0].message.contains("Lian"));
}

#[tokio::test]
async fn test_warn_policy_stores_leaking_record() {
    let store = Arc::new(MemoryLogStore::new());
    let logger = StoryLogger::new(Some(store.clone()), "1.0");

    let mut leaking = request();
    leaking.raw_input.world = "Lian's treehouse".to_string();

    assert!(logger.log_story(&leaking).await);
    assert_eq!(store.records()[0].world, "Lian's treehouse");
}

#[tokio::test]
async fn test_dispatch_runs_in_background() {
    let store = Arc::new(MemoryLogStore::new());
    let logger = Arc::new(StoryLogger::new(Some(store.clone()), "1.0"));

    let handles: Vec<_> = (0..5).map(|_| logger.dispatch(request())).collect();
    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert_eq!(store.len(), 5);
}

#[tokio::test]
async fn test_dispatch_captures_panics() {
    let (failures, hook) = recording_hook();
    let logger = Arc::new(
        StoryLogger::new(Some(Arc::new(PanickingStore)), "1.0").with_failure_hook(hook),
    );

    let stored = logger.dispatch(request()).await.unwrap();
    assert!(!stored);

    let failures = failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, LogFailureKind::TaskPanicked);
}
