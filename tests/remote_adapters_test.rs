// tests/remote_adapters_test.rs
// Points the remote adapters at a local stub server and checks wire shapes
// and error-kind mapping.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use engram::error::{MemoryError, ResponderError};
use engram::llm::openai::OpenAIResponder;
use engram::llm::Responder;
use engram::memory::remote::RemoteMemoryStore;
use engram::memory::{MemoryMessage, MemoryStore};

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn healthy() -> Router {
    Router::new().route("/health", get(|| async { Json(json!({"status": "ok"})) }))
}

// ---------------------------------------------------------------------------
// RemoteMemoryStore
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remote_memory_search_parses_ranked_results() {
    let router = healthy().route(
        "/search",
        post(|Json(_): Json<Value>| async {
            Json(json!({"results": [
                {"memory": "u1 is vegetarian", "score": 0.92},
                {"memory": "u1 lives in Lisbon"},
            ]}))
        }),
    );
    let base_url = spawn_server(router).await;

    let store = RemoteMemoryStore::connect(&base_url, Duration::from_secs(2))
        .await
        .unwrap();
    let facts = store.search("what should I eat?", "u1", 3).await.unwrap();

    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].text, "u1 is vegetarian");
    assert_eq!(facts[0].score, Some(0.92));
    assert_eq!(facts[1].score, None);
}

#[tokio::test]
async fn remote_memory_append_posts_the_whole_turn() {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let router = healthy().route(
        "/memories",
        post({
            let seen = seen.clone();
            move |Json(body): Json<Value>| async move {
                seen.lock().unwrap().push(body);
                Json(json!({"ok": true}))
            }
        }),
    );
    let base_url = spawn_server(router).await;

    let store = RemoteMemoryStore::new(&base_url, Duration::from_secs(2)).unwrap();
    let messages = [
        MemoryMessage::user("what should I eat?"),
        MemoryMessage::assistant("Try a vegetarian stir-fry."),
    ];
    store.append(&messages, "u1").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["user_id"], "u1");
    let sent = seen[0]["messages"].as_array().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0]["role"], "user");
    assert_eq!(sent[1]["role"], "assistant");
    assert_eq!(sent[1]["content"], "Try a vegetarian stir-fry.");
}

#[tokio::test]
async fn remote_memory_clear_targets_the_owner() {
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let router = healthy().route(
        "/memories/{user_id}",
        delete({
            let seen = seen.clone();
            move |Path(user_id): Path<String>| async move {
                seen.lock().unwrap().push(user_id);
                Json(json!({"ok": true}))
            }
        }),
    );
    let base_url = spawn_server(router).await;

    let store = RemoteMemoryStore::new(&base_url, Duration::from_secs(2)).unwrap();
    store.clear("u1").await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["u1".to_string()]);
}

#[tokio::test]
async fn remote_memory_maps_server_errors_to_unavailable() {
    let router = healthy().route(
        "/search",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn_server(router).await;

    let store = RemoteMemoryStore::new(&base_url, Duration::from_secs(2)).unwrap();
    let err = store.search("q", "u1", 3).await.unwrap_err();

    assert!(matches!(err, MemoryError::Unavailable(_)));
}

#[tokio::test]
async fn remote_memory_maps_client_timeouts_to_timeout() {
    let router = healthy().route(
        "/search",
        post(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(json!({"results": []}))
        }),
    );
    let base_url = spawn_server(router).await;

    let store = RemoteMemoryStore::new(&base_url, Duration::from_millis(100)).unwrap();
    let err = store.search("q", "u1", 3).await.unwrap_err();

    assert!(matches!(err, MemoryError::Timeout));
}

#[tokio::test]
async fn connect_fails_when_the_service_has_no_health() {
    let router = Router::new();
    let base_url = spawn_server(router).await;

    let err = RemoteMemoryStore::connect(&base_url, Duration::from_secs(2))
        .await
        .unwrap_err();

    assert!(matches!(err, MemoryError::Unavailable(_)));
}

// ---------------------------------------------------------------------------
// OpenAIResponder
// ---------------------------------------------------------------------------

#[tokio::test]
async fn responder_extracts_the_completion_text() {
    let router = Router::new().route(
        "/chat/completions",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["messages"][0]["role"], "system");
            assert_eq!(body["messages"][1]["role"], "user");
            Json(json!({"choices": [
                {"message": {"role": "assistant", "content": "Try a vegetarian stir-fry."}}
            ]}))
        }),
    );
    let base_url = spawn_server(router).await;

    let responder =
        OpenAIResponder::new(&base_url, "test-key", "gpt-4o-mini", Duration::from_secs(2)).unwrap();
    let reply = responder
        .complete("You are a helpful assistant with memory.", "what should I eat?")
        .await
        .unwrap();

    assert_eq!(reply, "Try a vegetarian stir-fry.");
}

#[tokio::test]
async fn responder_maps_429_to_rate_limited() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let base_url = spawn_server(router).await;

    let responder =
        OpenAIResponder::new(&base_url, "test-key", "gpt-4o-mini", Duration::from_secs(2)).unwrap();
    let err = responder.complete("system", "hello").await.unwrap_err();

    assert!(matches!(err, ResponderError::RateLimited));
}

#[tokio::test]
async fn responder_maps_server_errors_to_unavailable() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn_server(router).await;

    let responder =
        OpenAIResponder::new(&base_url, "test-key", "gpt-4o-mini", Duration::from_secs(2)).unwrap();
    let err = responder.complete("system", "hello").await.unwrap_err();

    assert!(matches!(err, ResponderError::Unavailable(_)));
}

#[tokio::test]
async fn responder_maps_client_timeouts_to_timeout() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(json!({"choices": [{"message": {"content": "too late"}}]}))
        }),
    );
    let base_url = spawn_server(router).await;

    let responder = OpenAIResponder::new(
        &base_url,
        "test-key",
        "gpt-4o-mini",
        Duration::from_millis(100),
    )
    .unwrap();
    let err = responder.complete("system", "hello").await.unwrap_err();

    assert!(matches!(err, ResponderError::Timeout));
}
