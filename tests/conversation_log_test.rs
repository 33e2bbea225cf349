// tests/conversation_log_test.rs

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;

use engram::history::{ConversationLog, Role, SqliteConversationLog};

/// Helper to set up a clean, isolated in-memory log.
async fn setup_log() -> SqliteConversationLog {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite pool.");

    let log = SqliteConversationLog::new(pool);
    log.run_migrations().await.unwrap();
    log
}

#[tokio::test]
async fn append_then_list_round_trips_chronologically() {
    // ARRANGE
    let log = setup_log().await;

    // ACT
    let first = log
        .append("s1", "u1", Role::User, "what should I eat?")
        .await
        .unwrap();
    let second = log
        .append("s1", "u1", Role::Assistant, "Try a vegetarian stir-fry.")
        .await
        .unwrap();

    // ASSERT
    assert!(first.id < second.id);

    let records = log.list("s1", 10).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].role, Role::User);
    assert_eq!(records[0].content, "what should I eat?");
    assert_eq!(records[0].owner_id, "u1");
    assert_eq!(records[1].role, Role::Assistant);
    assert_eq!(records[1].content, "Try a vegetarian stir-fry.");
}

#[tokio::test]
async fn unknown_session_is_just_an_empty_new_session() {
    let log = setup_log().await;

    let records = log.list("never-seen", 10).await.unwrap();
    assert!(records.is_empty());

    // First append to an unknown session needs no separate creation call.
    log.append("never-seen", "u1", Role::User, "hello")
        .await
        .unwrap();
    assert_eq!(log.list("never-seen", 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_returns_the_most_recent_messages_in_chronological_order() {
    let log = setup_log().await;

    for i in 0..5 {
        log.append("s1", "u1", Role::User, &format!("message {i}"))
            .await
            .unwrap();
    }

    // Storage fetches newest-first; the caller still sees chronological.
    let records = log.list("s1", 2).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].content, "message 3");
    assert_eq!(records[1].content, "message 4");
}

#[tokio::test]
async fn sessions_are_scoped_to_their_owner_most_recent_first() {
    let log = setup_log().await;

    log.append("s1", "u1", Role::User, "a").await.unwrap();
    log.append("s2", "u1", Role::User, "b").await.unwrap();
    log.append("s3", "u2", Role::User, "c").await.unwrap();
    log.append("s1", "u1", Role::Assistant, "d").await.unwrap();

    let sessions = log.sessions("u1").await.unwrap();
    assert_eq!(sessions, vec!["s1".to_string(), "s2".to_string()]);

    let sessions = log.sessions("u2").await.unwrap();
    assert_eq!(sessions, vec!["s3".to_string()]);
}

#[tokio::test]
async fn concurrent_sessions_preserve_per_session_submission_order() {
    // A shared on-disk database so concurrent connections see one store.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("log.db");
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect(&format!("sqlite://{}?mode=rwc", db_path.display()))
        .await
        .expect("Failed to create SQLite pool.");

    let log = Arc::new(SqliteConversationLog::new(pool));
    log.run_migrations().await.unwrap();

    let writer = |session: &'static str, owner: &'static str| {
        let log = log.clone();
        tokio::spawn(async move {
            for i in 0..10 {
                log.append(session, owner, Role::User, &format!("{session} turn {i}"))
                    .await
                    .unwrap();
                log.append(session, owner, Role::Assistant, &format!("{session} reply {i}"))
                    .await
                    .unwrap();
            }
        })
    };

    let a = writer("s1", "u1");
    let b = writer("s2", "u2");
    a.await.unwrap();
    b.await.unwrap();

    for session in ["s1", "s2"] {
        let records = log.list(session, 100).await.unwrap();
        assert_eq!(records.len(), 20);

        for (i, chunk) in records.chunks(2).enumerate() {
            assert_eq!(chunk[0].content, format!("{session} turn {i}"));
            assert_eq!(chunk[1].content, format!("{session} reply {i}"));
        }
    }
}
