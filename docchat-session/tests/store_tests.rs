use std::sync::Arc;

use docchat_session::{InMemorySessionStore, LogKind, Message, Role};

#[tokio::test]
async fn first_touch_creates_empty_session() {
    let store = InMemorySessionStore::new();
    assert!(store.is_empty().await);

    let logs = store.get_or_create("client-1").await;
    assert!(logs.pdf.is_empty());
    assert!(logs.ai.is_empty());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn pdf_and_ai_logs_stay_separate() {
    let store = InMemorySessionStore::new();
    store
        .append_exchange(
            "client-1",
            LogKind::Pdf,
            Message::user("what does the paper claim").with_doc_id("doc-1"),
            Message::assistant("it claims X"),
        )
        .await;
    store
        .append_exchange(
            "client-1",
            LogKind::Ai,
            Message::user("what is the capital of France"),
            Message::assistant("Paris"),
        )
        .await;

    let logs = store.get_or_create("client-1").await;
    assert_eq!(logs.pdf.len(), 2);
    assert_eq!(logs.ai.len(), 2);
    assert_eq!(logs.pdf[0].role, Role::User);
    assert_eq!(logs.pdf[0].doc_id.as_deref(), Some("doc-1"));
    assert_eq!(logs.pdf[1].role, Role::Assistant);
    assert_eq!(logs.ai[1].text, "Paris");
}

#[tokio::test]
async fn clients_do_not_share_history() {
    let store = InMemorySessionStore::new();
    store.append("a", LogKind::Ai, Message::user("hello from a")).await;

    let b = store.get_or_create("b").await;
    assert!(b.ai.is_empty());
    let a = store.get_or_create("a").await;
    assert_eq!(a.ai.len(), 1);
}

#[tokio::test]
async fn exchanges_never_tear_under_concurrency() {
    let store = Arc::new(InMemorySessionStore::new());

    let mut handles = Vec::new();
    for task in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            for i in 0..50 {
                store
                    .append_exchange(
                        "shared",
                        LogKind::Pdf,
                        Message::user(format!("q {task}-{i}")),
                        Message::assistant(format!("a {task}-{i}")),
                    )
                    .await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let logs = store.get_or_create("shared").await;
    assert_eq!(logs.pdf.len(), 8 * 50 * 2);
    // Every user message is immediately followed by its answer.
    for pair in logs.pdf.chunks(2) {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[1].role, Role::Assistant);
        assert_eq!(pair[0].text.trim_start_matches("q "), pair[1].text.trim_start_matches("a "));
    }
}

#[tokio::test]
async fn snapshot_is_detached_from_the_store() {
    let store = InMemorySessionStore::new();
    let before = store.get_or_create("c").await;
    store.append("c", LogKind::Ai, Message::user("later")).await;

    assert!(before.ai.is_empty());
    assert_eq!(store.get_or_create("c").await.ai.len(), 1);
}
