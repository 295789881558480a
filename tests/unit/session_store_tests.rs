/*!
 * Tests for the session store
 */

use chrono::{Duration, Utc};
use std::sync::Arc;
use tutorbot::conversation::machine::ConversationState;
use tutorbot::session::store::SessionStore;

/// Session creation is lazy and idempotent
#[tokio::test]
async fn test_get_calledTwice_shouldReturnSameInitialSession() {
    let store = SessionStore::new();

    let first = store.get(42);
    let second = store.get(42);

    assert!(Arc::ptr_eq(&first, &second));

    let session = first.lock().await;
    assert_eq!(session.user_id, 42);
    assert_eq!(session.state, ConversationState::AwaitingLevel);
    assert!(session.level.is_none());
    assert!(session.exercise_text.is_none());
}

/// Two users never share exercise data
#[tokio::test]
async fn test_store_withTwoUsers_shouldIsolateSessionData() {
    let store = SessionStore::new();

    {
        let handle = store.get(1);
        let mut session = handle.lock().await;
        session.begin_exercise("user one's exercise".to_string());
        session.record_answer(1, 'a').expect("valid answer");
    }

    let handle = store.get(2);
    let session = handle.lock().await;
    assert!(session.exercise_text.is_none());
    assert_eq!(session.answered_count(), 0);
}

/// Same-user events serialize through the per-user mutex
#[tokio::test]
async fn test_store_withConcurrentSameUserTasks_shouldSerializeMutation() {
    let store = Arc::new(SessionStore::new());

    let mut tasks = Vec::new();
    for i in 0..10 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            let handle = store.get(1);
            let mut session = handle.lock().await;
            // Overlapping unsynchronized access would lose updates here
            let question = (i % 3) + 1;
            session.record_answer(question as u8, 'a').expect("valid answer");
        }));
    }
    for task in tasks {
        task.await.expect("task completes");
    }

    let handle = store.get(1);
    let session = handle.lock().await;
    assert_eq!(session.answered_count(), 3);
}

#[tokio::test]
async fn test_purgeIdle_withMixedAges_shouldOnlyEvictStale() {
    let store = SessionStore::new();

    {
        let handle = store.get(1);
        handle.lock().await.last_activity = Utc::now() - Duration::days(3);
    }
    {
        let handle = store.get(2);
        handle.lock().await.last_activity = Utc::now();
    }

    assert_eq!(store.purge_idle(Duration::days(1)), 1);
    assert!(!store.contains(1));
    assert!(store.contains(2));
    assert_eq!(store.len(), 1);
}
