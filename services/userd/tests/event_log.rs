//! Event store integration tests: append atomicity, sequence assignment,
//! consistent listing, and decode failure on corrupt rows.

mod common;

use userd_events::{
    Event, LogPosition, PasswordLoginConfigured, Role, RoleAssigned, UserCreated,
};
use userd_id::UserId;
use userd_server::db::DbError;

use common::test_db;

fn created(name: &str) -> Event {
    UserCreated {
        id: UserId::new(),
        display_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
    .into()
}

#[tokio::test]
async fn test_empty_log_lists_nothing() {
    let db = test_db().await;
    let store = db.event_store();

    assert_eq!(store.count().await.unwrap(), 0);
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_append_assigns_contiguous_ascending_seqs() {
    let db = test_db().await;
    let store = db.event_store();

    store
        .append(&[created("Foo"), created("Bar")])
        .await
        .unwrap();
    store.append(&[created("Baz")]).await.unwrap();

    let recorded = store.list_all().await.unwrap();
    assert_eq!(recorded.len(), 3);

    let seqs: Vec<i64> = recorded.iter().map(|r| r.seq.value()).collect();
    for pair in seqs.windows(2) {
        assert_eq!(pair[1], pair[0] + 1, "sequence numbers must be contiguous");
    }
    assert!(seqs[0] > LogPosition::BEFORE_ALL.value());
}

#[tokio::test]
async fn test_append_round_trips_events() {
    let db = test_db().await;
    let store = db.event_store();

    let user_id = UserId::new();
    let events: Vec<Event> = vec![
        UserCreated {
            id: user_id,
            display_name: "Foo".to_string(),
            email: "foo@example.com".to_string(),
        }
        .into(),
        PasswordLoginConfigured {
            user_id,
            password_hash: "ab12".to_string(),
            salt: "cd34".to_string(),
        }
        .into(),
        RoleAssigned {
            user_id,
            role: Role::Editor,
        }
        .into(),
    ];

    store.append(&events).await.unwrap();

    let recorded = store.list_all().await.unwrap();
    let listed: Vec<Event> = recorded.into_iter().map(|r| r.event).collect();
    assert_eq!(listed, events);
}

#[tokio::test]
async fn test_append_empty_batch_is_a_noop() {
    let db = test_db().await;
    let store = db.event_store();

    store.append(&[created("Foo")]).await.unwrap();
    store.append(&[]).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_after_is_strictly_greater() {
    let db = test_db().await;
    let store = db.event_store();

    store
        .append(&[created("Foo"), created("Bar"), created("Baz")])
        .await
        .unwrap();

    let all = store.list_all().await.unwrap();
    let pivot = all[1].seq;

    let tail = store.list_after(pivot).await.unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].seq, all[2].seq);
    assert!(tail.iter().all(|r| r.seq > pivot));

    let from_start = store.list_after(LogPosition::BEFORE_ALL).await.unwrap();
    assert_eq!(from_start.len(), 3);

    let past_end = store.list_after(all[2].seq).await.unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn test_unknown_event_name_aborts_listing() {
    let db = test_db().await;
    let store = db.event_store();

    store.append(&[created("Foo")]).await.unwrap();

    sqlx::query("INSERT INTO events (event_name, payload) VALUES (?, ?)")
        .bind("NoSuchEvent")
        .bind("{}")
        .execute(db.pool())
        .await
        .unwrap();

    let err = store.list_all().await.unwrap_err();
    match err {
        DbError::CorruptEvent { seq, kind, .. } => {
            assert_eq!(seq, 2);
            assert_eq!(kind, "NoSuchEvent");
        }
        other => panic!("expected CorruptEvent, got {other}"),
    }
}

#[tokio::test]
async fn test_malformed_payload_aborts_listing() {
    let db = test_db().await;
    let store = db.event_store();

    sqlx::query("INSERT INTO events (event_name, payload) VALUES (?, ?)")
        .bind("UserCreated")
        .bind(r#"{"id": 42}"#)
        .execute(db.pool())
        .await
        .unwrap();

    let err = store.list_all().await.unwrap_err();
    match err {
        DbError::CorruptEvent { seq, kind, .. } => {
            assert_eq!(seq, 1);
            assert_eq!(kind, "UserCreated");
        }
        other => panic!("expected CorruptEvent, got {other}"),
    }
}
