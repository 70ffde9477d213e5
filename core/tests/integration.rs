//! Store lifecycle checks driven through the public `records_core` API.
//!
//! # Design
//! Each test starts from `RecordStore::seeded()` and uses only the
//! kind-dispatched operations the HTTP layer calls, so the properties hold
//! for what clients actually observe.

use records_core::{parse_user_id, Record, RecordKind, RecordStore, StoreError};
use serde_json::json;

#[test]
fn created_ids_strictly_increase_across_deletes() {
    let mut store = RecordStore::seeded();
    let mut last = 2;

    for round in 0..5 {
        let created = store
            .create(
                RecordKind::Post,
                Some(json!({"userId": 1, "title": format!("Post {round}"), "body": ""})),
            )
            .unwrap();
        assert!(created.id() > last, "id {} not above {last}", created.id());
        last = created.id();

        // Deleting the newest record must not let its id come back.
        if round % 2 == 0 {
            store.delete(RecordKind::Post, created.id()).unwrap();
        }
    }
    assert_eq!(last, 7);
}

#[test]
fn deleted_ids_stay_not_found() {
    let mut store = RecordStore::seeded();
    store.delete(RecordKind::User, 1).unwrap();

    assert_eq!(
        store.get(RecordKind::User, 1).unwrap_err(),
        StoreError::NotFound(RecordKind::User)
    );
    let created = store
        .create(RecordKind::User, Some(json!({"name": "Replacement"})))
        .unwrap();
    assert_ne!(created.id(), 1);
    assert!(store.get(RecordKind::User, 1).is_err());
}

#[test]
fn update_never_changes_identifier() {
    let mut store = RecordStore::seeded();
    for payload in [
        json!({"id": 2}),
        json!({"id": "2"}),
        json!({"id": null, "title": "Renamed"}),
        json!({}),
    ] {
        let merged = store.update(RecordKind::Post, 1, payload).unwrap();
        assert_eq!(merged.id(), 1);
    }
    let ids: Vec<u64> = store.list(RecordKind::Post).iter().map(Record::id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn filter_by_user_on_fixtures() {
    let store = RecordStore::seeded();

    let posts = store.filter_by_user(RecordKind::Post, 1).unwrap();
    assert_eq!(posts.len(), 1);
    let Record::Post(post) = &posts[0] else {
        panic!("expected a post");
    };
    assert_eq!(post.id, 1);
    assert_eq!(post.title, "Sample Post 1");

    let todos = store.filter_by_user(RecordKind::Todo, 2).unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id(), 2);
}

#[test]
fn filter_by_user_requires_numeric_user_id() {
    assert!(matches!(parse_user_id(None), Err(StoreError::InvalidArgument(_))));
    assert!(matches!(
        parse_user_id(Some("alice")),
        Err(StoreError::InvalidArgument(_))
    ));
}

#[test]
fn created_todo_is_readable() {
    let mut store = RecordStore::seeded();
    let created = store
        .create(
            RecordKind::Todo,
            Some(json!({"userId": 1, "title": "X", "completed": false})),
        )
        .unwrap();
    assert_eq!(created.id(), 3);

    let fetched = store.get(RecordKind::Todo, 3).unwrap();
    assert_eq!(fetched, created);
    assert_eq!(
        serde_json::to_value(&fetched).unwrap(),
        json!({"id": 3, "userId": 1, "title": "X", "completed": false})
    );
}

#[test]
fn collections_are_independent() {
    let mut store = RecordStore::seeded();
    store
        .create(RecordKind::Todo, Some(json!({"title": "A"})))
        .unwrap();
    store
        .create(RecordKind::Todo, Some(json!({"title": "B"})))
        .unwrap();

    let post = store
        .create(RecordKind::Post, Some(json!({"title": "C"})))
        .unwrap();
    assert_eq!(post.id(), 3);
    assert_eq!(store.todos().next_id(), 5);
    assert_eq!(store.users().len(), 2);
}
