use std::collections::HashSet;
use std::str::FromStr;
use std::sync::atomic::Ordering;
use futures::future::join_all;
use crate::test::mocks::{ConstantIdGenerator, MemoryNoteStore, SequentialIdGenerator};
use super::*;

fn date(s: &str) -> NoteDate {
    NoteDate::from_str(s).unwrap()
}

fn note(id: u128, date_str: &str) -> Note {
    Note {
        id: Uuid::from_u128(id),
        user: format!("user{id}"),
        date: date(date_str),
        title: format!("title {id}"),
        body: format!("body {id}"),
    }
}

fn new_note(title: &str) -> NewNote {
    NewNote {
        user: "alice".into(),
        date: date("2024-02-03"),
        title: title.into(),
        body: format!("{title} body"),
    }
}

const A: u128 = 0xA;
const B: u128 = 0xB;

fn scenario_notes() -> Vec<Note> {
    vec![note(A, "2023-01-01"), note(B, "2023-06-01")]
}

fn make_repository(
    store: MemoryNoteStore,
) -> NoteRepositoryImpl<MemoryNoteStore, SequentialIdGenerator> {
    NoteRepositoryImpl::with_id_generator(store, SequentialIdGenerator::default())
}

fn ids(notes: &[Note]) -> Vec<Uuid> {
    notes.iter().map(|n| n.id).collect()
}

#[tokio::test]
async fn list_all_returns_collection_as_is() {
    let store = MemoryNoteStore::new(scenario_notes());
    let repository = make_repository(store);
    let notes = repository.list_all().await.expect("list failed");
    assert_eq!(notes, scenario_notes());
}

#[tokio::test]
async fn create_appends_and_persists() {
    let store = MemoryNoteStore::new(scenario_notes());
    let repository = make_repository(store.clone());
    let created = repository.create(new_note("hello")).await
        .expect("create failed");
    assert_eq!(created.id, Uuid::from_u128(1));
    assert_eq!(created.user, "alice");
    assert_eq!(created.date, date("2024-02-03"));
    assert_eq!(created.title, "hello");
    assert_eq!(created.body, "hello body");

    let stored = store.notes();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[..2], scenario_notes()[..]);
    assert_eq!(stored[2], created);
    assert_eq!(store.save_count(), 1);
}

#[tokio::test]
async fn create_ids_are_distinct() {
    let store = MemoryNoteStore::default();
    let repository = NoteRepositoryImpl::with_id_generator(
        store.clone(),
        RandomIdGenerator,
    );
    for i in 0..20 {
        repository.create(new_note(&format!("note {i}"))).await
            .expect("create failed");
    }
    let stored = store.notes();
    let unique: HashSet<_> = stored.iter().map(|n| n.id).collect();
    assert_eq!(unique.len(), 20);
}

#[tokio::test]
async fn create_regenerates_taken_id() {
    let store = MemoryNoteStore::new(scenario_notes());
    let repository = NoteRepositoryImpl::with_id_generator(
        store.clone(),
        SequentialIdGenerator::with_queued([Uuid::from_u128(A), Uuid::from_u128(B)]),
    );
    let created = repository.create(new_note("hello")).await
        .expect("create failed");
    assert_eq!(created.id, Uuid::from_u128(1));
    assert_eq!(ids(&store.notes()), vec![Uuid::from_u128(A), Uuid::from_u128(B), Uuid::from_u128(1)]);
}

#[tokio::test]
async fn create_gives_up_when_ids_keep_colliding() {
    let store = MemoryNoteStore::new(scenario_notes());
    let repository = NoteRepositoryImpl::with_id_generator(
        store.clone(),
        ConstantIdGenerator(Uuid::from_u128(A)),
    );
    let err = repository.create(new_note("hello")).await
        .expect_err("should fail");
    assert!(matches!(err, RepositoryError::IdCollision), "wrong error type: {err:#?}");
    assert_eq!(store.save_count(), 0);
    assert_eq!(store.notes(), scenario_notes());
}

#[tokio::test]
async fn create_save_failure() {
    let store = MemoryNoteStore::new(scenario_notes());
    store.fail_save.store(true, Ordering::Relaxed);
    let repository = make_repository(store.clone());
    let err = repository.create(new_note("hello")).await
        .expect_err("should fail");
    assert!(matches!(err, RepositoryError::Store(_)), "wrong error type: {err:#?}");
    assert_eq!(store.notes(), scenario_notes());
}

#[tokio::test]
async fn find_by_id_exact_match() {
    let store = MemoryNoteStore::new(scenario_notes());
    let repository = make_repository(store);
    let found = repository.find_by_id(Uuid::from_u128(B)).await
        .expect("find failed");
    assert_eq!(found, vec![note(B, "2023-06-01")]);
}

#[tokio::test]
async fn find_by_id_absent_is_empty() {
    let store = MemoryNoteStore::new(scenario_notes());
    let repository = make_repository(store);
    for id in [0, 1, 0xC] {
        let found = repository.find_by_id(Uuid::from_u128(id)).await
            .expect("find failed");
        assert!(found.is_empty(), "found something for {id}");
    }
}

#[tokio::test]
async fn find_by_id_in_empty_collection() {
    let repository = make_repository(MemoryNoteStore::default());
    let found = repository.find_by_id(Uuid::from_u128(A)).await
        .expect("find failed");
    assert!(found.is_empty());
}

#[tokio::test]
async fn replace_keeps_identity_fields_and_position() {
    let store = MemoryNoteStore::new(scenario_notes());
    let repository = make_repository(store.clone());
    let updated = repository
        .replace_by_id(
            Uuid::from_u128(A),
            NoteUpdate {
                title: "new title".into(),
                body: "new body".into(),
            },
        )
        .await
        .expect("replace failed");
    let original = note(A, "2023-01-01");
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.user, original.user);
    assert_eq!(updated.date, original.date);
    assert_eq!(updated.title, "new title");
    assert_eq!(updated.body, "new body");

    assert_eq!(store.notes(), vec![updated, note(B, "2023-06-01")]);
    assert_eq!(store.save_count(), 1);
}

#[tokio::test]
async fn replace_missing_id_leaves_store_untouched() {
    let store = MemoryNoteStore::new(scenario_notes());
    let repository = make_repository(store.clone());
    let err = repository
        .replace_by_id(
            Uuid::from_u128(0xDEAD),
            NoteUpdate {
                title: "x".into(),
                body: "y".into(),
            },
        )
        .await
        .expect_err("should fail");
    assert!(matches!(err, RepositoryError::NotFound), "wrong error type: {err:#?}");
    assert_eq!(store.save_count(), 0);
    assert_eq!(store.notes(), scenario_notes());
}

#[tokio::test]
async fn replace_load_failure() {
    let store = MemoryNoteStore::new(scenario_notes());
    store.fail_load.store(true, Ordering::Relaxed);
    let repository = make_repository(store.clone());
    let err = repository
        .replace_by_id(
            Uuid::from_u128(A),
            NoteUpdate {
                title: "x".into(),
                body: "y".into(),
            },
        )
        .await
        .expect_err("should fail");
    assert!(matches!(err, RepositoryError::Store(_)), "wrong error type: {err:#?}");
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn filter_scenario() {
    let repository = make_repository(MemoryNoteStore::new(scenario_notes()));
    let filtered = repository.filter_by_date_after(&date("2023-03-01")).await
        .expect("filter failed");
    assert_eq!(filtered, vec![note(B, "2023-06-01")]);
}

#[tokio::test]
async fn filter_excludes_equal_dates_and_keeps_order() {
    let notes = vec![
        note(1, "2023-05-01T00:00:00Z"),
        note(2, "2023-03-01"),
        note(3, "2023-03-01T00:00:01Z"),
        note(4, "2023-02-28"),
        note(5, "2023-03-02"),
    ];
    let repository = make_repository(MemoryNoteStore::new(notes));
    let filtered = repository.filter_by_date_after(&date("2023-03-01")).await
        .expect("filter failed");
    assert_eq!(
        ids(&filtered),
        vec![Uuid::from_u128(1), Uuid::from_u128(3), Uuid::from_u128(5)],
    );
}

#[tokio::test]
async fn filter_compares_instants_across_offsets() {
    let notes = vec![
        note(1, "2023-03-01T01:00:00+02:00"),
        note(2, "2023-03-01T01:00:00-02:00"),
    ];
    let repository = make_repository(MemoryNoteStore::new(notes));
    let filtered = repository.filter_by_date_after(&date("2023-03-01")).await
        .expect("filter failed");
    assert_eq!(ids(&filtered), vec![Uuid::from_u128(2)]);
}

#[tokio::test]
async fn top_n_scenario() {
    let repository = make_repository(MemoryNoteStore::new(scenario_notes()));
    let top = repository.top_n_by_recency(1).await.expect("top n failed");
    assert_eq!(top, vec![note(B, "2023-06-01")]);
}

#[tokio::test]
async fn top_n_sorts_descending_with_stable_ties() {
    let notes = vec![
        note(1, "2023-01-01"),
        note(2, "2023-06-01"),
        note(3, "2023-03-01"),
        note(4, "2023-06-01"),
        note(5, "2022-12-31"),
    ];
    let repository = make_repository(MemoryNoteStore::new(notes));
    let top = repository.top_n_by_recency(4).await.expect("top n failed");
    assert_eq!(
        ids(&top),
        [2, 4, 3, 1].map(Uuid::from_u128).to_vec(),
    );
}

#[tokio::test]
async fn top_n_zero_and_oversized() {
    let repository = make_repository(MemoryNoteStore::new(scenario_notes()));
    let none = repository.top_n_by_recency(0).await.expect("top n failed");
    assert!(none.is_empty());
    let all = repository.top_n_by_recency(100).await.expect("top n failed");
    assert_eq!(ids(&all), vec![Uuid::from_u128(B), Uuid::from_u128(A)]);
}

#[tokio::test]
async fn top_n_does_not_persist_sorting() {
    let store = MemoryNoteStore::new(scenario_notes());
    let repository = make_repository(store.clone());
    repository.top_n_by_recency(2).await.expect("top n failed");
    assert_eq!(store.save_count(), 0);
    assert_eq!(store.notes(), scenario_notes());
}

#[tokio::test]
async fn concurrent_creates_lose_nothing() {
    let store = MemoryNoteStore::default();
    let repository = make_repository(store.clone());
    let results = join_all(
        (0..10).map(|i| repository.create(new_note(&format!("note {i}"))))
    ).await;
    for result in results {
        result.expect("create failed");
    }
    assert_eq!(store.notes().len(), 10);
    assert_eq!(store.save_count(), 10);
}

#[tokio::test]
async fn concurrent_create_and_update_both_land() {
    let store = MemoryNoteStore::new(scenario_notes());
    let repository = make_repository(store.clone());
    let (created, updated) = tokio::join!(
        repository.create(new_note("racing")),
        repository.replace_by_id(
            Uuid::from_u128(B),
            NoteUpdate {
                title: "updated".into(),
                body: "updated body".into(),
            },
        ),
    );
    let created = created.expect("create failed");
    let updated = updated.expect("replace failed");
    let stored = store.notes();
    assert_eq!(stored.len(), 3);
    assert!(stored.contains(&created));
    assert!(stored.contains(&updated));
}
