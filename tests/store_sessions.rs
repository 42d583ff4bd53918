mod common;

use std::time::Duration;

use wordstash::storage::{CollectionStore, FileStore, SheetStore, SqliteSheet};
use wordstash::types::{AddOutcome, CollectionSummary, CreateOutcome, RemoveOutcome};

#[test]
fn file_store_state_survives_new_sessions() {
    let scratch = common::scratch();
    let path = scratch.root.join("skribbl_data.json");

    {
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.create_collection("movies").unwrap(), CreateOutcome::Created);
        assert_eq!(store.create_collection("science").unwrap(), CreateOutcome::Created);
        assert_eq!(store.add_word("movies", "Parasite").unwrap(), AddOutcome::Added);
        assert_eq!(store.add_word("movies", "Inception").unwrap(), AddOutcome::Added);
        assert_eq!(store.add_word("science", "Galaxy").unwrap(), AddOutcome::Added);
    }

    let store = FileStore::open(&path).unwrap();
    assert_eq!(
        store.create_collection("movies").unwrap(),
        CreateOutcome::AlreadyExists
    );
    assert_eq!(
        store.add_word("movies", "inception").unwrap(),
        AddOutcome::DuplicateWord {
            existing: "Inception".into()
        }
    );
    assert_eq!(
        store.remove_word("movies", "Parasite").unwrap(),
        RemoveOutcome::Removed {
            removed: "Parasite".into()
        }
    );
    assert_eq!(
        store.remove_word("science", "blackhole").unwrap(),
        RemoveOutcome::WordNotFound
    );

    let mut collections = store.list_collections().unwrap();
    collections.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(
        collections,
        vec![
            CollectionSummary::new("movies", 1),
            CollectionSummary::new("science", 1)
        ]
    );
    assert_eq!(
        store.list_words("movies").unwrap(),
        Some(vec!["Inception".to_string()])
    );
}

#[test]
fn sheet_sessions_see_each_other_after_cache_expiry() {
    let scratch = common::scratch();
    let db = scratch.root.join("sheet.sqlite");

    let writer = SheetStore::new(SqliteSheet::connect(&db).unwrap(), "collections")
        .with_cache_ttl(Duration::ZERO);
    let reader = SheetStore::new(SqliteSheet::connect(&db).unwrap(), "collections")
        .with_cache_ttl(Duration::from_secs(3600));

    assert!(reader.list_collections().unwrap().is_empty());
    assert_eq!(writer.add_word("animals", "Cat").unwrap(), AddOutcome::Added);

    // The reader's cached view predates the write.
    assert!(reader.list_collections().unwrap().is_empty());

    let fresh = SheetStore::new(SqliteSheet::connect(&db).unwrap(), "collections");
    assert_eq!(
        fresh.list_collections().unwrap(),
        vec![CollectionSummary::new("animals", 1)]
    );

    // Mutations read fresh, so the stale reader still rejects the duplicate.
    assert_eq!(
        reader.add_word("animals", "CAT").unwrap(),
        AddOutcome::DuplicateWord {
            existing: "Cat".into()
        }
    );
}
