use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::lock::ResourceLock;
use super::CollectionStore;
use crate::types::{
    require_non_empty, same_word, AddOutcome, Capabilities, CollectionSummary, CreateOutcome,
    RemoveOutcome, Result, StoreError,
};

pub const COLLECTION_COLUMN: &str = "collection_name";
pub const WORD_COLUMN: &str = "word";
pub const DEFAULT_WORKSHEET: &str = "collections";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// A header row plus data rows, as exchanged with a tabular service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read/bulk-replace access to a remote worksheet.
pub trait SheetClient: Send + Sync {
    /// Identifies the backing resource for locking purposes.
    fn resource_id(&self) -> String;

    fn read(&self, worksheet: &str) -> Result<Table>;

    /// Replaces the whole worksheet with `table`.
    fn update(&self, worksheet: &str, table: &Table) -> Result<()>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRow {
    pub collection_name: String,
    pub word: String,
}

impl SheetRow {
    pub fn new(collection_name: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            word: word.into(),
        }
    }
}

/// `"Collection Name"` -> `"collection_name"`.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Extracts `(collection_name, word)` rows. Fully empty rows are dropped; a
/// table missing either column yields no rows.
pub fn rows_from_table(table: &Table) -> Option<Vec<SheetRow>> {
    let headers: Vec<String> = table.headers.iter().map(|h| normalize_header(h)).collect();
    let collection_idx = headers.iter().position(|h| h == COLLECTION_COLUMN)?;
    let word_idx = headers.iter().position(|h| h == WORD_COLUMN)?;

    let rows = table
        .rows
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| {
            let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();
            SheetRow::new(cell(collection_idx), cell(word_idx))
        })
        .collect();
    Some(rows)
}

pub fn table_from_rows(rows: &[SheetRow]) -> Table {
    Table {
        headers: vec![COLLECTION_COLUMN.to_string(), WORD_COLUMN.to_string()],
        rows: rows
            .iter()
            .map(|r| vec![r.collection_name.clone(), r.word.clone()])
            .collect(),
    }
}

struct CachedRows {
    fetched_at: Instant,
    rows: Vec<SheetRow>,
}

/// Collection store over a two-column worksheet.
///
/// A collection exists only while it has at least one row, so empty
/// collections cannot be created. List operations may be served from a cache
/// up to `cache_ttl` old; mutations always read fresh.
pub struct SheetStore<C: SheetClient> {
    client: C,
    worksheet: String,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedRows>>,
    lock: ResourceLock,
}

impl<C: SheetClient> SheetStore<C> {
    pub fn new(client: C, worksheet: impl Into<String>) -> Self {
        let worksheet = worksheet.into();
        let lock = ResourceLock::for_resource(format!(
            "sheet:{}#{}",
            client.resource_id(),
            worksheet
        ));
        Self {
            client,
            worksheet,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache: Mutex::new(None),
            lock,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }

    /// Reads the worksheet from the client. A missing worksheet or a table
    /// without the expected columns is an empty table; transport errors propagate.
    fn fetch_rows(&self) -> Result<Vec<SheetRow>> {
        let table = match self.client.read(&self.worksheet) {
            Ok(table) => table,
            Err(StoreError::WorksheetMissing(name)) => {
                log::warn!("worksheet '{}' not found, treating as empty", name);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        match rows_from_table(&table) {
            Some(rows) => Ok(rows),
            None => {
                log::warn!(
                    "worksheet '{}' lacks {}/{} columns (headers {:?}), treating as empty",
                    self.worksheet,
                    COLLECTION_COLUMN,
                    WORD_COLUMN,
                    table.headers
                );
                Ok(Vec::new())
            }
        }
    }

    /// Rows for read-only operations: cached when fresh, empty when unreadable.
    fn cached_rows(&self) -> Vec<SheetRow> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = cache.as_ref() {
            if entry.fetched_at.elapsed() < self.cache_ttl {
                return entry.rows.clone();
            }
        }
        match self.fetch_rows() {
            Ok(rows) => {
                *cache = Some(CachedRows {
                    fetched_at: Instant::now(),
                    rows: rows.clone(),
                });
                rows
            }
            Err(e) => {
                log::warn!(
                    "failed to read worksheet '{}' ({}), treating as empty",
                    self.worksheet,
                    e
                );
                Vec::new()
            }
        }
    }

    fn store_rows(&self, rows: Vec<SheetRow>) -> Result<()> {
        let table = table_from_rows(&rows);
        if let Err(e) = self.client.update(&self.worksheet, &table) {
            log::error!("writing worksheet '{}' failed: {}", self.worksheet, e);
            // What the sheet holds now is unknown; force the next read to fetch.
            *self.cache.lock().unwrap_or_else(|p| p.into_inner()) = None;
            return Err(StoreError::RemoteWrite(e.to_string()));
        }
        *self.cache.lock().unwrap_or_else(|p| p.into_inner()) = Some(CachedRows {
            fetched_at: Instant::now(),
            rows,
        });
        Ok(())
    }
}

impl<C: SheetClient> CollectionStore for SheetStore<C> {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            explicit_collections: false,
            sorted_words: false,
        }
    }

    fn create_collection(&self, _name: &str) -> Result<CreateOutcome> {
        Err(StoreError::Unsupported {
            backend: "sheet",
            operation: "create_collection",
        })
    }

    fn add_word(&self, collection: &str, word: &str) -> Result<AddOutcome> {
        require_non_empty("collection name", collection)?;
        require_non_empty("word", word)?;

        let _guard = self.lock.acquire();
        let mut rows = self.fetch_rows()?;
        // Duplicates are checked across case variants of the collection name;
        // the new row keeps the caller's spelling.
        if let Some(existing) = rows
            .iter()
            .find(|r| same_word(&r.collection_name, collection) && same_word(&r.word, word))
        {
            return Ok(AddOutcome::DuplicateWord {
                existing: existing.word.clone(),
            });
        }

        rows.push(SheetRow::new(collection, word));
        self.store_rows(rows)?;
        log::debug!("sheet add_word {:?}/{:?}", collection, word);
        Ok(AddOutcome::Added)
    }

    fn remove_word(&self, collection: &str, word: &str) -> Result<RemoveOutcome> {
        require_non_empty("collection name", collection)?;
        require_non_empty("word", word)?;

        let _guard = self.lock.acquire();
        let mut rows = self.fetch_rows()?;
        // An empty collection has no rows, so it is indistinguishable from a
        // missing one: both report the word as not found.
        let Some(idx) = rows
            .iter()
            .position(|r| r.collection_name == collection && same_word(&r.word, word))
        else {
            return Ok(RemoveOutcome::WordNotFound);
        };

        let removed = rows.remove(idx).word;
        self.store_rows(rows)?;
        log::debug!("sheet remove_word {:?}/{:?}", collection, removed);
        Ok(RemoveOutcome::Removed { removed })
    }

    fn list_collections(&self) -> Result<Vec<CollectionSummary>> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for row in self.cached_rows() {
            *counts.entry(row.collection_name).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(name, count)| CollectionSummary::new(name, count))
            .collect())
    }

    fn list_words(&self, collection: &str) -> Result<Option<Vec<String>>> {
        let words: Vec<String> = self
            .cached_rows()
            .into_iter()
            .filter(|r| r.collection_name == collection)
            .map(|r| r.word)
            .collect();
        Ok(if words.is_empty() { None } else { Some(words) })
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemorySheet;
    use super::*;
    use std::sync::atomic::Ordering;

    fn store(id: &str) -> (MemorySheet, SheetStore<MemorySheet>) {
        let sheet = MemorySheet::new(id);
        let store = SheetStore::new(sheet.clone(), DEFAULT_WORKSHEET);
        (sheet, store)
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn normalize_header_lowercases_and_underscores() {
        assert_eq!(normalize_header("Collection Name"), "collection_name");
        assert_eq!(normalize_header(" WORD "), "word");
    }

    #[test]
    fn rows_from_table_normalizes_headers_and_drops_blank_rows() {
        let t = table(
            &["Word", "Collection Name"],
            &[&["Cat", "animals"], &["", ""], &["Dog", "animals"]],
        );
        assert_eq!(
            rows_from_table(&t).unwrap(),
            vec![SheetRow::new("animals", "Cat"), SheetRow::new("animals", "Dog")]
        );
    }

    #[test]
    fn rows_from_table_requires_both_columns() {
        let t = table(&["collection_name"], &[&["animals"]]);
        assert!(rows_from_table(&t).is_none());
    }

    #[test]
    fn missing_worksheet_lists_nothing() {
        let (_sheet, store) = store("missing-ws");
        assert!(store.list_collections().unwrap().is_empty());
        assert_eq!(store.list_words("animals").unwrap(), None);
    }

    #[test]
    fn first_add_creates_collection_implicitly() {
        let (sheet, store) = store("implicit-create");
        assert_eq!(store.add_word("animals", "Cat").unwrap(), AddOutcome::Added);
        assert_eq!(
            store.list_collections().unwrap(),
            vec![CollectionSummary::new("animals", 1)]
        );
        assert_eq!(
            sheet.get(DEFAULT_WORKSHEET).unwrap(),
            table(&["collection_name", "word"], &[&["animals", "Cat"]])
        );
    }

    #[test]
    fn duplicate_word_is_case_insensitive_within_collection() {
        let (_sheet, store) = store("dupes");
        store.add_word("animals", "Cat").unwrap();
        assert_eq!(
            store.add_word("animals", "cat").unwrap(),
            AddOutcome::DuplicateWord {
                existing: "Cat".into()
            }
        );
        assert_eq!(store.add_word("pets", "cat").unwrap(), AddOutcome::Added);
        assert_eq!(
            store.list_words("animals").unwrap(),
            Some(vec!["Cat".to_string()])
        );
    }

    #[test]
    fn words_keep_insertion_order() {
        let (_sheet, store) = store("order");
        store.add_word("fruit", "banana").unwrap();
        store.add_word("fruit", "apple").unwrap();
        assert_eq!(
            store.list_words("fruit").unwrap(),
            Some(vec!["banana".to_string(), "apple".to_string()])
        );
    }

    #[test]
    fn create_collection_is_unsupported() {
        let (_sheet, store) = store("no-create");
        assert!(matches!(
            store.create_collection("movies"),
            Err(StoreError::Unsupported {
                operation: "create_collection",
                ..
            })
        ));
        assert!(!store.capabilities().explicit_collections);
        assert!(!store.capabilities().sorted_words);
    }

    #[test]
    fn repeated_remove_reports_word_not_found() {
        let (_sheet, store) = store("remove-last");
        store.add_word("solo", "only").unwrap();
        assert_eq!(
            store.remove_word("solo", "ONLY").unwrap(),
            RemoveOutcome::Removed {
                removed: "only".into()
            }
        );
        assert_eq!(store.list_words("solo").unwrap(), None);
        assert_eq!(
            store.remove_word("solo", "only").unwrap(),
            RemoveOutcome::WordNotFound
        );
        assert_eq!(
            store.remove_word("never-existed", "only").unwrap(),
            RemoveOutcome::WordNotFound
        );
    }

    #[test]
    fn duplicate_check_spans_collection_case_variants() {
        let (sheet, store) = store("collection-case");
        store.add_word("Animals", "Cat").unwrap();
        assert_eq!(
            store.add_word("animals", "cat").unwrap(),
            AddOutcome::DuplicateWord {
                existing: "Cat".into()
            }
        );
        assert_eq!(store.add_word("animals", "Dog").unwrap(), AddOutcome::Added);
        assert_eq!(
            sheet.get(DEFAULT_WORKSHEET).unwrap().rows,
            vec![
                vec!["Animals".to_string(), "Cat".to_string()],
                vec!["animals".to_string(), "Dog".to_string()],
            ]
        );
    }

    #[test]
    fn remove_absent_word_does_not_write() {
        let (sheet, store) = store("remove-absent");
        store.add_word("science", "Galaxy").unwrap();
        let before = sheet.get(DEFAULT_WORKSHEET);
        sheet.fail_writes.store(true, Ordering::SeqCst);
        assert_eq!(
            store.remove_word("science", "blackhole").unwrap(),
            RemoveOutcome::WordNotFound
        );
        assert_eq!(sheet.get(DEFAULT_WORKSHEET), before);
    }

    #[test]
    fn lists_are_served_from_cache_within_ttl() {
        let (sheet, store) = store("cache-hit");
        sheet.put(
            DEFAULT_WORKSHEET,
            table(&["collection_name", "word"], &[&["animals", "Cat"]]),
        );
        store.list_collections().unwrap();
        store.list_words("animals").unwrap();
        assert_eq!(sheet.read_count(), 1);

        // Another session writes directly; this store keeps its cached view.
        sheet.put(
            DEFAULT_WORKSHEET,
            table(
                &["collection_name", "word"],
                &[&["animals", "Cat"], &["animals", "Dog"]],
            ),
        );
        assert_eq!(
            store.list_words("animals").unwrap(),
            Some(vec!["Cat".to_string()])
        );
    }

    #[test]
    fn zero_ttl_always_reads_through() {
        let (sheet, store) = store("cache-off");
        let store = SheetStore::new(sheet.clone(), store.worksheet().to_string())
            .with_cache_ttl(Duration::ZERO);
        sheet.put(
            DEFAULT_WORKSHEET,
            table(&["collection_name", "word"], &[&["animals", "Cat"]]),
        );
        store.list_collections().unwrap();
        sheet.put(
            DEFAULT_WORKSHEET,
            table(
                &["collection_name", "word"],
                &[&["animals", "Cat"], &["animals", "Dog"]],
            ),
        );
        assert_eq!(
            store.list_collections().unwrap(),
            vec![CollectionSummary::new("animals", 2)]
        );
        assert_eq!(sheet.read_count(), 2);
    }

    #[test]
    fn own_writes_are_visible_immediately() {
        let (sheet, store) = store("own-writes");
        assert!(store.list_collections().unwrap().is_empty());
        store.add_word("animals", "Cat").unwrap();
        let reads = sheet.read_count();
        assert_eq!(
            store.list_words("animals").unwrap(),
            Some(vec!["Cat".to_string()])
        );
        assert_eq!(sheet.read_count(), reads);
    }

    #[test]
    fn mutations_bypass_stale_cache() {
        let (sheet, store) = store("fresh-mutation");
        store.list_collections().unwrap();
        sheet.put(
            DEFAULT_WORKSHEET,
            table(&["collection_name", "word"], &[&["animals", "Cat"]]),
        );
        assert_eq!(
            store.add_word("animals", "CAT").unwrap(),
            AddOutcome::DuplicateWord {
                existing: "Cat".into()
            }
        );
    }

    #[test]
    fn write_failure_is_reported_and_cache_dropped() {
        let (sheet, store) = store("write-fail");
        store.add_word("animals", "Cat").unwrap();
        sheet.fail_writes.store(true, Ordering::SeqCst);
        let err = store.add_word("animals", "Dog").unwrap_err();
        assert!(matches!(err, StoreError::RemoteWrite(_)));
        assert!(err.to_string().contains("quota exceeded"));

        sheet.fail_writes.store(false, Ordering::SeqCst);
        assert_eq!(
            store.list_words("animals").unwrap(),
            Some(vec!["Cat".to_string()])
        );
    }

    #[test]
    fn failed_read_aborts_mutation_without_writing() {
        let (sheet, store) = store("read-fail");
        store.add_word("animals", "Cat").unwrap();
        sheet.fail_reads.store(true, Ordering::SeqCst);
        assert!(store.add_word("animals", "Dog").is_err());
        assert!(store.remove_word("animals", "Cat").is_err());
        assert_eq!(
            sheet.get(DEFAULT_WORKSHEET).unwrap().rows,
            vec![vec!["animals".to_string(), "Cat".to_string()]]
        );
    }

    #[test]
    fn failed_read_lists_as_empty() {
        let (sheet, store) = store("read-fail-list");
        let store = SheetStore::new(sheet.clone(), store.worksheet().to_string())
            .with_cache_ttl(Duration::ZERO);
        sheet.fail_reads.store(true, Ordering::SeqCst);
        assert!(store.list_collections().unwrap().is_empty());
        assert_eq!(store.list_words("animals").unwrap(), None);
    }

    #[test]
    fn malformed_columns_read_as_empty() {
        let (sheet, store) = store("bad-columns");
        sheet.put(DEFAULT_WORKSHEET, table(&["name", "value"], &[&["a", "b"]]));
        assert!(store.list_collections().unwrap().is_empty());
        assert_eq!(store.add_word("animals", "Cat").unwrap(), AddOutcome::Added);
        assert_eq!(
            sheet.get(DEFAULT_WORKSHEET).unwrap().headers,
            vec!["collection_name".to_string(), "word".to_string()]
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        let (_sheet, store) = store("empty-input");
        assert!(matches!(
            store.add_word("", "Cat"),
            Err(StoreError::EmptyField("collection name"))
        ));
        assert!(matches!(
            store.add_word("animals", " "),
            Err(StoreError::EmptyField("word"))
        ));
    }
}
