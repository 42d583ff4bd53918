use crate::types::{
    AddOutcome, Capabilities, CollectionSummary, CreateOutcome, RemoveOutcome, Result,
};

/// The store contract shared by every backend.
///
/// Each mutation reads the whole dataset, applies one change and writes the
/// whole dataset back while holding the backing resource's lock. Outcomes that
/// change nothing do not write.
pub trait CollectionStore {
    fn capabilities(&self) -> Capabilities;

    fn create_collection(&self, name: &str) -> Result<CreateOutcome>;

    fn add_word(&self, collection: &str, word: &str) -> Result<AddOutcome>;

    fn remove_word(&self, collection: &str, word: &str) -> Result<RemoveOutcome>;

    /// Every collection with its word count, in no particular order.
    fn list_collections(&self) -> Result<Vec<CollectionSummary>>;

    /// `None` when the collection does not exist, `Some(vec![])` when it is empty.
    fn list_words(&self, collection: &str) -> Result<Option<Vec<String>>>;
}
