use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// `existing` is the stored spelling that matched.
    DuplicateWord { existing: String },
    CollectionNotFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// `removed` is the stored spelling, which may differ in case from the request.
    Removed { removed: String },
    WordNotFound,
    CollectionNotFound,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub name: String,
    pub word_count: usize,
}

impl CollectionSummary {
    pub fn new(name: impl Into<String>, word_count: usize) -> Self {
        Self {
            name: name.into(),
            word_count,
        }
    }
}

/// What a backend can represent. Lets callers detect the file/sheet asymmetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Empty collections can be created and survive losing their last word.
    pub explicit_collections: bool,
    /// Words are kept sorted after every insertion.
    pub sorted_words: bool,
}
