mod dataset;
mod outcome;
mod store_error;

pub use dataset::{display_name, same_word, Dataset, WordOrder};
pub use outcome::{AddOutcome, Capabilities, CollectionSummary, CreateOutcome, RemoveOutcome};
pub use store_error::{require_non_empty, Result, StoreError};
