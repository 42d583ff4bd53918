use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{AddOutcome, CreateOutcome, RemoveOutcome, StoreError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Error,
}

/// One user-facing line describing what a store operation did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub level: Level,
    pub message: String,
}

impl Feedback {
    fn new(level: Level, message: String) -> Self {
        Self { level, message }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    pub fn created(name: &str, outcome: &CreateOutcome) -> Self {
        match outcome {
            CreateOutcome::Created => {
                Self::new(Level::Success, format!("Collection '{name}' created."))
            }
            CreateOutcome::AlreadyExists => {
                Self::new(Level::Error, format!("Collection '{name}' already exists."))
            }
        }
    }

    pub fn added(collection: &str, word: &str, outcome: &AddOutcome) -> Self {
        match outcome {
            AddOutcome::Added => {
                Self::new(Level::Success, format!("Added '{word}' to '{collection}'."))
            }
            AddOutcome::DuplicateWord { .. } => Self::new(
                Level::Info,
                format!("Word '{word}' already exists in '{collection}'."),
            ),
            AddOutcome::CollectionNotFound => Self::collection_not_found(collection),
        }
    }

    pub fn removed(collection: &str, word: &str, outcome: &RemoveOutcome) -> Self {
        match outcome {
            RemoveOutcome::Removed { removed } => Self::new(
                Level::Success,
                format!("Removed '{removed}' from '{collection}'."),
            ),
            RemoveOutcome::WordNotFound => Self::new(
                Level::Error,
                format!("Word '{word}' not found in '{collection}'."),
            ),
            RemoveOutcome::CollectionNotFound => Self::collection_not_found(collection),
        }
    }

    pub fn collection_not_found(collection: &str) -> Self {
        Self::new(Level::Error, format!("Collection '{collection}' not found."))
    }

    pub fn failed(err: &StoreError) -> Self {
        Self::new(Level::Error, err.to_string())
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            Level::Success => "Success",
            Level::Info => "Info",
            Level::Error => "Error",
        };
        write!(f, "{}: {}", tag, self.message)
    }
}
