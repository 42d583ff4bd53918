use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::outcome::{AddOutcome, CollectionSummary, CreateOutcome, RemoveOutcome};

/// Case-insensitive word equality using full Unicode lowercasing.
pub fn same_word(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Human-facing form of a collection name: `-` becomes a space and every
/// whitespace-separated part is title-cased. Never used for identity.
pub fn display_name(name: &str) -> String {
    name.replace('-', " ")
        .split(' ')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Where a newly added word lands in its collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordOrder {
    Sorted,
    Insertion,
}

/// The whole mapping of collection name to words. Serializes as a plain JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    collections: BTreeMap<String, Vec<String>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn words(&self, name: &str) -> Option<&[String]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    pub fn summaries(&self) -> Vec<CollectionSummary> {
        self.collections
            .iter()
            .map(|(name, words)| CollectionSummary::new(name.clone(), words.len()))
            .collect()
    }

    pub fn create_collection(&mut self, name: &str) -> CreateOutcome {
        if self.collections.contains_key(name) {
            return CreateOutcome::AlreadyExists;
        }
        self.collections.insert(name.to_string(), Vec::new());
        CreateOutcome::Created
    }

    pub fn add_word(&mut self, name: &str, word: &str, order: WordOrder) -> AddOutcome {
        let Some(words) = self.collections.get_mut(name) else {
            return AddOutcome::CollectionNotFound;
        };
        if let Some(existing) = words.iter().find(|w| same_word(w, word)) {
            return AddOutcome::DuplicateWord {
                existing: existing.clone(),
            };
        }
        words.push(word.to_string());
        if order == WordOrder::Sorted {
            words.sort();
        }
        AddOutcome::Added
    }

    pub fn remove_word(&mut self, name: &str, word: &str) -> RemoveOutcome {
        let Some(words) = self.collections.get_mut(name) else {
            return RemoveOutcome::CollectionNotFound;
        };
        match words.iter().position(|w| same_word(w, word)) {
            Some(idx) => RemoveOutcome::Removed {
                removed: words.remove(idx),
            },
            None => RemoveOutcome::WordNotFound,
        }
    }
}

impl FromIterator<(String, Vec<String>)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            collections: iter.into_iter().collect(),
        }
    }
}
