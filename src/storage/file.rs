use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::lock::ResourceLock;
use super::CollectionStore;
use crate::types::{
    require_non_empty, AddOutcome, Capabilities, CollectionSummary, CreateOutcome, Dataset,
    RemoveOutcome, Result, StoreError, WordOrder,
};

pub const DEFAULT_DATA_FILE: &str = "skribbl_data.json";

/// Why a load did not produce a dataset.
#[derive(Debug)]
enum LoadError {
    Missing,
    Unreadable(io::Error),
    Malformed(serde_json::Error),
}

/// Collection store backed by one pretty-printed JSON document.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: ResourceLock,
}

impl FileStore {
    /// Opens the store, writing an empty mapping when the file is absent or zero-length.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
            }
        }

        let lock = ResourceLock::for_resource(format!("file:{}", resource_key(&path).display()));
        {
            let _guard = lock.acquire();
            let needs_init = match fs::metadata(&path) {
                Ok(meta) => meta.len() == 0,
                Err(e) if e.kind() == io::ErrorKind::NotFound => true,
                Err(e) => return Err(StoreError::io(&path, e)),
            };
            if needs_init {
                log::info!("📄 Initializing empty data file {}", path.display());
                write_dataset(&path, &Dataset::new())?;
            }
        }

        Ok(Self { path, lock })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> std::result::Result<Dataset, LoadError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(LoadError::Missing),
            Err(e) => return Err(LoadError::Unreadable(e)),
        };
        serde_json::from_str(&raw).map_err(LoadError::Malformed)
    }

    /// Reads the dataset, degrading to an empty one when the file is missing or corrupt.
    pub fn read_dataset(&self) -> Dataset {
        match self.load() {
            Ok(data) => data,
            Err(LoadError::Missing) => {
                log::warn!("data file {} is missing, using empty dataset", self.path.display());
                Dataset::new()
            }
            Err(LoadError::Unreadable(e)) => {
                log::warn!(
                    "data file {} is unreadable ({}), using empty dataset",
                    self.path.display(),
                    e
                );
                Dataset::new()
            }
            Err(LoadError::Malformed(e)) => {
                log::warn!(
                    "data file {} is malformed ({}), using empty dataset",
                    self.path.display(),
                    e
                );
                Dataset::new()
            }
        }
    }

    pub fn write_dataset(&self, data: &Dataset) -> Result<()> {
        write_dataset(&self.path, data)
    }

    /// Runs one read-modify-write cycle under the file's lock. `apply` returns
    /// the outcome and whether the dataset changed; unchanged datasets are not written.
    fn mutate<T>(&self, apply: impl FnOnce(&mut Dataset) -> (T, bool)) -> Result<T> {
        let _guard = self.lock.acquire();
        let mut data = self.read_dataset();
        let (outcome, changed) = apply(&mut data);
        if changed {
            self.write_dataset(&data)?;
        }
        Ok(outcome)
    }
}

/// Absolute identity of the data file, usable before the file exists.
fn resource_key(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

fn to_pretty_json(data: &Dataset) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    data.serialize(&mut ser)?;
    out.push(b'\n');
    Ok(out)
}

/// Writes to a sibling temp file and renames it over the target, so a failed
/// write leaves the previous content in place.
fn write_dataset(path: &Path, data: &Dataset) -> Result<()> {
    let bytes = to_pretty_json(data)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    let mut file = fs::File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
    file.write_all(&bytes).map_err(|e| StoreError::io(&tmp, e))?;
    file.sync_all().map_err(|e| StoreError::io(&tmp, e))?;
    drop(file);

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StoreError::io(path, e)
    })
}

impl CollectionStore for FileStore {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            explicit_collections: true,
            sorted_words: true,
        }
    }

    fn create_collection(&self, name: &str) -> Result<CreateOutcome> {
        require_non_empty("collection name", name)?;
        let outcome = self.mutate(|data| {
            let outcome = data.create_collection(name);
            let changed = outcome == CreateOutcome::Created;
            (outcome, changed)
        })?;
        log::debug!("create_collection {:?} -> {:?}", name, outcome);
        Ok(outcome)
    }

    fn add_word(&self, collection: &str, word: &str) -> Result<AddOutcome> {
        require_non_empty("collection name", collection)?;
        require_non_empty("word", word)?;
        let outcome = self.mutate(|data| {
            let outcome = data.add_word(collection, word, WordOrder::Sorted);
            let changed = outcome == AddOutcome::Added;
            (outcome, changed)
        })?;
        log::debug!("add_word {:?}/{:?} -> {:?}", collection, word, outcome);
        Ok(outcome)
    }

    fn remove_word(&self, collection: &str, word: &str) -> Result<RemoveOutcome> {
        require_non_empty("collection name", collection)?;
        require_non_empty("word", word)?;
        let outcome = self.mutate(|data| {
            let outcome = data.remove_word(collection, word);
            let changed = matches!(outcome, RemoveOutcome::Removed { .. });
            (outcome, changed)
        })?;
        log::debug!("remove_word {:?}/{:?} -> {:?}", collection, word, outcome);
        Ok(outcome)
    }

    fn list_collections(&self) -> Result<Vec<CollectionSummary>> {
        Ok(self.read_dataset().summaries())
    }

    fn list_words(&self, collection: &str) -> Result<Option<Vec<String>>> {
        Ok(self.read_dataset().words(collection).map(<[String]>::to_vec))
    }
}
