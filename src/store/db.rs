//! In-memory tables mirrored to a single JSON file.
//!
//! # Responsibilities
//! - Load the table map once at startup, failing safe to empty
//! - insert/select/update/delete over named tables of documents
//! - Persist the whole store after every mutation
//!
//! # Design Decisions
//! - Documents are schemaless JSON objects; only `id` has meaning here
//! - Persist failures surface as `StoreError`, never as a panic
//! - The snapshot is pretty-printed so the data file stays hand-readable

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};
use thiserror::Error;

use super::persist::atomic_write;

/// A single schemaless record within a table.
pub type Document = Map<String, Value>;

type Tables = BTreeMap<String, Vec<Document>>;

/// Error raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Flat-file document store: a map of table name → ordered documents,
/// mirrored to one JSON file after every mutation.
///
/// Constructed explicitly with [`Store::open`] and shared via `Arc`;
/// there is no process-wide instance.
pub struct Store {
    path: PathBuf,
    tables: Mutex<Tables>,
}

impl Store {
    /// Open the store backed by the file at `path`.
    ///
    /// A missing or unparseable file yields an empty store and a fresh
    /// empty snapshot on disk; any other I/O failure is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let loaded = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Tables>(&bytes) {
                Ok(tables) => Some(tables),
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        %error,
                        "Discarding unparseable store file"
                    );
                    None
                }
            },
            Err(error) if error.kind() == io::ErrorKind::NotFound => None,
            Err(error) => return Err(error.into()),
        };

        let fresh = loaded.is_none();
        let store = Self {
            path,
            tables: Mutex::new(loaded.unwrap_or_default()),
        };
        if fresh {
            let tables = store.tables();
            store.persist(&tables)?;
        }

        tracing::debug!(path = %store.path.display(), "Store opened");
        Ok(store)
    }

    /// Append `doc` to `table`, creating the table if absent.
    pub fn insert(&self, table: &str, doc: Document) -> Result<(), StoreError> {
        let mut tables = self.tables();
        tables.entry(table.to_string()).or_default().push(doc);
        self.persist(&tables)
    }

    /// The table's documents in insertion order, or empty if the table
    /// does not exist.
    pub fn select(&self, table: &str) -> Vec<Document> {
        self.tables().get(table).cloned().unwrap_or_default()
    }

    /// Merge `patch` over the first document in `table` whose `id` field
    /// equals `id`. Patch fields overwrite; other fields are retained.
    /// Returns whether a match was found.
    pub fn update(&self, table: &str, id: &str, patch: Document) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let Some(rows) = tables.get_mut(table) else {
            return Ok(false);
        };
        let Some(row) = rows.iter_mut().find(|doc| doc_id(doc) == Some(id)) else {
            return Ok(false);
        };

        for (field, value) in patch {
            row.insert(field, value);
        }
        self.persist(&tables)?;
        Ok(true)
    }

    /// Remove every document in `table` whose `id` field equals `id`.
    /// Returns `true` iff the table shrank.
    pub fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let Some(rows) = tables.get_mut(table) else {
            return Ok(false);
        };

        let before = rows.len();
        rows.retain(|doc| doc_id(doc) != Some(id));
        let removed = rows.len() < before;

        self.persist(&tables)?;
        Ok(removed)
    }

    /// Path of the backing data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, tables: &Tables) -> Result<(), StoreError> {
        let snapshot = serde_json::to_vec_pretty(tables)?;
        atomic_write(&self.path, &snapshot)?;
        Ok(())
    }
}

fn doc_id(doc: &Document) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc(id: &str, name: &str) -> Document {
        match json!({ "id": id, "name": name }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn open_store(dir: &TempDir) -> Store {
        Store::open(dir.path().join("db.json")).unwrap()
    }

    #[test]
    fn test_insert_then_select_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.insert("products", doc("1", "Keyboard")).unwrap();
        store.insert("products", doc("2", "Mouse")).unwrap();

        let rows = store.select("products");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Keyboard");
        assert_eq!(rows[1]["name"], "Mouse");
    }

    #[test]
    fn test_select_missing_table_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        assert!(store.select("nope").is_empty());
    }

    #[test]
    fn test_update_merges_patch_over_existing_fields() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.insert("products", doc("1", "Keyboard")).unwrap();

        let mut patch = Document::new();
        patch.insert("price".to_string(), json!(80));

        assert!(store.update("products", "1", patch).unwrap());

        let rows = store.select("products");
        assert_eq!(rows[0]["name"], "Keyboard");
        assert_eq!(rows[0]["price"], 80);
    }

    #[test]
    fn test_update_absent_id_leaves_table_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.insert("products", doc("1", "Keyboard")).unwrap();

        let mut patch = Document::new();
        patch.insert("name".to_string(), json!("Mouse"));

        assert!(!store.update("products", "9", patch).unwrap());
        assert_eq!(store.select("products")[0]["name"], "Keyboard");
    }

    #[test]
    fn test_update_absent_table_is_false() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        assert!(!store.update("nope", "1", Document::new()).unwrap());
    }

    #[test]
    fn test_delete_removes_exactly_the_matching_document() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.insert("products", doc("1", "Keyboard")).unwrap();
        store.insert("products", doc("2", "Mouse")).unwrap();

        assert!(store.delete("products", "1").unwrap());

        let rows = store.select("products");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "2");
    }

    #[test]
    fn test_delete_absent_id_is_false() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.insert("products", doc("1", "Keyboard")).unwrap();

        assert!(!store.delete("products", "9").unwrap());
        assert_eq!(store.select("products").len(), 1);
    }

    #[test]
    fn test_reload_reproduces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");

        let store = Store::open(&path).unwrap();
        store.insert("products", doc("1", "Keyboard")).unwrap();
        store.insert("orders", doc("a", "First")).unwrap();
        drop(store);

        let reloaded = Store::open(&path).unwrap();
        assert_eq!(reloaded.select("products"), vec![doc("1", "Keyboard")]);
        assert_eq!(reloaded.select("orders"), vec![doc("a", "First")]);
    }

    #[test]
    fn test_missing_file_starts_empty_and_writes_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");

        let store = Store::open(&path).unwrap();
        assert!(store.select("products").is_empty());

        let on_disk: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!({}));
    }

    #[test]
    fn test_corrupt_file_resets_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, b"not json {{{").unwrap();

        let store = Store::open(&path).unwrap();
        assert!(store.select("products").is_empty());

        // The corrupt file was replaced with a valid empty snapshot.
        let on_disk: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!({}));
    }
}
