//! Embedded JSON document store for bookstack.
//!
//! Collections are insertion-ordered maps of `id -> document`. The store
//! assigns identifiers (UUID v7) and creation timestamps on insert, and
//! mirrors its contents to a JSON snapshot file after every mutation when a
//! snapshot path is configured. Without one the store is memory-only.

mod filter;

pub use filter::{Clause, Condition, Filter, Sort, SortOrder};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

/// Document field holding the store-assigned identifier.
pub const ID_FIELD: &str = "id";
/// Document field holding the store-assigned creation timestamp.
pub const CREATED_AT_FIELD: &str = "createdAt";

type Documents = IndexMap<String, Value>;
type Collections = IndexMap<String, Documents>;

/// Errors raised by store operations. `InvalidId` and `NotFound` are
/// distinct conditions: the former means the identifier could never name a
/// record, the latter that a well-formed identifier names nothing.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid identifier '{0}'")]
    InvalidId(String),

    #[error("record not found")]
    NotFound,

    #[error("document must be a JSON object")]
    InvalidDocument,

    #[error("snapshot io failed: {0}")]
    Snapshot(#[from] std::io::Error),

    #[error("snapshot is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Handle to the document store. Cheap to clone; all clones share the same
/// underlying collections.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    collections: RwLock<Collections>,
    snapshot_path: Option<PathBuf>,
}

impl Store {
    /// Create a memory-only store.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                collections: RwLock::new(Collections::default()),
                snapshot_path: None,
            }),
        }
    }

    /// Open a store, loading the snapshot file if one exists at the given
    /// path. A missing file starts an empty store that will be written on
    /// first mutation.
    pub fn open(snapshot_path: Option<&Path>) -> Result<Self, DbError> {
        let collections = match snapshot_path {
            Some(path) if path.exists() => {
                let raw = std::fs::read(path)?;
                let collections: Collections = serde_json::from_slice(&raw)?;
                tracing::info!(
                    path = %path.display(),
                    collections = collections.len(),
                    "loaded store snapshot"
                );
                collections
            }
            _ => Collections::default(),
        };

        Ok(Self {
            inner: Arc::new(StoreInner {
                collections: RwLock::new(collections),
                snapshot_path: snapshot_path.map(Path::to_path_buf),
            }),
        })
    }

    /// Get a handle to a named collection. Collections materialize on first
    /// insert; reading a collection that was never written behaves as empty.
    pub fn collection(&self, name: &str) -> Collection {
        Collection {
            store: self.clone(),
            name: name.to_string(),
        }
    }

    /// Rewrite the snapshot file from current contents (temp file + rename).
    fn persist(&self) -> Result<(), DbError> {
        let Some(path) = &self.inner.snapshot_path else {
            return Ok(());
        };

        let data = {
            let collections = self.inner.collections.read();
            serde_json::to_vec_pretty(&*collections)?
        };

        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Handle to one named collection of documents.
#[derive(Clone)]
pub struct Collection {
    store: Store,
    name: String,
}

impl Collection {
    /// Return all documents matching the filter, in insertion order, then
    /// stable-sorted when a sort is given (ties keep insertion order).
    pub fn find(&self, filter: &Filter, sort: Option<&Sort>) -> Vec<Value> {
        let mut matches: Vec<Value> = {
            let collections = self.store.inner.collections.read();
            collections
                .get(&self.name)
                .map(|docs| {
                    docs.values()
                        .filter(|doc| filter.matches(doc))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };

        if let Some(sort) = sort {
            matches.sort_by(|a, b| sort.compare(a, b));
        }

        matches
    }

    /// Fetch a document by id.
    pub fn get(&self, id: &str) -> Result<Value, DbError> {
        let id = parse_id(id)?;
        let collections = self.store.inner.collections.read();
        collections
            .get(&self.name)
            .and_then(|docs| docs.get(&id))
            .cloned()
            .ok_or(DbError::NotFound)
    }

    /// Insert a document, assigning `id` and `createdAt`. Returns the stored
    /// document.
    pub fn insert(&self, doc: Value) -> Result<Value, DbError> {
        let Value::Object(mut obj) = doc else {
            return Err(DbError::InvalidDocument);
        };

        let id = Uuid::now_v7().to_string();
        obj.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        obj.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(now_rfc3339()),
        );
        let doc = Value::Object(obj);

        {
            let mut collections = self.store.inner.collections.write();
            collections
                .entry(self.name.clone())
                .or_default()
                .insert(id, doc.clone());
        }

        self.store.persist()?;
        Ok(doc)
    }

    /// Merge the keys of `patch` into an existing document. `id` and
    /// `createdAt` are immutable and null values are skipped, so fields
    /// absent from the patch are left unchanged. Returns the updated
    /// document.
    pub fn update(&self, id: &str, patch: Value) -> Result<Value, DbError> {
        let id = parse_id(id)?;
        let Value::Object(patch) = patch else {
            return Err(DbError::InvalidDocument);
        };

        let updated = {
            let mut collections = self.store.inner.collections.write();
            let doc = collections
                .get_mut(&self.name)
                .and_then(|docs| docs.get_mut(&id))
                .ok_or(DbError::NotFound)?;
            let obj = doc.as_object_mut().ok_or(DbError::InvalidDocument)?;

            for (key, value) in patch {
                if key == ID_FIELD || key == CREATED_AT_FIELD || value.is_null() {
                    continue;
                }
                obj.insert(key, value);
            }

            doc.clone()
        };

        self.store.persist()?;
        Ok(updated)
    }

    /// Remove a document by id, returning it.
    pub fn delete(&self, id: &str) -> Result<Value, DbError> {
        let id = parse_id(id)?;

        let removed = {
            let mut collections = self.store.inner.collections.write();
            collections
                .get_mut(&self.name)
                .and_then(|docs| docs.shift_remove(&id))
                .ok_or(DbError::NotFound)?
        };

        self.store.persist()?;
        Ok(removed)
    }
}

/// Validate and normalize an identifier. Anything that does not parse as a
/// UUID is malformed.
fn parse_id(id: &str) -> Result<String, DbError> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|_| DbError::InvalidId(id.to_string()))
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("rfc3339 formatting of the current time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with_books() -> Collection {
        let books = Store::in_memory().collection("books");
        for (title, price) in [("first", 30), ("second", 10), ("third", 20)] {
            books
                .insert(json!({"title": title, "price": price}))
                .unwrap();
        }
        books
    }

    #[test]
    fn insert_assigns_id_and_created_at() {
        let books = Store::in_memory().collection("books");
        let stored = books.insert(json!({"title": "Dune"})).unwrap();

        let id = stored[ID_FIELD].as_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());

        let created_at = stored[CREATED_AT_FIELD].as_str().unwrap();
        assert!(OffsetDateTime::parse(created_at, &Rfc3339).is_ok());

        assert_eq!(stored["title"], "Dune");
    }

    #[test]
    fn get_round_trips_inserted_document() {
        let books = Store::in_memory().collection("books");
        let stored = books.insert(json!({"title": "Dune"})).unwrap();
        let id = stored[ID_FIELD].as_str().unwrap();

        assert_eq!(books.get(id).unwrap(), stored);
        // Stable across repeated reads
        assert_eq!(books.get(id).unwrap(), stored);
    }

    #[test]
    fn get_distinguishes_malformed_id_from_missing() {
        let books = Store::in_memory().collection("books");

        assert!(matches!(
            books.get("not-a-uuid"),
            Err(DbError::InvalidId(_))
        ));
        assert!(matches!(
            books.get(&Uuid::now_v7().to_string()),
            Err(DbError::NotFound)
        ));
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let books = Store::in_memory().collection("books");
        let stored = books
            .insert(json!({"title": "Dune", "price": 9.99}))
            .unwrap();
        let id = stored[ID_FIELD].as_str().unwrap();

        let updated = books.update(id, json!({"price": 12.5})).unwrap();

        assert_eq!(updated["title"], "Dune");
        assert_eq!(updated["price"], 12.5);
        assert_eq!(updated[ID_FIELD], stored[ID_FIELD]);
        assert_eq!(updated[CREATED_AT_FIELD], stored[CREATED_AT_FIELD]);
    }

    #[test]
    fn update_cannot_overwrite_id_or_created_at() {
        let books = Store::in_memory().collection("books");
        let stored = books.insert(json!({"title": "Dune"})).unwrap();
        let id = stored[ID_FIELD].as_str().unwrap();

        let updated = books
            .update(id, json!({"id": "hijacked", "createdAt": "1970-01-01T00:00:00Z"}))
            .unwrap();

        assert_eq!(updated[ID_FIELD], stored[ID_FIELD]);
        assert_eq!(updated[CREATED_AT_FIELD], stored[CREATED_AT_FIELD]);
    }

    #[test]
    fn update_missing_or_malformed_id_fails() {
        let books = Store::in_memory().collection("books");

        assert!(matches!(
            books.update("garbage", json!({})),
            Err(DbError::InvalidId(_))
        ));
        assert!(matches!(
            books.update(&Uuid::now_v7().to_string(), json!({})),
            Err(DbError::NotFound)
        ));
    }

    #[test]
    fn delete_returns_the_removed_document() {
        let books = Store::in_memory().collection("books");
        let stored = books.insert(json!({"title": "Dune"})).unwrap();
        let id = stored[ID_FIELD].as_str().unwrap();

        let removed = books.delete(id).unwrap();
        assert_eq!(removed, stored);
        assert!(matches!(books.get(id), Err(DbError::NotFound)));
    }

    #[test]
    fn delete_missing_or_malformed_id_fails() {
        let books = Store::in_memory().collection("books");

        assert!(matches!(
            books.delete("garbage"),
            Err(DbError::InvalidId(_))
        ));
        assert!(matches!(
            books.delete(&Uuid::now_v7().to_string()),
            Err(DbError::NotFound)
        ));
    }

    #[test]
    fn find_filters_and_sorts() {
        let books = store_with_books();

        let all = books.find(&Filter::new(), Some(&Sort::ascending("price")));
        let prices: Vec<i64> = all.iter().map(|doc| doc["price"].as_i64().unwrap()).collect();
        assert_eq!(prices, vec![10, 20, 30]);

        let all = books.find(&Filter::new(), Some(&Sort::descending("price")));
        let prices: Vec<i64> = all.iter().map(|doc| doc["price"].as_i64().unwrap()).collect();
        assert_eq!(prices, vec![30, 20, 10]);

        let filtered = books.find(
            &Filter::new().and(Condition::contains("title", "IR")),
            None,
        );
        assert_eq!(filtered.len(), 2); // "first" and "third"
    }

    #[test]
    fn find_with_unknown_sort_field_keeps_insertion_order() {
        let books = store_with_books();

        let unsorted = books.find(&Filter::new(), None);
        let sorted = books.find(&Filter::new(), Some(&Sort::descending("nonexistent")));

        assert_eq!(sorted, unsorted);
    }

    #[test]
    fn find_on_unknown_collection_is_empty() {
        let store = Store::in_memory();
        assert!(store.collection("nothing").find(&Filter::new(), None).is_empty());
    }

    #[test]
    fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let stored = {
            let store = Store::open(Some(path.as_path())).unwrap();
            store
                .collection("books")
                .insert(json!({"title": "Dune"}))
                .unwrap()
        };

        let reopened = Store::open(Some(path.as_path())).unwrap();
        let books = reopened.collection("books");
        let id = stored[ID_FIELD].as_str().unwrap();

        assert_eq!(books.get(id).unwrap(), stored);
    }
}
