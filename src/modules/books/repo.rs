//! Typed bridge between the books module and the document store.

use bookstack_db::{Collection, DbError, Filter, Sort, Store};
use bookstack_http::error::AppError;
use serde_json::Value;

use super::models::{Book, UpdateBook};
use super::validate::NewBook;

const COLLECTION: &str = "books";

/// Book-typed view of the store's `books` collection. Cheap to clone.
#[derive(Clone)]
pub struct BookRepo {
    books: Collection,
}

impl BookRepo {
    pub fn new(store: &Store) -> Self {
        Self {
            books: store.collection(COLLECTION),
        }
    }

    /// Filtered, sorted listing.
    pub fn list(&self, filter: &Filter, sort: &Sort) -> Result<Vec<Book>, AppError> {
        self.books
            .find(filter, Some(sort))
            .into_iter()
            .map(decode)
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<Book, AppError> {
        self.books.get(id).map_err(map_db_error).and_then(decode)
    }

    /// Insert a validated record; the store assigns `id` and `createdAt`.
    pub fn create(&self, book: &NewBook) -> Result<Book, AppError> {
        let doc = encode(book)?;
        self.books
            .insert(doc)
            .map_err(map_db_error)
            .and_then(decode)
    }

    /// Apply a validated partial update; unsupplied fields stay unchanged.
    pub fn update(&self, id: &str, patch: &UpdateBook) -> Result<Book, AppError> {
        let patch = encode(patch)?;
        self.books
            .update(id, patch)
            .map_err(map_db_error)
            .and_then(decode)
    }

    /// Remove a record, returning it.
    pub fn delete(&self, id: &str) -> Result<Book, AppError> {
        self.books.delete(id).map_err(map_db_error).and_then(decode)
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to encode book payload: {e}")))
}

fn decode(doc: Value) -> Result<Book, AppError> {
    serde_json::from_value(doc)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored book is not decodable: {e}")))
}

/// Map store failures onto the HTTP error taxonomy. Anything beyond a bad or
/// unknown id is an internal error; the client gets a generic message and
/// the detail stays in the logs.
fn map_db_error(err: DbError) -> AppError {
    match err {
        DbError::InvalidId(_) => AppError::bad_request("Invalid book ID"),
        DbError::NotFound => AppError::not_found("Book not found"),
        other => AppError::Internal(other.into()),
    }
}
