use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A book record as stored and served. `id` and `createdAt` are assigned by
/// the store on insert and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier for the book
    pub id: String,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Genre, free text (the UI offers suggestions but anything goes)
    pub genre: String,
    /// Unit price, non-negative
    pub price: f64,
    /// Units in inventory
    pub stock: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Request payload for creating a book. Required fields are optional here so
/// the validator can report what is missing instead of a bare decode error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub published_year: Option<i32>,
}

/// Partial update payload. Only supplied fields are applied; everything else
/// is left unchanged by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateBook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
}

/// Aggregate statistics over a filtered listing. `total_value` is rendered
/// with exactly two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_books: usize,
    pub out_of_stock_books: usize,
    pub total_value: String,
}

/// Response body of the listing endpoint. The statistics always describe
/// the same record set carried in `books`.
#[derive(Debug, Clone, Serialize)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub statistics: Statistics,
}

/// Response body of the delete endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub book: Book,
}
