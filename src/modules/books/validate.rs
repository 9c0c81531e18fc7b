//! Record validation for the write path.

use bookstack_http::error::AppError;
use serde::Serialize;
use serde_json::json;

use super::models::{CreateBook, UpdateBook};

const REQUIRED_MESSAGE: &str = "Title, author, genre, and price are required";
const EMPTY_MESSAGE: &str = "Title, author, and genre cannot be empty";
const NEGATIVE_PRICE_MESSAGE: &str = "Price cannot be negative";
const NEGATIVE_STOCK_MESSAGE: &str = "Stock cannot be negative";

/// An accepted, normalized create payload: required fields resolved, text
/// fields trimmed, stock defaulted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: f64,
    pub stock: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
}

/// Validate a create payload. All missing required fields are reported
/// together; price and stock sign checks follow.
pub fn validate_create(input: CreateBook) -> Result<NewBook, AppError> {
    let title = trimmed(input.title.as_deref());
    let author = trimmed(input.author.as_deref());
    let genre = trimmed(input.genre.as_deref());

    let mut missing = Vec::new();
    if title.is_none() {
        missing.push(required("title"));
    }
    if author.is_none() {
        missing.push(required("author"));
    }
    if genre.is_none() {
        missing.push(required("genre"));
    }
    if input.price.is_none() {
        missing.push(required("price"));
    }
    if !missing.is_empty() {
        return Err(AppError::validation(missing, REQUIRED_MESSAGE));
    }

    let price = input.price.unwrap_or_default();
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation(
            vec![json!({"field": "price", "error": "negative"})],
            NEGATIVE_PRICE_MESSAGE,
        ));
    }

    let stock = input.stock.unwrap_or(0);
    if stock < 0 {
        return Err(AppError::validation(
            vec![json!({"field": "stock", "error": "negative"})],
            NEGATIVE_STOCK_MESSAGE,
        ));
    }

    Ok(NewBook {
        title: title.unwrap_or_default(),
        author: author.unwrap_or_default(),
        genre: genre.unwrap_or_default(),
        price,
        stock: stock as u64,
        published_year: input.published_year,
    })
}

/// Validate an update payload. Checks apply only to supplied fields; the
/// result has its text fields trimmed.
pub fn validate_update(input: UpdateBook) -> Result<UpdateBook, AppError> {
    let title = input.title.map(|text| text.trim().to_string());
    let author = input.author.map(|text| text.trim().to_string());
    let genre = input.genre.map(|text| text.trim().to_string());

    let mut empty = Vec::new();
    if title.as_deref().is_some_and(str::is_empty) {
        empty.push(json!({"field": "title", "error": "empty"}));
    }
    if author.as_deref().is_some_and(str::is_empty) {
        empty.push(json!({"field": "author", "error": "empty"}));
    }
    if genre.as_deref().is_some_and(str::is_empty) {
        empty.push(json!({"field": "genre", "error": "empty"}));
    }
    if !empty.is_empty() {
        return Err(AppError::validation(empty, EMPTY_MESSAGE));
    }

    if input.price.is_some_and(|price| !price.is_finite() || price < 0.0) {
        return Err(AppError::validation(
            vec![json!({"field": "price", "error": "negative"})],
            NEGATIVE_PRICE_MESSAGE,
        ));
    }

    if input.stock.is_some_and(|stock| stock < 0) {
        return Err(AppError::validation(
            vec![json!({"field": "stock", "error": "negative"})],
            NEGATIVE_STOCK_MESSAGE,
        ));
    }

    Ok(UpdateBook {
        title,
        author,
        genre,
        price: input.price,
        stock: input.stock,
        published_year: input.published_year,
    })
}

fn required(field: &str) -> serde_json::Value {
    json!({"field": field, "error": "required"})
}

/// Trim a text field, mapping absent and blank values to `None`.
fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
