//! HTTP handlers for the books module.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use bookstack_http::error::AppError;

use super::models::{Book, BookListResponse, CreateBook, DeleteResponse, UpdateBook};
use super::query::ListParams;
use super::repo::BookRepo;
use super::{stats, validate};

/// Build the books router; mounted by the kernel under `/api/books`.
pub fn router(repo: BookRepo) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/health", get(health_check))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(repo)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

/// List books matching the filter parameters, with aggregate statistics
/// computed over exactly the returned set.
async fn list_books(
    State(repo): State<BookRepo>,
    Query(params): Query<ListParams>,
) -> Result<Json<BookListResponse>, AppError> {
    let books = repo.list(&params.filter(), &params.sort())?;
    let statistics = stats::compute(&books);

    Ok(Json(BookListResponse { books, statistics }))
}

/// Fetch a single book by id
async fn get_book(
    State(repo): State<BookRepo>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(repo.get(&id)?))
}

/// Create a book; the stored record with assigned id and timestamp comes
/// back with status 201.
async fn create_book(
    State(repo): State<BookRepo>,
    Json(input): Json<CreateBook>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = validate::validate_create(input)?;
    let stored = repo.create(&book)?;

    tracing::info!(id = %stored.id, title = %stored.title, "book created");
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Partially update a book; unsupplied fields are left unchanged.
async fn update_book(
    State(repo): State<BookRepo>,
    Path(id): Path<String>,
    Json(input): Json<UpdateBook>,
) -> Result<Json<Book>, AppError> {
    let patch = validate::validate_update(input)?;
    Ok(Json(repo.update(&id, &patch)?))
}

/// Delete a book, returning the removed record
async fn delete_book(
    State(repo): State<BookRepo>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let book = repo.delete(&id)?;

    tracing::info!(id = %book.id, "book deleted");
    Ok(Json(DeleteResponse {
        message: "Book deleted successfully".to_string(),
        book,
    }))
}
