//! Aggregate statistics over a filtered listing.

use super::models::{Book, Statistics};

/// Pure reducer over the already-filtered record list. The caller passes the
/// exact list it returns to the client, so the numbers always describe that
/// list and never the unfiltered store contents.
pub fn compute(books: &[Book]) -> Statistics {
    let total_books = books.len();
    let out_of_stock_books = books.iter().filter(|book| book.stock == 0).count();
    let total_value: f64 = books
        .iter()
        .map(|book| book.price * book.stock as f64)
        .sum();

    Statistics {
        total_books,
        out_of_stock_books,
        total_value: format!("{total_value:.2}"),
    }
}
