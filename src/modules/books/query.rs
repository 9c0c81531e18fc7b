//! Query-string parameters of the listing endpoint and their translation
//! into a store predicate.

use bookstack_db::{Clause, Condition, Filter, Sort};
use serde::Deserialize;

/// Filter and sort parameters accepted by `GET /api/books`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListParams {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListParams {
    /// Build the store predicate. `search` matches any of title/author/genre
    /// as a case-insensitive substring; `genre` and `author` are independent
    /// restrictions; everything combines with AND. Absent and empty
    /// parameters impose no restriction.
    pub fn filter(&self) -> Filter {
        let mut filter = Filter::new();

        if let Some(search) = non_empty(&self.search) {
            filter = filter.and(Clause::any_of([
                Condition::contains("title", search),
                Condition::contains("author", search),
                Condition::contains("genre", search),
            ]));
        }
        if let Some(genre) = non_empty(&self.genre) {
            filter = filter.and(Condition::contains("genre", genre));
        }
        if let Some(author) = non_empty(&self.author) {
            filter = filter.and(Condition::contains("author", author));
        }

        filter
    }

    /// Build the sort. Defaults to newest-first; only the literal `desc`
    /// selects descending when the parameter is present.
    pub fn sort(&self) -> Sort {
        let field = self.sort_by.as_deref().unwrap_or(bookstack_db::CREATED_AT_FIELD);

        match self.sort_order.as_deref() {
            Some(order) if order != "desc" => Sort::ascending(field),
            _ => Sort::descending(field),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}
