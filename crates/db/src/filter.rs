//! Predicate and ordering primitives for document queries.

use std::cmp::Ordering;

use serde_json::Value;

/// A single match condition: case-insensitive literal substring containment
/// on a string field. The needle is plain text, never a pattern — `.` and
/// `*` match themselves.
#[derive(Debug, Clone)]
pub struct Condition {
    field: String,
    needle: String,
}

impl Condition {
    pub fn contains(field: impl Into<String>, needle: impl AsRef<str>) -> Self {
        Self {
            field: field.into(),
            needle: needle.as_ref().to_lowercase(),
        }
    }

    /// Check if a document matches this condition. Missing and non-string
    /// fields never match.
    pub fn matches(&self, doc: &Value) -> bool {
        doc.get(&self.field)
            .and_then(Value::as_str)
            .map(|text| text.to_lowercase().contains(&self.needle))
            .unwrap_or(false)
    }
}

/// One restriction in a filter: a disjunction of conditions. A clause
/// matches when any of its conditions matches.
#[derive(Debug, Clone)]
pub struct Clause {
    any: Vec<Condition>,
}

impl Clause {
    pub fn any_of(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            any: conditions.into_iter().collect(),
        }
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.any.iter().any(|condition| condition.matches(doc))
    }
}

impl From<Condition> for Clause {
    fn from(condition: Condition) -> Self {
        Self {
            any: vec![condition],
        }
    }
}

/// A conjunction of clauses. The empty filter matches every document.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: impl Into<Clause>) -> Self {
        self.clauses.push(clause.into());
        self
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.clauses.iter().all(|clause| clause.matches(doc))
    }
}

/// Sort direction for [`Sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Ordering over a single document field.
#[derive(Debug, Clone)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }

    /// Compare two documents by the sort field. Used with a stable sort, so
    /// documents that compare equal keep their insertion order.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let ordering = compare_fields(a.get(&self.field), b.get(&self.field));
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Fields that are absent on either side compare equal, so sorting by a
/// field no document carries is a no-op.
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_values(a, b),
        _ => Ordering::Equal,
    }
}

/// Compare two JSON values for ordering. Mismatched types compare equal
/// rather than imposing an arbitrary cross-type order.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn condition_matches_case_insensitive_substring() {
        let doc = json!({"title": "The Rust Programming Language"});

        assert!(Condition::contains("title", "rust").matches(&doc));
        assert!(Condition::contains("title", "PROGRAMMING").matches(&doc));
        assert!(!Condition::contains("title", "python").matches(&doc));
    }

    #[test]
    fn condition_needle_is_literal_not_a_pattern() {
        let doc = json!({"title": "Web 2.0 Design"});

        assert!(Condition::contains("title", "2.0").matches(&doc));
        // "." must not act as a wildcard
        assert!(!Condition::contains("title", "2x0").matches(&doc));
        assert!(!Condition::contains("title", ".*").matches(&doc));
    }

    #[test]
    fn condition_missing_or_non_string_field_never_matches() {
        let doc = json!({"price": 12.5});

        assert!(!Condition::contains("title", "anything").matches(&doc));
        assert!(!Condition::contains("price", "12").matches(&doc));
    }

    #[test]
    fn clause_is_a_disjunction() {
        let doc = json!({"title": "Dune", "author": "Frank Herbert"});
        let clause = Clause::any_of([
            Condition::contains("title", "foundation"),
            Condition::contains("author", "herbert"),
        ]);

        assert!(clause.matches(&doc));
    }

    #[test]
    fn filter_is_a_conjunction_of_clauses() {
        let doc = json!({"title": "Dune", "author": "Frank Herbert", "genre": "Sci-Fi"});

        let filter = Filter::new()
            .and(Condition::contains("genre", "sci"))
            .and(Condition::contains("author", "frank"));
        assert!(filter.matches(&doc));

        let filter = Filter::new()
            .and(Condition::contains("genre", "sci"))
            .and(Condition::contains("author", "asimov"));
        assert!(!filter.matches(&doc));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::new().matches(&json!({"anything": 1})));
    }

    #[test]
    fn sort_compares_numbers_and_strings() {
        let cheap = json!({"price": 10, "title": "abc"});
        let dear = json!({"price": 30.5, "title": "xyz"});

        let by_price = Sort::ascending("price");
        assert_eq!(by_price.compare(&cheap, &dear), Ordering::Less);
        let by_price = Sort::descending("price");
        assert_eq!(by_price.compare(&cheap, &dear), Ordering::Greater);

        let by_title = Sort::ascending("title");
        assert_eq!(by_title.compare(&cheap, &dear), Ordering::Less);
    }

    #[test]
    fn sort_by_unknown_field_compares_equal() {
        let a = json!({"price": 10});
        let b = json!({"price": 30});

        let sort = Sort::descending("no_such_field");
        assert_eq!(sort.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn sort_with_field_absent_on_one_side_compares_equal() {
        let a = json!({"publishedYear": 1999});
        let b = json!({"title": "no year"});

        let sort = Sort::ascending("publishedYear");
        assert_eq!(sort.compare(&a, &b), Ordering::Equal);
    }
}
