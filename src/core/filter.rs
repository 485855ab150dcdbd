//! Free-text search over record sets.
//!
//! Every list screen narrows its rows with the same rule: a record matches
//! when the case-folded query is a substring of at least one of a fixed,
//! per-entity list of fields. The field lists are explicit [`FieldSelector`]
//! arrays rather than reflection over a record's shape, so what a screen
//! searches is visible in one place.
//!
//! Filtering is stable (input order is kept) and has no failure modes: an
//! empty or whitespace-only query returns every record.

use crate::records::{PaymentRecord, PersonRecord, SchoolRecord, TeacherRecord};
use std::borrow::Cow;

/// Reads one searchable field of a record as text.
pub struct FieldSelector<T> {
    label: &'static str,
    read: for<'a> fn(&'a T) -> Cow<'a, str>,
}

impl<T> FieldSelector<T> {
    /// Pairs a field label with its accessor.
    #[must_use]
    pub const fn new(label: &'static str, read: for<'a> fn(&'a T) -> Cow<'a, str>) -> Self {
        Self { label, read }
    }

    /// Name of the field, for diagnostics
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// The field's text for `record`
    #[must_use]
    pub fn read<'a>(&self, record: &'a T) -> Cow<'a, str> {
        (self.read)(record)
    }
}

/// Records with a fixed list of searchable fields.
pub trait Searchable: Sized + 'static {
    /// Fields consulted by [`search`], in display order
    const SEARCH_FIELDS: &'static [FieldSelector<Self>];
}

/// Full Unicode case folding, so `ß`, `SS` and `ss` all compare equal.
fn fold(text: &str) -> String {
    caseless::default_case_fold_str(text)
}

fn optional(value: Option<&str>) -> Cow<'_, str> {
    Cow::Borrowed(value.unwrap_or_default())
}

impl Searchable for PersonRecord {
    const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[
        FieldSelector::new("name", |p| Cow::Borrowed(p.name.as_str())),
        FieldSelector::new("school_name", |p| Cow::Borrowed(p.school_name.as_str())),
        FieldSelector::new("class", |p| Cow::Borrowed(p.class_name.as_str())),
        FieldSelector::new("parent_name", |p| Cow::Borrowed(p.parent_name.as_str())),
    ];
}

impl Searchable for TeacherRecord {
    const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[
        FieldSelector::new("name", |t| Cow::Borrowed(t.name.as_str())),
        FieldSelector::new("school_name", |t| Cow::Borrowed(t.school_name.as_str())),
        FieldSelector::new("total_parents", |t| Cow::Owned(t.total_parents.to_string())),
    ];
}

impl Searchable for SchoolRecord {
    const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[
        FieldSelector::new("name", |s| Cow::Borrowed(s.name.as_str())),
        FieldSelector::new("code", |s| Cow::Borrowed(s.code.as_str())),
        FieldSelector::new("director", |s| optional(s.director.as_deref())),
    ];
}

impl Searchable for PaymentRecord {
    const SEARCH_FIELDS: &'static [FieldSelector<Self>] = &[
        FieldSelector::new("school_name", |p| Cow::Borrowed(p.school_name.as_str())),
        FieldSelector::new("parent_name", |p| optional(p.parent_name.as_deref())),
        FieldSelector::new("student_name", |p| optional(p.student_name.as_deref())),
        FieldSelector::new("transaction_id", |p| optional(p.transaction_id.as_deref())),
    ];
}

/// A case-folded query, ready to be matched against many records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle(Option<String>);

impl Needle {
    /// Folds `query`. Blank queries match everything.
    #[must_use]
    pub fn new(query: &str) -> Self {
        if query.trim().is_empty() {
            Self(None)
        } else {
            Self(Some(fold(query)))
        }
    }

    /// Whether this needle matches every record
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.0.is_none()
    }

    /// True iff some field of `record` contains the needle.
    #[must_use]
    pub fn matches<T>(&self, record: &T, fields: &[FieldSelector<T>]) -> bool {
        let Some(needle) = &self.0 else {
            return true;
        };
        fields
            .iter()
            .any(|field| fold(&field.read(record)).contains(needle.as_str()))
    }
}

/// Returns the records matching `query` on any of `fields`, in input order.
#[must_use]
pub fn filter<T: Clone>(records: &[T], query: &str, fields: &[FieldSelector<T>]) -> Vec<T> {
    let needle = Needle::new(query);
    if needle.is_blank() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| needle.matches(*record, fields))
        .cloned()
        .collect()
}

/// [`filter`] over a record type's own search fields.
#[must_use]
pub fn search<T: Searchable + Clone>(records: &[T], query: &str) -> Vec<T> {
    filter(records, query, T::SEARCH_FIELDS)
}

/// Students matching on name, school, class or parent name.
#[must_use]
pub fn filter_students(records: &[PersonRecord], query: &str) -> Vec<PersonRecord> {
    search(records, query)
}

/// Parent rows matching on ward name, school, class or parent name.
#[must_use]
pub fn filter_parents(records: &[PersonRecord], query: &str) -> Vec<PersonRecord> {
    search(records, query)
}

/// Teachers matching on name, school or parent count.
#[must_use]
pub fn filter_teachers(records: &[TeacherRecord], query: &str) -> Vec<TeacherRecord> {
    search(records, query)
}

/// Schools matching on name, code or director.
#[must_use]
pub fn filter_schools(records: &[SchoolRecord], query: &str) -> Vec<SchoolRecord> {
    search(records, query)
}

/// Payments matching on school, parent, student or transaction id.
#[must_use]
pub fn filter_payments(records: &[PaymentRecord], query: &str) -> Vec<PaymentRecord> {
    search(records, query)
}

/// A record snapshot plus the last query run against it.
///
/// Keystrokes call [`Search::set_query`]; the match list is only rebuilt when
/// the query text actually changes, so re-rendering with the same query is
/// free.
#[derive(Debug, Clone)]
pub struct Search<T> {
    records: Vec<T>,
    query: String,
    matches: Vec<T>,
}

impl<T: Searchable + Clone> Search<T> {
    /// Starts with an empty query, i.e. every record matching.
    #[must_use]
    pub fn new(records: Vec<T>) -> Self {
        let matches = records.clone();
        Self {
            records,
            query: String::new(),
            matches,
        }
    }

    /// Re-runs the search if `query` differs from the previous one.
    pub fn set_query(&mut self, query: &str) -> &[T] {
        if self.query != query {
            self.matches = search(&self.records, query);
            self.query = query.to_string();
        }
        &self.matches
    }

    /// Swaps in a freshly fetched snapshot and re-applies the current query.
    pub fn replace_records(&mut self, records: Vec<T>) {
        self.matches = search(&records, &self.query);
        self.records = records;
    }

    /// The current query text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Records matching the current query
    #[must_use]
    pub fn matches(&self) -> &[T] {
        &self.matches
    }

    /// The full, unfiltered snapshot
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }
}
