//! Cross-resource global search.
//!
//! Each searchable resource declares its attribute list (including one-hop
//! relation paths like `author.name`); matching is a case-insensitive
//! substring test over the attribute text. Missing relations contribute no
//! text and therefore never match or fail.

use crate::directory::AdminDirectory;
use crate::resource::{AdminRecord, GloballySearchable};

/// One global search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Result title (the record's title attribute).
    pub title: String,
    /// Labeled detail lines ("Author" -> "Jane Doe").
    pub details: Vec<(&'static str, String)>,
    /// Link target (the record's edit page).
    pub url: String,
}

/// Search one resource's records for `term`.
#[must_use]
pub fn search_resource<'a, T: GloballySearchable>(
    term: &str,
    records: impl IntoIterator<Item = &'a T::Record>,
    directory: &dyn AdminDirectory,
) -> Vec<SearchHit>
where
    T::Record: 'a,
{
    let term = term.to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    let pages = T::pages();

    records
        .into_iter()
        .filter(|record| {
            T::searchable_attributes().iter().any(|attribute| {
                T::attribute_text(record, attribute, directory)
                    .is_some_and(|text| text.to_lowercase().contains(&term))
            })
        })
        .map(|record| SearchHit {
            title: T::search_title(record),
            details: T::search_details(record, directory),
            url: pages.edit_url(record.record_key()),
        })
        .collect()
}
