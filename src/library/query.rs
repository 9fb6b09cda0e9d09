//! Pure projections over the in-memory collection.
//!
//! Nothing here is cached; the screen recomputes the visible list from the
//! base collection whenever it renders.

use crate::library::book::Book;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Author and language filters; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Exact author to keep.
    pub author: Option<String>,
    /// Exact language to keep.
    pub language: Option<String>,
}

impl Filters {
    /// Whether a book passes both filters.
    pub fn matches(&self, book: &Book) -> bool {
        self.author.as_deref().is_none_or(|a| book.author == a)
            && self.language.as_deref().is_none_or(|l| book.language == l)
    }
}

/// Orderings offered by the library screen.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SortKey {
    /// Storage order.
    #[default]
    None,
    /// Title, A to Z.
    TitleAsc,
    /// Title, Z to A.
    TitleDesc,
    /// Author, A to Z.
    Author,
    /// Language, A to Z.
    Language,
    /// Newest first.
    DateDesc,
    /// Oldest first.
    DateAsc,
}

impl SortKey {
    /// All keys, in menu order.
    pub const ALL: [SortKey; 7] = [
        SortKey::None,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::Author,
        SortKey::Language,
        SortKey::DateDesc,
        SortKey::DateAsc,
    ];

    /// Wire/CLI name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::TitleAsc => "title_asc",
            SortKey::TitleDesc => "title_desc",
            SortKey::Author => "author",
            SortKey::Language => "language",
            SortKey::DateDesc => "date_desc",
            SortKey::DateAsc => "date_asc",
        }
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "None",
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
            SortKey::Author => "Author",
            SortKey::Language => "Language",
            SortKey::DateDesc => "Date Added (Newest First)",
            SortKey::DateAsc => "Date Added (Oldest First)",
        }
    }

    /// Compare two books under this key.
    ///
    /// Undated books come before dated ones when ascending and after them
    /// when descending.
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortKey::None => Ordering::Equal,
            SortKey::TitleAsc => a.title.cmp(&b.title),
            SortKey::TitleDesc => b.title.cmp(&a.title),
            SortKey::Author => a.author.cmp(&b.author),
            SortKey::Language => a.language.cmp(&b.language),
            SortKey::DateDesc => b.date_added.cmp(&a.date_added),
            SortKey::DateAsc => a.date_added.cmp(&b.date_added),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter then sort a collection into the list the screen shows.
pub fn project(library: &[Book], filters: &Filters, sort: SortKey) -> Vec<Book> {
    let mut visible: Vec<Book> = library
        .iter()
        .filter(|book| filters.matches(book))
        .cloned()
        .collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

/// Distinct non-empty authors, in first-seen order.
pub fn distinct_authors(library: &[Book]) -> Vec<String> {
    distinct(library.iter().map(|b| b.author.as_str()))
}

/// Distinct non-empty languages, in first-seen order.
pub fn distinct_languages(library: &[Book]) -> Vec<String> {
    distinct(library.iter().map(|b| b.language.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}
