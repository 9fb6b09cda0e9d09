//! Library screen: filters, sort order and delete confirmation.

use crate::client::api::BookApi;
use crate::client::store::BookStore;
use crate::library::book::Book;
use crate::library::query::{self, Filters, SortKey};
use std::fmt::Write;

/// Question asked before deleting.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this book?";

/// How many characters of the notes a row shows.
const INFO_PREVIEW_CHARS: usize = 50;

/// Client-only view state for the library list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryScreen {
    filters: Filters,
    sort: SortKey,
    pending_delete: Option<String>,
}

impl LibraryScreen {
    /// Screen with no filters and storage order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current filters.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Current sort key.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Select an author, or all authors with `None` / an empty value.
    pub fn set_author_filter(&mut self, author: Option<String>) {
        self.filters.author = author.filter(|a| !a.is_empty());
    }

    /// Select a language, or all languages with `None` / an empty value.
    pub fn set_language_filter(&mut self, language: Option<String>) {
        self.filters.language = language.filter(|l| !l.is_empty());
    }

    /// Change the sort key. Both filters are cleared.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.filters = Filters::default();
    }

    /// Books to display for the given collection.
    pub fn visible(&self, library: &[Book]) -> Vec<Book> {
        query::project(library, &self.filters, self.sort)
    }

    /// Author choices for the filter picker.
    pub fn authors(&self, library: &[Book]) -> Vec<String> {
        query::distinct_authors(library)
    }

    /// Language choices for the filter picker.
    pub fn languages(&self, library: &[Book]) -> Vec<String> {
        query::distinct_languages(library)
    }

    /// Stage a book for deletion and open the confirmation dialog.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    /// Whether the confirmation dialog is open.
    pub fn is_delete_dialog_open(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Identifier staged for deletion.
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Close the dialog without deleting anything.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the staged book. Returns whether the store removed it.
    ///
    /// The dialog closes either way.
    pub async fn confirm_delete<A: BookApi>(&mut self, store: &BookStore<A>) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };

        tracing::debug!(id = %id, "Confirmed deletion");
        store.remove(&id).await
    }
}

/// Render one list row.
pub fn render_row(book: &Book) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", book.title);
    let _ = writeln!(out, "  by {}", book.author);
    if !book.info.is_empty() {
        let preview: String = book.info.chars().take(INFO_PREVIEW_CHARS).collect();
        let _ = writeln!(out, "  Info: {}...", preview);
    }
    if let Some(added) = book.date_added {
        let _ = writeln!(out, "  Added on: {}", added.format("%Y-%m-%d"));
    }
    let _ = writeln!(out, "  Language: {}", book.language);
    let _ = write!(out, "  Id: {}", book.id);
    out
}
