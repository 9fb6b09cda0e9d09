//! Add-book form.

use crate::client::api::BookApi;
use crate::client::store::BookStore;
use crate::library::book::{Book, BookDraft, LANGUAGES};

/// Alert shown when title or author is missing.
pub const MISSING_FIELDS_ALERT: &str = "Please enter at least title and author.";

/// What happened on submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Title or author was blank; nothing was sent.
    Rejected(&'static str),
    /// The server stored the book; the form was cleared.
    Added(Book),
    /// The request failed; the form keeps its contents.
    Failed,
}

/// Form fields for a new book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddBookForm {
    /// Title input.
    pub title: String,
    /// Author input.
    pub author: String,
    /// Notes input.
    pub info: String,
    /// Selected language; empty means none selected.
    pub language: String,
}

impl AddBookForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Language choices for the selector.
    pub fn language_options() -> &'static [&'static str] {
        LANGUAGES
    }

    /// Draft built from the fields, or `None` if title or author is blank.
    pub fn draft(&self) -> Option<BookDraft> {
        if self.title.trim().is_empty() || self.author.trim().is_empty() {
            return None;
        }

        Some(BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            info: self.info.clone(),
            language: self.language.clone(),
        })
    }

    /// Reset every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate and submit the form through the store.
    pub async fn submit<A: BookApi>(&mut self, store: &BookStore<A>) -> SubmitOutcome {
        let Some(draft) = self.draft() else {
            return SubmitOutcome::Rejected(MISSING_FIELDS_ALERT);
        };

        match store.add(draft).await {
            Some(book) => {
                self.clear();
                SubmitOutcome::Added(book)
            }
            None => SubmitOutcome::Failed,
        }
    }
}
