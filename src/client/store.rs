//! Client-side book collection.
//!
//! The store owns the in-memory copy of the library and routes every change
//! through the backend. Local state is only touched after the server has
//! answered successfully; failures are logged and otherwise ignored.

use crate::client::api::BookApi;
use crate::library::book::{Book, BookDraft};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared, cloneable state container for the library.
///
/// Clones share the same collection. Operations are independent: two
/// concurrent calls race and whichever response is applied last wins.
pub struct BookStore<A> {
    api: Arc<A>,
    library: Arc<RwLock<Vec<Book>>>,
}

impl<A> Clone for BookStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            library: Arc::clone(&self.library),
        }
    }
}

impl<A: BookApi> BookStore<A> {
    /// Create an empty store backed by `api`.
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            library: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Backend this store talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the current collection.
    pub fn snapshot(&self) -> Vec<Book> {
        self.library.read().clone()
    }

    /// Number of books held locally.
    pub fn len(&self) -> usize {
        self.library.read().len()
    }

    /// Whether the local collection is empty.
    pub fn is_empty(&self) -> bool {
        self.library.read().is_empty()
    }

    /// Find a book by identifier.
    pub fn get(&self, id: &str) -> Option<Book> {
        self.library.read().iter().find(|b| b.id == id).cloned()
    }

    /// Replace the collection with the server's. Returns whether it succeeded.
    pub async fn load(&self) -> bool {
        match self.api.list().await {
            Ok(books) => {
                tracing::info!(count = books.len(), "Fetched books");
                *self.library.write() = books;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching books");
                false
            }
        }
    }

    /// Create a book and append the stored record.
    pub async fn add(&self, draft: BookDraft) -> Option<Book> {
        match self.api.create(&draft).await {
            Ok(book) => {
                tracing::info!(id = %book.id, title = %book.title, "Book added");
                self.library.write().push(book.clone());
                Some(book)
            }
            Err(e) => {
                tracing::error!(error = %e, title = %draft.title, "Error adding book");
                None
            }
        }
    }

    /// Delete a book and drop it from the collection.
    pub async fn remove(&self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(()) => {
                self.library.write().retain(|b| b.id != id);
                tracing::info!(id, "Book deleted");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, id, "Error deleting book");
                false
            }
        }
    }

    /// Send a full-record update and swap in the server's copy.
    pub async fn update(&self, book: Book) -> Option<Book> {
        match self.api.update(&book).await {
            Ok(updated) => {
                let mut library = self.library.write();
                if let Some(slot) = library.iter_mut().find(|b| b.id == book.id) {
                    *slot = updated.clone();
                }
                tracing::info!(id = %updated.id, "Book updated");
                Some(updated)
            }
            Err(e) => {
                tracing::error!(error = %e, id = %book.id, "Error updating book");
                None
            }
        }
    }
}
