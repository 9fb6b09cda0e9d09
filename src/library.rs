//! Book model and the read-only projections the library screen shows.

/// Book record and draft types.
pub mod book;
/// Filtering and sorting of the in-memory collection.
pub mod query;

pub use book::{Book, BookDraft, LANGUAGES};
pub use query::{Filters, SortKey};
