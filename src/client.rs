//! Client side of the library: API access, state container and screens.

/// HTTP access to the backend.
pub mod api;
/// Add-book form.
pub mod form;
/// Library screen state and rendering.
pub mod screen;
/// In-memory collection mirrored from the backend.
pub mod store;

pub use api::{ApiClient, BookApi, DEFAULT_API_URL};
pub use form::{AddBookForm, SubmitOutcome};
pub use screen::LibraryScreen;
pub use store::BookStore;
