//! Application state shared across handlers.

use crate::config::Config;
use crate::db::Database;
use std::sync::Arc;

/// Shared application state.
///
/// Holds no book data of its own; every request goes straight to the database.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Database connection.
    pub db: Database,
}

impl AppState {
    /// Create new application state with database.
    pub fn new_with_db(config: Config, db: Database) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }

    /// Whether an update that matched but changed nothing is reported as 404.
    pub fn report_unchanged_as_missing(&self) -> bool {
        self.config.books.report_unchanged_as_missing
    }
}
