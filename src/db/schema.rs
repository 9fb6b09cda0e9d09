use crate::db::*;
use crate::error::{AppError, Result};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Arc;

/// Database wrapper for thread-safe access.
///
/// Books are kept as JSON documents in a single collection table. Every
/// operation takes the connection lock, so each one is atomic on its own but
/// no sequence of operations is.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open a database from a connection string.
    ///
    /// Accepts `sqlite::memory:`, `sqlite://<path>` or a bare file path.
    pub fn open(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::Config("Database URL is empty".to_string()));
        }

        if matches!(url, "sqlite::memory:" | ":memory:") {
            return Self::open_memory();
        }

        let path = url.strip_prefix("sqlite://").unwrap_or(url);
        Self::open_path(Path::new(path))
    }

    /// Open or create database at the given path.
    pub fn open_path(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Open in-memory database (for testing).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            -- Book documents, in insertion order
            CREATE TABLE IF NOT EXISTS books (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT UNIQUE NOT NULL,
                doc TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| AppError::Database(format!("Failed to initialize schema: {}", e)))?;

        Ok(())
    }

    /// List every document in storage order.
    pub fn list_books(&self) -> Result<Vec<Document>> {
        let rows = {
            let conn = self.conn.lock();
            let mut stmt = conn
                .prepare("SELECT id, doc FROM books ORDER BY seq")
                .map_err(|e| AppError::Database(format!("Failed to prepare query: {}", e)))?;

            stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
                .map_err(|e| AppError::Database(format!("Failed to list books: {}", e)))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| AppError::Database(format!("Failed to collect books: {}", e)))?
        };

        rows.into_iter()
            .map(|(id, doc)| Self::decode(id, &doc))
            .collect()
    }

    /// Count stored documents.
    pub fn count_books(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            .map_err(|e| AppError::Database(format!("Failed to count books: {}", e)))?;
        Ok(count as usize)
    }

    /// Insert a document and return its newly assigned identifier.
    ///
    /// Any `_id` carried by the document is discarded.
    pub fn insert_book(&self, mut doc: Document) -> Result<DocumentId> {
        doc.remove(ID_KEY);
        let id = DocumentId::generate();
        let encoded = serde_json::to_string(&doc)?;

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO books (id, doc) VALUES (?1, ?2)",
            params![id.as_str(), encoded],
        )
        .map_err(|e| AppError::Database(format!("Failed to insert book: {}", e)))?;

        Ok(id)
    }

    /// Get a document by identifier.
    pub fn get_book(&self, id: &DocumentId) -> Result<Option<Document>> {
        let encoded: Option<String> = {
            let conn = self.conn.lock();
            conn.query_row(
                "SELECT doc FROM books WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AppError::Database(format!("Failed to get book: {}", e)))?
        };

        encoded
            .map(|doc| Self::decode(id.to_string(), &doc))
            .transpose()
    }

    /// Delete a document. Returns whether one was removed.
    pub fn delete_book(&self, id: &DocumentId) -> Result<bool> {
        let conn = self.conn.lock();
        let rows = conn
            .execute("DELETE FROM books WHERE id = ?1", params![id.as_str()])
            .map_err(|e| AppError::Database(format!("Failed to delete book: {}", e)))?;
        Ok(rows > 0)
    }

    /// Replace every field of a document except its identifier.
    pub fn replace_book(&self, id: &DocumentId, mut doc: Document) -> Result<ReplaceOutcome> {
        doc.remove(ID_KEY);

        let conn = self.conn.lock();
        let current: Option<String> = conn
            .query_row(
                "SELECT doc FROM books WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AppError::Database(format!("Failed to get book: {}", e)))?;

        let Some(current) = current else {
            return Ok(ReplaceOutcome {
                matched: false,
                modified: false,
            });
        };

        let current: Document = serde_json::from_str(&current)?;
        if current == doc {
            return Ok(ReplaceOutcome {
                matched: true,
                modified: false,
            });
        }

        let encoded = serde_json::to_string(&doc)?;
        conn.execute(
            "UPDATE books SET doc = ?2 WHERE id = ?1",
            params![id.as_str(), encoded],
        )
        .map_err(|e| AppError::Database(format!("Failed to update book: {}", e)))?;

        Ok(ReplaceOutcome {
            matched: true,
            modified: true,
        })
    }

    fn decode(id: String, doc: &str) -> Result<Document> {
        let doc: Document = serde_json::from_str(doc)?;
        let id = DocumentId::parse(&id)
            .map_err(|_| AppError::Database(format!("Corrupt book id in storage: {}", id)))?;
        Ok(with_id(&id, doc))
    }
}
