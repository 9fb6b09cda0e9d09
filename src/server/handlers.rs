//! HTTP request handlers.
//!
//! Each handler performs exactly one collection operation (plus a read-back
//! after an update). Bodies are not validated beyond being JSON objects.

use crate::db::{self, DATE_ADDED_KEY, Document, DocumentId};
use crate::error::{AppError, Result};
use crate::server::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::Value;

/// Acknowledgment body.
#[derive(Debug, Serialize)]
pub struct Message {
    message: String,
}

impl Message {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse a request body into a document. An empty body is an empty document.
fn parse_document(body: &Bytes) -> Result<Document> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Document::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(other) => Err(AppError::InvalidBody(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(AppError::InvalidBody(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// List every book in storage order.
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    let books = state.db.list_books()?;
    tracing::debug!(count = books.len(), "Listed books");
    Ok(Json(books))
}

/// Store a new book, stamping it with the current time.
pub async fn create_book(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Document>)> {
    let mut doc = parse_document(&body)?;
    doc.insert(DATE_ADDED_KEY.to_string(), db::now_timestamp());
    doc.remove(db::ID_KEY);

    let id = state.db.insert_book(doc.clone())?;
    tracing::info!(id = %id, "Book added");

    Ok((StatusCode::CREATED, Json(db::with_id(&id, doc))))
}

/// Delete a book by identifier.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>> {
    let id = DocumentId::parse(&id)?;

    if state.db.delete_book(&id)? {
        tracing::info!(id = %id, "Book deleted");
        Ok(Json(Message::new("Book deleted successfully")))
    } else {
        Err(AppError::NotFound(id.to_string()))
    }
}

/// Replace every field of a book except its identifier.
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Document>> {
    let id = DocumentId::parse(&id)?;
    let mut doc = parse_document(&body)?;
    let date_added = db::coerce_timestamp(doc.get(DATE_ADDED_KEY));
    doc.insert(DATE_ADDED_KEY.to_string(), date_added);

    let outcome = state.db.replace_book(&id, doc)?;
    let accepted = outcome.modified || (outcome.matched && !state.report_unchanged_as_missing());
    if !accepted {
        tracing::debug!(id = %id, matched = outcome.matched, "Update changed nothing");
        return Err(AppError::NotFound(id.to_string()));
    }

    let updated = state
        .db
        .get_book(&id)?
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    tracing::info!(id = %id, modified = outcome.modified, "Book updated");

    Ok(Json(updated))
}
