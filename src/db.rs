mod schema;

pub use schema::Database;

use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fmt;

/// Key under which a document's identifier is exposed.
pub const ID_KEY: &str = "_id";

/// Key under which a document's creation timestamp is stored.
pub const DATE_ADDED_KEY: &str = "dateAdded";

/// A stored book document: an arbitrary JSON object.
pub type Document = Map<String, Value>;

/// Server-assigned document identifier (32 lowercase hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Parse an identifier received from a client.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() == 32 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(AppError::InvalidId(raw.to_string()))
        }
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a full-document replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// A document with the given id existed.
    pub matched: bool,
    /// The stored document changed.
    pub modified: bool,
}

/// Format a timestamp the way documents store it.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as a stored timestamp value.
pub fn now_timestamp() -> Value {
    Value::String(format_timestamp(Utc::now()))
}

/// Coerce a client-supplied `dateAdded` into a stored timestamp.
///
/// RFC 3339 strings and plain `YYYY-MM-DD` dates are normalized, numbers are
/// milliseconds since the epoch, and `null` is the epoch itself. Anything else,
/// including a missing value, is an invalid date and is stored as `null`.
pub fn coerce_timestamp(value: Option<&Value>) -> Value {
    let parsed = match value {
        Some(Value::String(s)) => parse_date_string(s),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Some(Value::Null) => DateTime::from_timestamp_millis(0),
        _ => None,
    };

    parsed
        .map(|ts| Value::String(format_timestamp(ts)))
        .unwrap_or(Value::Null)
}

fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// Attach an identifier to a stored document for output.
pub fn with_id(id: &DocumentId, mut doc: Document) -> Document {
    doc.insert(ID_KEY.to_string(), Value::String(id.to_string()));
    doc
}
