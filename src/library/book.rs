//! Book record model shared by the client and the tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Language suggestions offered by the add-book form.
///
/// The server does not validate against this list.
pub const LANGUAGES: &[&str] = &[
    "Bengali", "Chinese", "English", "French", "Hindi", "Italian", "Japanese", "Korean",
    "Kannada", "Sanskrit", "Tamil", "Telugu",
];

/// A book as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Book title.
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,

    /// Author name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: String,

    /// Free-text notes.
    #[serde(default, deserialize_with = "lenient_text")]
    pub info: String,

    /// Language name (may be empty).
    #[serde(default, deserialize_with = "lenient_text")]
    pub language: String,

    /// When the book was added; `None` if the stored date is invalid.
    #[serde(rename = "dateAdded", default, deserialize_with = "lenient_date")]
    pub date_added: Option<DateTime<Utc>>,
}

impl Book {
    /// Fields sent on update: everything except the identifier.
    pub fn fields(&self) -> BookFields<'_> {
        BookFields {
            title: &self.title,
            author: &self.author,
            info: &self.info,
            language: &self.language,
            date_added: self.date_added.as_ref(),
        }
    }
}

/// The server stores whatever JSON it is given, so text fields may come back
/// as `null`, numbers or nested values. Scalars keep their text; anything else
/// reads as empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Unparseable or non-string dates read as `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .map(|ts| ts.with_timezone(&Utc))
            .ok(),
        _ => None,
    })
}

/// Borrowed update body for a [`Book`].
#[derive(Debug, Serialize)]
pub struct BookFields<'a> {
    /// Book title.
    pub title: &'a str,
    /// Author name.
    pub author: &'a str,
    /// Free-text notes.
    pub info: &'a str,
    /// Language name.
    pub language: &'a str,
    /// Timestamp echoed back to the server; left out when the book has none.
    #[serde(rename = "dateAdded", skip_serializing_if = "Option::is_none")]
    pub date_added: Option<&'a DateTime<Utc>>,
}

/// A book built on the client, not yet stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Free-text notes.
    pub info: String,
    /// Language name.
    pub language: String,
}

impl BookDraft {
    /// Create a draft with just title and author.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    /// Set the language.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the notes.
    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }
}
