//! Book API client.

use crate::error::{AppError, Result};
use crate::library::book::{Book, BookDraft};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::future::Future;

/// Base URL used when none is given.
///
/// Android emulators reach the host machine through 10.0.2.2.
#[cfg(target_os = "android")]
pub const DEFAULT_API_URL: &str = "http://10.0.2.2:5000/api";

/// Base URL used when none is given.
#[cfg(not(target_os = "android"))]
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Operations the backend offers on the book collection.
pub trait BookApi: Send + Sync {
    /// Fetch every book.
    fn list(&self) -> impl Future<Output = Result<Vec<Book>>> + Send;

    /// Create a book from a draft; returns the stored record.
    fn create(&self, draft: &BookDraft) -> impl Future<Output = Result<Book>> + Send;

    /// Delete a book by identifier.
    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Replace a book's fields; returns the refreshed record.
    fn update(&self, book: &Book) -> impl Future<Output = Result<Book>> + Send;
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// reqwest-backed [`BookApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://host:5000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(base_url = %base_url, "API client created");
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn books_url(&self) -> String {
        format!("{}/books", self.base_url)
    }

    fn book_url(&self, id: &str) -> String {
        format!("{}/books/{}", self.base_url, urlencoding::encode(id))
    }

    /// Turn a non-success response into an [`AppError::Api`].
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text
                }
            });

        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl BookApi for ApiClient {
    async fn list(&self) -> Result<Vec<Book>> {
        let response = self.client.get(self.books_url()).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create(&self, draft: &BookDraft) -> Result<Book> {
        let response = self.client.post(self.books_url()).json(draft).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let response = self.client.delete(self.book_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<Book> {
        let response = self
            .client
            .put(self.book_url(&book.id))
            .json(&book.fields())
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}
