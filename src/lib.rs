//! book-library: a personal book library.
//!
//! This crate provides a small JSON REST service that stores book records
//! in a single document collection, and a client that mirrors the collection
//! in memory and lets a user add, browse, filter, sort and delete books.
//!
//! # Features
//!
//! - Four routes under `/api/books`: list, create, update, delete
//! - Server-assigned identifiers and creation timestamps
//! - Client state container with server-confirmed updates
//! - Filtering by author and language, six sort orders
//! - Terminal client with delete confirmation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Client state, API access and screens.
pub mod client;
/// Configuration and CLI.
pub mod config;
/// Database operations.
pub mod db;
/// Error types.
pub mod error;
/// Book model and projections.
pub mod library;
/// HTTP server.
pub mod server;


pub use config::{Cli, Command, Config};
pub use db::Database;
pub use error::{AppError, Result};
pub use server::AppState;
