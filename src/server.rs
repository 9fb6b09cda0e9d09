//! HTTP server and routes.

mod handlers;
mod state;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(
            "/api/books/{id}",
            put(handlers::update_book).delete(handlers::delete_book),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
