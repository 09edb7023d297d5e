//! HTTP API
//!
//! Provides:
//! - Poem CRUD (list, fetch by id or cycle, create, patch)
//! - Linked-data views (JSON-LD, Turtle, semantic anchors, word anchors)
//! - Word occurrence lookup
//! - Rendered stanza segments and interactive number edits

pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::export::Exporter;
use crate::store::SharedStore;

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub exporter: Exporter,
}

impl AppState {
    pub fn new(store: SharedStore, exporter: Exporter) -> Self {
        Self { store, exporter }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Poem records
        .route("/api/poems", get(routes::list_poems).post(routes::create_poem))
        .route("/api/poems/cycle/:step", get(routes::get_poem_by_cycle))
        .route("/api/poems/:id", get(routes::get_poem).patch(routes::update_poem))
        // Linked data
        .route("/api/poems/:id/jsonld", get(routes::poem_jsonld))
        .route("/api/poems/:id/rdf", get(routes::poem_rdf))
        .route("/api/poems/:id/semantic-anchors", get(routes::poem_semantic_anchors))
        .route("/api/poems/:id/words", get(routes::poem_words))
        .route("/api/poems/:id/occurrences", get(routes::poem_occurrences))
        // Interactive numbers
        .route("/api/poems/:id/render", get(routes::render_poem))
        .route("/api/poems/:id/edits", post(routes::edit_number))
        // Health check
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
