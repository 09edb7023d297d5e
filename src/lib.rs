//! spiral-verse: an interactive poem service
//!
//! A poem carries live metrics (chaos, beauty, complexity, coherence,
//! consciousness), a cycle position and a Gödel number. Interactive numbers in
//! its stanzas display those values and editing one writes back to the bound
//! field.
//!
//! ## Modules
//!
//! - **poem**: data model, number resolution, line rendering and edit dispatch
//! - **store**: in-memory record store with the seeded sample poem
//! - **export**: RDF triples, Turtle, JSON-LD and anchor ids
//! - **api**: axum router and HTTP handlers
//! - **config**: TOML configuration with CLI overrides

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod poem;
pub mod store;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::ApiError;
