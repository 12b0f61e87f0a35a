//! QuakeZone API: REST data access for earthquake and tsunami records.

pub mod case;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod query;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use routes::api_routes;
pub use service::CrudRepository;
pub use settings::{Backend, Settings};
pub use state::AppState;
pub use store::{DocumentStore, MemoryStore, PgStore};

use axum::Router;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Full application router with the middleware stack.
pub fn app(state: AppState, settings: &Settings) -> Router {
    api_routes()
        .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Open the configured backend and create every collection.
pub async fn connect_store(settings: &Settings) -> Result<Arc<dyn DocumentStore>, AppError> {
    let store: Arc<dyn DocumentStore> = match settings.backend {
        Backend::Postgres => Arc::new(PgStore::connect(settings).await?),
        Backend::Memory => Arc::new(MemoryStore::new()),
    };
    for schema in models::all_schemas() {
        store.ensure_collection(schema.collection).await?;
    }
    Ok(store)
}
