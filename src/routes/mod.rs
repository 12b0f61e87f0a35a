//! Route tables.

mod common;
mod record;

pub use common::common_routes;
pub use record::record_routes;

use crate::models::{Quake, TsunamiRunup, TsunamiSource};
use crate::state::AppState;
use axum::Router;

/// Record routes for every entity plus the common routes, ready for state.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(common_routes())
        .merge(record_routes::<Quake>())
        .merge(record_routes::<TsunamiSource>())
        .merge(record_routes::<TsunamiRunup>())
}
