//! REST surface for one record kind under `/<kebab-plural>`.

use crate::handlers::record::{
    count, create, delete_by_id, find, find_by_id, replace_by_id, update_all, update_by_id,
};
use crate::schema::Record;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn record_routes<E: Record>() -> Router<AppState> {
    let base = format!("/{}", E::schema().path_segment());
    Router::new()
        .route(&base, get(find::<E>).post(create::<E>).patch(update_all::<E>))
        .route(&format!("{}/count", base), get(count::<E>))
        .route(
            &format!("{}/:id", base),
            get(find_by_id::<E>)
                .patch(update_by_id::<E>)
                .put(replace_by_id::<E>)
                .delete(delete_by_id::<E>),
        )
}
