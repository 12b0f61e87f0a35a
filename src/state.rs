//! Shared application state for all routes.

use crate::schema::Record;
use crate::service::CrudRepository;
use crate::store::DocumentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// One backend handle for the process, shared by every repository.
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        AppState { store }
    }

    pub fn repository<E: Record>(&self) -> CrudRepository<E> {
        CrudRepository::new(Arc::clone(&self.store))
    }
}
