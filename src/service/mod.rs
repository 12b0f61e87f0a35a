//! Generic record repository and schema-driven validation.

mod crud;
mod validation;
pub use crud::CrudRepository;
pub use validation::RecordValidator;
