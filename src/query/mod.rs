//! Filter and predicate language carried in the `filter` and `where` query parameters.

pub mod eval;
mod filter;
mod predicate;

pub use filter::*;
pub use predicate::*;
