//! Record schemas: explicit field descriptions plus the typed `Record` contract.

pub mod date;
mod fields;
mod record;

pub use fields::*;
pub use record::*;
