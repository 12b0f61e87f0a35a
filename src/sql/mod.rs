//! Safe SQL builder: identifiers from record schemas only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
