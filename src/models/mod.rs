//! Record kinds served by the API.

mod quake;
mod tsunami_runup;
mod tsunami_source;

pub use quake::{Quake, QUAKE_SCHEMA};
pub use tsunami_runup::{TsunamiRunup, TSUNAMI_RUNUP_SCHEMA};
pub use tsunami_source::{TsunamiSource, TSUNAMI_SOURCE_SCHEMA};

use crate::schema::RecordSchema;
use serde::{Deserialize, Serialize};

/// Description scale shared by the deaths/missing/injuries/houses `*Description` codes.
pub(crate) const COUNT_SCALE: &str = "Valid values: 0 to 4. 0 = None, 1 = Few (~1 to 50), 2 = Some (~51 to 100), 3 = Many (~101 to 1000), 4 = Very many (~1001 or more).";

/// Description scale for the `damageDescription` codes (1990 dollars).
pub(crate) const DAMAGE_SCALE: &str = "Valid values: 0 to 4. 0 = None, 1 = Limited (< $1 million), 2 = Moderate (~$1 to $5 million), 3 = Severe (~$5 to $24 million), 4 = Extreme (~$25 million or more).";

/// GeoJSON point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

impl GeoPoint {
    pub fn point(longitude: f64, latitude: f64) -> Self {
        GeoPoint {
            kind: "Point".into(),
            coordinates: vec![longitude, latitude],
        }
    }
}

/// Every record schema, in route registration order.
pub fn all_schemas() -> [&'static RecordSchema; 3] {
    [&QUAKE_SCHEMA, &TSUNAMI_SOURCE_SCHEMA, &TSUNAMI_RUNUP_SCHEMA]
}
