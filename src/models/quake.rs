//! Earthquake records.

use crate::models::GeoPoint;
use crate::schema::{date, FieldDef, FieldKind, Record, RecordSchema};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub static QUAKE_SCHEMA: RecordSchema = RecordSchema {
    name: "Quake",
    collection: "quake",
    description: "Earthquake event merged from USGS, IRIS, NOAA and Novianty catalogues.",
    fields: &[
        FieldDef::required("name", FieldKind::String).title("Name"),
        FieldDef::optional("usgsId", FieldKind::String).title("USGS ID"),
        FieldDef::optional("usgsName", FieldKind::String).title("USGS name"),
        FieldDef::optional("originTime", FieldKind::Date).title("Origin time"),
        FieldDef::optional("usgsOriginTime", FieldKind::Date).title("Origin time (USGS)"),
        FieldDef::optional("irisOriginTime", FieldKind::Date).title("Origin time (IRIS)"),
        FieldDef::optional("noaaLocation", FieldKind::String).title("Location (NOAA)"),
        FieldDef::optional("noviantyRuptureDuration", FieldKind::Number)
            .title("Rupture duration (Novianty)"),
        FieldDef::optional("noviantyPWaveDominantPeriod", FieldKind::Number)
            .title("P-wave dominant period (Novianty)"),
        FieldDef::optional("noviantyMw", FieldKind::Number).title("Mw (Novianty)"),
        FieldDef::optional("mw", FieldKind::Number).title("Mw"),
        FieldDef::optional("usgsMw", FieldKind::Number).title("Mw (USGS)"),
        FieldDef::optional("irisMw", FieldKind::Number).title("Mw (IRIS)"),
        FieldDef::optional("noaaTsunami", FieldKind::Boolean).title("Tsunami potential (NOAA)"),
        FieldDef::optional("noaaTsunamiEventId", FieldKind::Integer).title("NOAA tsunami event ID"),
        FieldDef::optional("usgsDepth", FieldKind::Number).title("Depth (USGS)"),
        FieldDef::optional("collectionName", FieldKind::String).title("Collection name"),
        FieldDef::optional("collectionPos", FieldKind::Integer).title("Collection pos"),
        FieldDef::optional("usgsEpicenter", FieldKind::GeoPoint).title("Epicenter (USGS)"),
        FieldDef::optional("tsunamiSourceId", FieldKind::String)
            .title("Tsunami source ID")
            .describe("Tsunami source ID in QuakeZone database."),
    ],
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quake {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usgs_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usgs_name: Option<String>,
    #[serde(default, with = "date::option", skip_serializing_if = "Option::is_none")]
    pub origin_time: Option<DateTime<Utc>>,
    #[serde(default, with = "date::option", skip_serializing_if = "Option::is_none")]
    pub usgs_origin_time: Option<DateTime<Utc>>,
    #[serde(default, with = "date::option", skip_serializing_if = "Option::is_none")]
    pub iris_origin_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noaa_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub novianty_rupture_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub novianty_p_wave_dominant_period: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub novianty_mw: Option<f64>,
    /// Moment magnitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usgs_mw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iris_mw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noaa_tsunami: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noaa_tsunami_event_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usgs_depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_pos: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usgs_epicenter: Option<GeoPoint>,
    /// Soft reference to a `TsunamiSource` id. Never checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsunami_source_id: Option<String>,
}

impl Quake {
    pub fn new(name: impl Into<String>) -> Self {
        Quake {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Record for Quake {
    fn schema() -> &'static RecordSchema {
        &QUAKE_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
