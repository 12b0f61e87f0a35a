//! Tsunami runup observations: where tsunami effects occurred, with arrival, heights and damage.

use crate::models::{COUNT_SCALE, DAMAGE_SCALE};
use crate::schema::{FieldDef, FieldKind, Record, RecordSchema};
use serde::{Deserialize, Serialize};

pub static TSUNAMI_RUNUP_SCHEMA: RecordSchema = RecordSchema {
    name: "TsunamiRunup",
    collection: "tsunamiRunup",
    description: "Information on locations where tsunami effects occurred: arrival time, travel time, water heights, inundation, deaths, injuries and damage.",
    fields: &[
        FieldDef::optional("tsunamiSource", FieldKind::String)
            .title("Tsunami source")
            .describe("Tsunami source document."),
        FieldDef::required("infoSource", FieldKind::String)
            .title("Information source")
            .describe("1. `noaa`: NGDC/WDS NOAA (https://www.ngdc.noaa.gov/hazard/tsu_db.shtml)"),
        FieldDef::optional("noaaTsunamiRunupId", FieldKind::Integer)
            .title("NOAA tsunami runup ID")
            .describe("The unique numeric identifier of the record in the NOAA Tsunami Runup database."),
        FieldDef::optional("noaaTsunamiEventId", FieldKind::Integer)
            .title("NOAA tsunami event ID")
            .describe("The unique numeric identifier of the record in the NOAA Tsunami Event database."),
        FieldDef::optional("year", FieldKind::Integer)
            .title("Year (source)")
            .describe("Source event date. Valid values: -2000 to present. Format +/-yyyy (- is B.C., + is A.D.). UTC."),
        FieldDef::optional("month", FieldKind::Integer)
            .title("Month (source)")
            .describe("Source event date. Valid values: 1 to 12."),
        FieldDef::optional("day", FieldKind::Integer)
            .title("Day (source)")
            .describe("Source event date. Valid values: 1 to 31 (where months apply)."),
        FieldDef::optional("hour", FieldKind::Integer)
            .title("Hour (source)")
            .describe("Valid values: 0 to 23."),
        FieldDef::optional("minute", FieldKind::Integer)
            .title("Minute (source)")
            .describe("Valid values: 0 to 59."),
        FieldDef::optional("second", FieldKind::Number)
            .title("Second (source)")
            .describe("Valid values: 0 to 59."),
        FieldDef::optional("doubtful", FieldKind::String)
            .title("Doubtful runup observation")
            .describe("A \"?\" indicates a doubtful runup entry. An \"M\" indicates the waves likely had a meteorologic source."),
        FieldDef::optional("country", FieldKind::String)
            .title("Country")
            .describe("The country where the tsunami effects were observed."),
        FieldDef::optional("state", FieldKind::String)
            .title("State")
            .describe("The State, Province or Prefecture where the tsunami effects were observed."),
        FieldDef::optional("locationName", FieldKind::String)
            .title("Location")
            .describe("The location (city, state or island) where the tsunami effects were observed."),
        FieldDef::optional("latitude", FieldKind::Number)
            .title("Latitude")
            .describe("Valid values: -90 to +90."),
        FieldDef::optional("longitude", FieldKind::Number)
            .title("Longitude")
            .describe("Valid values: -180 to +180."),
        FieldDef::optional("regionCode", FieldKind::Integer).title("Region code"),
        FieldDef::optional("distanceFromSource", FieldKind::Number)
            .title("Distance from source (km)")
            .describe("The distance from the tsunami event source to the runup location."),
        FieldDef::optional("arrivalDay", FieldKind::Integer)
            .title("Arrival day")
            .describe("Valid values: 1 to 31 (where months apply)."),
        FieldDef::optional("arrivalHour", FieldKind::Integer)
            .title("Arrival hour")
            .describe("Valid values: 0 to 23."),
        FieldDef::optional("arrivalMinute", FieldKind::Integer)
            .title("Arrival minute")
            .describe("Valid values: 0 to 59."),
        FieldDef::optional("travelTimeHours", FieldKind::Integer)
            .title("Travel time (hours)")
            .describe("Time it took the initial wave to travel from the source to the location of effects."),
        FieldDef::optional("travelTimeMinutes", FieldKind::Integer)
            .title("Travel time (minutes)")
            .describe("Time it took the initial wave to travel from the source to the location of effects."),
        FieldDef::optional("waterHeight", FieldKind::Number)
            .title("Water height (m)")
            .describe("The maximum water height above sea level in meters."),
        FieldDef::optional("horizontalInundation", FieldKind::Number)
            .title("Horizontal inundation (m)")
            .describe("The maximum horizontal distance of inland flooding (in meters)."),
        FieldDef::optional("typeOfMeasurement", FieldKind::Integer)
            .title("Type of measurement")
            .describe("Valid values: 1 to 10. 1 = eyewitness, 2 = tide gauge, 3 = deep ocean gauge, 4 = water height from post-tsunami survey, 5 = runup height from post-tsunami survey, 6 = flow depth, 7 = atmospheric wave, 8 = seiche, 9 = ship report, 10 = other."),
        FieldDef::optional("period", FieldKind::Number)
            .title("Period (minutes)")
            .describe("The period of the first cycle, in minutes."),
        FieldDef::optional("firstMotion", FieldKind::String)
            .title("First motion")
            .describe("R = Rise, F = Fall."),
        FieldDef::optional("deaths", FieldKind::Integer)
            .title("Number of deaths at the runup location"),
        FieldDef::optional("deathsDescription", FieldKind::Integer)
            .title("Description of deaths from the tsunami at the runup location")
            .describe(COUNT_SCALE),
        FieldDef::optional("injuries", FieldKind::Integer).title("Injuries"),
        FieldDef::optional("injuriesDescription", FieldKind::Integer)
            .title("Injuries description")
            .describe(COUNT_SCALE),
        FieldDef::optional("damageMillionsDollars", FieldKind::Number)
            .title("Damage")
            .describe("Millions of US dollars."),
        FieldDef::optional("damageDescription", FieldKind::Integer)
            .title("Damage description")
            .describe(DAMAGE_SCALE),
        FieldDef::optional("housesDamaged", FieldKind::Integer).title("Houses damaged"),
        FieldDef::optional("housesDamagedDescription", FieldKind::Integer)
            .title("Houses damaged description")
            .describe(COUNT_SCALE),
        FieldDef::optional("housesDestroyed", FieldKind::Integer).title("Houses destroyed"),
        FieldDef::optional("housesDestroyedDescription", FieldKind::Integer)
            .title("Houses destroyed description")
            .describe(COUNT_SCALE),
    ],
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsunamiRunup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Soft reference to a `TsunamiSource` id. Never checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsunami_source: Option<String>,
    /// Information source tag, e.g. `noaa`.
    pub info_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noaa_tsunami_runup_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noaa_tsunami_event_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doubtful: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_source: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_time_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_time_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_inundation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_measurement: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_motion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deaths: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deaths_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_millions_dollars: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub houses_damaged: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub houses_damaged_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub houses_destroyed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub houses_destroyed_description: Option<i64>,
}

impl TsunamiRunup {
    pub fn new(info_source: impl Into<String>) -> Self {
        TsunamiRunup {
            info_source: info_source.into(),
            ..Default::default()
        }
    }
}

impl Record for TsunamiRunup {
    fn schema() -> &'static RecordSchema {
        &TSUNAMI_RUNUP_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
