//! Tsunami source events (NOAA NGDC/WDS tsunami event database layout).

use crate::models::{COUNT_SCALE, DAMAGE_SCALE};
use crate::schema::{FieldDef, FieldKind, Record, RecordSchema};
use serde::{Deserialize, Serialize};

pub static TSUNAMI_SOURCE_SCHEMA: RecordSchema = RecordSchema {
    name: "TsunamiSource",
    collection: "tsunamiSource",
    description: "Information on the source of the tsunami: date, location, cause, measurements, effects and total effects.",
    fields: &[
        FieldDef::optional("year", FieldKind::Integer)
            .title("Year")
            .describe("Format +/-yyyy (- is B.C., + is A.D.). Valid values: -2000 to present. UTC."),
        FieldDef::optional("month", FieldKind::Integer)
            .title("Month")
            .describe("Valid values: 1 to 12."),
        FieldDef::optional("day", FieldKind::Integer)
            .title("Day")
            .describe("Valid values: 1 to 31 (where months apply)."),
        FieldDef::optional("hour", FieldKind::Integer)
            .title("Hour")
            .describe("Valid values: 0 to 23."),
        FieldDef::optional("minute", FieldKind::Integer)
            .title("Minute")
            .describe("Valid values: 0 to 59."),
        FieldDef::optional("second", FieldKind::Number)
            .title("Second")
            .describe("Valid values: 0 to 59."),
        FieldDef::optional("eventValidity", FieldKind::Integer)
            .title("Event validity")
            .describe("Valid values: -1 to 4. 4 = definite tsunami, 3 = probable, 2 = questionable, 1 = very doubtful, 0 = event that only caused a seiche or disturbance in an inland river, -1 = erroneous entry."),
        FieldDef::optional("causeCode", FieldKind::Integer).title("Cause code"),
        FieldDef::optional("focalDepth", FieldKind::Number)
            .title("Focal depth (km)")
            .describe("Focal depth, in kilometers."),
        FieldDef::optional("primaryMagnitude", FieldKind::Number).title("Primary magnitude"),
        FieldDef::optional("country", FieldKind::String).title("Country"),
        FieldDef::optional("state", FieldKind::String).title("State"),
        FieldDef::optional("locationName", FieldKind::String).title("Location"),
        FieldDef::optional("latitude", FieldKind::Number)
            .title("Latitude")
            .describe("Valid values: -90 to +90."),
        FieldDef::optional("longitude", FieldKind::Number)
            .title("Longitude")
            .describe("Valid values: -180 to +180."),
        FieldDef::optional("regionCode", FieldKind::Integer).title("Region code"),
        FieldDef::optional("maxWaterHeight", FieldKind::Number)
            .title("Max. water height")
            .describe("The maximum water height above sea level in meters for this event."),
        FieldDef::optional("abe", FieldKind::Number)
            .title("Tsunami Magnitude (Abe)")
            .describe("Valid values: -5 to 10."),
        FieldDef::optional("iida", FieldKind::Number)
            .title("Tsunami magnitude (Iida-Imamura)")
            .describe("Valid values: -5 to 10. M = log2(h), where h is the maximum runup height of the wave."),
        FieldDef::optional("intensitySoloviev", FieldKind::Number)
            .title("Tsunami intensity (Soloviev)")
            .describe("Valid values: -5 to 10. I = log2(2^1/2 * h), where h is the maximum runup height of the wave."),
        FieldDef::optional("warningStatus", FieldKind::Integer)
            .title("Warning status")
            .describe("Valid values: -1 to 4. -1 = status unknown, 0 = no warning issued, 1 = PTW (Pacific-wide warning by PTWC), 2 = RTW (regional warning by PTWC), 3 = LTW (local warning by a regional or national TWC), 4 = TIB (information or attention bulletin)."),
        FieldDef::optional("deaths", FieldKind::Integer).title("Number of deaths from the tsunami"),
        FieldDef::optional("deathsDescription", FieldKind::Integer)
            .title("Description of deaths from the tsunami")
            .describe(COUNT_SCALE),
        FieldDef::optional("missing", FieldKind::Integer)
            .title("Number of missing from the tsunami"),
        FieldDef::optional("missingDescription", FieldKind::Integer)
            .title("Description of missing from the tsunami")
            .describe(COUNT_SCALE),
        FieldDef::optional("injuries", FieldKind::Integer)
            .title("Number of injuries from the tsunami"),
        FieldDef::optional("injuriesDescription", FieldKind::Integer)
            .title("Description of injuries from the tsunami")
            .describe(COUNT_SCALE),
        FieldDef::optional("damageMillionsDollars", FieldKind::Number)
            .title("Damage (millions of US Dollars) from the tsunami")
            .describe("Multiply by 1,000,000 to obtain the actual dollar amount."),
        FieldDef::optional("damageDescription", FieldKind::Integer)
            .title("Description of damage from the tsunami")
            .describe(DAMAGE_SCALE),
        FieldDef::optional("housesDestroyed", FieldKind::Integer)
            .title("Number of houses destroyed by the tsunami"),
        FieldDef::optional("housesDestroyedDescription", FieldKind::Integer)
            .title("Description of houses destroyed by the tsunami")
            .describe(COUNT_SCALE),
        FieldDef::optional("housesDamaged", FieldKind::Integer)
            .title("Number of houses damaged by the tsunami"),
        FieldDef::optional("housesDamagedDescription", FieldKind::Integer)
            .title("Description of houses damaged by the tsunami")
            .describe(COUNT_SCALE),
        FieldDef::optional("totalDeaths", FieldKind::Integer)
            .title("Total number of deaths from the tsunami and source event"),
        FieldDef::optional("totalDeathsDescription", FieldKind::Integer)
            .title("Description of deaths from the tsunami and the source event")
            .describe(COUNT_SCALE),
        FieldDef::optional("totalMissing", FieldKind::Integer)
            .title("Total number of missing from the tsunami and the source event"),
        FieldDef::optional("totalMissingDescription", FieldKind::Integer)
            .title("Description of missing from the tsunami and the source event")
            .describe(COUNT_SCALE),
        FieldDef::optional("totalInjuries", FieldKind::Integer)
            .title("Total Number of injuries from the tsunami and the source event"),
        FieldDef::optional("totalInjuriesDescription", FieldKind::Integer)
            .title("Description of injuries from the tsunami and the source event")
            .describe(COUNT_SCALE),
        FieldDef::optional("totalDamageMillionsDollars", FieldKind::Number)
            .title("Total damage in millions of dollars from the tsunami and the source event")
            .describe("Multiply by 1,000,000 to obtain the actual dollar amount."),
        FieldDef::optional("totalDamageMillionsDollarsDescription", FieldKind::Integer)
            .title("Description of damage from the tsunami and the source event")
            .describe(DAMAGE_SCALE),
        FieldDef::optional("totalHousesDestroyed", FieldKind::Integer)
            .title("Total number of houses destroyed"),
        FieldDef::optional("totalHousesDestroyedDescription", FieldKind::Integer)
            .title("Total houses destroyed description")
            .describe(COUNT_SCALE),
        FieldDef::optional("totalHousesDamaged", FieldKind::Integer)
            .title("Total number of houses damaged"),
        FieldDef::optional("totalHousesDamagedDescription", FieldKind::Integer)
            .title("Total houses damaged description")
            .describe(COUNT_SCALE),
    ],
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsunamiSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Source event date and time are UTC.
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
    pub event_validity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_magnitude: Option<f64>,
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
    pub max_water_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abe: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iida: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_soloviev: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_status: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deaths: Option<i64>,
    /// Coded 0 to 4; see the schema description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deaths_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_millions_dollars: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub houses_destroyed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub houses_destroyed_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub houses_damaged: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub houses_damaged_description: Option<i64>,
    /// Tsunami plus source event totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_deaths: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_deaths_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_missing: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_missing_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_injuries: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_injuries_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_damage_millions_dollars: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_damage_millions_dollars_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_houses_destroyed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_houses_destroyed_description: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_houses_damaged: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_houses_damaged_description: Option<i64>,
}

impl Record for TsunamiSource {
    fn schema() -> &'static RecordSchema {
        &TSUNAMI_SOURCE_SCHEMA
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
