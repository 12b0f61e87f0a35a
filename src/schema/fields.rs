//! Field descriptions for one record kind. Validation, predicate parsing and the OpenAPI
//! document are all derived from these tables.

use crate::case::plural_path_segment;
use crate::schema::date;
use serde_json::Value;

/// Name of the identity field every record carries.
pub const ID_FIELD: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Measurement; any JSON number.
    Number,
    /// Codes, counts, calendar parts; JSON number without a fractional part.
    Integer,
    Boolean,
    /// RFC 3339 timestamp, normalized to millisecond UTC.
    Date,
    /// GeoJSON point: `{"type": "Point", "coordinates": [lng, lat]}`.
    GeoPoint,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::GeoPoint => "geo_point",
        }
    }

    /// Check a stored value and return its canonical form. `null` passes through; callers
    /// decide whether null is allowed.
    pub fn coerce(&self, v: &Value) -> Result<Value, String> {
        if v.is_null() {
            return Ok(Value::Null);
        }
        match self {
            FieldKind::String => match v {
                Value::String(_) => Ok(v.clone()),
                _ => Err(self.expected()),
            },
            FieldKind::Number => match v {
                Value::Number(_) => Ok(v.clone()),
                _ => Err(self.expected()),
            },
            // Signed 64-bit range, the same bound PostgreSQL's bigint casts apply.
            FieldKind::Integer => match v {
                Value::Number(n) if n.is_i64() => Ok(v.clone()),
                Value::Number(n) if n.is_u64() => Err(self.expected()),
                Value::Number(n) => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        Ok(Value::from(f as i64))
                    }
                    _ => Err(self.expected()),
                },
                _ => Err(self.expected()),
            },
            FieldKind::Boolean => match v {
                Value::Bool(_) => Ok(v.clone()),
                _ => Err(self.expected()),
            },
            FieldKind::Date => v
                .as_str()
                .and_then(date::parse)
                .map(|d| Value::String(date::format(&d)))
                .ok_or_else(|| self.expected()),
            FieldKind::GeoPoint => coerce_geo_point(v).ok_or_else(|| self.expected()),
        }
    }

    /// Like [`FieldKind::coerce`] but for predicate operands: numeric kinds accept any number.
    pub fn coerce_operand(&self, v: &Value) -> Result<Value, String> {
        match (self, v) {
            (FieldKind::Integer, Value::Number(_)) => Ok(v.clone()),
            _ => self.coerce(v),
        }
    }

    fn expected(&self) -> String {
        match self {
            FieldKind::String => "expected a string".into(),
            FieldKind::Number => "expected a number".into(),
            FieldKind::Integer => "expected an integer".into(),
            FieldKind::Boolean => "expected a boolean".into(),
            FieldKind::Date => "expected an RFC 3339 date-time string".into(),
            FieldKind::GeoPoint => {
                "expected {\"type\": string, \"coordinates\": [number, ...]}".into()
            }
        }
    }
}

fn coerce_geo_point(v: &Value) -> Option<Value> {
    let obj = v.as_object()?;
    if obj.keys().any(|k| k != "type" && k != "coordinates") {
        return None;
    }
    obj.get("type")?.as_str()?;
    let coords = obj.get("coordinates")?.as_array()?;
    if !coords.iter().all(Value::is_number) {
        return None;
    }
    Some(v.clone())
}

#[derive(Clone, Copy, Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub title: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl FieldDef {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        FieldDef {
            name,
            kind,
            required: true,
            title: None,
            description: None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        FieldDef {
            name,
            kind,
            required: false,
            title: None,
            description: None,
        }
    }

    pub const fn title(self, title: &'static str) -> Self {
        FieldDef {
            title: Some(title),
            ..self
        }
    }

    pub const fn describe(self, description: &'static str) -> Self {
        FieldDef {
            description: Some(description),
            ..self
        }
    }
}

/// Static description of one record kind and the collection it lives in.
#[derive(Debug)]
pub struct RecordSchema {
    /// Entity name, e.g. "TsunamiSource".
    pub name: &'static str,
    /// Backend collection name, e.g. "tsunamiSource".
    pub collection: &'static str,
    pub description: &'static str,
    /// Every field except `id`.
    pub fields: &'static [FieldDef],
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True for `id` and every declared field; used for predicates, projection and ordering.
    pub fn is_queryable(&self, name: &str) -> bool {
        name == ID_FIELD || self.field(name).is_some()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Kebab-case plural used as the route segment, e.g. "tsunami-sources".
    pub fn path_segment(&self) -> String {
        plural_path_segment(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static SAMPLE: RecordSchema = RecordSchema {
        name: "Sample",
        collection: "sample",
        description: "",
        fields: &[
            FieldDef::required("name", FieldKind::String),
            FieldDef::optional("at", FieldKind::Date).title("At"),
        ],
    };

    #[test]
    fn integer_accepts_whole_floats_only() {
        assert_eq!(FieldKind::Integer.coerce(&json!(7.0)).unwrap(), json!(7));
        assert!(FieldKind::Integer.coerce(&json!(7.5)).is_err());
        assert_eq!(FieldKind::Integer.coerce_operand(&json!(7.5)).unwrap(), json!(7.5));
    }

    #[test]
    fn integer_stays_within_signed_range() {
        assert_eq!(FieldKind::Integer.coerce(&json!(i64::MIN)).unwrap(), json!(i64::MIN));
        assert_eq!(FieldKind::Integer.coerce(&json!(i64::MAX)).unwrap(), json!(i64::MAX));
        assert!(FieldKind::Integer.coerce(&json!(18446744073709551615u64)).is_err());
        assert!(FieldKind::Integer.coerce(&json!(9223372036854775808u64)).is_err());
        assert!(FieldKind::Integer.coerce(&json!(1e19)).is_err());
    }

    #[test]
    fn date_is_normalized() {
        let v = FieldKind::Date.coerce(&json!("2011-03-11T14:46:24+09:00")).unwrap();
        assert_eq!(v, json!("2011-03-11T05:46:24.000Z"));
        assert!(FieldKind::Date.coerce(&json!("yesterday")).is_err());
    }

    #[test]
    fn geo_point_shape() {
        assert!(FieldKind::GeoPoint
            .coerce(&json!({"type": "Point", "coordinates": [142.37, 38.29]}))
            .is_ok());
        assert!(FieldKind::GeoPoint.coerce(&json!({"type": "Point"})).is_err());
        assert!(FieldKind::GeoPoint
            .coerce(&json!({"type": "Point", "coordinates": ["x"]}))
            .is_err());
    }

    #[test]
    fn null_passes_through() {
        assert_eq!(FieldKind::Boolean.coerce(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn schema_lookup() {
        assert!(SAMPLE.is_queryable("id"));
        assert!(SAMPLE.is_queryable("at"));
        assert!(!SAMPLE.is_queryable("missing"));
        assert_eq!(SAMPLE.required_fields().count(), 1);
        assert_eq!(SAMPLE.field("at").and_then(|f| f.title), Some("At"));
        assert_eq!(SAMPLE.path_segment(), "samples");
    }
}
