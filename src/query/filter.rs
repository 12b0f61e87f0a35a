//! `filter`: predicate plus projection, ordering and paging.

use crate::error::AppError;
use crate::query::Predicate;
use crate::schema::RecordSchema;
use crate::store::Document;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// `fields` directive. Any `true` entry switches to include-only.
#[derive(Clone, Debug, PartialEq)]
pub enum Projection {
    Include(Vec<String>),
    Exclude(Vec<String>),
}

impl Projection {
    pub fn apply(&self, doc: &mut Document) {
        match self {
            Projection::Include(keep) => doc.retain(|k, _| keep.iter().any(|f| f == k)),
            Projection::Exclude(drop) => doc.retain(|k, _| !drop.iter().any(|f| f == k)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    pub predicate: Option<Predicate>,
    pub fields: Option<Projection>,
    /// Applied in sequence; ties fall back to insertion order.
    pub order: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

impl Filter {
    /// Parse the JSON text of a `filter` query parameter.
    pub fn parse_str(raw: &str, schema: &RecordSchema) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| AppError::BadRequest(format!("filter: invalid JSON: {}", e)))?;
        Self::parse(&value, schema)
    }

    pub fn parse(value: &Value, schema: &RecordSchema) -> Result<Self, AppError> {
        let obj = value
            .as_object()
            .ok_or_else(|| AppError::BadRequest("filter must be a JSON object".into()))?;
        let mut filter = Filter::default();
        let mut offset = None;
        for (key, v) in obj {
            match key.as_str() {
                "where" => filter.predicate = Some(Predicate::parse(v, schema)?),
                "fields" => filter.fields = Some(parse_fields(v, schema)?),
                "order" => filter.order = parse_order(v, schema)?,
                "limit" => filter.limit = Some(non_negative("limit", v)?),
                "skip" => filter.skip = Some(non_negative("skip", v)?),
                "offset" => offset = Some(non_negative("offset", v)?),
                other => {
                    return Err(AppError::BadRequest(format!(
                        "filter: unsupported key '{}'",
                        other
                    )));
                }
            }
        }
        // `skip` wins when both are given.
        filter.skip = filter.skip.or(offset);
        Ok(filter)
    }
}

/// Bounded by `i64::MAX`, the widest value PostgreSQL accepts for LIMIT and OFFSET.
fn non_negative(key: &str, v: &Value) -> Result<u64, AppError> {
    v.as_i64()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| {
            AppError::BadRequest(format!("filter.{} must be a non-negative integer", key))
        })
}

fn known_field<'a>(field: &'a str, schema: &RecordSchema, key: &str) -> Result<&'a str, AppError> {
    if schema.is_queryable(field) {
        Ok(field)
    } else {
        Err(AppError::BadRequest(format!(
            "filter.{}: unknown property '{}' of {}",
            key, field, schema.name
        )))
    }
}

fn parse_fields(v: &Value, schema: &RecordSchema) -> Result<Projection, AppError> {
    match v {
        Value::Array(items) => {
            let names = items
                .iter()
                .map(|item| {
                    let name = item.as_str().ok_or_else(|| {
                        AppError::BadRequest("filter.fields entries must be strings".into())
                    })?;
                    known_field(name, schema, "fields").map(String::from)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Projection::Include(names))
        }
        Value::Object(map) => {
            let mut include = Vec::new();
            let mut exclude = Vec::new();
            for (name, flag) in map {
                known_field(name, schema, "fields")?;
                match flag.as_bool() {
                    Some(true) => include.push(name.clone()),
                    Some(false) => exclude.push(name.clone()),
                    None => {
                        return Err(AppError::BadRequest(format!(
                            "filter.fields.{} must be a boolean",
                            name
                        )));
                    }
                }
            }
            Ok(if include.is_empty() {
                Projection::Exclude(exclude)
            } else {
                Projection::Include(include)
            })
        }
        _ => Err(AppError::BadRequest(
            "filter.fields must be an object or an array".into(),
        )),
    }
}

fn parse_order(v: &Value, schema: &RecordSchema) -> Result<Vec<OrderBy>, AppError> {
    let clauses: Vec<&str> = match v {
        Value::String(s) => s.split(',').collect(),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| {
                    AppError::BadRequest("filter.order entries must be strings".into())
                })
            })
            .collect::<Result<_, _>>()?,
        _ => {
            return Err(AppError::BadRequest(
                "filter.order must be a string or an array".into(),
            ))
        }
    };
    clauses
        .into_iter()
        .filter(|c| !c.trim().is_empty())
        .map(|clause| {
            let mut parts = clause.split_whitespace();
            let field = parts.next().unwrap_or_default();
            let direction = match parts.next().map(str::to_ascii_uppercase).as_deref() {
                None | Some("ASC") => Direction::Asc,
                Some("DESC") => Direction::Desc,
                Some(other) => {
                    return Err(AppError::BadRequest(format!(
                        "filter.order: unknown direction '{}'",
                        other
                    )));
                }
            };
            if parts.next().is_some() {
                return Err(AppError::BadRequest(format!(
                    "filter.order: malformed clause '{}'",
                    clause
                )));
            }
            Ok(OrderBy {
                field: known_field(field, schema, "order")?.to_string(),
                direction,
            })
        })
        .collect()
}
