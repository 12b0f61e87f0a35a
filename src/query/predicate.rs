//! `where` predicates: `{field: value}`, `{field: {op: operand}}`, `{and: [...]}`, `{or: [...]}`.

use crate::error::AppError;
use crate::schema::{FieldKind, RecordSchema, ID_FIELD};
use regex::RegexBuilder;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// All must hold; empty matches everything.
    And(Vec<Predicate>),
    /// At least one must hold; empty matches nothing.
    Or(Vec<Predicate>),
    Field { field: String, op: Op },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    /// `null` operand matches missing or null values.
    Eq(Value),
    Neq(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    Inq(Vec<Value>),
    Nin(Vec<Value>),
    /// Inclusive on both ends.
    Between(Value, Value),
    Exists(bool),
    /// SQL LIKE pattern (`%`, `_`, backslash escapes).
    Like {
        pattern: String,
        negated: bool,
        case_insensitive: bool,
    },
    Regexp {
        pattern: String,
        case_insensitive: bool,
    },
}

impl Op {
    fn is_operator(key: &str) -> bool {
        matches!(
            key,
            "eq" | "neq"
                | "gt"
                | "gte"
                | "lt"
                | "lte"
                | "inq"
                | "nin"
                | "between"
                | "exists"
                | "like"
                | "nlike"
                | "ilike"
                | "nilike"
                | "regexp"
        )
    }
}

impl Predicate {
    pub fn field(field: impl Into<String>, op: Op) -> Self {
        Predicate::Field {
            field: field.into(),
            op,
        }
    }

    pub fn matches_all(&self) -> bool {
        matches!(self, Predicate::And(items) if items.iter().all(Predicate::matches_all))
    }

    /// Parse the JSON text of a `where` query parameter.
    pub fn parse_str(raw: &str, schema: &RecordSchema) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| AppError::BadRequest(format!("where: invalid JSON: {}", e)))?;
        Self::parse(&value, schema)
    }

    pub fn parse(value: &Value, schema: &RecordSchema) -> Result<Self, AppError> {
        let obj = value
            .as_object()
            .ok_or_else(|| AppError::BadRequest("where must be a JSON object".into()))?;
        let mut parts = Vec::with_capacity(obj.len());
        for (key, v) in obj {
            match key.as_str() {
                "and" | "or" => {
                    let items = v.as_array().ok_or_else(|| {
                        AppError::BadRequest(format!("where.{} must be an array", key))
                    })?;
                    let parsed = items
                        .iter()
                        .map(|item| Self::parse(item, schema))
                        .collect::<Result<Vec<_>, _>>()?;
                    parts.push(if key == "and" {
                        Predicate::And(parsed)
                    } else {
                        Predicate::Or(parsed)
                    });
                }
                field => parts.extend(parse_condition(field, v, schema)?),
            }
        }
        Ok(if parts.len() == 1 {
            parts.remove(0)
        } else {
            Predicate::And(parts)
        })
    }
}

fn field_kind(field: &str, schema: &RecordSchema) -> Result<FieldKind, AppError> {
    if field == ID_FIELD {
        return Ok(FieldKind::String);
    }
    schema
        .field(field)
        .map(|f| f.kind)
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "where: unknown property '{}' of {}",
                field, schema.name
            ))
        })
}

fn parse_condition(
    field: &str,
    v: &Value,
    schema: &RecordSchema,
) -> Result<Vec<Predicate>, AppError> {
    let kind = field_kind(field, schema)?;
    let ops = match v.as_object() {
        Some(obj) if !obj.is_empty() && obj.keys().all(|k| Op::is_operator(k)) => obj,
        Some(obj) if obj.keys().any(|k| Op::is_operator(k)) => {
            return Err(AppError::BadRequest(format!(
                "where.{}: cannot mix operators with plain keys",
                field
            )));
        }
        _ => {
            let operand = operand(field, kind, v)?;
            return Ok(vec![Predicate::field(field, Op::Eq(operand))]);
        }
    };
    ops.iter()
        .map(|(name, arg)| parse_op(field, kind, name, arg).map(|op| Predicate::field(field, op)))
        .collect()
}

fn parse_op(field: &str, kind: FieldKind, name: &str, arg: &Value) -> Result<Op, AppError> {
    let bad = |msg: &str| AppError::BadRequest(format!("where.{}.{}: {}", field, name, msg));
    Ok(match name {
        "eq" => Op::Eq(operand(field, kind, arg)?),
        "neq" => Op::Neq(operand(field, kind, arg)?),
        "gt" | "gte" | "lt" | "lte" => {
            let v = range_operand(field, kind, arg)?;
            match name {
                "gt" => Op::Gt(v),
                "gte" => Op::Gte(v),
                "lt" => Op::Lt(v),
                _ => Op::Lte(v),
            }
        }
        "inq" | "nin" => {
            let items = arg.as_array().ok_or_else(|| bad("expected an array"))?;
            let values = items
                .iter()
                .map(|item| operand(field, kind, item))
                .collect::<Result<Vec<_>, _>>()?;
            if name == "inq" {
                Op::Inq(values)
            } else {
                Op::Nin(values)
            }
        }
        "between" => match arg.as_array().map(Vec::as_slice) {
            Some([lo, hi]) => Op::Between(
                range_operand(field, kind, lo)?,
                range_operand(field, kind, hi)?,
            ),
            _ => return Err(bad("expected a two-element array")),
        },
        "exists" => Op::Exists(arg.as_bool().ok_or_else(|| bad("expected a boolean"))?),
        "like" | "nlike" | "ilike" | "nilike" => Op::Like {
            pattern: arg.as_str().ok_or_else(|| bad("expected a string pattern"))?.to_string(),
            negated: name == "nlike" || name == "nilike",
            case_insensitive: name == "ilike" || name == "nilike",
        },
        "regexp" => {
            let raw = arg.as_str().ok_or_else(|| bad("expected a string pattern"))?;
            let (pattern, case_insensitive) = split_regex_literal(raw);
            RegexBuilder::new(&pattern)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| bad(&format!("invalid regular expression: {}", e)))?;
            Op::Regexp {
                pattern,
                case_insensitive,
            }
        }
        other => {
            return Err(AppError::BadRequest(format!(
                "where.{}: unknown operator '{}'",
                field, other
            )))
        }
    })
}

fn operand(field: &str, kind: FieldKind, v: &Value) -> Result<Value, AppError> {
    kind.coerce_operand(v)
        .map_err(|msg| AppError::BadRequest(format!("where.{}: {}", field, msg)))
}

/// Range operands must be orderable scalars.
fn range_operand(field: &str, kind: FieldKind, v: &Value) -> Result<Value, AppError> {
    let v = operand(field, kind, v)?;
    match v {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(v),
        _ => Err(AppError::BadRequest(format!(
            "where.{}: range comparison needs a string, number or boolean",
            field
        ))),
    }
}

/// Accept `/pattern/flags` as well as a bare pattern. Only the `i` flag is honored.
fn split_regex_literal(raw: &str) -> (String, bool) {
    if let Some(rest) = raw.strip_prefix('/') {
        if let Some(end) = rest.rfind('/') {
            let flags = &rest[end + 1..];
            if flags.chars().all(|c| c.is_ascii_alphabetic()) {
                return (rest[..end].to_string(), flags.contains('i'));
            }
        }
    }
    (raw.to_string(), false)
}
