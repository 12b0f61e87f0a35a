//! In-process evaluation of predicates and orderings against documents.
//! Mirrors the PostgreSQL JSONB semantics of the SQL builder so both stores answer alike.

use crate::error::AppError;
use crate::query::{Direction, Op, OrderBy, Predicate};
use crate::store::Document;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::cmp::Ordering;

/// A predicate with its LIKE and regexp patterns compiled once, ready to test many documents.
pub struct Matcher<'p> {
    node: Node<'p>,
}

enum Node<'p> {
    And(Vec<Node<'p>>),
    Or(Vec<Node<'p>>),
    Field { field: &'p str, test: Test<'p> },
}

enum Test<'p> {
    Value(&'p Op),
    Pattern { regex: Regex, negated: bool },
}

impl<'p> Matcher<'p> {
    pub fn new(predicate: &'p Predicate) -> Result<Self, AppError> {
        Ok(Self {
            node: compile(predicate)?,
        })
    }

    pub fn matches(&self, doc: &Document) -> bool {
        eval(&self.node, doc)
    }
}

fn compile(predicate: &Predicate) -> Result<Node<'_>, AppError> {
    Ok(match predicate {
        Predicate::And(items) => Node::And(items.iter().map(compile).collect::<Result<_, _>>()?),
        Predicate::Or(items) => Node::Or(items.iter().map(compile).collect::<Result<_, _>>()?),
        Predicate::Field { field, op } => Node::Field {
            field: field.as_str(),
            test: compile_op(op)?,
        },
    })
}

fn compile_op(op: &Op) -> Result<Test<'_>, AppError> {
    let (source, case_insensitive, negated) = match op {
        Op::Like {
            pattern,
            negated,
            case_insensitive,
        } => (like_to_regex(pattern), *case_insensitive, *negated),
        Op::Regexp {
            pattern,
            case_insensitive,
        } => (pattern.clone(), *case_insensitive, false),
        other => return Ok(Test::Value(other)),
    };
    let regex = RegexBuilder::new(&source)
        .case_insensitive(case_insensitive)
        .dot_matches_new_line(matches!(op, Op::Like { .. }))
        .build()
        .map_err(|e| AppError::BadRequest(format!("invalid pattern: {}", e)))?;
    Ok(Test::Pattern { regex, negated })
}

fn eval(node: &Node<'_>, doc: &Document) -> bool {
    match node {
        Node::And(items) => items.iter().all(|n| eval(n, doc)),
        Node::Or(items) => items.iter().any(|n| eval(n, doc)),
        Node::Field { field, test } => {
            let value = doc.get(*field);
            match test {
                Test::Value(op) => matches_op(op, value),
                Test::Pattern { regex, negated } => match value.and_then(as_text) {
                    Some(text) => regex.is_match(&text) != *negated,
                    None => false,
                },
            }
        }
    }
}

fn matches_op(op: &Op, value: Option<&Value>) -> bool {
    let at_least = |o: &Value| {
        matches!(compare_same_type(value, o), Some(Ordering::Greater | Ordering::Equal))
    };
    let at_most = |o: &Value| {
        matches!(compare_same_type(value, o), Some(Ordering::Less | Ordering::Equal))
    };
    match op {
        Op::Eq(operand) => is_equal(value, operand),
        Op::Neq(operand) => !is_equal(value, operand),
        Op::Gt(operand) => compare_same_type(value, operand) == Some(Ordering::Greater),
        Op::Gte(operand) => at_least(operand),
        Op::Lt(operand) => compare_same_type(value, operand) == Some(Ordering::Less),
        Op::Lte(operand) => at_most(operand),
        Op::Inq(operands) => operands.iter().any(|o| is_equal(value, o)),
        Op::Nin(operands) => !operands.iter().any(|o| is_equal(value, o)),
        Op::Between(lo, hi) => at_least(lo) && at_most(hi),
        Op::Exists(expected) => value.is_some() == *expected,
        // compiled into `Test::Pattern`
        Op::Like { .. } | Op::Regexp { .. } => false,
    }
}

/// Null operand matches missing or JSON null.
fn is_equal(value: Option<&Value>, operand: &Value) -> bool {
    match (value, operand) {
        (None, Value::Null) | (Some(Value::Null), Value::Null) => true,
        (None, _) => false,
        (Some(v), o) => json_eq(v, o),
    }
}

/// Structural equality with numbers compared by value (7 == 7.0).
fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| json_eq(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).map(|w| json_eq(v, w)).unwrap_or(false))
        }
        _ => a == b,
    }
}

/// Some(ordering) only when both sides are the same scalar type.
fn compare_same_type(value: Option<&Value>, operand: &Value) -> Option<Ordering> {
    match (value?, operand) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Text form used by LIKE and regexp, as `->>` renders it.
fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Translate a LIKE pattern into an anchored regex. Backslash escapes the next character.
pub fn like_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => out.push_str(".*"),
            '_' => out.push('.'),
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push_str(&regex::escape(&next.to_string()));
                }
            }
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    out.push('$');
    out
}

/// Rank of a JSON type in JSONB ordering: Object > Array > Boolean > Number > String > Null.
fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Order two values for ORDER BY. Missing sorts after everything (PostgreSQL NULLS LAST for ASC).
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let by_type = type_rank(x).cmp(&type_rank(y));
            if by_type != Ordering::Equal {
                return by_type;
            }
            match (x, y) {
                (Value::Number(m), Value::Number(n)) => m
                    .as_f64()
                    .partial_cmp(&n.as_f64())
                    .unwrap_or(Ordering::Equal),
                (Value::String(m), Value::String(n)) => m.cmp(n),
                (Value::Bool(m), Value::Bool(n)) => m.cmp(n),
                (Value::Array(m), Value::Array(n)) => m.len().cmp(&n.len()),
                (Value::Object(m), Value::Object(n)) => m.len().cmp(&n.len()),
                _ => Ordering::Equal,
            }
        }
    }
}

/// Compare documents by a list of order clauses.
/// Equal results leave the caller's tie-break in charge.
pub fn compare_documents(order: &[OrderBy], a: &Document, b: &Document) -> Ordering {
    for clause in order {
        let ord = compare_values(a.get(&clause.field), b.get(&clause.field));
        let ord = match clause.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
