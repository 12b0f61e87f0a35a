//! Builds parameterized statements over JSONB document tables.
//!
//! Every collection is a table `(seq BIGSERIAL, id TEXT PRIMARY KEY, doc JSONB NOT NULL)`.
//! The id lives in its own column and is never stored inside `doc`.

use super::SqlParam;
use crate::query::{Direction, Filter, Op, OrderBy, Predicate};
use crate::schema::ID_FIELD;
use serde_json::Value;

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Quote a string literal; field names are schema-validated before they get here.
fn literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, collection: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(collection))
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn push_param(&mut self, p: SqlParam) -> String {
        self.params.push(p);
        format!("${}", self.params.len())
    }
}

pub fn create_schema(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema))
}

pub fn create_collection(schema: &str, collection: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (seq BIGSERIAL, id TEXT PRIMARY KEY, doc JSONB NOT NULL)",
        qualified_table(schema, collection)
    )
}

/// JSONB expression for a field. `id` is lifted from its column so every operator treats it alike.
fn json_expr(field: &str) -> String {
    if field == ID_FIELD {
        "to_jsonb(id)".to_string()
    } else {
        format!("doc->{}", literal(field))
    }
}

/// Text expression for a field, as LIKE and regexp see it.
fn text_expr(field: &str) -> String {
    if field == ID_FIELD {
        "id".to_string()
    } else {
        format!("doc->>{}", literal(field))
    }
}

fn eq_sql(q: &mut QueryBuf, expr: &str, operand: &Value) -> String {
    if operand.is_null() {
        format!("({} IS NULL OR {} = 'null'::jsonb)", expr, expr)
    } else {
        let p = q.push_param(SqlParam::json(operand.clone()));
        format!("{} = {}", expr, p)
    }
}

fn neq_sql(q: &mut QueryBuf, expr: &str, operand: &Value) -> String {
    if operand.is_null() {
        format!("({} IS NOT NULL AND {} <> 'null'::jsonb)", expr, expr)
    } else {
        let p = q.push_param(SqlParam::json(operand.clone()));
        format!("{} IS DISTINCT FROM {}", expr, p)
    }
}

/// Range comparison restricted to operands of the same JSON type.
fn range_sql(q: &mut QueryBuf, expr: &str, cmp: &str, operand: &Value) -> String {
    let p = q.push_param(SqlParam::json(operand.clone()));
    format!("(jsonb_typeof({}) = jsonb_typeof({}) AND {} {} {})", expr, p, expr, cmp, p)
}

fn joined(parts: Vec<String>, sep: &str, empty: &str) -> String {
    if parts.is_empty() {
        empty.to_string()
    } else {
        format!("({})", parts.join(sep))
    }
}

fn op_sql(q: &mut QueryBuf, field: &str, op: &Op) -> String {
    let expr = json_expr(field);
    match op {
        Op::Eq(v) => eq_sql(q, &expr, v),
        Op::Neq(v) => neq_sql(q, &expr, v),
        Op::Gt(v) => range_sql(q, &expr, ">", v),
        Op::Gte(v) => range_sql(q, &expr, ">=", v),
        Op::Lt(v) => range_sql(q, &expr, "<", v),
        Op::Lte(v) => range_sql(q, &expr, "<=", v),
        Op::Inq(values) => {
            let parts = values.iter().map(|v| eq_sql(q, &expr, v)).collect();
            joined(parts, " OR ", "FALSE")
        }
        Op::Nin(values) => {
            let parts = values.iter().map(|v| neq_sql(q, &expr, v)).collect();
            joined(parts, " AND ", "TRUE")
        }
        Op::Between(lo, hi) => {
            let lo = range_sql(q, &expr, ">=", lo);
            let hi = range_sql(q, &expr, "<=", hi);
            format!("({} AND {})", lo, hi)
        }
        Op::Exists(true) => format!("{} IS NOT NULL", expr),
        Op::Exists(false) => format!("{} IS NULL", expr),
        Op::Like {
            pattern,
            negated,
            case_insensitive,
        } => {
            let p = q.push_param(SqlParam::text(pattern.as_str()));
            let kw = match (negated, case_insensitive) {
                (false, false) => "LIKE",
                (false, true) => "ILIKE",
                (true, false) => "NOT LIKE",
                (true, true) => "NOT ILIKE",
            };
            format!("{} {} {}", text_expr(field), kw, p)
        }
        Op::Regexp {
            pattern,
            case_insensitive,
        } => {
            let p = q.push_param(SqlParam::text(pattern.as_str()));
            let kw = if *case_insensitive { "~*" } else { "~" };
            format!("{} {} {}", text_expr(field), kw, p)
        }
    }
}

/// Compile a predicate into a boolean SQL expression, appending its parameters to `q`.
pub fn predicate_sql(q: &mut QueryBuf, predicate: &Predicate) -> String {
    match predicate {
        Predicate::And(items) => {
            let parts = items.iter().map(|p| predicate_sql(q, p)).collect();
            joined(parts, " AND ", "TRUE")
        }
        Predicate::Or(items) => {
            let parts = items.iter().map(|p| predicate_sql(q, p)).collect();
            joined(parts, " OR ", "FALSE")
        }
        Predicate::Field { field, op } => op_sql(q, field, op),
    }
}

fn where_clause(q: &mut QueryBuf, predicate: Option<&Predicate>) -> String {
    match predicate {
        Some(p) if !p.matches_all() => format!(" WHERE {}", predicate_sql(q, p)),
        _ => String::new(),
    }
}

fn order_clause(order: &[OrderBy]) -> String {
    let mut parts: Vec<String> = order
        .iter()
        .map(|o| {
            let dir = match o.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            format!("{} {}", json_expr(&o.field), dir)
        })
        .collect();
    parts.push("seq ASC".to_string());
    format!(" ORDER BY {}", parts.join(", "))
}

/// INSERT: $1 id, $2 document.
pub fn insert(schema: &str, collection: &str, id: &str, doc: Value) -> QueryBuf {
    let mut q = QueryBuf::default();
    let id = q.push_param(SqlParam::text(id));
    let doc = q.push_param(SqlParam::json(doc));
    q.sql = format!(
        "INSERT INTO {} (id, doc) VALUES ({}, {})",
        qualified_table(schema, collection),
        id,
        doc
    );
    q
}

/// SELECT matching rows with order, LIMIT and OFFSET from the filter.
/// Ties break on insertion order.
pub fn select_list(schema: &str, collection: &str, filter: &Filter) -> QueryBuf {
    let mut q = QueryBuf::default();
    let wh = where_clause(&mut q, filter.predicate.as_ref());
    let limit = filter.limit.map(|n| format!(" LIMIT {}", n)).unwrap_or_default();
    let offset = filter.skip.map(|n| format!(" OFFSET {}", n)).unwrap_or_default();
    q.sql = format!(
        "SELECT id, doc FROM {}{}{}{}{}",
        qualified_table(schema, collection),
        wh,
        order_clause(&filter.order),
        limit,
        offset
    );
    q
}

pub fn select_by_id(schema: &str, collection: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::default();
    let p = q.push_param(SqlParam::text(id));
    q.sql = format!(
        "SELECT id, doc FROM {} WHERE id = {}",
        qualified_table(schema, collection),
        p
    );
    q
}

pub fn count(schema: &str, collection: &str, predicate: Option<&Predicate>) -> QueryBuf {
    let mut q = QueryBuf::default();
    let wh = where_clause(&mut q, predicate);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", qualified_table(schema, collection), wh);
    q
}

/// Merge `patch` into every matching document.
pub fn update_where(
    schema: &str,
    collection: &str,
    patch: Value,
    predicate: Option<&Predicate>,
) -> QueryBuf {
    let mut q = QueryBuf::default();
    let p = q.push_param(SqlParam::json(patch));
    let wh = where_clause(&mut q, predicate);
    q.sql = format!(
        "UPDATE {} SET doc = doc || {}{}",
        qualified_table(schema, collection),
        p,
        wh
    );
    q
}

/// Merge `patch` into one document.
pub fn update_by_id(schema: &str, collection: &str, id: &str, patch: Value) -> QueryBuf {
    let mut q = QueryBuf::default();
    let p = q.push_param(SqlParam::json(patch));
    let id = q.push_param(SqlParam::text(id));
    q.sql = format!(
        "UPDATE {} SET doc = doc || {} WHERE id = {}",
        qualified_table(schema, collection),
        p,
        id
    );
    q
}

/// Overwrite one document.
pub fn replace_by_id(schema: &str, collection: &str, id: &str, doc: Value) -> QueryBuf {
    let mut q = QueryBuf::default();
    let p = q.push_param(SqlParam::json(doc));
    let id = q.push_param(SqlParam::text(id));
    q.sql = format!(
        "UPDATE {} SET doc = {} WHERE id = {}",
        qualified_table(schema, collection),
        p,
        id
    );
    q
}

pub fn delete_by_id(schema: &str, collection: &str, id: &str) -> QueryBuf {
    let mut q = QueryBuf::default();
    let p = q.push_param(SqlParam::text(id));
    q.sql = format!("DELETE FROM {} WHERE id = {}", qualified_table(schema, collection), p);
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quake;
    use crate::schema::Record;
    use serde_json::json;

    fn filter(v: Value) -> Filter {
        Filter::parse(&v, Quake::schema()).unwrap()
    }

    #[test]
    fn ddl_quotes_identifiers() {
        assert_eq!(create_schema("quakezone"), "CREATE SCHEMA IF NOT EXISTS \"quakezone\"");
        assert_eq!(
            create_collection("quakezone", "tsunamiSource"),
            "CREATE TABLE IF NOT EXISTS \"quakezone\".\"tsunamiSource\" (seq BIGSERIAL, id TEXT PRIMARY KEY, doc JSONB NOT NULL)"
        );
    }

    #[test]
    fn plain_list_orders_by_insertion() {
        let q = select_list("s", "quake", &Filter::default());
        assert_eq!(q.sql, "SELECT id, doc FROM \"s\".\"quake\" ORDER BY seq ASC");
        assert!(q.params.is_empty());
    }

    #[test]
    fn full_filter_compiles() {
        let q = select_list(
            "s",
            "quake",
            &filter(json!({
                "where": {"mw": {"gt": 7}, "noaaTsunami": true},
                "order": "originTime DESC",
                "limit": 10,
                "skip": 20
            })),
        );
        assert_eq!(
            q.sql,
            "SELECT id, doc FROM \"s\".\"quake\" WHERE ((jsonb_typeof(doc->'mw') = jsonb_typeof($1) AND doc->'mw' > $1) AND doc->'noaaTsunami' = $2) ORDER BY doc->'originTime' DESC, seq ASC LIMIT 10 OFFSET 20"
        );
        assert_eq!(q.params, vec![SqlParam::json(7), SqlParam::json(true)]);
    }

    #[test]
    fn null_membership_and_id() {
        let mut q = QueryBuf::default();
        let p = Predicate::parse(
            &json!({"usgsMw": null, "id": {"inq": []}, "mw": {"nin": [null, 6]}}),
            Quake::schema(),
        )
        .unwrap();
        let sql = predicate_sql(&mut q, &p);
        assert_eq!(
            sql,
            "(FALSE AND ((doc->'mw' IS NOT NULL AND doc->'mw' <> 'null'::jsonb) AND doc->'mw' IS DISTINCT FROM $1) AND (doc->'usgsMw' IS NULL OR doc->'usgsMw' = 'null'::jsonb))"
        );
        assert_eq!(q.params, vec![SqlParam::json(6)]);
    }

    #[test]
    fn id_lifted_to_json() {
        let mut q = QueryBuf::default();
        let p = Predicate::parse(&json!({"id": "abc"}), Quake::schema()).unwrap();
        assert_eq!(predicate_sql(&mut q, &p), "to_jsonb(id) = $1");
    }

    #[test]
    fn text_operators_bind_text() {
        let mut q = QueryBuf::default();
        let where_ = json!({"or": [
            {"name": {"nilike": "%chile%"}},
            {"noaaLocation": {"regexp": "/peru/i"}}
        ]});
        let p = Predicate::parse(&where_, Quake::schema()).unwrap();
        assert_eq!(
            predicate_sql(&mut q, &p),
            "(doc->>'name' NOT ILIKE $1 OR doc->>'noaaLocation' ~* $2)"
        );
        assert_eq!(q.params, vec![SqlParam::text("%chile%"), SqlParam::text("peru")]);
    }

    #[test]
    fn updates_merge_or_replace() {
        let p = Predicate::parse(&json!({"mw": {"gt": 7}}), Quake::schema()).unwrap();
        let q = update_where("s", "quake", json!({"noaaTsunami": true}), Some(&p));
        assert_eq!(
            q.sql,
            "UPDATE \"s\".\"quake\" SET doc = doc || $1 WHERE (jsonb_typeof(doc->'mw') = jsonb_typeof($2) AND doc->'mw' > $2)"
        );
        let q = update_where("s", "quake", json!({}), None);
        assert_eq!(q.sql, "UPDATE \"s\".\"quake\" SET doc = doc || $1");
        let q = replace_by_id("s", "quake", "abc", json!({"name": "x"}));
        assert_eq!(q.sql, "UPDATE \"s\".\"quake\" SET doc = $1 WHERE id = $2");
        assert_eq!(q.params[1], SqlParam::text("abc"));
    }

    #[test]
    fn count_and_delete() {
        assert_eq!(count("s", "quake", None).sql, "SELECT COUNT(*) FROM \"s\".\"quake\"");
        let q = delete_by_id("s", "quake", "abc");
        assert_eq!(q.sql, "DELETE FROM \"s\".\"quake\" WHERE id = $1");
    }
}
