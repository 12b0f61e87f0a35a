//! Record CRUD handlers, generic over the record kind.

use crate::error::AppError;
use crate::query::{Filter, Predicate};
use crate::response::CountBody;
use crate::schema::Record;
use crate::state::AppState;
use crate::store::Document;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

/// `?filter=<json>`
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub filter: Option<String>,
}

/// `?where=<json>`
#[derive(Debug, Default, Deserialize)]
pub struct WhereQuery {
    #[serde(rename = "where")]
    pub where_: Option<String>,
}

impl FilterQuery {
    fn parse<E: Record>(&self) -> Result<Filter, AppError> {
        match self.filter.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Filter::parse_str(raw, E::schema()),
            _ => Ok(Filter::default()),
        }
    }
}

impl WhereQuery {
    fn parse<E: Record>(&self) -> Result<Option<Predicate>, AppError> {
        match self.where_.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Predicate::parse_str(raw, E::schema()).map(Some),
            _ => Ok(None),
        }
    }
}

fn body_to_map(value: Value) -> Result<Document, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn create<E: Record>(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Document>, AppError> {
    let body = body_to_map(body)?;
    let created = state.repository::<E>().create_document(&body).await?;
    Ok(Json(created))
}

pub async fn count<E: Record>(
    State(state): State<AppState>,
    Query(query): Query<WhereQuery>,
) -> Result<Json<CountBody>, AppError> {
    let predicate = query.parse::<E>()?;
    let count = state.repository::<E>().count(predicate.as_ref()).await?;
    Ok(Json(CountBody { count }))
}

pub async fn find<E: Record>(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    let filter = query.parse::<E>()?;
    let docs = state.repository::<E>().find_documents(&filter).await?;
    Ok(Json(docs))
}

pub async fn update_all<E: Record>(
    State(state): State<AppState>,
    Query(query): Query<WhereQuery>,
    Json(body): Json<Value>,
) -> Result<Json<CountBody>, AppError> {
    let predicate = query.parse::<E>()?;
    let patch = body_to_map(body)?;
    let count = state.repository::<E>().update_all(&patch, predicate.as_ref()).await?;
    Ok(Json(CountBody { count }))
}

/// Only the `fields` part of the filter applies to a single record.
pub async fn find_by_id<E: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Document>, AppError> {
    let filter = query.parse::<E>()?;
    let doc = state
        .repository::<E>()
        .find_document_by_id(&id, filter.fields.as_ref())
        .await?;
    Ok(Json(doc))
}

pub async fn update_by_id<E: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, AppError> {
    let patch = body_to_map(body)?;
    state.repository::<E>().update_by_id(&id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn replace_by_id<E: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, AppError> {
    let body = body_to_map(body)?;
    state.repository::<E>().replace_by_id(&id, &body).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_by_id<E: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.repository::<E>().delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quake;
    use serde_json::json;

    #[test]
    fn blank_query_params_mean_no_filter() {
        let q = FilterQuery { filter: Some("  ".into()) };
        assert_eq!(q.parse::<Quake>().unwrap(), Filter::default());
        let w = WhereQuery::default();
        assert!(w.parse::<Quake>().unwrap().is_none());
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(matches!(body_to_map(json!([1])), Err(AppError::BadRequest(_))));
        assert!(body_to_map(json!({"name": "x"})).is_ok());
    }
}
