//! The typed contract every record kind implements. Repositories and handlers are generic over it.

use crate::error::AppError;
use crate::schema::{RecordSchema, ID_FIELD};
use crate::service::RecordValidator;
use crate::store::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn schema() -> &'static RecordSchema;

    /// Identity, absent until first persisted.
    fn id(&self) -> Option<&str>;

    /// Build a record from any subset of fields. Required fields must be present; optional
    /// fields left out stay absent.
    fn from_partial(fields: Document) -> Result<Self, AppError> {
        let fields = RecordValidator::validate(&fields, Self::schema())?;
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::Validation(e.to_string()))
    }

    /// Decode a stored document (including `id`).
    fn from_document(doc: Document) -> Result<Self, AppError> {
        Ok(serde_json::from_value(Value::Object(doc))?)
    }

    /// Encode as a document without `id`; absent optional fields are omitted.
    fn to_document(&self) -> Result<Document, AppError> {
        let mut doc = self.to_json()?;
        doc.remove(ID_FIELD);
        Ok(doc)
    }

    /// Wire representation, `id` included when assigned.
    fn to_json(&self) -> Result<Document, AppError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(AppError::Serialization(<serde_json::Error as serde::ser::Error>::custom(
                format!("{} serialized to a non-object: {}", Self::schema().name, other),
            ))),
        }
    }
}
