//! Request validation from record schemas.

use crate::error::AppError;
use crate::schema::{FieldDef, RecordSchema, ID_FIELD};
use crate::store::Document;
use serde_json::Value;

pub struct RecordValidator;

impl RecordValidator {
    /// Validate a whole record. All required fields must be present and non-null.
    /// Returns the body with values in canonical form (dates normalized, whole floats as integers).
    pub fn validate(body: &Document, schema: &RecordSchema) -> Result<Document, AppError> {
        for field in schema.required_fields() {
            match body.get(field.name) {
                None | Some(Value::Null) => {
                    return Err(AppError::Validation(format!("{} is required", field.name)));
                }
                Some(_) => {}
            }
        }
        Self::validate_partial(body, schema)
    }

    /// Validate only the fields present in body (for PATCH). Required is not enforced for
    /// missing fields, but a required field cannot be cleared.
    pub fn validate_partial(body: &Document, schema: &RecordSchema) -> Result<Document, AppError> {
        let mut out = Document::new();
        for (key, v) in body {
            if key == ID_FIELD {
                return Err(AppError::Validation(format!(
                    "{} is assigned by the store and cannot be written",
                    ID_FIELD
                )));
            }
            let field = schema.field(key).ok_or_else(|| {
                AppError::Validation(format!("{} is not a property of {}", key, schema.name))
            })?;
            out.insert(key.clone(), validate_field(field, v)?);
        }
        Ok(out)
    }
}

fn validate_field(field: &FieldDef, v: &Value) -> Result<Value, AppError> {
    if v.is_null() {
        if field.required {
            return Err(AppError::Validation(format!("{} is required", field.name)));
        }
        return Ok(Value::Null);
    }
    field
        .kind
        .coerce(v)
        .map_err(|msg| AppError::Validation(format!("{}: {}", field.name, msg)))
}
