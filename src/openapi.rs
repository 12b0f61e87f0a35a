//! OpenAPI 3.1 document built from the record schemas.
//!
//! Per entity: components `<Entity>`, `New<Entity>` and `<Entity>Partial`, plus every route
//! under `/<plural>` with its parameters and response codes.

use crate::models::all_schemas;
use crate::schema::{FieldDef, FieldKind, RecordSchema, ID_FIELD};
use utoipa::openapi::path::{
    HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{
    ArrayBuilder, KnownFormat, ObjectBuilder, SchemaFormat, SchemaType, Type,
};
use utoipa::openapi::{
    ComponentsBuilder, ContentBuilder, InfoBuilder, OpenApi, OpenApiBuilder, PathsBuilder, Ref,
    RefOr, Required, Response, Schema,
};

const JSON: &str = "application/json";

/// Optional fields accept JSON null, so their type is `[<kind>, "null"]`.
fn field_schema(field: &FieldDef) -> RefOr<Schema> {
    let kind = match field.kind {
        FieldKind::String | FieldKind::Date => Type::String,
        FieldKind::Number => Type::Number,
        FieldKind::Integer => Type::Integer,
        FieldKind::Boolean => Type::Boolean,
        FieldKind::GeoPoint => Type::Object,
    };
    let schema_type = if field.required {
        SchemaType::Type(kind)
    } else {
        SchemaType::from_iter([kind, Type::Null])
    };
    let base = ObjectBuilder::new().schema_type(schema_type);
    let base = match field.kind {
        FieldKind::Date => base.format(Some(SchemaFormat::KnownFormat(KnownFormat::DateTime))),
        FieldKind::GeoPoint => base
            .property("type", ObjectBuilder::new().schema_type(Type::String))
            .property(
                "coordinates",
                ArrayBuilder::new().items(ObjectBuilder::new().schema_type(Type::Number)),
            )
            .required("type")
            .required("coordinates"),
        _ => base,
    };
    base.title(field.title)
        .description(field.description)
        .into()
}

#[derive(Clone, Copy)]
enum Variant {
    /// As stored: `id` present.
    Stored,
    /// Create body: no `id`, required fields required.
    New,
    /// Patch body: nothing required.
    Partial,
}

fn record_schema(schema: &RecordSchema, variant: Variant) -> Schema {
    let mut obj = ObjectBuilder::new()
        .schema_type(Type::Object)
        .description(Some(schema.description));
    if let Variant::Stored = variant {
        obj = obj
            .property(ID_FIELD, ObjectBuilder::new().schema_type(Type::String))
            .required(ID_FIELD);
    }
    for field in schema.fields {
        obj = obj.property(field.name, field_schema(field));
        if field.required && !matches!(variant, Variant::Partial) {
            obj = obj.required(field.name);
        }
    }
    obj.build().into()
}

fn json_response(description: &str, schema: impl Into<RefOr<Schema>>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content(JSON, ContentBuilder::new().schema(Some(schema)).build())
        .build()
}

fn plain_response(description: &str) -> Response {
    ResponseBuilder::new().description(description).build()
}

fn count_schema() -> Schema {
    ObjectBuilder::new()
        .schema_type(Type::Object)
        .property("count", ObjectBuilder::new().schema_type(Type::Integer))
        .required("count")
        .build()
        .into()
}

fn json_query(name: &str, description: &str) -> ParameterBuilder {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(ObjectBuilder::new().schema_type(Type::String)))
}

fn id_param() -> ParameterBuilder {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(ObjectBuilder::new().schema_type(Type::String)))
}

fn json_body(component: &str) -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .content(
            JSON,
            ContentBuilder::new()
                .schema(Some(Ref::from_schema_name(component)))
                .build(),
        )
        .required(Some(Required::True))
        .build()
}

fn add_entity(mut paths: PathsBuilder, schema: &RecordSchema) -> PathsBuilder {
    let name = schema.name;
    let new_name = format!("New{}", name);
    let partial_name = format!("{}Partial", name);
    let base = format!("/{}", schema.path_segment());
    let record = || Ref::from_schema_name(name);
    let op = |id: String, summary: String| {
        OperationBuilder::new()
            .tag(name)
            .operation_id(Some(id))
            .summary(Some(summary))
    };
    let bad_request = || plain_response("Malformed filter, predicate or body");
    let not_found = || plain_response(format!("{} not found", name).as_str());

    let collection = PathItemBuilder::new()
        .operation(
            HttpMethod::Post,
            op(format!("{}.create", name), format!("Create a {}", name))
                .request_body(Some(json_body(&new_name)))
                .response("200", json_response(&format!("{} instance", name), record()))
                .response("400", bad_request())
                .response("409", plain_response("Duplicate id"))
                .build(),
        )
        .operation(
            HttpMethod::Get,
            op(format!("{}.find", name), format!("Find {} records", name))
                .parameter(json_query(
                    "filter",
                    "JSON filter: where, fields, order, limit, skip, offset",
                ))
                .response(
                    "200",
                    json_response(
                        &format!("Array of {} instances", name),
                        ArrayBuilder::new().items(record()),
                    ),
                )
                .response("400", bad_request())
                .build(),
        )
        .operation(
            HttpMethod::Patch,
            op(format!("{}.updateAll", name), format!("Patch every matching {}", name))
                .parameter(json_query("where", "JSON predicate"))
                .request_body(Some(json_body(&partial_name)))
                .response(
                    "200",
                    json_response(&format!("{} PATCH success count", name), count_schema()),
                )
                .response("400", bad_request())
                .build(),
        )
        .build();
    paths = paths.path(base.clone(), collection);

    let count = PathItemBuilder::new()
        .operation(
            HttpMethod::Get,
            op(format!("{}.count", name), format!("Count {} records", name))
                .parameter(json_query("where", "JSON predicate"))
                .response("200", json_response(&format!("{} model count", name), count_schema()))
                .response("400", bad_request())
                .build(),
        )
        .build();
    paths = paths.path(format!("{}/count", base), count);

    let item = PathItemBuilder::new()
        .operation(
            HttpMethod::Get,
            op(format!("{}.findById", name), format!("Fetch one {}", name))
                .parameter(id_param())
                .parameter(json_query("filter", "JSON filter; only fields applies"))
                .response("200", json_response(&format!("{} instance", name), record()))
                .response("404", not_found())
                .build(),
        )
        .operation(
            HttpMethod::Patch,
            op(format!("{}.updateById", name), format!("Merge fields into one {}", name))
                .parameter(id_param())
                .request_body(Some(json_body(&partial_name)))
                .response("204", plain_response(&format!("{} PATCH success", name)))
                .response("400", bad_request())
                .response("404", not_found())
                .build(),
        )
        .operation(
            HttpMethod::Put,
            op(format!("{}.replaceById", name), format!("Replace one {}", name))
                .parameter(id_param())
                .request_body(Some(json_body(&new_name)))
                .response("204", plain_response(&format!("{} PUT success", name)))
                .response("400", bad_request())
                .response("404", not_found())
                .build(),
        )
        .operation(
            HttpMethod::Delete,
            op(format!("{}.deleteById", name), format!("Delete one {}", name))
                .parameter(id_param())
                .response("204", plain_response(&format!("{} DELETE success", name)))
                .response("404", not_found())
                .build(),
        )
        .build();
    paths.path(format!("{}/{{id}}", base), item)
}

/// The full API document.
pub fn document() -> OpenApi {
    let mut paths = PathsBuilder::new();
    let mut components = ComponentsBuilder::new();
    for schema in all_schemas() {
        paths = add_entity(paths, schema);
        components = components
            .schema(schema.name, record_schema(schema, Variant::Stored))
            .schema(format!("New{}", schema.name), record_schema(schema, Variant::New))
            .schema(format!("{}Partial", schema.name), record_schema(schema, Variant::Partial));
    }
    let info = InfoBuilder::new()
        .title("QuakeZone API")
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some("Earthquake and tsunami catalogue records"))
        .build();
    OpenApiBuilder::new()
        .info(info)
        .paths(paths.build())
        .components(Some(components.build()))
        .build()
}
