//! Schema to TypeScript type rendering.
//!
//! Converts schema nodes into `TsType` trees, collects the component names a
//! schema refers to, and turns component schemas into exported declarations.

use std::collections::HashSet;

use crate::openapi::spec::{AdditionalProperties, Discriminator, EnumValue, Schema, SchemaType};

use super::types::{TsLiteral, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};
use super::utils::{
    enum_value_to_key, enum_value_to_literal, make_string_record, make_unknown_record,
};

const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Render a primitive kind as a type expression.
pub fn render_primitive(kind: TsPrimitive) -> TsType {
    TsType::Primitive(kind)
}

/// Convert a Schema to TsType
pub fn schema_to_ts_type(schema: &Schema) -> TsType {
    let ty = schema_to_non_null_type(schema);
    if schema.nullable == Some(true) {
        with_null(ty)
    } else {
        ty
    }
}

fn with_null(ty: TsType) -> TsType {
    match ty {
        TsType::Union(mut types) => {
            if !types.contains(&TsType::Primitive(TsPrimitive::Null)) {
                types.push(TsType::Primitive(TsPrimitive::Null));
            }
            TsType::Union(types)
        }
        other => TsType::Union(vec![other, TsType::Primitive(TsPrimitive::Null)]),
    }
}

fn schema_to_non_null_type(schema: &Schema) -> TsType {
    if let Some(ref_path) = &schema.ref_path {
        return TsType::Ref(ref_to_type_name(ref_path));
    }

    if let Some(const_value) = &schema.const_value {
        return json_value_to_ts_type(const_value);
    }

    if let Some(all_of) = &schema.all_of {
        return normalize_intersection(all_of);
    }

    if let Some(any_of) = &schema.any_of {
        return normalize_union(any_of, None);
    }

    if let Some(one_of) = &schema.one_of {
        return normalize_union(one_of, schema.discriminator.as_ref());
    }

    match &schema.schema_type {
        Some(SchemaType::Single(t)) => schema_type_to_ts(t, schema),
        Some(SchemaType::Multiple(types)) => {
            let mut ts_types: Vec<_> = types
                .iter()
                .filter(|t| *t != "null")
                .map(|t| schema_type_to_ts(t, schema))
                .collect();
            if types.iter().any(|t| t == "null") {
                ts_types.push(TsType::Primitive(TsPrimitive::Null));
            }
            if ts_types.len() == 1 {
                ts_types.swap_remove(0)
            } else {
                TsType::Union(ts_types)
            }
        }
        None => {
            if schema.properties.is_some() || schema.additional_properties.is_some() {
                normalize_object_type(schema)
            } else {
                TsType::Primitive(TsPrimitive::Unknown)
            }
        }
    }
}

/// Convert JSON value to TsType literal
fn json_value_to_ts_type(value: &serde_json::Value) -> TsType {
    match value {
        serde_json::Value::Null => TsType::Literal(TsLiteral::Null),
        serde_json::Value::Bool(b) => TsType::Literal(TsLiteral::Bool(*b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => TsType::Literal(TsLiteral::Int(i)),
            None => TsType::Literal(TsLiteral::Number(n.as_f64().unwrap_or_default())),
        },
        serde_json::Value::String(s) => TsType::Literal(TsLiteral::String(s.clone())),
        _ => TsType::Primitive(TsPrimitive::Unknown),
    }
}

/// Normalize intersection type (allOf)
fn normalize_intersection(schemas: &[Schema]) -> TsType {
    let mut types: Vec<_> = schemas.iter().map(schema_to_ts_type).collect();
    match types.len() {
        0 => TsType::Primitive(TsPrimitive::Unknown),
        1 => types.swap_remove(0),
        _ => TsType::Intersection(types),
    }
}

/// Normalize union type (anyOf/oneOf)
fn normalize_union(schemas: &[Schema], discriminator: Option<&Discriminator>) -> TsType {
    let Some(disc) = discriminator else {
        return TsType::Union(schemas.iter().map(schema_to_ts_type).collect());
    };

    let union_types = schemas
        .iter()
        .map(|schema| {
            let base_type = schema_to_ts_type(schema);
            let disc_value = schema.ref_path.as_ref().and_then(|ref_path| match &disc.mapping {
                Some(mapping) => mapping
                    .iter()
                    .find(|(_, target)| *target == ref_path)
                    .map(|(value, _)| value.clone()),
                None => Some(ref_to_type_name(ref_path)),
            });

            match disc_value {
                // { petType: 'dog' } & Dog
                Some(value) => TsType::Intersection(vec![
                    TsType::Object(vec![TsProp {
                        name: disc.property_name.clone(),
                        ty: TsType::Literal(TsLiteral::String(value)),
                        optional: false,
                    }]),
                    base_type,
                ]),
                None => base_type,
            }
        })
        .collect();

    TsType::Union(union_types)
}

/// Convert single schema type to TsType
fn schema_type_to_ts(schema_type: &str, schema: &Schema) -> TsType {
    match schema_type {
        "string" | "number" | "integer" => match &schema.enum_values {
            Some(enum_values) => enum_to_union_type(enum_values),
            None if schema_type == "string" => TsType::Primitive(TsPrimitive::String),
            None => TsType::Primitive(TsPrimitive::Number),
        },
        "boolean" => TsType::Primitive(TsPrimitive::Boolean),
        "null" => TsType::Primitive(TsPrimitive::Null),
        "array" => {
            let item_type = schema
                .items
                .as_deref()
                .map_or(TsType::Primitive(TsPrimitive::Unknown), schema_to_ts_type);
            TsType::Array(Box::new(item_type))
        }
        "object" => normalize_object_type(schema),
        _ => TsType::Primitive(TsPrimitive::Unknown),
    }
}

/// Convert enum values to union of literal types
fn enum_to_union_type(values: &[EnumValue]) -> TsType {
    TsType::Union(
        values
            .iter()
            .map(|v| TsType::Literal(enum_value_to_literal(v)))
            .collect(),
    )
}

/// Normalize object type
fn normalize_object_type(schema: &Schema) -> TsType {
    match (&schema.properties, &schema.additional_properties) {
        (Some(properties), Some(additional)) => TsType::Intersection(vec![
            TsType::Object(normalize_properties(properties, schema.required.as_deref())),
            normalize_additional_properties(Some(additional)),
        ]),
        (Some(properties), None) => {
            TsType::Object(normalize_properties(properties, schema.required.as_deref()))
        }
        (None, Some(additional)) => normalize_additional_properties(Some(additional)),
        (None, None) => make_unknown_record(),
    }
}

/// Normalize object properties in declaration order
fn normalize_properties<'a>(
    properties: impl IntoIterator<Item = (&'a String, &'a Schema)>,
    required: Option<&[String]>,
) -> Vec<TsProp> {
    let required: HashSet<&str> = required
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .collect();

    properties
        .into_iter()
        .map(|(name, schema)| TsProp {
            name: name.clone(),
            ty: schema_to_ts_type(schema),
            optional: !required.contains(name.as_str()),
        })
        .collect()
}

/// Normalize additional properties to a Record type
fn normalize_additional_properties(additional: Option<&AdditionalProperties>) -> TsType {
    match additional {
        Some(AdditionalProperties::Bool(true)) | None => make_unknown_record(),
        Some(AdditionalProperties::Bool(false)) => TsType::Object(Vec::new()),
        Some(AdditionalProperties::Schema(s)) => make_string_record(schema_to_ts_type(s)),
    }
}

/// Extract type name from $ref path
pub fn ref_to_type_name(ref_path: &str) -> String {
    ref_path
        .strip_prefix(COMPONENT_SCHEMA_PREFIX)
        .unwrap_or(ref_path)
        .to_string()
}

/// Append every component name `schema` references to `names`, skipping
/// names already present.
pub fn collect_referenced_type_names(schema: &Schema, names: &mut Vec<String>) {
    if let Some(ref_path) = &schema.ref_path {
        let name = ref_to_type_name(ref_path);
        if !names.contains(&name) {
            names.push(name);
        }
    }

    let nested = schema
        .properties
        .iter()
        .flat_map(|props| props.values())
        .chain(schema.items.as_deref())
        .chain(schema.all_of.iter().flatten())
        .chain(schema.any_of.iter().flatten())
        .chain(schema.one_of.iter().flatten());
    for child in nested {
        collect_referenced_type_names(child, names);
    }

    if let Some(AdditionalProperties::Schema(child)) = &schema.additional_properties {
        collect_referenced_type_names(child, names);
    }
}

/// Component names referenced by `schema`, in first-seen order.
pub fn referenced_type_names(schema: &Schema) -> Vec<String> {
    let mut names = Vec::new();
    collect_referenced_type_names(schema, &mut names);
    names
}

/// Convert a component schema to a type definition
pub fn schema_to_typedef(name: &str, schema: &Schema) -> TsTypeDef {
    if let Some(enum_values) = &schema.enum_values {
        let values = enum_values
            .iter()
            .enumerate()
            .map(|(i, v)| (enum_value_to_key(v, i), enum_value_to_literal(v)))
            .collect();
        return TsTypeDef {
            name: name.to_string(),
            kind: TypeDefKind::ConstEnum { values },
        };
    }

    // Plain objects become interfaces
    if let (Some(properties), None, false) = (
        &schema.properties,
        &schema.additional_properties,
        schema.is_nullable(),
    ) && schema.all_of.is_none()
    {
        return TsTypeDef {
            name: name.to_string(),
            kind: TypeDefKind::Interface {
                properties: normalize_properties(properties, schema.required.as_deref()),
            },
        };
    }

    TsTypeDef {
        name: name.to_string(),
        kind: TypeDefKind::TypeAlias {
            ty: schema_to_ts_type(schema),
        },
    }
}
