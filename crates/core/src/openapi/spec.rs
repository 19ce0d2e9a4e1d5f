//! API description structs for serde deserialization.
//!
//! This module defines the subset of the OpenAPI 3.x document the generator
//! consumes. Maps are `IndexMap`s so generation follows declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::GenerateError;

/// Root API description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDescription {
    /// Path templates mapped to their path items, in declaration order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    pub components: Option<Components>,
}

/// Components section containing reusable schemas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    /// Named schemas referenced via `#/components/schemas/<name>`.
    pub schemas: Option<IndexMap<String, Schema>>,
}

/// A path item: shared metadata plus one entry per declared verb.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    /// Reference to an external path item definition.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    /// Short summary shared by all operations.
    pub summary: Option<String>,
    /// Long description shared by all operations.
    pub description: Option<String>,
    /// Alternative servers, kept opaque.
    pub servers: Option<serde_json::Value>,
    /// Path-level parameters shared by all operations.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Every other key, keyed by the verb as written in the document.
    ///
    /// Keys are not filtered here; unsupported verbs are rejected when the
    /// path is indexed.
    #[serde(flatten)]
    pub operations: IndexMap<String, Operation>,
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Identifier following the `<Controller>_<method>` convention.
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request body definition.
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code (or `default` / `2XX`).
    #[serde(default, deserialize_with = "deserialize_responses")]
    pub responses: IndexMap<String, Response>,
}

/// A parameter (path, query, header or cookie).
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// Parameter name as sent on the wire.
    pub name: String,
    /// Transport location (`path`, `query`, `header`, `cookie`).
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Value schema.
    pub schema: Option<Schema>,
}

/// A request body definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    /// Whether the body must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Media types mapped to their content, in declaration order.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A response definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    /// Human-readable description.
    pub description: Option<String>,
    /// Media types mapped to their content, in declaration order.
    pub content: Option<IndexMap<String, MediaType>>,
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    /// Payload schema.
    pub schema: Option<Schema>,
}

/// JSON Schema definition used in API descriptions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Reference to another schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Properties for object types.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Required property names for object types.
    pub required: Option<Vec<String>>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    /// Enum values (can be strings, integers, floats, booleans, or null).
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<EnumValue>>,

    /// Union type (any of these schemas).
    pub any_of: Option<Vec<Schema>>,

    /// Union type (exactly one of these schemas).
    pub one_of: Option<Vec<Schema>>,

    /// Intersection type (all of these schemas combined).
    pub all_of: Option<Vec<Schema>>,

    /// Additional properties for object types (for Record/dict types).
    pub additional_properties: Option<AdditionalProperties>,

    /// Discriminator for polymorphic oneOf schemas.
    pub discriminator: Option<Discriminator>,

    /// Format hint (e.g., date-time, uuid).
    pub format: Option<String>,

    /// Constant value - schema matches only this exact value.
    #[serde(rename = "const")]
    pub const_value: Option<serde_json::Value>,

    /// OpenAPI 3.0 nullable flag (3.1 uses type arrays instead).
    pub nullable: Option<bool>,
}

/// Enum value can be string, integer, float, boolean, or null.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    /// String member.
    String(String),
    /// Integer member.
    Integer(i64),
    /// Floating point member.
    Float(f64),
    /// Boolean member.
    Bool(bool),
    /// `null` member.
    Null,
}

/// Discriminator for polymorphic schemas (oneOf/anyOf).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// The property name that contains the discriminator value.
    pub property_name: String,
    /// Optional mapping from discriminator values to schema refs.
    pub mapping: Option<IndexMap<String, String>>,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `"type": "string"`
    Single(String),
    /// `"type": ["string", "null"]`
    Multiple(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` allows anything, `false` forbids extra keys.
    Bool(bool),
    /// Extra keys must match this schema.
    Schema(Box<Schema>),
}

/// YAML documents may write status codes as bare integers.
#[derive(Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
enum StatusKey {
    Code(u16),
    Name(String),
}

fn deserialize_responses<'de, D>(deserializer: D) -> Result<IndexMap<String, Response>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<StatusKey, Response>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, response)| {
            let key = match key {
                StatusKey::Code(code) => code.to_string(),
                StatusKey::Name(name) => name,
            };
            (key, response)
        })
        .collect())
}

impl ApiDescription {
    /// Parse a description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GenerateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a description from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, GenerateError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a description, picking JSON when the document opens with `{`.
    pub fn parse(content: &str) -> Result<Self, GenerateError> {
        if content.trim_start().starts_with('{') {
            Self::from_json(content)
        } else {
            Self::from_yaml(content)
        }
    }

    /// Component schemas in declaration order.
    pub fn component_schemas(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.components
            .iter()
            .filter_map(|components| components.schemas.as_ref())
            .flat_map(|schemas| schemas.iter())
    }
}

impl Schema {
    /// Check if this schema admits null (nullable flag or `null` in a type array).
    pub fn is_nullable(&self) -> bool {
        if self.nullable == Some(true) {
            return true;
        }

        matches!(&self.schema_type, Some(SchemaType::Multiple(types)) if types.iter().any(|t| t == "null"))
    }
}
