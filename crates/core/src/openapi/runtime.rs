//! Shared modules imported by every service module.

use super::ir::render::schema_to_typedef;
use super::ir::types::{TsModule, TsParam, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};
use super::ir::utils::make_unknown_record;
use super::registry::CONFIGURATION_TYPE;
use super::spec::ApiDescription;

const REQUEST_DESCRIPTOR_TYPE: &str = "RequestDescriptor";
const ADAPTER_TYPE: &str = "Adapter";

fn prop(name: &str, ty: TsType, optional: bool) -> TsProp {
    TsProp {
        name: name.to_string(),
        ty,
        optional,
    }
}

/// `RequestDescriptor`, `Adapter` and `Configuration`.
pub fn configuration_module() -> TsModule {
    let string = TsType::Primitive(TsPrimitive::String);

    let request_descriptor = TsTypeDef {
        name: REQUEST_DESCRIPTOR_TYPE.to_string(),
        kind: TypeDefKind::Interface {
            properties: vec![
                prop("url", string.clone(), false),
                prop("method", string.clone(), false),
                prop("queryParams", make_unknown_record(), true),
                prop("bodyArgs", TsType::Primitive(TsPrimitive::Unknown), true),
            ],
        },
    };

    let adapter = TsTypeDef {
        name: ADAPTER_TYPE.to_string(),
        kind: TypeDefKind::TypeAlias {
            ty: TsType::Function {
                type_params: vec!["T".to_string()],
                params: vec![TsParam {
                    name: "request".to_string(),
                    ty: Some(TsType::Ref(REQUEST_DESCRIPTOR_TYPE.to_string())),
                    optional: false,
                }],
                return_type: Box::new(TsType::Generic {
                    name: "Promise".to_string(),
                    args: vec![TsType::Ref("T".to_string())],
                }),
            },
        },
    };

    let configuration = TsTypeDef {
        name: CONFIGURATION_TYPE.to_string(),
        kind: TypeDefKind::Interface {
            properties: vec![
                prop("baseUrl", string, false),
                prop("adapter", TsType::Ref(ADAPTER_TYPE.to_string()), false),
            ],
        },
    };

    TsModule {
        types: vec![request_descriptor, adapter, configuration],
        ..TsModule::default()
    }
}

/// One declaration per component schema, in declaration order.
pub fn types_module(description: &ApiDescription) -> TsModule {
    TsModule {
        types: description
            .component_schemas()
            .map(|(name, schema)| schema_to_typedef(name, schema))
            .collect(),
        ..TsModule::default()
    }
}
