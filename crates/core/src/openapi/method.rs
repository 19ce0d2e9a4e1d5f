//! Service method synthesis.
//!
//! Builds one `TsMethod` per operation:
//!
//! ```text
//! getUser(props: { id: string }) {
//!   const { baseUrl, adapter } = this.configuration;
//!   const { id } = props;
//!
//!   return adapter<User>({ url: `${baseUrl}/users/${id}`, method: 'GET', queryParams: undefined, bodyArgs: undefined });
//! }
//! ```

use tracing::warn;

use super::ir::api::{ClassifiedParams, HttpMethod, ParamLocation};
use super::ir::render::{collect_referenced_type_names, render_primitive, schema_to_ts_type};
use super::ir::types::{Binding, TemplatePart, TsExpr, TsMethod, TsParam, TsPrimitive, TsProp, TsStmt, TsType};
use super::ir::utils::{sanitize_ts_identifier, to_snake_case};
use super::spec::{Operation, Parameter, Schema};

const PROPS: &str = "props";
const BASE_URL: &str = "baseUrl";
const ADAPTER: &str = "adapter";
/// Locals every method body declares before the path bindings.
const BODY_LOCALS: [&str; 3] = [PROPS, BASE_URL, ADAPTER];
/// Appended to a path binding that would shadow a body local.
const SHADOW_SUFFIX: &str = "Param";

/// Status codes consulted for the return type, highest priority first.
const SUCCESS_STATUS_PRIORITY: [&str; 8] = ["200", "201", "202", "203", "206", "207", "default", "2XX"];

/// A synthesized method and the component types it mentions.
#[derive(Debug, Clone)]
pub struct SynthesizedMethod {
    /// The method declaration.
    pub method: TsMethod,
    /// Component names referenced by the body, parameter and response
    /// schemas, first-seen order.
    pub referenced_types: Vec<String>,
}

/// Build the method `name` for `operation` declared as `verb` on `path`.
pub fn synthesize(
    name: &str,
    path: &str,
    verb: HttpMethod,
    operation: &Operation,
    params: &ClassifiedParams<'_>,
) -> SynthesizedMethod {
    let response_schema = select_response_schema(operation);
    let return_type = response_schema
        .map(schema_to_ts_type)
        .unwrap_or_else(|| render_primitive(TsPrimitive::Void));

    let path_bindings = path_bindings(params.at(ParamLocation::Path));

    let mut body = vec![TsStmt::Destructure {
        bindings: vec![Binding::same(BASE_URL), Binding::same(ADAPTER)],
        init: TsExpr::member(TsExpr::ident("this"), "configuration"),
    }];
    if !path_bindings.is_empty() {
        body.push(TsStmt::Destructure {
            bindings: path_bindings.clone(),
            init: TsExpr::ident(PROPS),
        });
    }
    body.push(TsStmt::Blank);

    let request = TsExpr::Object(vec![
        ("url".to_string(), url_template(path, &path_bindings)),
        ("method".to_string(), TsExpr::string(verb.as_str())),
        ("queryParams".to_string(), query_params(params.at(ParamLocation::Query))),
        (
            "bodyArgs".to_string(),
            params
                .body
                .map(|body| TsExpr::index_str(TsExpr::ident(PROPS), body.content_name))
                .unwrap_or_else(TsExpr::undefined),
        ),
    ]);
    body.push(TsStmt::Return(TsExpr::Call {
        callee: Box::new(TsExpr::ident(ADAPTER)),
        type_args: vec![return_type],
        args: vec![request],
    }));

    let method_params = if params.has_parameters() {
        vec![TsParam {
            name: PROPS.to_string(),
            ty: Some(props_type(params)),
            optional: false,
        }]
    } else {
        Vec::new()
    };

    SynthesizedMethod {
        method: TsMethod {
            name: name.to_string(),
            params: method_params,
            body,
        },
        referenced_types: referenced_types(params, response_schema),
    }
}

/// Schema of the highest-priority success response carrying content.
pub fn select_response_schema(operation: &Operation) -> Option<&Schema> {
    SUCCESS_STATUS_PRIORITY.iter().find_map(|status| {
        operation
            .responses
            .get(*status)?
            .content
            .as_ref()?
            .values()
            .find_map(|media_type| media_type.schema.as_ref())
    })
}

/// Inline object type of the `props` argument: body field first, then one
/// field per declared parameter.
fn props_type(params: &ClassifiedParams<'_>) -> TsType {
    let mut props = Vec::with_capacity(params.declared.len() + 1);
    if let Some(body) = params.body {
        props.push(TsProp {
            name: body.content_name.to_string(),
            ty: schema_to_ts_type(body.schema),
            optional: !body.required,
        });
    }
    props.extend(params.declared.iter().map(|param| TsProp {
        name: param.name.clone(),
        ty: param
            .schema
            .as_ref()
            .map(schema_to_ts_type)
            .unwrap_or_else(|| render_primitive(TsPrimitive::Unknown)),
        optional: !param.required,
    }));
    TsType::Object(props)
}

fn path_bindings(path_params: &[&Parameter]) -> Vec<Binding> {
    path_params
        .iter()
        .map(|param| {
            let mut local = sanitize_ts_identifier(&param.name);
            if BODY_LOCALS.contains(&local.as_str()) {
                local.push_str(SHADOW_SUFFIX);
            }
            Binding {
                property: param.name.clone(),
                local,
            }
        })
        .collect()
}

fn query_params(query: &[&Parameter]) -> TsExpr {
    if query.is_empty() {
        return TsExpr::undefined();
    }
    TsExpr::Object(
        query
            .iter()
            .map(|param| (param.name.clone(), TsExpr::index_str(TsExpr::ident(PROPS), &param.name)))
            .collect(),
    )
}

/// `${baseUrl}` followed by `path`, with each `{placeholder}` replaced by
/// the matching path binding.
fn url_template(path: &str, bindings: &[Binding]) -> TsExpr {
    let mut parts = vec![TemplatePart::Dynamic(TsExpr::ident(BASE_URL))];
    let mut literal = String::new();
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|offset| open + offset) else {
            break;
        };
        literal.push_str(&rest[..open]);
        let placeholder = &rest[open + 1..close];
        match match_binding(placeholder, bindings) {
            Some(binding) => {
                if !literal.is_empty() {
                    parts.push(TemplatePart::Static(std::mem::take(&mut literal)));
                }
                parts.push(TemplatePart::Dynamic(TsExpr::ident(&binding.local)));
            }
            None => {
                warn!(path, placeholder, "no path parameter matches placeholder");
                literal.push_str(&rest[open..=close]);
            }
        }
        rest = &rest[close + 1..];
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(TemplatePart::Static(literal));
    }

    TsExpr::Template(parts)
}

fn match_binding<'b>(placeholder: &str, bindings: &'b [Binding]) -> Option<&'b Binding> {
    bindings
        .iter()
        .find(|binding| binding.property == placeholder)
        .or_else(|| {
            let wanted = to_snake_case(placeholder);
            bindings
                .iter()
                .find(|binding| to_snake_case(&binding.property) == wanted)
        })
}

fn referenced_types(params: &ClassifiedParams<'_>, response: Option<&Schema>) -> Vec<String> {
    let mut names = Vec::new();
    let schemas = params
        .body
        .map(|body| body.schema)
        .into_iter()
        .chain(params.declared.iter().filter_map(|param| param.schema.as_ref()))
        .chain(response);
    for schema in schemas {
        collect_referenced_type_names(schema, &mut names);
    }
    names
}
