//! Parameter classification.
//!
//! Splits an operation's inputs into an optional body and parameters grouped
//! by transport location. Path-level parameters are merged in first; an
//! operation-level parameter with the same name and location replaces the
//! path-level entry at its position.

use indexmap::IndexMap;

use super::ir::api::{BodyParam, ClassifiedParams, ParamLocation};
use super::spec::{Operation, Parameter};

/// Classify the inputs of `operation`, merging `path_params` from the
/// enclosing path item.
pub fn classify<'a>(operation: &'a Operation, path_params: &'a [Parameter]) -> ClassifiedParams<'a> {
    let declared = merge_parameters(path_params, &operation.parameters);

    let mut by_location: IndexMap<ParamLocation, Vec<&'a Parameter>> = IndexMap::new();
    for param in &declared {
        by_location
            .entry(ParamLocation::parse(&param.location))
            .or_default()
            .push(*param);
    }

    ClassifiedParams {
        body: extract_body(operation),
        declared,
        by_location,
    }
}

fn merge_parameters<'a>(path_params: &'a [Parameter], op_params: &'a [Parameter]) -> Vec<&'a Parameter> {
    let mut merged: Vec<&'a Parameter> = path_params.iter().collect();
    for param in op_params {
        let existing = merged
            .iter()
            .position(|p| p.name == param.name && p.location == param.location);
        match existing {
            Some(index) => merged[index] = param,
            None => merged.push(param),
        }
    }
    merged
}

/// The first content entry of the request body that carries a schema.
pub fn extract_body(operation: &Operation) -> Option<BodyParam<'_>> {
    let body = operation.request_body.as_ref()?;
    body.content.iter().find_map(|(content_name, media_type)| {
        media_type.schema.as_ref().map(|schema| BodyParam {
            content_name: content_name.as_str(),
            schema,
            required: body.required,
        })
    })
}
