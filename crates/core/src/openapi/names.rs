//! Service and method names derived from operation identifiers.
//!
//! Identifiers follow the `<Name>Controller_<method>` convention of the
//! backend framework that produced the description. The convention is kept
//! behind [`NamingConvention`] so another backend's scheme can be plugged in
//! without touching the rest of the pipeline.

/// Separator between the controller and method segments.
pub const SEGMENT_SEPARATOR: char = '_';
/// Suffix of controller segments.
pub const CONTROLLER_SUFFIX: &str = "Controller";
/// Suffix replacing [`CONTROLLER_SUFFIX`] in service names.
pub const SERVICE_SUFFIX: &str = "Service";
/// Service name used when an identifier does not follow the convention.
pub const FALLBACK_SERVICE_NAME: &str = "Service";
/// Method name used when an identifier does not follow the convention.
pub const FALLBACK_METHOD_NAME: &str = "unknownName";

/// A (service, method) pair derived from an operation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedName {
    /// Name of the generated service class.
    pub service: String,
    /// Name of the generated method.
    pub method: String,
}

impl ResolvedName {
    fn fallback() -> Self {
        Self {
            service: FALLBACK_SERVICE_NAME.to_string(),
            method: FALLBACK_METHOD_NAME.to_string(),
        }
    }
}

/// Maps operation identifiers to (service, method) names.
pub trait NamingConvention {
    /// Resolve `operation_id`. Never fails; malformed ids get a fallback pair.
    fn resolve(&self, operation_id: &str) -> ResolvedName;
}

/// `UserController_getUser` -> `UserService` / `getUser`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerConvention;

impl NamingConvention for ControllerConvention {
    fn resolve(&self, operation_id: &str) -> ResolvedName {
        resolve_name(operation_id)
    }
}

/// Split `operation_id` into exactly two non-empty segments and rewrite the
/// controller suffix of the first; any other shape yields
/// (`Service`, `unknownName`).
pub fn resolve_name(operation_id: &str) -> ResolvedName {
    let segments: Vec<&str> = operation_id.split(SEGMENT_SEPARATOR).collect();
    match segments.as_slice() {
        [controller, method] if !controller.is_empty() && !method.is_empty() => ResolvedName {
            service: service_name(controller),
            method: (*method).to_string(),
        },
        _ => ResolvedName::fallback(),
    }
}

fn service_name(controller: &str) -> String {
    match controller.strip_suffix(CONTROLLER_SUFFIX) {
        Some(stem) => format!("{stem}{SERVICE_SUFFIX}"),
        None => controller.to_string(),
    }
}
