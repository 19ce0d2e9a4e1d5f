//! Generation entry points.
//!
//! The pipeline is:
//! 1. Parse: JSON/YAML -> ApiDescription
//! 2. Index: ApiDescription -> ServiceRegistry (one TsModule per service)
//! 3. Emit: TsModule -> String (via Emit trait)

use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::openapi::index::OperationIndex;
use crate::openapi::ir::Emit;
use crate::openapi::names::ControllerConvention;
use crate::openapi::runtime::{configuration_module, types_module};
use crate::openapi::spec::ApiDescription;

/// One emitted TypeScript module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root, `/`-separated.
    pub path: String,
    /// Module source text.
    pub contents: String,
}

/// Generate every module for `description`.
///
/// Files come back as: configuration module, types module, then service
/// modules in the order their first operation appears.
pub fn generate(
    description: &ApiDescription,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedFile>, GenerateError> {
    let indexed = OperationIndex::new(config, ControllerConvention).run(description)?;

    let mut files = Vec::with_capacity(indexed.registry.len() + 2);
    if config.emit_configuration {
        files.push(GeneratedFile {
            path: config.configuration_module_path(),
            contents: configuration_module().emit(),
        });
    }
    if config.emit_types {
        files.push(GeneratedFile {
            path: config.types_module_path(),
            contents: types_module(description).emit(),
        });
    }

    let services = indexed.registry.len();
    files.extend(
        indexed
            .registry
            .into_modules()
            .map(|(path, module)| GeneratedFile {
                path,
                contents: module.emit(),
            }),
    );

    info!(
        operations = indexed.operations,
        services,
        files = files.len(),
        "generated service modules"
    );
    Ok(files)
}

/// Parse a JSON or YAML description and generate its modules.
pub fn generate_from_str(
    content: &str,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedFile>, GenerateError> {
    let description = ApiDescription::parse(content)?;
    generate(&description, config)
}
