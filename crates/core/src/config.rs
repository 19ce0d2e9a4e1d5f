//! Generator configuration.
//!
//! Settings live in the `[generator]` table of a TOML file; every key is
//! optional and falls back to the defaults below.

use serde::Deserialize;

use crate::error::GenerateError;

const GENERATOR_TABLE: &str = "generator";

/// Output layout of a generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Directory (relative to the output root) holding one module per service.
    pub services_dir: String,
    /// Module path of the shared `Configuration` type, without extension.
    pub configuration_module: String,
    /// Module path of the shared type definitions, without extension.
    pub types_module: String,
    /// Whether to emit the configuration module alongside the services.
    pub emit_configuration: bool,
    /// Whether to emit the type definitions module from component schemas.
    pub emit_types: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            services_dir: "services".to_string(),
            configuration_module: "configuration".to_string(),
            types_module: "types".to_string(),
            emit_configuration: true,
            emit_types: true,
        }
    }
}

impl GeneratorConfig {
    /// Parse the `[generator]` table of a TOML document.
    ///
    /// A document without the table yields the default configuration.
    pub fn from_toml_str(contents: &str) -> Result<Self, GenerateError> {
        let value: toml::Value = contents
            .parse()
            .map_err(|err| GenerateError::Parse(format!("configuration: {err}")))?;

        match value.get(GENERATOR_TABLE) {
            Some(table) => table
                .clone()
                .try_into()
                .map_err(|err| GenerateError::Parse(format!("[{GENERATOR_TABLE}] table: {err}"))),
            None => Ok(Self::default()),
        }
    }

    /// File path of the module owning `service_name`.
    pub fn service_module_path(&self, service_name: &str) -> String {
        let dir = self.services_dir.trim_matches('/');
        if dir.is_empty() {
            format!("{service_name}.ts")
        } else {
            format!("{dir}/{service_name}.ts")
        }
    }

    /// File path of the configuration module.
    pub fn configuration_module_path(&self) -> String {
        format!("{}.ts", self.configuration_module)
    }

    /// File path of the type definitions module.
    pub fn types_module_path(&self) -> String {
        format!("{}.ts", self.types_module)
    }

    /// Import specifier for `module` as seen from a service module.
    pub fn import_specifier(&self, module: &str) -> String {
        let depth = self
            .services_dir
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .count();
        if depth == 0 {
            format!("./{module}")
        } else {
            format!("{}{module}", "../".repeat(depth))
        }
    }
}
