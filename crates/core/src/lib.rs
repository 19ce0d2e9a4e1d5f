//! Typed service client generation from OpenAPI descriptions.
//!
//! The generator walks an API description's path table and groups every
//! operation into a TypeScript service class, one class per service name
//! derived from the operation identifier. The pipeline is:
//! 1. Parse: JSON/YAML -> `ApiDescription`
//! 2. Index: validate verbs and resolve (service, method) names per operation
//! 3. Synthesize: classify parameters and build one method AST per operation
//! 4. Emit: `TsModule` -> String (via the `Emit` trait)

mod config;
mod error;
pub mod openapi;

pub use config::GeneratorConfig;
pub use error::GenerateError;
pub use openapi::{ApiDescription, GeneratedFile, generate, generate_from_str};
