//! OpenAPI to TypeScript service generator.
//!
//! This module parses OpenAPI 3.x descriptions and generates:
//! - One service class per derived service name, one method per operation
//! - A shared configuration module (`Configuration`, `Adapter`)
//! - Type definitions from component schemas

mod emitter;
mod imports;
mod index;
pub mod ir;
mod method;
pub mod names;
mod params;
mod registry;
mod runtime;
pub mod spec;

pub use emitter::{GeneratedFile, generate, generate_from_str};
pub use spec::ApiDescription;
