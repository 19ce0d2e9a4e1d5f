//! Intermediate Representation for service client generation.
//!
//! - `types`: TypeScript AST IR (TsType, TsExpr, TsStmt, TsClass, TsModule)
//! - `api`: API-level IR (HttpMethod, ParamLocation, ClassifiedParams)
//! - `render`: schema -> TypeScript type conversion
//! - `emit`: TypeScript AST -> code strings (via Emit trait)
//! - `utils`: Common utilities shared across modules

pub mod api;
pub mod emit;
pub mod render;
pub mod types;
pub mod utils;

pub use emit::Emit;
