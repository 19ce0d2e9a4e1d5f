//! TypeScript code emission via the Emit trait.
//!
//! Each AST type implements `Emit`; statements and class members are emitted
//! through `emit_indented` with two spaces per level.

use super::types::{
    Binding, ImportName, TemplatePart, TsClass, TsExpr, TsImport, TsLiteral, TsMethod, TsModule, TsParam,
    TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind,
};
use super::utils::{escape_js_string, escape_template, quote_if_needed};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

fn join<T: Emit>(items: &[T], sep: &str) -> String {
    items.iter().map(Emit::emit).collect::<Vec<_>>().join(sep)
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Void => "void",
            TsPrimitive::Unknown => "unknown",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("'{}'", escape_js_string(s)),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
            TsLiteral::Undefined => "undefined".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                // Wrap complex types in parentheses
                if matches!(**inner, TsType::Union(_) | TsType::Intersection(_) | TsType::Function { .. }) {
                    format!("({})[]", inner.emit())
                } else {
                    format!("{}[]", inner.emit())
                }
            }
            TsType::Union(types) => join(types, " | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    if matches!(t, TsType::Union(_)) {
                        format!("({})", t.emit())
                    } else {
                        t.emit()
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", join(props, "; "))
                }
            }
            TsType::Record { key, value } => format!("Record<{}, {}>", key.emit(), value.emit()),
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
            TsType::Generic { name, args } => format!("{name}<{}>", join(args, ", ")),
            TsType::Function {
                type_params,
                params,
                return_type,
            } => {
                let type_params = if type_params.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", type_params.join(", "))
                };
                format!("{type_params}({}) => {}", join(params, ", "), return_type.emit())
            }
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", quote_if_needed(&self.name), opt, self.ty.emit())
    }
}

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        match &self.kind {
            TypeDefKind::Interface { properties } => {
                let mut output = format!("export interface {} {{\n", self.name);
                for prop in properties {
                    output.push_str(&format!("{}{};\n", indent(1), prop.emit()));
                }
                output.push_str("}\n");
                output
            }
            TypeDefKind::TypeAlias { ty } => {
                format!("export type {} = {};\n", self.name, ty.emit())
            }
            TypeDefKind::ConstEnum { values } => {
                let mut output = format!("export const {} = {{\n", self.name);
                for (key, value) in values {
                    output.push_str(&format!("{}{key}: {},\n", indent(1), value.emit()));
                }
                output.push_str("} as const;\n\n");
                output.push_str(&format!(
                    "export type {name} = (typeof {name})[keyof typeof {name}];\n",
                    name = self.name
                ));
                output
            }
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call {
                callee,
                type_args,
                args,
            } => {
                let type_args = if type_args.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", join(type_args, ", "))
                };
                format!("{}{type_args}({})", callee.emit(), join(args, ", "))
            }
            TsExpr::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props
                        .iter()
                        .map(|(k, v)| format!("{}: {}", quote_if_needed(k), v.emit()))
                        .collect();
                    format!("{{ {} }}", parts.join(", "))
                }
            }
            TsExpr::Member { object, prop } => format!("{}.{prop}", object.emit()),
            TsExpr::Index { object, index } => format!("{}[{}]", object.emit(), index.emit()),
            TsExpr::Template(parts) => {
                let content: String = parts
                    .iter()
                    .map(|p| match p {
                        TemplatePart::Static(s) => escape_template(s),
                        TemplatePart::Dynamic(e) => format!("${{{}}}", e.emit()),
                    })
                    .collect();
                format!("`{content}`")
            }
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        match &self.ty {
            Some(ty) => format!("{}{opt}: {}", self.name, ty.emit()),
            None => format!("{}{opt}", self.name),
        }
    }
}

impl Emit for Binding {
    fn emit(&self) -> String {
        if self.property == self.local {
            self.local.clone()
        } else {
            format!("{}: {}", quote_if_needed(&self.property), self.local)
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, level: usize) -> String {
        let prefix = indent(level);
        match self {
            TsStmt::Destructure { bindings, init } => {
                format!("{prefix}const {{ {} }} = {};\n", join(bindings, ", "), init.emit())
            }
            TsStmt::Return(expr) => format!("{prefix}return {};\n", expr.emit()),
            TsStmt::Blank => "\n".to_string(),
        }
    }
}

// =============================================================================
// Classes
// =============================================================================

impl TsMethod {
    /// Emit with specified indentation level for the signature line.
    pub fn emit_indented(&self, level: usize) -> String {
        let prefix = indent(level);
        let mut output = format!(
            "{prefix}{}({}) {{\n",
            self.name,
            join(&self.params, ", ")
        );
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(level + 1));
        }
        output.push_str(&format!("{prefix}}}\n"));
        output
    }
}

impl Emit for TsClass {
    fn emit(&self) -> String {
        let mut output = format!("export class {} {{\n", self.name);

        let mut members = Vec::new();
        if !self.ctor_params.is_empty() {
            let params: Vec<_> = self
                .ctor_params
                .iter()
                .map(|p| format!("private readonly {}", p.emit()))
                .collect();
            members.push(format!("{}constructor({}) {{}}\n", indent(1), params.join(", ")));
        }
        members.extend(self.methods.iter().map(|m| m.emit_indented(1)));

        output.push_str(&members.join("\n"));
        output.push_str("}\n");
        output
    }
}

// =============================================================================
// Module
// =============================================================================

impl Emit for ImportName {
    fn emit(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {alias}", self.name),
            None => self.name.clone(),
        }
    }
}

impl Emit for TsImport {
    fn emit(&self) -> String {
        format!(
            "import type {{ {} }} from '{}';\n",
            join(&self.names, ", "),
            escape_js_string(&self.from)
        )
    }
}

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut sections = Vec::new();

        if !self.imports.is_empty() {
            sections.push(join(&self.imports, ""));
        }
        sections.extend(self.types.iter().map(Emit::emit));
        sections.extend(self.classes.iter().map(Emit::emit));

        sections.join("\n")
    }
}
