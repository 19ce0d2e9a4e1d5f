//! TypeScript IR types for code generation.
//!
//! This module defines the TypeScript syntax the generator produces:
//! - TsType: Types (primitives, arrays, unions, objects, etc.)
//! - TsExpr / TsStmt: Expressions and statements inside service methods
//! - TsClass / TsModule: Module-level declarations handed to the printer

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, void, unknown
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B & C
    Intersection(Vec<TsType>),
    /// Object type: { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// Record type: Record<K, V>
    Record {
        /// Key type.
        key: Box<TsType>,
        /// Value type.
        value: Box<TsType>,
    },
    /// Literal type: 'foo', 42, true
    Literal(TsLiteral),
    /// Named type reference: User
    Ref(String),
    /// Generic instantiation: Promise<T>
    Generic {
        /// Generic type name.
        name: String,
        /// Type arguments.
        args: Vec<TsType>,
    },
    /// Function type: <T>(request: RequestDescriptor) => Promise<T>
    Function {
        /// Declared type parameters.
        type_params: Vec<String>,
        /// Parameters in order.
        params: Vec<TsParam>,
        /// Result type.
        return_type: Box<TsType>,
    },
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `void`
    Void,
    /// `unknown`
    Unknown,
}

/// Object property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Property key, quoted on emission when not a valid identifier.
    pub name: String,
    /// Property type.
    pub ty: TsType,
    /// Emitted as `name?:`.
    pub optional: bool,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    /// 'text'
    String(String),
    /// 3.14
    Number(f64),
    /// 42
    Int(i64),
    /// true / false
    Bool(bool),
    /// null
    Null,
    /// undefined
    Undefined,
}

/// TypeScript expression
#[derive(Debug, Clone, PartialEq)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: 'bar', 42, undefined
    Literal(TsLiteral),
    /// Function call, optionally with type arguments: foo<T>(a, b)
    Call {
        /// Called expression.
        callee: Box<TsExpr>,
        /// Explicit type arguments.
        type_args: Vec<TsType>,
        /// Call arguments.
        args: Vec<TsExpr>,
    },
    /// Object literal: { a: 1, b: 2 }
    Object(Vec<(String, TsExpr)>),
    /// Member access: foo.bar
    Member {
        /// Accessed object.
        object: Box<TsExpr>,
        /// Property name.
        prop: String,
    },
    /// Index/bracket access: obj['key']
    Index {
        /// Accessed object.
        object: Box<TsExpr>,
        /// Index expression.
        index: Box<TsExpr>,
    },
    /// Template literal: `${foo}/bar`
    Template(Vec<TemplatePart>),
}

impl TsExpr {
    /// Identifier expression.
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    /// `undefined`
    pub fn undefined() -> Self {
        Self::Literal(TsLiteral::Undefined)
    }

    /// String literal expression.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(TsLiteral::String(value.into()))
    }

    /// `object['key']`
    pub fn index_str(object: Self, key: impl Into<String>) -> Self {
        Self::Index {
            object: Box::new(object),
            index: Box::new(Self::string(key)),
        }
    }

    /// `object.prop`
    pub fn member(object: Self, prop: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(object),
            prop: prop.into(),
        }
    }
}

/// Template literal part
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    /// Static string part
    Static(String),
    /// Dynamic expression part: ${expr}
    Dynamic(TsExpr),
}

/// One entry of an object destructuring pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Property read from the source object.
    pub property: String,
    /// Local name bound to the value.
    pub local: String,
}

impl Binding {
    /// Binding whose local name matches the property.
    pub fn same(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            property: name.clone(),
            local: name,
        }
    }
}

/// Statement in a method body
#[derive(Debug, Clone, PartialEq)]
pub enum TsStmt {
    /// const { a, 'b-c': bC } = init;
    Destructure {
        /// Destructured properties.
        bindings: Vec<Binding>,
        /// Source object.
        init: TsExpr,
    },
    /// return expr;
    Return(TsExpr),
    /// Empty separator line
    Blank,
}

impl TsType {
    /// Rewrite named references in place; `renames` holds `(from, to)` pairs
    /// applied simultaneously.
    pub fn rename_refs(&mut self, renames: &[(String, String)]) {
        match self {
            TsType::Primitive(_) | TsType::Literal(_) => {}
            TsType::Array(inner) => inner.rename_refs(renames),
            TsType::Union(types) | TsType::Intersection(types) => {
                types.iter_mut().for_each(|ty| ty.rename_refs(renames));
            }
            TsType::Object(props) => props.iter_mut().for_each(|prop| prop.ty.rename_refs(renames)),
            TsType::Record { key, value } => {
                key.rename_refs(renames);
                value.rename_refs(renames);
            }
            TsType::Ref(name) => {
                if let Some((_, to)) = renames.iter().find(|(from, _)| *from == *name) {
                    name.clone_from(to);
                }
            }
            TsType::Generic { args, .. } => args.iter_mut().for_each(|ty| ty.rename_refs(renames)),
            TsType::Function {
                params,
                return_type,
                ..
            } => {
                for param in params {
                    if let Some(ty) = &mut param.ty {
                        ty.rename_refs(renames);
                    }
                }
                return_type.rename_refs(renames);
            }
        }
    }
}

impl TsExpr {
    /// Rewrite named type references inside type arguments.
    pub fn rename_type_refs(&mut self, renames: &[(String, String)]) {
        match self {
            TsExpr::Ident(_) | TsExpr::Literal(_) => {}
            TsExpr::Call {
                callee,
                type_args,
                args,
            } => {
                callee.rename_type_refs(renames);
                type_args.iter_mut().for_each(|ty| ty.rename_refs(renames));
                args.iter_mut().for_each(|arg| arg.rename_type_refs(renames));
            }
            TsExpr::Object(props) => props
                .iter_mut()
                .for_each(|(_, value)| value.rename_type_refs(renames)),
            TsExpr::Member { object, .. } => object.rename_type_refs(renames),
            TsExpr::Index { object, index } => {
                object.rename_type_refs(renames);
                index.rename_type_refs(renames);
            }
            TsExpr::Template(parts) => {
                for part in parts {
                    if let TemplatePart::Dynamic(expr) = part {
                        expr.rename_type_refs(renames);
                    }
                }
            }
        }
    }
}

/// Function or method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct TsParam {
    /// Parameter name.
    pub name: String,
    /// Annotated type, if any.
    pub ty: Option<TsType>,
    /// Emitted as `name?:`.
    pub optional: bool,
}

/// Class method definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsMethod {
    /// Method name.
    pub name: String,
    /// Parameters in order.
    pub params: Vec<TsParam>,
    /// Body statements.
    pub body: Vec<TsStmt>,
}

impl TsMethod {
    /// Rewrite named type references in the signature and body.
    pub fn rename_type_refs(&mut self, renames: &[(String, String)]) {
        if renames.is_empty() {
            return;
        }
        for param in &mut self.params {
            if let Some(ty) = &mut param.ty {
                ty.rename_refs(renames);
            }
        }
        for stmt in &mut self.body {
            match stmt {
                TsStmt::Destructure { init, .. } => init.rename_type_refs(renames),
                TsStmt::Return(expr) => expr.rename_type_refs(renames),
                TsStmt::Blank => {}
            }
        }
    }
}

/// Class definition
///
/// Always exported. Constructor parameters are emitted as
/// `private readonly` parameter properties.
#[derive(Debug, Clone, PartialEq)]
pub struct TsClass {
    /// Class name.
    pub name: String,
    /// Constructor parameter properties.
    pub ctor_params: Vec<TsParam>,
    /// Methods in insertion order.
    pub methods: Vec<TsMethod>,
}

// =============================================================================
// Module-Level IR (for printer)
// =============================================================================

/// Type-only import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Imported names
    pub names: Vec<ImportName>,
    /// Module specifier
    pub from: String,
}

/// One imported name, optionally bound under a local alias: `User as ApiUser`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportName {
    /// Name exported by the source module.
    pub name: String,
    /// Local name, when it differs from `name`.
    pub alias: Option<String>,
}

impl ImportName {
    /// Name imported without an alias.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Identifier the name is visible under inside the importing module.
    pub fn local(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    /// interface Foo { ... }
    Interface {
        /// Interface members.
        properties: Vec<TsProp>,
    },
    /// type Foo = ...
    TypeAlias {
        /// Aliased type.
        ty: TsType,
    },
    /// const Foo = { ... } as const; type Foo = ...
    ConstEnum {
        /// Keys and their literal values.
        values: Vec<(String, TsLiteral)>,
    },
}

/// Type definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeDef {
    /// Exported name.
    pub name: String,
    /// Declaration shape.
    pub kind: TypeDefKind,
}

/// Complete TypeScript module
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TsModule {
    /// Import declarations, in insertion order.
    pub imports: Vec<TsImport>,
    /// Exported type declarations.
    pub types: Vec<TsTypeDef>,
    /// Exported classes.
    pub classes: Vec<TsClass>,
}
