//! Common utilities for TypeScript code generation.
//!
//! Identifier checks, quoting and small type constructors shared by the
//! renderer, the method synthesizer and the printer.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::types::{TsLiteral, TsPrimitive, TsType};
use crate::openapi::spec::EnumValue;

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Check if a name needs quoting when used as a property key.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_bracket_notation(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use in single-quoted TypeScript string literals.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}

/// Escape the static part of a template literal.
pub fn escape_template(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Quote a name if needed for use as a property key or enum key.
pub fn quote_if_needed(name: &str) -> String {
    if needs_bracket_notation(name) {
        format!("'{}'", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Sanitize a name into a valid TypeScript identifier.
/// - Splits on `-`, `.`, ` ` and joins the parts in camelCase
/// - Prepends `_` if it starts with a digit
/// - Escapes reserved words with a `_` prefix
pub fn sanitize_ts_identifier(name: &str) -> String {
    let mut result = String::new();
    for (i, part) in name.split(['-', '.', ' ']).enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 || result.is_empty() {
            result.push_str(part);
        } else {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                result.extend(first.to_uppercase());
                result.extend(chars);
            }
        }
    }

    // Anything left that is not an identifier character becomes `_`
    let mut result: String = result
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();

    if result.is_empty() {
        return "_empty".to_string();
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result = format!("_{result}");
    }

    if TS_RESERVED_WORDS.contains(result.as_str()) {
        result = format!("_{result}");
    }

    result
}

/// Convert a string to snake_case (for comparison purposes).
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else if c == '-' {
            result.push('_');
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert an enum value to a TypeScript literal.
pub fn enum_value_to_literal(v: &EnumValue) -> TsLiteral {
    match v {
        EnumValue::String(s) => TsLiteral::String(s.clone()),
        EnumValue::Integer(n) => TsLiteral::Int(*n),
        EnumValue::Float(f) => TsLiteral::Number(*f),
        EnumValue::Bool(b) => TsLiteral::Bool(*b),
        EnumValue::Null => TsLiteral::Null,
    }
}

/// Generate a key name for an enum value (used in const enum objects).
pub fn enum_value_to_key(v: &EnumValue, index: usize) -> String {
    match v {
        EnumValue::String(s) => quote_if_needed(s),
        EnumValue::Integer(n) if *n < 0 => format!("VALUE_MINUS_{}", n.unsigned_abs()),
        EnumValue::Integer(n) => format!("VALUE_{n}"),
        EnumValue::Float(_) => format!("VALUE_{index}"),
        EnumValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        EnumValue::Null => "NULL".to_string(),
    }
}

/// Create a `Record<string, T>` type.
pub fn make_string_record(value_type: TsType) -> TsType {
    TsType::Record {
        key: Box::new(TsType::Primitive(TsPrimitive::String)),
        value: Box::new(value_type),
    }
}

/// Create a `Record<string, unknown>` type (the default for untyped objects).
pub fn make_unknown_record() -> TsType {
    make_string_record(TsType::Primitive(TsPrimitive::Unknown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_bracket_notation() {
        assert!(!needs_bracket_notation("foo"));
        assert!(!needs_bracket_notation("_foo"));
        assert!(!needs_bracket_notation("$foo"));
        assert!(!needs_bracket_notation("camelCase"));

        assert!(needs_bracket_notation(""));
        assert!(needs_bracket_notation("123foo"));
        assert!(needs_bracket_notation("foo-bar"));
        assert!(needs_bracket_notation("application/json"));
    }

    #[test]
    fn test_escape_js_string() {
        assert_eq!(escape_js_string("hello"), "hello");
        assert_eq!(escape_js_string("it's"), "it\\'s");
        assert_eq!(escape_js_string("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_escape_template() {
        assert_eq!(escape_template("/files/`raw`"), "/files/\\`raw\\`");
        assert_eq!(escape_template("/a/${b}"), "/a/\\${b}");
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("foo"), "foo");
        assert_eq!(quote_if_needed("foo-bar"), "'foo-bar'");
        assert_eq!(quote_if_needed("application/json"), "'application/json'");
    }

    #[test]
    fn test_sanitize_ts_identifier() {
        assert_eq!(sanitize_ts_identifier("foo"), "foo");
        assert_eq!(sanitize_ts_identifier("user-id"), "userId");
        assert_eq!(sanitize_ts_identifier("foo.bar"), "fooBar");
        assert_eq!(sanitize_ts_identifier("-leading"), "leading");
        assert_eq!(sanitize_ts_identifier("a:b"), "a_b");
        assert_eq!(sanitize_ts_identifier("123foo"), "_123foo");
        assert_eq!(sanitize_ts_identifier("delete"), "_delete");
        assert_eq!(sanitize_ts_identifier(""), "_empty");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("fooBar"), "foo_bar");
        assert_eq!(to_snake_case("FooBar"), "foo_bar");
        assert_eq!(to_snake_case("item-id"), "item_id");
        assert_eq!(to_snake_case("itemId"), "item_id");
    }

    #[test]
    fn test_enum_value_to_key() {
        assert_eq!(enum_value_to_key(&EnumValue::String("active".into()), 0), "active");
        assert_eq!(enum_value_to_key(&EnumValue::String("in-review".into()), 0), "'in-review'");
        assert_eq!(enum_value_to_key(&EnumValue::Integer(-1), 0), "VALUE_MINUS_1");
        assert_eq!(enum_value_to_key(&EnumValue::Float(1.5), 3), "VALUE_3");
    }
}
