//! API-level IR for classified operations.
//!
//! - HttpMethod: the supported verb set
//! - ParamLocation: where a parameter travels
//! - BodyParam / ClassifiedParams: an operation's inputs grouped for synthesis

use indexmap::IndexMap;

use crate::openapi::spec::{Parameter, Schema};

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `post`
    Post,
    /// `get`
    Get,
    /// `patch`
    Patch,
    /// `delete`
    Delete,
    /// `put`
    Put,
}

impl HttpMethod {
    /// Every supported verb key, lowercase as written in descriptions.
    pub const KNOWN_VERBS: [&'static str; 5] = ["post", "get", "patch", "delete", "put"];

    /// Parse a lowercase verb key; anything else is unsupported.
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "post" => Some(Self::Post),
            "get" => Some(Self::Get),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            "put" => Some(Self::Put),
            _ => None,
        }
    }

    /// Upper-cased verb sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Get => "GET",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Put => "PUT",
        }
    }
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Substituted into the path template.
    Path,
    /// Sent in the query string.
    Query,
    /// Sent as a request header.
    Header,
    /// Sent as a cookie.
    Cookie,
    /// Any location the generator does not recognize.
    Other,
}

impl ParamLocation {
    /// Parse the `in` field of a parameter.
    pub fn parse(location: &str) -> Self {
        match location {
            "path" => Self::Path,
            "query" => Self::Query,
            "header" => Self::Header,
            "cookie" => Self::Cookie,
            _ => Self::Other,
        }
    }
}

/// Request body selected for a method
#[derive(Debug, Clone, Copy)]
pub struct BodyParam<'a> {
    /// Media-type key the body was declared under; names the props field.
    pub content_name: &'a str,
    /// Body schema.
    pub schema: &'a Schema,
    /// Whether the body must be supplied.
    pub required: bool,
}

/// An operation's inputs, grouped for method synthesis
#[derive(Debug, Clone, Default)]
pub struct ClassifiedParams<'a> {
    /// Request body, if the operation declares structured content.
    pub body: Option<BodyParam<'a>>,
    /// Every parameter in declaration order (path-level first).
    pub declared: Vec<&'a Parameter>,
    /// Parameters grouped by location; groups keep declaration order.
    pub by_location: IndexMap<ParamLocation, Vec<&'a Parameter>>,
}

impl<'a> ClassifiedParams<'a> {
    /// Whether the synthesized method takes a `props` argument.
    pub fn has_parameters(&self) -> bool {
        self.body.is_some() || !self.declared.is_empty()
    }

    /// Parameters declared at `location`, in declaration order.
    pub fn at(&self, location: ParamLocation) -> &[&'a Parameter] {
        self.by_location
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_verbs_round_trip() {
        for verb in HttpMethod::KNOWN_VERBS {
            let method = HttpMethod::from_verb(verb);
            assert!(method.is_some(), "{verb} should be supported");
            assert_eq!(method.map(|m| m.as_str().to_lowercase()).as_deref(), Some(verb));
        }
    }

    #[test]
    fn test_unsupported_verbs() {
        assert_eq!(HttpMethod::from_verb("options"), None);
        assert_eq!(HttpMethod::from_verb("GET"), None);
        assert_eq!(HttpMethod::from_verb("head"), None);
    }

    #[test]
    fn test_param_location_parse() {
        assert_eq!(ParamLocation::parse("path"), ParamLocation::Path);
        assert_eq!(ParamLocation::parse("cookie"), ParamLocation::Cookie);
        assert_eq!(ParamLocation::parse("matrix"), ParamLocation::Other);
    }
}
