use thiserror::Error;

/// Errors raised by a generation pass.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A path declares one or more HTTP verbs outside the supported set.
    #[error("Unknown operation(s) [{}] declared on path '{path}'", .verbs.join(", "))]
    UnknownOperation {
        /// The offending path template.
        path: String,
        /// Every unrecognized verb key, in declaration order.
        verbs: Vec<String>,
    },

    /// The API description or generator configuration could not be parsed.
    #[error("Failed to parse {0}")]
    Parse(String),
}

impl From<serde_json::Error> for GenerateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(format!("API description: {err}"))
    }
}

impl From<serde_yaml::Error> for GenerateError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(format!("API description: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operation_lists_every_verb() {
        let err = GenerateError::UnknownOperation {
            path: "/items".into(),
            verbs: vec!["options".into(), "trace".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown operation(s) [options, trace] declared on path '/items'"
        );
    }
}
