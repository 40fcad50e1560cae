//! Error types for document parsing.

use thiserror::Error;

/// Error raised by a parameter-store backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ParameterStoreError(pub String);

/// Errors that reject a document wholesale.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The schema version is unknown or not in the supported set.
    #[error("document schema version {0} is not supported by this agent")]
    UnsupportedSchema(String),

    /// The document carries no executable steps for its schema family.
    #[error("unsupported schema format: document contains no executable steps")]
    UnsupportedFormat,

    /// Parameter name or parameter-store reference validation failed.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The parameter-store backend failed while resolving references.
    #[error("parameter store: {0}")]
    ParameterStore(#[from] ParameterStoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ParseError::UnsupportedSchema("9.9".to_string()).to_string(),
            "document schema version 9.9 is not supported by this agent"
        );
        assert_eq!(
            ParseError::ParameterStore(ParameterStoreError("no such key".to_string())).to_string(),
            "parameter store: no such key"
        );
    }
}
