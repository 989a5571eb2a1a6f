//! Error types for JSON:API encoding, decoding, and document manipulation.

use thiserror::Error;

use crate::model::Cardinality;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A one-or-many container was used with the wrong operation.
    CardinalityMismatch,
    /// A field annotation is malformed or incomplete.
    InvalidTag,
    /// A value's kind cannot be coerced or represented.
    UnsupportedType,
    /// The shape of a document and its target do not agree.
    InvalidInput,
    /// A resource or identifier type did not match the expected type.
    IdentifierTypeMismatch,
    /// A named template is missing from the context.
    ContextNotFound,
    /// A lookup on attributes, meta, or links missed.
    NotFound,
    /// A reserved member name was used as an attribute key.
    ReservedKey,
    /// Raw input is neither a single element nor a sequence of them.
    TypeMismatch,
    /// A value could not be parsed and strict decoding was requested.
    Coercion,
    /// The document bytes are not valid JSON:API JSON.
    Malformed,
}

impl ErrorKind {
    /// Returns a stable short name for the kind (e.g., "invalid-tag").
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::CardinalityMismatch => "cardinality-mismatch",
            ErrorKind::InvalidTag => "invalid-tag",
            ErrorKind::UnsupportedType => "unsupported-type",
            ErrorKind::InvalidInput => "invalid-input",
            ErrorKind::IdentifierTypeMismatch => "identifier-type-mismatch",
            ErrorKind::ContextNotFound => "context-not-found",
            ErrorKind::NotFound => "not-found",
            ErrorKind::ReservedKey => "reserved-key",
            ErrorKind::TypeMismatch => "type-mismatch",
            ErrorKind::Coercion => "coercion",
            ErrorKind::Malformed => "malformed",
        }
    }
}

/// Error raised by the document model, the encoder, or the decoder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("cardinality mismatch: operation requires a {expected} container, found {found}")]
    CardinalityMismatch {
        expected: Cardinality,
        found: Cardinality,
    },

    #[error("invalid tag {tag:?}: {reason}")]
    InvalidTag { tag: String, reason: &'static str },

    #[error("unsupported type: {kind}")]
    UnsupportedType { kind: &'static str },

    #[error("value {value} is out of range for {target}")]
    OutOfRange { target: &'static str, value: String },

    #[error("invalid input: {context}")]
    InvalidInput { context: &'static str },

    #[error("identifier type mismatch: expected {expected:?}, found {found:?}")]
    IdentifierTypeMismatch { expected: String, found: String },

    #[error("{template} template {name:?} not found in context")]
    ContextNotFound { template: &'static str, name: String },

    #[error("attribute {key:?} not found")]
    AttributeNotFound { key: String },

    #[error("meta member {key:?} not found")]
    MetaNotFound { key: String },

    #[error("link {key:?} not found")]
    LinkNotFound { key: String },

    #[error("link {key:?} has no meta object")]
    LinkHasNoMeta { key: String },

    #[error("attribute key {key:?} is reserved")]
    ReservedKey { key: String },

    #[error("type mismatch: {context}")]
    TypeMismatch { context: &'static str },

    #[error("could not coerce {member:?} into its field")]
    Coercion { member: String },

    #[error("malformed document: {0}")]
    Malformed(String),
}

impl Error {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CardinalityMismatch { .. } => ErrorKind::CardinalityMismatch,
            Error::InvalidTag { .. } => ErrorKind::InvalidTag,
            Error::UnsupportedType { .. } | Error::OutOfRange { .. } => ErrorKind::UnsupportedType,
            Error::InvalidInput { .. } => ErrorKind::InvalidInput,
            Error::IdentifierTypeMismatch { .. } => ErrorKind::IdentifierTypeMismatch,
            Error::ContextNotFound { .. } => ErrorKind::ContextNotFound,
            Error::AttributeNotFound { .. }
            | Error::MetaNotFound { .. }
            | Error::LinkNotFound { .. }
            | Error::LinkHasNoMeta { .. } => ErrorKind::NotFound,
            Error::ReservedKey { .. } => ErrorKind::ReservedKey,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::Coercion { .. } => ErrorKind::Coercion,
            Error::Malformed(_) => ErrorKind::Malformed,
        }
    }

    pub(crate) fn invalid_tag(tag: &str, reason: &'static str) -> Self {
        Error::InvalidTag {
            tag: tag.to_string(),
            reason,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_is_unsupported_type() {
        let err = Error::OutOfRange {
            target: "u8",
            value: "300".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(err.to_string(), "value 300 is out of range for u8");
    }

    #[test]
    fn test_lookup_misses_share_a_kind() {
        let errs = [
            Error::AttributeNotFound { key: "a".into() },
            Error::MetaNotFound { key: "m".into() },
            Error::LinkNotFound { key: "l".into() },
            Error::LinkHasNoMeta { key: "l".into() },
        ];
        for err in errs {
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
    }

    #[test]
    fn test_cardinality_display() {
        let err = Error::CardinalityMismatch {
            expected: Cardinality::One,
            found: Cardinality::Many,
        };
        assert_eq!(
            err.to_string(),
            "cardinality mismatch: operation requires a one container, found many"
        );
    }
}
