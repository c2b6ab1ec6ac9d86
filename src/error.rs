//! Error types for the IR loader

use thiserror::Error;

/// Entity kinds that carry a wire id inside a CFG document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A procedure record (`pd_id`)
    Procedure,
    /// A node record (`nd_id`)
    Node,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Procedure => write!(f, "procedure"),
            Entity::Node => write!(f, "node"),
        }
    }
}

/// IR loader errors
///
/// Every variant is fatal for the document being decoded: a decode either
/// returns a complete model or one of these.
#[derive(Error, Debug, Clone)]
pub enum Error {
    // Document errors
    /// Input text is not valid JSON
    #[error("Malformed JSON document: {0}")]
    Json(String),

    /// Reading a document from disk failed
    #[error("Failed to read {path}: {message}")]
    Io {
        /// Path that was being read
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    // Structural errors
    /// A required field is absent
    ///
    /// **Triggered by:** an object that lacks a non-optional key
    /// **Example:** `{"type_kind": "Tptr", "kind": "Pk_pointer"}` (no `type`)
    #[error("Missing field `{field}` in {context}")]
    MissingField {
        /// Name of the missing key
        field: &'static str,
        /// Entity being decoded
        context: &'static str,
    },

    /// A tag string is not part of the enum it selects from
    ///
    /// **Triggered by:** any unrecognized discriminator; there is no fallback
    /// **Example:** `{"type_kind": "Tfunction"}`
    #[error("Unknown {enum_name} variant: {tag:?}")]
    UnknownVariant {
        /// Name of the wire enum
        enum_name: &'static str,
        /// Tag that was found
        tag: String,
    },

    /// A value has the wrong JSON shape
    #[error("Expected {expected} for {context}, got {got}")]
    ShapeMismatch {
        /// Expected JSON shape
        expected: &'static str,
        /// Entity being decoded
        context: &'static str,
        /// Short rendering of what was found
        got: String,
    },

    /// A recognized construct that the loader refuses to model
    ///
    /// **Example:** `Tenum` types, non-`Class` struct descriptors
    #[error("Unsupported {what}: {detail}")]
    Unsupported {
        /// Construct category
        what: &'static str,
        /// Offending tag or value
        detail: String,
    },

    /// Types or expressions nest deeper than the configured limit
    #[error("Nesting depth limit ({limit}) exceeded while decoding {context}")]
    DepthExceeded {
        /// Configured maximum depth
        limit: usize,
        /// Entity being decoded when the limit was hit
        context: &'static str,
    },

    /// Two records in one document share a wire id
    #[error("Duplicate {entity} id {id}")]
    DuplicateId {
        /// Record kind
        entity: Entity,
        /// Repeated wire id
        id: i64,
    },

    // Reference errors
    /// A wire id used as a link has no definition in the document
    ///
    /// **Triggered by:** an edge, start/exit pointer or owner id without a
    /// matching record
    #[error("Unresolved {entity} id {id} referenced by {referrer}")]
    UnresolvedReference {
        /// Kind of record the id should name
        entity: Entity,
        /// Wire id that could not be resolved
        id: i64,
        /// Where the id was used
        referrer: String,
    },
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing field, unrecognized tag, shape mismatch or unreadable input
    Structural,
    /// Dangling wire id
    Reference,
}

impl Error {
    /// Create a missing-field error
    pub fn missing(field: &'static str, context: &'static str) -> Self {
        Error::MissingField { field, context }
    }

    /// Create an unknown-variant error
    pub fn unknown_variant(enum_name: &'static str, tag: impl Into<String>) -> Self {
        Error::UnknownVariant {
            enum_name,
            tag: tag.into(),
        }
    }

    /// Create an unsupported-construct error
    pub fn unsupported(what: &'static str, detail: impl Into<String>) -> Self {
        Error::Unsupported {
            what,
            detail: detail.into(),
        }
    }

    /// Classify error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnresolvedReference { .. } => ErrorKind::Reference,
            _ => ErrorKind::Structural,
        }
    }

    /// True for dangling-id errors
    pub fn is_reference(&self) -> bool {
        self.kind() == ErrorKind::Reference
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let err = Error::UnresolvedReference {
            entity: Entity::Node,
            id: 7,
            referrer: "successors of node 1".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(err.to_string().contains("node id 7"));

        let err = Error::unknown_variant("int kind", "IHuge");
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.to_string(), "Unknown int kind variant: \"IHuge\"");
    }
}
