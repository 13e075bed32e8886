use thiserror::Error;

/// Errors produced by the definition codec.
///
/// Decode-side variants carry the zero-based index of the document that
/// failed, so callers can point the user at the offending part of the
/// buffer. Variants are `Clone` because the edit session retains the last
/// failure for display while the user keeps typing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A document is not valid YAML, or does not match the record shape.
    #[error("invalid definition in document {document}: {message}")]
    Parse { document: usize, message: String },

    /// A decoded document violates a kind-specific shape rule.
    #[error("invalid definition in document {document}: {message}")]
    Validation { document: usize, message: String },

    #[error("failed to serialize definitions: {0}")]
    Serialize(String),
}

impl CodecError {
    /// Zero-based index of the failing document, for decode-side errors.
    pub fn document(&self) -> Option<usize> {
        match self {
            CodecError::Parse { document, .. } | CodecError::Validation { document, .. } => {
                Some(*document)
            }
            CodecError::Serialize(_) => None,
        }
    }
}
