use std::ops::Range;

use thiserror::Error;

use crate::path::JsonPath;

/// The only way decoding a [`crate::JsonValue`] can fail: nothing at `path` matched any variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("type mismatch at {path}: {reason}")]
    TypeMismatch {
        path: JsonPath,
        /// Byte range in the source text, when decoding from text.
        span: Option<Range<usize>>,
        reason: String,
    },
}

impl DecodeError {
    pub fn type_mismatch(
        path: JsonPath,
        span: Option<Range<usize>>,
        reason: impl Into<String>,
    ) -> Self {
        DecodeError::TypeMismatch {
            path,
            span,
            reason: reason.into(),
        }
    }

    pub fn path(&self) -> &JsonPath {
        match self {
            DecodeError::TypeMismatch { path, .. } => path,
        }
    }

    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            DecodeError::TypeMismatch { span, .. } => span.clone(),
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            DecodeError::TypeMismatch { reason, .. } => reason,
        }
    }
}

/// Encoding a [`crate::JsonValue`] itself cannot fail. This covers the writer going away and
/// foreign `Serialize` implementations that have no JSON form.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
