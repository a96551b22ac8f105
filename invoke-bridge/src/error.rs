//! Bridge error taxonomy
//!
//! Every failure is terminal for the single invocation: it is caught once at
//! the process boundary, logged with its cause chain, and the process exits
//! non-zero. Display messages lead with the kind token so diagnostics name
//! the failure class.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("ArtifactNotFound: {path}: {reason}")]
    ArtifactNotFound { path: PathBuf, reason: String },

    #[error("TypeNotFound: artifact registers no type named '{0}'")]
    TypeNotFound(String),

    #[error("InstantiationFailure: {0}")]
    InstantiationFailure(String),

    #[error("HandlerNotFound: type '{type_name}' has no handler named '{name}'")]
    HandlerNotFound { type_name: String, name: String },

    #[error("UnsupportedSignature: {0}")]
    UnsupportedSignature(String),

    #[error("FieldAssignmentFailure: field '{field}': {cause}")]
    FieldAssignmentFailure { field: String, cause: String },

    #[error("NoMapperApplicable: no mapping strategy registered for target type '{0}'")]
    NoMapperApplicable(String),

    #[error("HandlerRuntimeError: {0}")]
    HandlerRuntimeError(String),

    #[error("InvalidEnvelope: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
