//! Command error types.

use thiserror::Error;

use crate::registry::TargetId;

/// Errors raised while invoking, building, or (de)serializing commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// An operation failed while being applied to its target.
    ///
    /// Command wrappers return this value exactly as the operation
    /// produced it.
    #[error("invocation error: {0}")]
    Invocation(String),

    /// A command could not be written in portable form.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Input bytes were malformed, truncated, written by an incompatible
    /// format version, or referenced something the registry cannot resolve.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// No operation is registered under the tag.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// No target is registered under the identifier.
    #[error("unknown target: {0}")]
    UnknownTarget(TargetId),

    /// The operation was registered for a different target type.
    #[error("operation {tag} expects a target of type {expected}")]
    TargetMismatch {
        /// The operation tag.
        tag: String,
        /// Type name of the target the operation was registered for.
        expected: &'static str,
    },

    /// An operation tag was registered twice.
    #[error("operation already registered: {0}")]
    DuplicateOperation(String),
}

impl CommandError {
    /// Shorthand for building an [`CommandError::Invocation`] inside an
    /// operation.
    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation(message.into())
    }
}
