//! Error types for relationship mapping
//!
//! Every failure is raised synchronously at the call site that caused it;
//! a failed operation never leaves a partially-applied mapping behind.

use thiserror::Error;

/// Result type alias for relationship-mapping operations
pub type RelationResult<T> = Result<T, RelationError>;

/// Error types for relationship-mapping operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    /// The owner entity does not resolve to a usable table name
    #[error("owner entity '{owner}' does not define a table name")]
    InvalidOwner { owner: String },

    /// The target entity is empty or does not resolve to a usable table name
    #[error("target entity '{target}' is empty or does not define a table name")]
    InvalidTarget { target: String },

    /// A relationship kind token outside the supported enumeration
    #[error("invalid relationship kind '{kind}'")]
    InvalidRelationshipKind { kind: String },

    /// A descriptor whose join shape is inconsistent with its relation token
    #[error("configuration error: {message}")]
    Configuration { message: String },
}
