//! Shared error definitions for gate primitives.

use thiserror::Error;
use uuid::Error as UuidError;

/// Result alias used throughout the gate runtime.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing gate primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The repository slug failed validation.
    #[error("invalid repository slug `{slug}`: {reason}")]
    InvalidRepoSlug {
        /// The offending slug string.
        slug: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The commit identifier failed validation.
    #[error("invalid commit sha `{sha}`: {reason}")]
    InvalidCommitSha {
        /// The offending identifier string.
        sha: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The webhook delivery identifier could not be parsed.
    #[error("invalid delivery id: {source}")]
    InvalidDeliveryId {
        /// Source parsing error from the UUID library.
        #[from]
        source: UuidError,
    },
}
