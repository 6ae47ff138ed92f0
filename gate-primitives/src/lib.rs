//! Core shared types for the specgate check runtime.

#![warn(missing_docs, clippy::pedantic)]

mod credentials;
mod error;
mod event;
mod ids;

/// Access token wrapper with a redacting `Debug` implementation.
pub use credentials::Credentials;
/// Error type and result alias shared across the runtime.
pub use error::{Error, Result};
/// Pull-request event snapshot and its lifecycle enums.
pub use event::{EventAction, PullRequestEvent, PullRequestState};
/// Validated identifier newtypes.
pub use ids::{CommitSha, DeliveryId, RepoSlug};
