//! Shared hosting-service trait and data structures.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gate_primitives::{CommitSha, Credentials, RepoSlug};

/// Longest commit-status description GitHub accepts before rejecting the write.
pub const MAX_DESCRIPTION_LEN: usize = 140;

/// Result alias used by hosting-service implementations.
pub type HostingResult<T> = Result<T, HostingError>;

/// Error type shared by hosting-service implementations.
#[derive(Debug, Error)]
pub enum HostingError {
    /// Service is misconfigured or missing credentials.
    #[error("hosting service not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The request could not be constructed or encoded.
    #[error("invalid hosting request: {reason}")]
    Request {
        /// Reason describing why the request could not be built.
        reason: String,
    },

    /// Transport-level failures (network, TLS, timeouts).
    #[error("hosting transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The service answered with an unexpected status or payload.
    #[error("hosting response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl HostingError {
    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for malformed requests.
    #[must_use]
    pub fn request(reason: impl Into<String>) -> Self {
        Self::Request {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for response failures.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }
}

/// Outcome reported through a commit status.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    /// The commit satisfies the check.
    Success,
    /// The commit violates the check.
    Failure,
}

impl StatusState {
    /// Returns the wire representation of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commit status written back to the hosting service.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CommitStatus {
    state: StatusState,
    description: String,
    context: String,
}

impl CommitStatus {
    /// Creates a status payload, truncating the description to the length
    /// GitHub accepts.
    #[must_use]
    pub fn new(
        state: StatusState,
        description: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        let mut description: String = description.into();
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            description = description.chars().take(MAX_DESCRIPTION_LEN).collect();
        }

        Self {
            state,
            description,
            context: context.into(),
        }
    }

    /// Returns the reported state.
    #[must_use]
    pub const fn state(&self) -> StatusState {
        self.state
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status context shown next to the state.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Trait implemented by hosting-service clients.
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Fetches the repository's pull-request template.
    ///
    /// Returns `Ok(None)` when the repository has no template configured.
    async fn pull_request_template(
        &self,
        repo: &RepoSlug,
        credentials: &Credentials,
    ) -> HostingResult<Option<String>>;

    /// Writes one commit status for the supplied head commit.
    async fn set_commit_status(
        &self,
        repo: &RepoSlug,
        sha: &CommitSha,
        status: &CommitStatus,
        credentials: &Credentials,
    ) -> HostingResult<()>;
}
