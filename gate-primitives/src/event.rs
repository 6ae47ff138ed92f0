//! Pull-request lifecycle event snapshot.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{CommitSha, DeliveryId, RepoSlug};

/// Lifecycle action carried by a pull-request event.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    /// Pull request was opened.
    Opened,
    /// Title or body was edited.
    Edited,
    /// Pull request was reopened after being closed.
    Reopened,
    /// New commits were pushed to the head branch.
    Synchronize,
    /// Any other action the hosting service may deliver.
    #[serde(other)]
    Other,
}

impl EventAction {
    /// Returns the wire spelling of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Edited => "edited",
            Self::Reopened => "reopened",
            Self::Synchronize => "synchronize",
            Self::Other => "other",
        }
    }
}

impl Display for EventAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open/closed state of the pull request at delivery time.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    /// The pull request is open.
    Open,
    /// The pull request is closed (merged or abandoned).
    Closed,
}

impl PullRequestState {
    /// Returns `true` when the pull request is open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl Display for PullRequestState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Closed => "closed",
        })
    }
}

/// Immutable snapshot of one pull-request lifecycle notification.
///
/// The snapshot is assembled once per delivery and shared read-only across
/// the rule evaluators; nothing in the runtime mutates it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PullRequestEvent {
    action: EventAction,
    state: PullRequestState,
    title: String,
    #[serde(default)]
    body: String,
    head_sha: CommitSha,
    repo: RepoSlug,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivery: Option<DeliveryId>,
}

impl PullRequestEvent {
    /// Creates a snapshot from the fields the hosting payload provides.
    #[must_use]
    pub fn new(
        action: EventAction,
        state: PullRequestState,
        title: impl Into<String>,
        body: impl Into<String>,
        head_sha: CommitSha,
        repo: RepoSlug,
    ) -> Self {
        Self {
            action,
            state,
            title: title.into(),
            body: body.into(),
            head_sha,
            repo,
            delivery: None,
        }
    }

    /// Attaches the hosting service's delivery identifier for correlation.
    #[must_use]
    pub fn with_delivery_id(mut self, delivery: DeliveryId) -> Self {
        self.delivery = Some(delivery);
        self
    }

    /// Returns the lifecycle action.
    #[must_use]
    pub const fn action(&self) -> EventAction {
        self.action
    }

    /// Returns the pull request's open/closed state.
    #[must_use]
    pub const fn state(&self) -> PullRequestState {
        self.state
    }

    /// Returns the pull-request title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the pull-request body, empty when the author supplied none.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the head commit the status report attaches to.
    #[must_use]
    pub fn head_sha(&self) -> &CommitSha {
        &self.head_sha
    }

    /// Returns the repository the pull request targets.
    #[must_use]
    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    /// Returns the delivery identifier when the transport supplied one.
    #[must_use]
    pub const fn delivery_id(&self) -> Option<DeliveryId> {
        self.delivery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> PullRequestEvent {
        PullRequestEvent::new(
            EventAction::Opened,
            PullRequestState::Open,
            "Implement login flow",
            "Fixes #42",
            CommitSha::new("30d74d258442c7c65512eafab474568dd706c430").unwrap(),
            RepoSlug::new("octocat", "hello-world").unwrap(),
        )
    }

    #[test]
    fn snapshot_exposes_fields() {
        let event = event();
        assert_eq!(event.action(), EventAction::Opened);
        assert!(event.state().is_open());
        assert_eq!(event.title(), "Implement login flow");
        assert_eq!(event.body(), "Fixes #42");
        assert_eq!(event.repo().owner(), "octocat");
        assert!(event.delivery_id().is_none());
    }

    #[test]
    fn delivery_id_is_attached() {
        let delivery = DeliveryId::random();
        let event = event().with_delivery_id(delivery);
        assert_eq!(event.delivery_id(), Some(delivery));
    }

    #[test]
    fn unknown_action_decodes_to_other() {
        let action: EventAction = serde_json::from_str("\"labeled\"").expect("decode");
        assert_eq!(action, EventAction::Other);
    }

    #[test]
    fn action_round_trips_wire_spelling() {
        let encoded = serde_json::to_string(&EventAction::Synchronize).expect("encode");
        assert_eq!(encoded, "\"synchronize\"");
    }
}
