//! Eligibility gate for incoming pull-request events.

use tracing::debug;

use gate_primitives::{EventAction, PullRequestEvent};

/// Actions that make a pull-request event subject to evaluation.
pub const ACTIONABLE: [EventAction; 4] = [
    EventAction::Opened,
    EventAction::Edited,
    EventAction::Reopened,
    EventAction::Synchronize,
];

/// Decides whether an event is evaluated at all.
///
/// Only open pull requests with an action from [`ACTIONABLE`] pass; closing
/// and housekeeping actions are deliberately ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventGate;

impl EventGate {
    /// Creates the gate.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns true when the event should be evaluated.
    #[must_use]
    pub fn accepts(&self, event: &PullRequestEvent) -> bool {
        if !ACTIONABLE.contains(&event.action()) || !event.state().is_open() {
            debug!(
                action = %event.action(),
                state = %event.state(),
                "event not eligible for evaluation"
            );
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use gate_primitives::{CommitSha, PullRequestState, RepoSlug};

    use super::*;

    fn event(action: EventAction, state: PullRequestState) -> PullRequestEvent {
        PullRequestEvent::new(
            action,
            state,
            "Implement login flow",
            "Fixes #42",
            CommitSha::new("a94a8fe5ccb19ba61c4c0873d391e987982fbbd3").unwrap(),
            RepoSlug::new("octocat", "hello-world").unwrap(),
        )
    }

    #[test]
    fn accepts_lifecycle_actions_on_open_requests() {
        let gate = EventGate::new();

        for action in ACTIONABLE {
            assert!(gate.accepts(&event(action, PullRequestState::Open)));
        }
    }

    #[test]
    fn rejects_closed_requests() {
        let gate = EventGate::new();

        assert!(!gate.accepts(&event(EventAction::Opened, PullRequestState::Closed)));
    }

    #[test]
    fn rejects_housekeeping_actions() {
        let gate = EventGate::new();

        assert!(!gate.accepts(&event(EventAction::Other, PullRequestState::Open)));
    }
}
