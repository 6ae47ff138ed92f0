//! Decoding of pull-request webhook payloads.

use serde::Deserialize;
use thiserror::Error;

use gate_primitives::{
    CommitSha, DeliveryId, EventAction, PullRequestEvent, PullRequestState, RepoSlug,
};

/// Errors produced while decoding a webhook payload.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Payload was not valid JSON or missed required fields.
    #[error("failed to decode webhook payload: {reason}")]
    Decode {
        /// Decoder diagnostic for the malformed payload.
        reason: String,
    },
    /// Payload carried identifiers the runtime rejects.
    #[error(transparent)]
    Identifier(#[from] gate_primitives::Error),
}

/// Decodes a pull-request webhook payload into an event snapshot.
///
/// A `null` body is normalised to the empty string, and actions this runtime
/// does not evaluate decode to [`EventAction::Other`] so the gate can reject
/// them downstream.
///
/// # Errors
///
/// Returns [`WebhookError::Decode`] for malformed JSON and
/// [`WebhookError::Identifier`] when the repository slug or commit id is
/// invalid.
pub fn decode_event(payload: &[u8]) -> Result<PullRequestEvent, WebhookError> {
    let envelope: WebhookEnvelope =
        serde_json::from_slice(payload).map_err(|err| WebhookError::Decode {
            reason: err.to_string(),
        })?;
    envelope.into_event()
}

/// Decodes a payload and attaches the delivery identifier from the
/// `X-GitHub-Delivery` header.
///
/// # Errors
///
/// Same as [`decode_event`].
pub fn decode_delivery(
    payload: &[u8],
    delivery: DeliveryId,
) -> Result<PullRequestEvent, WebhookError> {
    Ok(decode_event(payload)?.with_delivery_id(delivery))
}

#[derive(Debug, Deserialize)]
struct WebhookEnvelope {
    action: EventAction,
    pull_request: PullRequestPayload,
    repository: RepositoryPayload,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    state: PullRequestState,
    title: String,
    #[serde(default)]
    body: Option<String>,
    head: HeadPayload,
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

impl WebhookEnvelope {
    fn into_event(self) -> Result<PullRequestEvent, WebhookError> {
        let repo = RepoSlug::new(self.repository.owner.login, self.repository.name)?;
        let head_sha = CommitSha::new(self.pull_request.head.sha)?;

        Ok(PullRequestEvent::new(
            self.action,
            self.pull_request.state,
            self.pull_request.title,
            self.pull_request.body.unwrap_or_default(),
            head_sha,
            repo,
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload() -> serde_json::Value {
        json!({
            "action": "opened",
            "number": 1347,
            "pull_request": {
                "state": "open",
                "title": "Implement login flow",
                "body": "Fixes #42 and adds tests",
                "head": { "sha": "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3" }
            },
            "repository": {
                "name": "hello-world",
                "owner": { "login": "octocat" }
            }
        })
    }

    #[test]
    fn decodes_a_full_payload() {
        let event = decode_event(payload().to_string().as_bytes()).unwrap();

        assert_eq!(event.action(), EventAction::Opened);
        assert_eq!(event.state(), PullRequestState::Open);
        assert_eq!(event.title(), "Implement login flow");
        assert_eq!(event.body(), "Fixes #42 and adds tests");
        assert_eq!(event.repo().to_string(), "octocat/hello-world");
    }

    #[test]
    fn null_body_becomes_empty() {
        let mut payload = payload();
        payload["pull_request"]["body"] = json!(null);

        let event = decode_event(payload.to_string().as_bytes()).unwrap();
        assert_eq!(event.body(), "");
    }

    #[test]
    fn unknown_actions_decode_to_other() {
        let mut payload = payload();
        payload["action"] = json!("labeled");

        let event = decode_event(payload.to_string().as_bytes()).unwrap();
        assert_eq!(event.action(), EventAction::Other);
    }

    #[test]
    fn attaches_the_delivery_identifier() {
        let delivery = DeliveryId::random();
        let event = decode_delivery(payload().to_string().as_bytes(), delivery).unwrap();

        assert_eq!(event.delivery_id(), Some(delivery));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = decode_event(b"{not json").expect_err("malformed payload");
        assert!(matches!(err, WebhookError::Decode { .. }));
    }

    #[test]
    fn rejects_invalid_commit_ids() {
        let mut payload = payload();
        payload["pull_request"]["head"]["sha"] = json!("not-a-sha!");

        let err = decode_event(payload.to_string().as_bytes()).expect_err("invalid sha");
        assert!(matches!(err, WebhookError::Identifier(_)));
    }
}
