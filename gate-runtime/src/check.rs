//! The specification check pipeline.

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::join;
use thiserror::Error;
use tracing::{debug, info, warn};

use gate_adapters::traits::{CommitStatus, HostingError, HostingService, StatusState};
use gate_policy::config::SpecificationConfig;
use gate_policy::outcome::Verdict;
use gate_policy::rules::{PolicyError, SpecificationPolicy};
use gate_primitives::{Credentials, PullRequestEvent};

use crate::gate::EventGate;

/// Context attached to every status this check writes.
pub const STATUS_CONTEXT: &str = "zappr/pr/specification";

/// Errors that abort the check pipeline.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A built-in pattern failed to compile.
    #[error("invalid rule pattern: {reason}")]
    Pattern {
        /// Compiler diagnostic for the offending pattern.
        reason: String,
    },
    /// The hosting service failed during the template fetch or status write.
    #[error(transparent)]
    Hosting(#[from] HostingError),
}

impl From<PolicyError> for CheckError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Pattern { reason } => Self::Pattern { reason },
            PolicyError::Hosting(err) => Self::Hosting(err),
        }
    }
}

/// Result alias for check operations.
pub type CheckResult<T> = Result<T, CheckError>;

/// What the check did for one delivered event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The gate rejected the event; nothing was written.
    Skipped,
    /// A verdict was computed and written as a commit status.
    Reported(Verdict),
}

impl CheckOutcome {
    /// Returns true when the event was rejected by the gate.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// Returns the reported verdict, if any.
    #[must_use]
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Self::Skipped => None,
            Self::Reported(verdict) => Some(verdict),
        }
    }
}

/// Capability interface for event checks.
///
/// Anything that can turn one delivered event into at most one status write
/// is a valid check; the runtime composes checks rather than deriving them
/// from a common base.
#[async_trait]
pub trait Check: Send + Sync {
    /// Processes one delivered event.
    async fn execute(
        &self,
        event: &PullRequestEvent,
        credentials: &Credentials,
    ) -> CheckResult<CheckOutcome>;
}

/// Observer invoked after every processed event.
pub trait VerdictSink: Send + Sync {
    /// Records what the check did for the supplied event.
    fn record(&self, event: &PullRequestEvent, outcome: &CheckOutcome);
}

/// Sink that logs outcomes through tracing.
#[derive(Default)]
pub struct TracingVerdictSink;

impl VerdictSink for TracingVerdictSink {
    fn record(&self, event: &PullRequestEvent, outcome: &CheckOutcome) {
        match outcome {
            CheckOutcome::Skipped => {
                debug!(
                    repo = %event.repo(),
                    action = %event.action(),
                    "event skipped by the gate"
                );
            }
            CheckOutcome::Reported(verdict) if verdict.succeeded() => {
                info!(
                    repo = %event.repo(),
                    sha = %event.head_sha(),
                    "specification satisfied"
                );
            }
            CheckOutcome::Reported(verdict) => {
                warn!(
                    repo = %event.repo(),
                    sha = %event.head_sha(),
                    description = verdict.description(),
                    "specification violated"
                );
            }
        }
    }
}

/// Sink used during testing to capture outcomes.
#[derive(Default)]
pub struct CollectingVerdictSink {
    outcomes: Mutex<Vec<CheckOutcome>>,
}

impl CollectingVerdictSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns and clears the collected outcomes.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex has been poisoned by a previous panic.
    #[must_use]
    pub fn drain(&self) -> Vec<CheckOutcome> {
        let mut lock = self.outcomes.lock().expect("collecting sink poisoned");
        lock.drain(..).collect()
    }
}

impl VerdictSink for CollectingVerdictSink {
    fn record(&self, _event: &PullRequestEvent, outcome: &CheckOutcome) {
        self.outcomes
            .lock()
            .expect("collecting sink poisoned")
            .push(outcome.clone());
    }
}

/// Evaluates one pull-request event and reports a single commit status.
pub struct SpecificationCheck {
    gate: EventGate,
    policy: SpecificationPolicy,
    hosting: Arc<dyn HostingService>,
    sink: Arc<dyn VerdictSink>,
}

impl fmt::Debug for SpecificationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecificationCheck")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SpecificationCheck {
    /// Builds a check from the supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Pattern`] if a built-in pattern fails to
    /// compile.
    pub fn new(
        hosting: Arc<dyn HostingService>,
        config: &SpecificationConfig,
    ) -> CheckResult<Self> {
        let policy = SpecificationPolicy::new(hosting.clone(), config)?;

        Ok(Self {
            gate: EventGate::new(),
            policy,
            hosting,
            sink: Arc::new(TracingVerdictSink),
        })
    }

    /// Replaces the verdict sink, returning the check for chaining.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn VerdictSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Runs the three rule evaluators concurrently and aggregates their
    /// outcomes.
    ///
    /// All evaluators settle before the verdict forms; there is no
    /// cancellation when one fails. Among multiple failures the description
    /// comes from the first rule in the fixed order title, body, template,
    /// regardless of which evaluator finished first.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Hosting`] when the template fetch fails; no
    /// verdict is produced in that case.
    pub async fn validate(
        &self,
        event: &PullRequestEvent,
        credentials: &Credentials,
    ) -> CheckResult<Verdict> {
        let title = async { self.policy.evaluate_title(event.title()) };
        let body = async { self.policy.evaluate_body(event.body()) };
        let template = self
            .policy
            .evaluate_template(event.body(), event.repo(), credentials);

        let (title, body, template) = join!(title, body, template);
        let template = template?;

        Ok(Verdict::from_outcomes(&[title, body, template]))
    }
}

#[async_trait]
impl Check for SpecificationCheck {
    /// Gates, validates, and reports one delivered event.
    ///
    /// Ineligible events produce no status write; eligible events produce
    /// exactly one carrying the verdict and the [`STATUS_CONTEXT`] context.
    async fn execute(
        &self,
        event: &PullRequestEvent,
        credentials: &Credentials,
    ) -> CheckResult<CheckOutcome> {
        if !self.gate.accepts(event) {
            let outcome = CheckOutcome::Skipped;
            self.sink.record(event, &outcome);
            return Ok(outcome);
        }

        let verdict = self.validate(event, credentials).await?;
        let state = if verdict.succeeded() {
            StatusState::Success
        } else {
            StatusState::Failure
        };
        let status = CommitStatus::new(state, verdict.description(), STATUS_CONTEXT);

        self.hosting
            .set_commit_status(event.repo(), event.head_sha(), &status, credentials)
            .await?;

        let outcome = CheckOutcome::Reported(verdict);
        self.sink.record(event, &outcome);
        Ok(outcome)
    }
}
