//! Rule outcomes and the aggregated verdict.

use serde::{Deserialize, Serialize};

/// Description attached to every successful verdict.
pub const SUCCESS_DESCRIPTION: &str = "Pull request satisfies the specification rules.";

/// Pass/fail produced by a single rule evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failure_reason: Option<String>,
}

impl RuleOutcome {
    /// Returns a passing outcome.
    #[must_use]
    pub fn pass() -> Self {
        Self {
            passed: true,
            failure_reason: None,
        }
    }

    /// Returns a failing outcome with an explanatory reason.
    #[must_use]
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            failure_reason: Some(reason.into()),
        }
    }

    /// Returns true when the rule passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Returns the failure reason when the rule failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }
}

/// Final aggregated result reported for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    succeeded: bool,
    description: String,
}

impl Verdict {
    /// Returns the fixed success verdict.
    #[must_use]
    pub fn success() -> Self {
        Self {
            succeeded: true,
            description: SUCCESS_DESCRIPTION.to_owned(),
        }
    }

    /// Returns a failure verdict carrying the supplied description.
    #[must_use]
    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            description: description.into(),
        }
    }

    /// Aggregates rule outcomes: all must pass, and the first failure in the
    /// supplied order provides the description.
    #[must_use]
    pub fn from_outcomes(outcomes: &[RuleOutcome]) -> Self {
        for outcome in outcomes {
            if !outcome.passed() {
                let description = outcome
                    .failure_reason()
                    .unwrap_or("Pull request does not satisfy the specification rules.");
                return Self::failure(description);
            }
        }

        Self::success()
    }

    /// Returns true when every rule passed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_helpers_work() {
        let pass = RuleOutcome::pass();
        assert!(pass.passed());
        assert!(pass.failure_reason().is_none());

        let fail = RuleOutcome::fail("too short");
        assert!(!fail.passed());
        assert_eq!(fail.failure_reason(), Some("too short"));
    }

    #[test]
    fn all_passing_outcomes_succeed() {
        let verdict = Verdict::from_outcomes(&[RuleOutcome::pass(), RuleOutcome::pass()]);

        assert!(verdict.succeeded());
        assert_eq!(verdict.description(), SUCCESS_DESCRIPTION);
    }

    #[test]
    fn first_failure_provides_the_description() {
        let verdict = Verdict::from_outcomes(&[
            RuleOutcome::pass(),
            RuleOutcome::fail("first reason"),
            RuleOutcome::fail("second reason"),
        ]);

        assert!(!verdict.succeeded());
        assert_eq!(verdict.description(), "first reason");
    }

    #[test]
    fn empty_outcome_list_succeeds() {
        assert!(Verdict::from_outcomes(&[]).succeeded());
    }
}
