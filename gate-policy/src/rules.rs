//! Rule evaluators and the policy built from them.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use gate_adapters::traits::{HostingError, HostingService};
use gate_primitives::{Credentials, RepoSlug};

use crate::config::{BodyConfig, LengthRuleConfig, SpecificationConfig, TemplateConfig};
use crate::matchers::{SpecPatterns, exceeds_length};
use crate::outcome::RuleOutcome;

/// Errors surfaced while building or evaluating the rules.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A built-in pattern failed to compile.
    #[error("invalid rule pattern: {reason}")]
    Pattern {
        /// Compiler diagnostic for the offending pattern.
        reason: String,
    },
    /// The hosting service failed while fetching the template.
    #[error(transparent)]
    Hosting(#[from] HostingError),
}

/// Result alias for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Names of the body sub-checks as they appear in failure descriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyCheck {
    /// Body references an issue.
    IssueNumber,
    /// Body contains a URL.
    Url,
    /// Body exceeds the length threshold.
    MinimumLength,
}

impl BodyCheck {
    /// Returns the name used in configuration and failure descriptions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IssueNumber => "contains-issue-number",
            Self::Url => "contains-url",
            Self::MinimumLength => "minimum-length",
        }
    }
}

impl fmt::Display for BodyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title length rule.
#[derive(Debug, Clone)]
pub struct TitleRule {
    enabled: bool,
    length: usize,
}

impl TitleRule {
    /// Resolves the rule from its configuration fragment.
    #[must_use]
    pub fn new(config: &LengthRuleConfig) -> Self {
        Self {
            enabled: config.enabled,
            length: config.length,
        }
    }

    /// Fails when the title does not exceed the configured length.
    #[must_use]
    pub fn evaluate(&self, title: &str) -> RuleOutcome {
        if !self.enabled || exceeds_length(title, self.length) {
            return RuleOutcome::pass();
        }

        RuleOutcome::fail(format!(
            "Pull request title is too short ({observed} <= {required} characters).",
            observed = title.chars().count(),
            required = self.length
        ))
    }
}

/// Body content rule: at least one enabled sub-check must succeed.
#[derive(Debug, Clone)]
pub struct BodyRule {
    patterns: SpecPatterns,
    issue_number_enabled: bool,
    url_enabled: bool,
    minimum_length_enabled: bool,
    minimum_length: usize,
}

impl BodyRule {
    /// Resolves the rule from its configuration fragment.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Pattern`] if a built-in pattern fails to
    /// compile.
    pub fn new(config: &BodyConfig) -> PolicyResult<Self> {
        let patterns = SpecPatterns::compile().map_err(|err| PolicyError::Pattern {
            reason: err.to_string(),
        })?;

        Ok(Self {
            patterns,
            issue_number_enabled: config.contains_issue_number.enabled,
            url_enabled: config.contains_url.enabled,
            minimum_length_enabled: config.minimum_length.enabled,
            minimum_length: config.minimum_length.length,
        })
    }

    /// Passes when at least one enabled sub-check succeeds.
    ///
    /// With every sub-check disabled nothing can vouch for the body, so the
    /// rule fails. Failure descriptions always name the first failing check
    /// in the fixed order issue-number, URL, minimum-length.
    #[must_use]
    pub fn evaluate(&self, body: &str) -> RuleOutcome {
        let mut checks = Vec::with_capacity(3);
        if self.issue_number_enabled {
            checks.push((
                BodyCheck::IssueNumber,
                self.patterns.contains_issue_reference(body),
            ));
        }
        if self.url_enabled {
            checks.push((BodyCheck::Url, self.patterns.contains_url(body)));
        }
        if self.minimum_length_enabled {
            checks.push((
                BodyCheck::MinimumLength,
                exceeds_length(body, self.minimum_length),
            ));
        }

        if checks.is_empty() {
            return RuleOutcome::fail(
                "Pull request body cannot satisfy the specification: every body check is disabled.",
            );
        }

        if checks.iter().any(|(_, succeeded)| *succeeded) {
            return RuleOutcome::pass();
        }

        let (first_failing, _) = checks[0];
        RuleOutcome::fail(format!(
            "Pull request body does not pass the `{first_failing}` check."
        ))
    }
}

/// Template comparison rule.
pub struct TemplateRule {
    hosting: Arc<dyn HostingService>,
    was_adjusted: bool,
}

impl fmt::Debug for TemplateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRule")
            .field("was_adjusted", &self.was_adjusted)
            .finish_non_exhaustive()
    }
}

impl TemplateRule {
    /// Resolves the rule from its configuration fragment.
    #[must_use]
    pub fn new(hosting: Arc<dyn HostingService>, config: &TemplateConfig) -> Self {
        Self {
            hosting,
            was_adjusted: config.was_adjusted,
        }
    }

    /// Fails when the trimmed body still equals the trimmed repository
    /// template.
    ///
    /// The template fetch is issued on every evaluation so hosting problems
    /// surface regardless of configuration. A repository without a template
    /// passes trivially, as does any body when `was-adjusted` is off.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Hosting`] when the template fetch fails.
    pub async fn evaluate(
        &self,
        body: &str,
        repo: &RepoSlug,
        credentials: &Credentials,
    ) -> PolicyResult<RuleOutcome> {
        let template = self.hosting.pull_request_template(repo, credentials).await?;

        let Some(template) = template else {
            debug!(repo = %repo, "repository has no pull-request template");
            return Ok(RuleOutcome::pass());
        };

        if !self.was_adjusted {
            return Ok(RuleOutcome::pass());
        }

        if body.trim() == template.trim() {
            Ok(RuleOutcome::fail(
                "Pull request body is unchanged from the repository template.",
            ))
        } else {
            Ok(RuleOutcome::pass())
        }
    }
}

/// The three specification rules, resolved once from configuration.
#[derive(Debug)]
pub struct SpecificationPolicy {
    title: TitleRule,
    body: BodyRule,
    template: TemplateRule,
}

impl SpecificationPolicy {
    /// Builds the policy, resolving every configuration default up front.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Pattern`] if a built-in pattern fails to
    /// compile.
    pub fn new(
        hosting: Arc<dyn HostingService>,
        config: &SpecificationConfig,
    ) -> PolicyResult<Self> {
        Ok(Self {
            title: TitleRule::new(&config.title),
            body: BodyRule::new(&config.body)?,
            template: TemplateRule::new(hosting, &config.template),
        })
    }

    /// Evaluates the title rule.
    #[must_use]
    pub fn evaluate_title(&self, title: &str) -> RuleOutcome {
        self.title.evaluate(title)
    }

    /// Evaluates the body rule.
    #[must_use]
    pub fn evaluate_body(&self, body: &str) -> RuleOutcome {
        self.body.evaluate(body)
    }

    /// Evaluates the template rule against the repository's template.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Hosting`] when the template fetch fails.
    pub async fn evaluate_template(
        &self,
        body: &str,
        repo: &RepoSlug,
        credentials: &Credentials,
    ) -> PolicyResult<RuleOutcome> {
        self.template.evaluate(body, repo, credentials).await
    }
}
