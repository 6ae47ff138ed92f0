//! Typed configuration for the specification rules.
//!
//! Every field carries a documented default so that an absent section means
//! "checked with defaults", never "skipped". Sections are resolved into rule
//! evaluators once, at policy construction.

use serde::{Deserialize, Serialize};

/// Configuration for the whole specification check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecificationConfig {
    /// Title length rule.
    #[serde(default)]
    pub title: LengthRuleConfig,
    /// Body content rule and its sub-checks.
    #[serde(default)]
    pub body: BodyConfig,
    /// Template comparison rule.
    #[serde(default)]
    pub template: TemplateConfig,
}

/// Toggle plus length threshold, shared by the title rule and the body
/// minimum-length sub-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LengthRuleConfig {
    /// Whether the rule runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Number of characters the text must exceed.
    #[serde(default = "default_length")]
    pub length: usize,
}

impl Default for LengthRuleConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            length: default_length(),
        }
    }
}

/// Body sub-check configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BodyConfig {
    /// Accept bodies that reference an issue, e.g. `#42` or `owner/repo#42`.
    #[serde(default)]
    pub contains_issue_number: ToggleConfig,
    /// Accept bodies that contain a URL.
    #[serde(default)]
    pub contains_url: ToggleConfig,
    /// Accept bodies longer than a threshold.
    #[serde(default)]
    pub minimum_length: LengthRuleConfig,
}

/// Single enabled flag used by the pattern-based sub-checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleConfig {
    /// Whether the sub-check participates in the body evaluation.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

/// Template comparison settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateConfig {
    /// When true, bodies left identical to the repository template fail.
    #[serde(default)]
    pub was_adjusted: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_length() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_resolves_to_defaults() {
        let config: SpecificationConfig = serde_json::from_str("{}").unwrap();

        assert!(config.title.enabled);
        assert_eq!(config.title.length, 8);
        assert!(config.body.contains_issue_number.enabled);
        assert!(config.body.contains_url.enabled);
        assert!(config.body.minimum_length.enabled);
        assert_eq!(config.body.minimum_length.length, 8);
        assert!(!config.template.was_adjusted);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: SpecificationConfig = serde_json::from_str(
            r#"{
                "title": { "length": 12 },
                "body": { "contains-url": { "enabled": false } }
            }"#,
        )
        .unwrap();

        assert!(config.title.enabled);
        assert_eq!(config.title.length, 12);
        assert!(!config.body.contains_url.enabled);
        assert!(config.body.contains_issue_number.enabled);
        assert_eq!(config.body.minimum_length.length, 8);
    }

    #[test]
    fn kebab_case_keys_round_trip() {
        let config: SpecificationConfig = serde_json::from_str(
            r#"{
                "body": {
                    "contains-issue-number": { "enabled": false },
                    "minimum-length": { "enabled": true, "length": 20 }
                },
                "template": { "was-adjusted": true }
            }"#,
        )
        .unwrap();

        assert!(!config.body.contains_issue_number.enabled);
        assert_eq!(config.body.minimum_length.length, 20);
        assert!(config.template.was_adjusted);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["template"]["was-adjusted"], true);
        assert_eq!(json["body"]["minimum-length"]["length"], 20);
    }
}
