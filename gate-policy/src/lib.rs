//! Specification rules for pull-request events.
//!
//! [`rules::SpecificationPolicy`] resolves its configuration once and
//! evaluates the title, body, and template rules independently; callers
//! aggregate the outcomes with [`outcome::Verdict::from_outcomes`].

#![warn(missing_docs, clippy::pedantic)]

pub mod config;
pub mod matchers;
pub mod outcome;
pub mod rules;
