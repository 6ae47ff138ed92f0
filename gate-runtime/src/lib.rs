//! Check pipeline that turns pull-request events into commit statuses.
//!
//! [`webhook`] decodes delivered payloads, [`gate`] filters out events that
//! are not subject to evaluation, and [`check`] fans out to the rule
//! evaluators and writes exactly one status per eligible event.

#![warn(missing_docs, clippy::pedantic)]

pub mod check;
pub mod gate;
pub mod webhook;
