//! Pull-request specification check facade.
//!
//! Depend on this crate via `cargo add specgate`. It bundles the gate crates
//! behind feature flags so integrations can pull in only the pieces they
//! need.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use gate_primitives as primitives;

/// Hosting-service adapters (enabled by `adapters` feature).
#[cfg(feature = "adapters")]
pub use gate_adapters as adapters;

/// Specification rules and verdicts (enabled by `policy` feature).
#[cfg(feature = "policy")]
pub use gate_policy as policy;

/// Event gate and check pipeline (enabled by `runtime` feature).
#[cfg(feature = "runtime")]
pub use gate_runtime as runtime;
