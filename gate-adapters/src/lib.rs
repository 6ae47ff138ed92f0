//! Hosting-service adapters used by the specification check.
//!
//! Each module exposes a client for a specific hosting provider while sharing
//! the trait-based interface defined in [`traits`].

#![warn(missing_docs, clippy::pedantic)]

pub mod github;
pub mod traits;

mod http_client;
