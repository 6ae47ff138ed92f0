//! Identifier types shared across the check runtime.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// GitHub caps owner logins at 39 characters.
const MAX_OWNER_LEN: usize = 39;
/// Repository names are capped at 100 characters by the hosting service.
const MAX_NAME_LEN: usize = 100;

/// Coordinates of a repository on the hosting service, `owner/name`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Creates a slug after validating both components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRepoSlug`] when either component is empty, too
    /// long, or contains characters outside `[A-Za-z0-9._-]`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();
        for (part, value, max_len) in [
            ("owner", &owner, MAX_OWNER_LEN),
            ("name", &name, MAX_NAME_LEN),
        ] {
            if let Some(reason) = component_problem(value, part, max_len) {
                return Err(Error::InvalidRepoSlug {
                    slug: format!("{owner}/{name}"),
                    reason,
                });
            }
        }
        Ok(Self { owner, name })
    }

    /// Returns the account that owns the repository.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for RepoSlug {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((owner, name)) = s.split_once('/') else {
            return Err(Error::InvalidRepoSlug {
                slug: s.to_owned(),
                reason: "expected `owner/name`".into(),
            });
        };
        Self::new(owner, name)
    }
}

fn component_problem(value: &str, part: &str, max_len: usize) -> Option<String> {
    if value.is_empty() {
        return Some(format!("{part} cannot be empty"));
    }
    if value.len() > max_len {
        return Some(format!("{part} length must be <= {max_len}"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Some(format!(
            "{part} must contain alphanumeric, dash, underscore, or dot"
        ));
    }
    None
}

/// Identifier of the commit a status report attaches to.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitSha(String);

impl CommitSha {
    /// Creates a commit identifier after validating its format.
    ///
    /// Abbreviated identifiers are accepted down to seven characters; the
    /// upper bound leaves room for SHA-256 repositories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCommitSha`] when the value is not 7 to 64
    /// hexadecimal characters.
    pub fn new(sha: impl Into<String>) -> Result<Self> {
        let sha = sha.into();
        if !(7..=64).contains(&sha.len()) {
            return Err(Error::InvalidCommitSha {
                sha,
                reason: "length must be between 7 and 64 characters".into(),
            });
        }
        if !sha.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidCommitSha {
                sha,
                reason: "identifier must be hexadecimal".into(),
            });
        }
        Ok(Self(sha))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CommitSha {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CommitSha {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Unique identifier the hosting service attaches to a webhook delivery.
///
/// Carried through the event snapshot so log lines produced while evaluating
/// an event can be correlated with the delivery record on the hosting side.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(Uuid);

impl DeliveryId {
    /// Generates a random delivery identifier, mainly useful in tests.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Display for DeliveryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for DeliveryId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for DeliveryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_formats_slug() {
        let slug = RepoSlug::new("octocat", "hello-world").expect("slug");
        assert_eq!(slug.owner(), "octocat");
        assert_eq!(slug.name(), "hello-world");
        assert_eq!(slug.to_string(), "octocat/hello-world");
    }

    #[test]
    fn parses_slug_from_str() {
        let slug = "octocat/spoon.knife".parse::<RepoSlug>().expect("parse");
        assert_eq!(slug.name(), "spoon.knife");
    }

    #[test]
    fn rejects_slug_without_separator() {
        let err = "octocat".parse::<RepoSlug>().expect_err("no separator");
        assert!(matches!(err, Error::InvalidRepoSlug { .. }));
    }

    #[test]
    fn rejects_empty_owner() {
        let result = RepoSlug::new("", "repo");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_owner_with_spaces() {
        let result = RepoSlug::new("bad owner", "repo");
        assert!(result.is_err());
    }

    #[test]
    fn accepts_full_and_abbreviated_shas() {
        CommitSha::new("30d74d258442c7c65512eafab474568dd706c430").expect("full");
        CommitSha::new("30d74d2").expect("abbreviated");
    }

    #[test]
    fn rejects_short_or_non_hex_shas() {
        assert!(CommitSha::new("30d74").is_err());
        assert!(CommitSha::new("not-a-sha").is_err());
    }

    #[test]
    fn round_trips_delivery_id() {
        let id = DeliveryId::random();
        let parsed = id.to_string().parse::<DeliveryId>().expect("parse");
        assert_eq!(id, parsed);
    }
}
