//! Access credentials presented to the hosting service.

use std::fmt;

/// Token used to authenticate calls to the hosting service.
///
/// The `Debug` implementation redacts the secret so credentials can travel
/// through tracing fields without leaking tokens into logs.
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Wraps an access token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the raw token for request signing.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let credentials = Credentials::new("ghp_sensitive");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("ghp_sensitive"));
    }
}
