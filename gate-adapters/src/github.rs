//! GitHub implementation of the hosting-service interface.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use hyper::body::{Bytes, to_bytes};
use hyper::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use hyper::{Body, Request, StatusCode, Uri};
use tokio::time::timeout;
use tracing::debug;

use gate_primitives::{CommitSha, Credentials, RepoSlug};

use crate::http_client::{HttpsClient, build_https_client};
use crate::traits::{CommitStatus, HostingError, HostingResult, HostingService};

/// Default endpoint for the public GitHub API.
pub const GITHUB_API_URL: &str = "https://api.github.com/";

/// Media type that makes the contents API answer with the raw file body.
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";

/// Paths probed for a repository's pull-request template, most specific first.
const TEMPLATE_PATHS: [&str; 3] = [
    ".github/PULL_REQUEST_TEMPLATE.md",
    "PULL_REQUEST_TEMPLATE.md",
    "docs/PULL_REQUEST_TEMPLATE.md",
];

/// Configuration for the GitHub hosting service.
#[derive(Clone, Debug)]
pub struct GithubConfig {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl GithubConfig {
    /// Creates a configuration pointing at the public GitHub API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: GITHUB_API_URL.to_owned(),
            timeout: Duration::from_secs(30),
            user_agent: "specgate".to_owned(),
        }
    }

    /// Overrides the base URL, e.g. for a GitHub Enterprise instance.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> HostingResult<Self> {
        let sanitized = sanitize_base_url(base_url.as_ref())?;
        self.base_url = sanitized;
        Ok(self)
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header sent with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// GitHub client that talks to the REST API over HTTPS.
pub struct GithubService {
    client: HttpsClient,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl fmt::Debug for GithubService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubService")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GithubService {
    /// Constructs a service with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::Configuration`] if the configured base URL
    /// cannot be parsed.
    pub fn new(config: GithubConfig) -> HostingResult<Self> {
        let base_url = sanitize_base_url(&config.base_url)?;

        Ok(Self {
            client: build_https_client(),
            base_url,
            timeout: config.timeout,
            user_agent: config.user_agent,
        })
    }

    fn contents_uri(&self, repo: &RepoSlug, path: &str) -> HostingResult<Uri> {
        parse_uri(format!(
            "{}repos/{}/{}/contents/{path}",
            self.base_url,
            repo.owner(),
            repo.name()
        ))
    }

    fn statuses_uri(&self, repo: &RepoSlug, sha: &CommitSha) -> HostingResult<Uri> {
        parse_uri(format!(
            "{}repos/{}/{}/statuses/{sha}",
            self.base_url,
            repo.owner(),
            repo.name()
        ))
    }

    async fn dispatch(&self, request: Request<Body>) -> HostingResult<(StatusCode, Bytes)> {
        let response = timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| HostingError::transport("GitHub request timed out"))?
            .map_err(|err| HostingError::transport(format!("GitHub request failed: {err}")))?;

        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.map_err(|err| {
            HostingError::transport(format!("failed to read GitHub response: {err}"))
        })?;

        Ok((status, bytes))
    }
}

#[async_trait]
impl HostingService for GithubService {
    async fn pull_request_template(
        &self,
        repo: &RepoSlug,
        credentials: &Credentials,
    ) -> HostingResult<Option<String>> {
        for path in TEMPLATE_PATHS {
            let uri = self.contents_uri(repo, path)?;
            let request = Request::get(uri)
                .header(ACCEPT, RAW_MEDIA_TYPE)
                .header(AUTHORIZATION, token_header(credentials))
                .header(USER_AGENT, &self.user_agent)
                .body(Body::empty())
                .map_err(|err| {
                    HostingError::transport(format!("failed to build GitHub request: {err}"))
                })?;

            let (status, bytes) = self.dispatch(request).await?;

            if status == StatusCode::NOT_FOUND {
                debug!(repo = %repo, path, "no pull-request template at path");
                continue;
            }

            if !status.is_success() {
                let body = String::from_utf8_lossy(&bytes).to_string();
                return Err(HostingError::response(format!(
                    "GitHub returned {status} for {path}: {body}"
                )));
            }

            let template = String::from_utf8(bytes.to_vec()).map_err(|err| {
                HostingError::response(format!("template at {path} is not valid UTF-8: {err}"))
            })?;
            return Ok(Some(template));
        }

        Ok(None)
    }

    async fn set_commit_status(
        &self,
        repo: &RepoSlug,
        sha: &CommitSha,
        status: &CommitStatus,
        credentials: &Credentials,
    ) -> HostingResult<()> {
        let body = serde_json::to_vec(status).map_err(|err| {
            HostingError::request(format!("failed to encode commit status: {err}"))
        })?;

        let uri = self.statuses_uri(repo, sha)?;
        let request = Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, token_header(credentials))
            .header(USER_AGENT, &self.user_agent)
            .body(Body::from(body))
            .map_err(|err| {
                HostingError::transport(format!("failed to build GitHub request: {err}"))
            })?;

        let (code, bytes) = self.dispatch(request).await?;

        if !code.is_success() {
            let details = String::from_utf8_lossy(&bytes).to_string();
            return Err(HostingError::response(format!(
                "GitHub returned {code} writing status for {sha}: {details}"
            )));
        }

        debug!(repo = %repo, sha = %sha, state = %status.state(), "commit status written");
        Ok(())
    }
}

fn token_header(credentials: &Credentials) -> String {
    format!("token {}", credentials.token())
}

fn parse_uri(raw: String) -> HostingResult<Uri> {
    raw.parse::<Uri>()
        .map_err(|err| HostingError::configuration(format!("invalid GitHub URL {raw}: {err}")))
}

fn sanitize_base_url(input: &str) -> HostingResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(HostingError::configuration(
            "GitHub base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| HostingError::configuration(format!("invalid GitHub base URL: {err}")))?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> GithubService {
        GithubService::new(GithubConfig::new()).expect("default config")
    }

    #[test]
    fn base_url_requires_scheme() {
        let err = GithubConfig::new()
            .with_base_url("api.github.com")
            .expect_err("missing scheme should error");

        assert!(matches!(err, HostingError::Configuration { .. }));
    }

    #[test]
    fn sanitize_appends_trailing_slash() {
        let cfg = GithubConfig::new()
            .with_base_url("https://github.example.com/api/v3")
            .expect("valid URL");
        assert_eq!(cfg.base_url, "https://github.example.com/api/v3/");
    }

    #[test]
    fn builds_contents_uri() {
        let repo = RepoSlug::new("octocat", "hello-world").unwrap();
        let uri = service()
            .contents_uri(&repo, ".github/PULL_REQUEST_TEMPLATE.md")
            .unwrap();

        assert_eq!(
            uri.to_string(),
            "https://api.github.com/repos/octocat/hello-world/contents/.github/PULL_REQUEST_TEMPLATE.md"
        );
    }

    #[test]
    fn builds_statuses_uri() {
        let repo = RepoSlug::new("octocat", "hello-world").unwrap();
        let sha = CommitSha::new("a94a8fe5ccb19ba61c4c0873d391e987982fbbd3").unwrap();
        let uri = service().statuses_uri(&repo, &sha).unwrap();

        assert_eq!(
            uri.to_string(),
            "https://api.github.com/repos/octocat/hello-world/statuses/a94a8fe5ccb19ba61c4c0873d391e987982fbbd3"
        );
    }

    #[test]
    fn formats_token_header() {
        let credentials = Credentials::new("gh-token");
        assert_eq!(token_header(&credentials), "token gh-token");
    }
}
