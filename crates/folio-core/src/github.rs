//! GitHub directory listing: the remote source for project metrics.
//! One page of up to 100 repositories per account; reqwest only.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const PAGE_SIZE: u32 = 100;
pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
/// Freshness window for cached listings.
pub const CACHE_TTL: Duration = Duration::from_secs(3600);

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Repository entry as returned by `GET /users/{account}/repos`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRepository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("account identifier is empty")]
    EmptyAccount,
    #[error("not a GitHub login: {0:?}")]
    InvalidAccount(String),
    #[error("API base URL: {0}")]
    BaseUrl(String),
    #[error("GitHub request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("GitHub returned status {0}")]
    Status(u16),
    #[error("GitHub response parse: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of an account's repository listing.
#[async_trait]
pub trait RepositoryDirectory: Send + Sync {
    async fn list_repositories(&self, account: &str) -> Result<Vec<RemoteRepository>, DirectoryError>;
}

/// Live GitHub REST client.
#[derive(Debug, Clone)]
pub struct GithubDirectory {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Default for GithubDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl GithubDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Authenticated requests get a higher rate limit. Blank tokens are ignored.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// `{base}/users/{account}/repos?per_page=100`. The account is checked, then pushed as one path segment.
    pub fn listing_url(&self, account: &str) -> Result<reqwest::Url, DirectoryError> {
        if account.is_empty() {
            return Err(DirectoryError::EmptyAccount);
        }
        if !is_github_login(account) {
            return Err(DirectoryError::InvalidAccount(account.to_string()));
        }

        let mut url =
            reqwest::Url::parse(&self.base_url).map_err(|e| DirectoryError::BaseUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| DirectoryError::BaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["users", account, "repos"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("per_page", &PAGE_SIZE.to_string());
        url.set_fragment(None);
        Ok(url)
    }
}

/// GitHub logins: ASCII alphanumerics and single inner hyphens, at most 39 chars.
fn is_github_login(account: &str) -> bool {
    account.len() <= 39
        && !account.starts_with('-')
        && !account.ends_with('-')
        && !account.contains("--")
        && account.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[async_trait]
impl RepositoryDirectory for GithubDirectory {
    async fn list_repositories(&self, account: &str) -> Result<Vec<RemoteRepository>, DirectoryError> {
        let account = account.trim();
        let url = self.listing_url(account)?;

        let mut req = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        let body = res.bytes().await?;
        let repos: Vec<RemoteRepository> = serde_json::from_slice(&body)?;
        tracing::debug!(account, count = repos.len(), "GitHub listing fetched");
        Ok(repos)
    }
}

struct CacheEntry {
    fetched_at: Instant,
    repos: Vec<RemoteRepository>,
}

/// Per-account response cache over any directory. Only successful listings are stored.
pub struct CachedDirectory<D> {
    inner: D,
    ttl: Duration,
    entries: DashMap<String, CacheEntry>,
}

impl<D: RepositoryDirectory> CachedDirectory<D> {
    pub fn new(inner: D, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: DashMap::new(),
        }
    }

    fn fresh(&self, account: &str) -> Option<Vec<RemoteRepository>> {
        let entry = self.entries.get(account)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(entry.repos.clone())
        } else {
            None
        }
    }
}

#[async_trait]
impl<D: RepositoryDirectory> RepositoryDirectory for CachedDirectory<D> {
    async fn list_repositories(&self, account: &str) -> Result<Vec<RemoteRepository>, DirectoryError> {
        if let Some(repos) = self.fresh(account) {
            tracing::debug!(account, "GitHub listing served from cache");
            return Ok(repos);
        }
        let repos = self.inner.list_repositories(account).await?;
        self.entries.insert(
            account.to_string(),
            CacheEntry {
                fetched_at: Instant::now(),
                repos: repos.clone(),
            },
        );
        Ok(repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl RepositoryDirectory for Counting {
        async fn list_repositories(&self, _account: &str) -> Result<Vec<RemoteRepository>, DirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DirectoryError::Status(503));
            }
            Ok(Vec::new())
        }
    }

    #[test]
    fn listing_url_requests_one_full_page() {
        let d = GithubDirectory::new("http://localhost:9/");
        assert_eq!(
            d.listing_url("someone").unwrap().as_str(),
            "http://localhost:9/users/someone/repos?per_page=100"
        );
        let enterprise = GithubDirectory::new("https://ghe.example.com/api/v3");
        assert_eq!(
            enterprise.listing_url("Mr-Biscuit921").unwrap().as_str(),
            "https://ghe.example.com/api/v3/users/Mr-Biscuit921/repos?per_page=100"
        );
    }

    #[test]
    fn listing_url_rejects_accounts_that_rewrite_the_request() {
        let d = GithubDirectory::default();
        for bad in [
            "evil/../../orgs/x?per_page=1#",
            "a/b",
            "a?per_page=1",
            "a#frag",
            "..",
            "-lead",
            "trail-",
            "dou--ble",
            "has space",
        ] {
            assert!(
                matches!(d.listing_url(bad), Err(DirectoryError::InvalidAccount(ref a)) if a == bad),
                "{bad} should be rejected"
            );
        }
        assert!(matches!(d.listing_url(""), Err(DirectoryError::EmptyAccount)));
    }

    #[test]
    fn unusable_base_url_is_an_error() {
        let d = GithubDirectory::new("not a url");
        assert!(matches!(d.listing_url("someone"), Err(DirectoryError::BaseUrl(_))));
        let opaque = GithubDirectory::new("mailto:someone@example.com");
        assert!(matches!(opaque.listing_url("someone"), Err(DirectoryError::BaseUrl(_))));
    }

    #[test]
    fn remote_payload_tolerates_nulls_and_extra_fields() {
        let body = r#"[{"id":5,"name":"x","description":null,"html_url":"https://github.com/u/x",
            "homepage":null,"stargazers_count":3,"forks_count":1,"topics":[],"language":null,
            "updated_at":"2024-02-03T04:05:06Z","private":false}]"#;
        let repos: Vec<RemoteRepository> = serde_json::from_str(body).unwrap();
        assert_eq!(repos[0].stargazers_count, 3);
        assert!(repos[0].homepage.is_none());
    }

    #[tokio::test]
    async fn cache_serves_fresh_listing_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cached = CachedDirectory::new(
            Counting { calls: calls.clone(), fail: false },
            CACHE_TTL,
        );
        cached.list_repositories("u").await.unwrap();
        cached.list_repositories("u").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        cached.list_repositories("other").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stale_entries_and_failures_are_refetched() {
        let calls = Arc::new(AtomicUsize::new(0));
        let no_ttl = CachedDirectory::new(
            Counting { calls: calls.clone(), fail: false },
            Duration::ZERO,
        );
        no_ttl.list_repositories("u").await.unwrap();
        no_ttl.list_repositories("u").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let failing_calls = Arc::new(AtomicUsize::new(0));
        let failing = CachedDirectory::new(
            Counting { calls: failing_calls.clone(), fail: true },
            CACHE_TTL,
        );
        assert!(failing.list_repositories("u").await.is_err());
        assert!(failing.list_repositories("u").await.is_err());
        assert_eq!(failing_calls.load(Ordering::SeqCst), 2);
    }
}
