//! GitHub org client.
//!
//! Thin consumer of the [`JsonFetcher`] seam: fetches an org payload
//! (memoized per client instance), resolves its `repos_url`, and lists
//! public repo names with an optional license filter.

use prodev_core::cache::Memo;
use prodev_core::value::access_nested;
use serde_json::Value;

use crate::http::{HttpError, JsonFetcher};

/// Base URL for the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Errors from the org client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response decoded as JSON but did not have the expected shape.
    #[error("unexpected payload shape: {0}")]
    Payload(String),
}

/// Client for a single GitHub organization.
pub struct OrgClient<F> {
    fetcher: F,
    org: String,
    org_payload: Memo<Value>,
}

impl<F: JsonFetcher> OrgClient<F> {
    pub fn new(fetcher: F, org: impl Into<String>) -> Self {
        Self {
            fetcher,
            org: org.into(),
            org_payload: Memo::new(),
        }
    }

    /// The org payload from `/orgs/{org}`, fetched once per client
    /// instance and memoized.
    pub async fn org(&self) -> Result<&Value, ClientError> {
        let url = format!("{GITHUB_API_BASE}/orgs/{}", self.org);
        let fetcher = &self.fetcher;
        self.org_payload
            .get_or_try_init(move || async move {
                let payload = fetcher.get_json(&url).await?;
                Ok::<_, ClientError>(payload)
            })
            .await
    }

    /// The org's `repos_url` field.
    pub async fn public_repos_url(&self) -> Result<String, ClientError> {
        let org = self.org().await?;
        let url = access_nested(org, &["repos_url"])
            .map_err(|err| ClientError::Payload(err.to_string()))?;
        url.as_str()
            .map(ToOwned::to_owned)
            .ok_or_else(|| ClientError::Payload("repos_url is not a string".to_string()))
    }

    /// Names of the org's public repos.
    ///
    /// With `license` set, only repos carrying that license key are
    /// returned. Repo entries without a `name` string are skipped.
    pub async fn public_repos(&self, license: Option<&str>) -> Result<Vec<String>, ClientError> {
        let url = self.public_repos_url().await?;
        let payload = self.fetcher.get_json(&url).await?;

        let Value::Array(repos) = payload else {
            return Err(ClientError::Payload(
                "repos payload is not an array".to_string(),
            ));
        };

        let mut names = Vec::new();
        for repo in &repos {
            if let Some(key) = license {
                if !has_license(repo, key) {
                    continue;
                }
            }
            if let Some(name) = repo.get("name").and_then(Value::as_str) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

/// Whether a repo payload carries the given license key.
///
/// A repo without a `license.key` entry never matches.
pub fn has_license(repo: &Value, license_key: &str) -> bool {
    matches!(
        access_nested(repo, &["license", "key"]),
        Ok(Value::String(key)) if key == license_key
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    // -----------------------------------------------------------------------
    // Fixture fetcher
    // -----------------------------------------------------------------------

    /// Fetcher serving canned payloads by URL, counting every call.
    struct FixtureFetcher {
        payloads: HashMap<String, Value>,
        calls: AtomicUsize,
    }

    impl FixtureFetcher {
        fn new(payloads: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
            Self {
                payloads: payloads
                    .into_iter()
                    .map(|(url, payload)| (url.to_string(), payload))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JsonFetcher for FixtureFetcher {
        async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payloads.get(url).cloned().ok_or_else(|| HttpError::Status {
                status: 404,
                body: format!("no fixture for {url}"),
            })
        }
    }

    fn google_fixture() -> FixtureFetcher {
        FixtureFetcher::new([
            (
                "https://api.github.com/orgs/google",
                json!({
                    "login": "google",
                    "id": 12345,
                    "repos_url": "https://api.github.com/orgs/google/repos",
                }),
            ),
            (
                "https://api.github.com/orgs/google/repos",
                json!([
                    {"name": "episodes.dart", "license": {"key": "bsd-3-clause"}},
                    {"name": "cpp-netlib", "license": {"key": "bsl-1.0"}},
                    {"name": "dagger", "license": {"key": "apache-2.0"}},
                    {"name": "unlicensed-repo"},
                ]),
            ),
        ])
    }

    // -----------------------------------------------------------------------
    // Org payload
    // -----------------------------------------------------------------------

    /// The org payload comes back verbatim and is fetched only once.
    #[tokio::test]
    async fn org_payload_is_memoized() {
        let client = OrgClient::new(google_fixture(), "google");

        let first = client.org().await.unwrap().clone();
        let second = client.org().await.unwrap().clone();

        assert_eq!(first["login"], "google");
        assert_eq!(first, second);
        assert_eq!(client.fetcher.calls(), 1);
    }

    /// A 404 from the API surfaces as an HTTP error.
    #[tokio::test]
    async fn unknown_org_is_http_error() {
        let client = OrgClient::new(google_fixture(), "nonexistent");

        let err = client.org().await.unwrap_err();
        assert_matches!(err, ClientError::Http(HttpError::Status { status: 404, .. }));
    }

    // -----------------------------------------------------------------------
    // repos_url
    // -----------------------------------------------------------------------

    /// repos_url is pulled out of the org payload.
    #[tokio::test]
    async fn public_repos_url_from_payload() {
        let client = OrgClient::new(google_fixture(), "google");

        let url = client.public_repos_url().await.unwrap();
        assert_eq!(url, "https://api.github.com/orgs/google/repos");
    }

    /// An org payload without repos_url is a payload-shape error.
    #[tokio::test]
    async fn missing_repos_url_is_payload_error() {
        let fetcher = FixtureFetcher::new([(
            "https://api.github.com/orgs/google",
            json!({"login": "google"}),
        )]);
        let client = OrgClient::new(fetcher, "google");

        let err = client.public_repos_url().await.unwrap_err();
        assert_matches!(err, ClientError::Payload(_));
    }

    // -----------------------------------------------------------------------
    // public_repos
    // -----------------------------------------------------------------------

    /// All repo names are listed without a license filter.
    #[tokio::test]
    async fn public_repos_lists_all_names() {
        let client = OrgClient::new(google_fixture(), "google");

        let repos = client.public_repos(None).await.unwrap();
        assert_eq!(
            repos,
            vec!["episodes.dart", "cpp-netlib", "dagger", "unlicensed-repo"]
        );
    }

    /// The license filter keeps only matching repos.
    #[tokio::test]
    async fn public_repos_filters_by_license() {
        let client = OrgClient::new(google_fixture(), "google");

        let repos = client.public_repos(Some("apache-2.0")).await.unwrap();
        assert_eq!(repos, vec!["dagger"]);
    }

    /// A non-array repos payload is a payload-shape error.
    #[tokio::test]
    async fn non_array_repos_payload_errors() {
        let fetcher = FixtureFetcher::new([
            (
                "https://api.github.com/orgs/google",
                json!({
                    "login": "google",
                    "repos_url": "https://api.github.com/orgs/google/repos",
                }),
            ),
            (
                "https://api.github.com/orgs/google/repos",
                json!({"message": "rate limited"}),
            ),
        ]);
        let client = OrgClient::new(fetcher, "google");

        let err = client.public_repos(None).await.unwrap_err();
        assert_matches!(err, ClientError::Payload(_));
    }

    // -----------------------------------------------------------------------
    // has_license
    // -----------------------------------------------------------------------

    /// Matching and non-matching license keys.
    #[test]
    fn has_license_matches_key() {
        let repo = json!({"license": {"key": "my_license"}});
        assert!(has_license(&repo, "my_license"));
        assert!(!has_license(&repo, "other_license"));
    }

    /// A repo without a license object never matches.
    #[test]
    fn has_license_without_license_object() {
        let repo = json!({"name": "bare"});
        assert!(!has_license(&repo, "my_license"));
    }
}
