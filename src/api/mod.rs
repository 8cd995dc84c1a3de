pub mod types;
pub mod users;

use reqwest::Response;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("not found")]
    NotFound,
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("unexpected response (status {status}): {detail}")]
    Unknown { status: u16, detail: String },
}

// ---------------------------------------------------------------------------
// API client
// ---------------------------------------------------------------------------

const BASE_URL: &str = "https://api.github.com";

/// Thin typed client over the GitHub REST API. One network exchange per
/// call; no retries, caching, or rate-limit handling.
pub struct GithubClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    /// Build a client against the public GitHub API. The token is optional;
    /// without it requests go out unauthenticated.
    pub fn new(token: Option<&str>) -> Result<Self, GithubError> {
        Self::with_base_url(BASE_URL, token)
    }

    /// Build a client against an alternate base URL (GitHub Enterprise, or a
    /// mock server in tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: Option<&str>,
    ) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        // GitHub rejects requests without a User-Agent.
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("octoscout/", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("ignoring GITHUB_TOKEN with invalid header characters"),
            }
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Issue a GET request and deserialize the response body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<T, GithubError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        tracing::debug!(%url, "GET");
        let resp = self.http_client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Check the status and deserialize the body, classifying failures.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: Response,
    ) -> Result<T, GithubError> {
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            return Err(GithubError::NotFound);
        }

        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(GithubError::Unknown {
                status: status.as_u16(),
                detail,
            });
        }

        let body = resp.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| GithubError::Decode(e.to_string()))
    }
}
