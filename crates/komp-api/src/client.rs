//! HTTP client wrapper for the competitions backend.
//!
//! Uses reqwest to issue JSON requests with bearer-token injection from the
//! session store. A 401 from any authenticated call clears the stored
//! session and surfaces `ApiError::Unauthorized`; callers route that to the
//! login flow. No retry, no backoff: one request, one response.

use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use komp_core::config::ApiConfig;
use komp_core::SessionStore;

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("session expired or invalid")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status carried by this error, when there is one.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client for the competitions backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        if config.base_url.is_empty() {
            return Err(ApiError::Config("base_url is empty".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The session store this client injects tokens from.
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Build the full URL for a given path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Percent-encode a query value (usernames may contain reserved chars).
    pub(crate) fn encode_query(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for byte in value.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    out.push(byte as char);
                }
                _ => {
                    use std::fmt::Write;
                    let _ = write!(out, "%{byte:02X}");
                }
            }
        }
        out
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                builder = builder.header(AUTHORIZATION, value);
            }
        }
        builder
    }

    /// Check HTTP response status. A 401 clears the durable session before
    /// reporting, so the app falls back to the login flow on the next check.
    async fn check_status(&self, resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.session.clear() {
                warn!(?e, "failed to clear session after 401");
            }
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = match resp.text().await {
                Ok(body) if !body.trim().is_empty() => body,
                _ => status.canonical_reason().unwrap_or("Unknown").to_string(),
            };
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.builder(Method::GET, path).send().await?;
        let resp = self.check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// POST a JSON body and parse a JSON response.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self.builder(Method::POST, path).json(body).send().await?;
        let resp = self.check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// POST a JSON body where the success response carries no JSON (or none
    /// we care about).
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let resp = self.builder(Method::POST, path).json(body).send().await?;
        self.check_status(resp).await?;
        Ok(())
    }

    /// PUT a JSON body where the success response carries no JSON.
    pub async fn put_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let resp = self.builder(Method::PUT, path).json(body).send().await?;
        self.check_status(resp).await?;
        Ok(())
    }

    /// DELETE a resource, ignoring any response body.
    pub async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.builder(Method::DELETE, path).send().await?;
        self.check_status(resp).await?;
        Ok(())
    }

    /// POST without bearer injection, for login/signup.
    pub(crate) async fn post_public<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .http
            .post(self.url(path))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let message = match resp.text().await {
                Ok(body) if !body.trim().is_empty() => body,
                _ => status.canonical_reason().unwrap_or("Unknown").to_string(),
            };
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> Result<ApiClient, ApiError> {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::at(dir.path().join("session.json"));
        let config = ApiConfig {
            base_url: base_url.into(),
            request_timeout_secs: 5,
        };
        ApiClient::new(&config, session)
    }

    #[test]
    fn empty_base_url_returns_config_error() {
        let err = test_client("").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn valid_config_creates_client() {
        assert!(test_client("http://localhost:8080").is_ok());
    }

    #[test]
    fn trailing_slash_stripped_from_base_url() {
        let client = test_client("http://localhost:8080/").unwrap();
        let url = client.url("/competitions");
        assert_eq!(url, "http://localhost:8080/competitions");
        assert!(!url.contains("//competitions"));
    }

    #[test]
    fn url_constructed_correctly() {
        let client = test_client("https://komp.example").unwrap();
        assert_eq!(
            client.url("/matches/competition/3"),
            "https://komp.example/matches/competition/3"
        );
    }

    #[test]
    fn encode_query_passes_plain_names() {
        assert_eq!(ApiClient::encode_query("alice"), "alice");
        assert_eq!(ApiClient::encode_query("a-b_c.d~e"), "a-b_c.d~e");
    }

    #[test]
    fn encode_query_escapes_reserved_chars() {
        assert_eq!(ApiClient::encode_query("a b"), "a%20b");
        assert_eq!(ApiClient::encode_query("a&b=c"), "a%26b%3Dc");
        assert_eq!(ApiClient::encode_query("émile"), "%C3%A9mile");
    }

    #[test]
    fn unauthorized_error_carries_status() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert_eq!(
            ApiError::Api {
                status: 404,
                message: "nope".into()
            }
            .status(),
            Some(404)
        );
        assert_eq!(ApiError::Invalid("x".into()).status(), None);
    }
}
