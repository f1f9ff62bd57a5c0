use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::error::{ProbeError, Result};

/// A single outbound request, built fresh for every probe.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

/// Append `path` to `base_url`. Unlike `Url::join` this keeps any path prefix on the base.
pub fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let base = base_url.trim_end_matches('/');
    Ok(Url::parse(&format!("{base}{path}"))?)
}

impl ProbeRequest {
    pub fn get(url: Url, timeout: Duration) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout,
        }
    }

    /// A POST carrying `body` as JSON, asking for JSON back.
    pub fn post_json(url: Url, body: serde_json::Value, timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            method: Method::POST,
            url,
            headers,
            body: Some(body),
            timeout,
        }
    }

    /// Attach `Authorization: Bearer <token>`.
    /// Fails when the token contains bytes that are not allowed in a header.
    pub fn bearer(mut self, token: &str) -> Result<Self> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|source| {
            ProbeError::InvalidHeader {
                name: "Authorization",
                source,
            }
        })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// Append a percent-encoded query parameter.
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }
}
