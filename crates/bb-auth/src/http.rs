//! HTTP client for a token introspection endpoint.

use bb_types::{AuthError, AuthResolver};
use serde::Deserialize;
use std::time::Duration;

/// Per-request limit; a slower endpoint counts as a failed resolution.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct IntrospectResponse {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    subject: Option<String>,
}

/// AuthResolver that POSTs `{"token": ...}` to an introspection URL and reads the subject
/// (`sub`, or `subject`) from the JSON reply.
pub struct HttpAuthResolver {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpAuthResolver {
    pub fn new(url: String, api_key: Option<String>) -> Result<Self, AuthError> {
        Self::with_timeout(url, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Other(e.to_string()))?;
        Ok(Self {
            client,
            url,
            api_key,
        })
    }
}

#[async_trait::async_trait]
impl AuthResolver for HttpAuthResolver {
    async fn resolve(&self, token: &str) -> Result<String, AuthError> {
        let body = serde_json::json!({ "token": token });
        let mut req = self.client.post(&self.url).json(&body);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        let res = req
            .send()
            .await
            .map_err(|e| AuthError::Other(e.to_string()))?;
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| AuthError::Other(e.to_string()))?;
        if !status.is_success() {
            return Err(AuthError::Other(format!(
                "introspection error {}: {}",
                status, body
            )));
        }
        let parsed: IntrospectResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Other(e.to_string()))?;
        parsed
            .sub
            .or(parsed.subject)
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingSubject)
    }
}
