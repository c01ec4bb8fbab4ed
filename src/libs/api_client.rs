// This file talks to the API-key validation endpoint.
// It posts `{ "apiKey": "<key>" }` and reads back `{ "success": bool }`.
// The request is bounded by an explicit timeout; anything other than a
// 2xx response carrying `success: true` counts as an invalid key.

use crate::log_debug;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Failures talking to the validation endpoint. The settings manager turns
/// every one of them into "invalid key".
#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: Box<ureq::Error>,
    },
    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Something that can tell whether an AI API key is usable.
pub trait ApiKeyValidator {
    /// `Ok(true)` only when the key was positively confirmed.
    fn validate_key(&self, api_key: &str) -> Result<bool, ApiClientError>;
}

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    #[serde(default)]
    success: bool,
}

/// Blocking HTTP client for the validation endpoint.
pub struct HttpApiKeyValidator {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpApiKeyValidator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("el-hornito/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }
}

impl ApiKeyValidator for HttpApiKeyValidator {
    fn validate_key(&self, api_key: &str) -> Result<bool, ApiClientError> {
        log_debug!("[ApiKey] Validating key against {}", self.endpoint);

        let response = match self
            .agent
            .post(&self.endpoint)
            .send_json(json!({ "apiKey": api_key }))
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                log_debug!("[ApiKey] Endpoint rejected the key with HTTP {}", code);
                return Ok(false);
            }
            Err(e) => {
                return Err(ApiClientError::Transport {
                    url: self.endpoint.clone(),
                    source: Box::new(e),
                });
            }
        };

        let body: ValidationResponse =
            response
                .into_json()
                .map_err(|e| ApiClientError::Decode {
                    url: self.endpoint.clone(),
                    reason: e.to_string(),
                })?;

        Ok(body.success)
    }
}
