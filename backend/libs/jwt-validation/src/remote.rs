use crate::{TokenValidator, ValidationError, ValidationOutcome};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

const VALIDATE_PATH: &str = "/api/v1/auth/validate";
const DEFAULT_AUTH_SERVICE_URL: &str = "http://localhost:8081";
const DEFAULT_TIMEOUT_SECS: u64 = 5;
const TOKEN_PREVIEW_CHARS: usize = 8;

#[derive(Debug, Clone)]
pub struct RemoteValidatorConfig {
    /// Identity service base URL, e.g. `http://identity-service:8081`
    pub base_url: String,
    /// Bound on the whole round trip, connect to body
    pub timeout: Duration,
}

impl Default for RemoteValidatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AUTH_SERVICE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RemoteValidatorConfig {
    /// `AUTH_SERVICE_URL` and `AUTH_VALIDATION_TIMEOUT_SECS`, falling back to
    /// localhost:8081 and 5 seconds.
    pub fn from_env() -> Self {
        let base_url = std::env::var("AUTH_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_AUTH_SERVICE_URL.to_string());
        let timeout_secs = std::env::var("AUTH_VALIDATION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[derive(Serialize)]
struct ValidateRequest<'a> {
    token: &'a str,
}

/// Delegates verification to the identity service.
///
/// One attempt per call. A timeout abandons the in-flight request.
#[derive(Debug, Clone)]
pub struct RemoteValidator {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl RemoteValidator {
    pub fn new(config: RemoteValidatorConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .build()?;
        let endpoint = format!("{}{}", config.base_url.trim_end_matches('/'), VALIDATE_PATH);

        Ok(Self {
            client,
            endpoint,
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, token: &str) -> Result<ValidationOutcome, ValidationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ValidateRequest { token })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ValidationError::Timeout(self.timeout)
                } else {
                    ValidationError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ValidationError::Upstream(status.as_u16()));
        }

        response
            .json::<ValidationOutcome>()
            .await
            .map_err(ValidationError::Decode)
    }
}

fn preview(token: &str) -> String {
    token.chars().take(TOKEN_PREVIEW_CHARS).collect()
}

#[async_trait]
impl TokenValidator for RemoteValidator {
    async fn validate(&self, token: &str) -> Result<ValidationOutcome, ValidationError> {
        if token.is_empty() {
            return Ok(ValidationOutcome::invalid());
        }

        debug!(token_preview = %preview(token), "validating token with identity service");

        match tokio::time::timeout(self.timeout, self.call(token)).await {
            Ok(Ok(outcome)) => {
                debug!(valid = outcome.valid, user_id = %outcome.user_id, "remote validation result");
                Ok(outcome)
            }
            Ok(Err(e)) => {
                warn!(endpoint = %self.endpoint, error = %e, "remote token validation failed");
                Err(e)
            }
            Err(_) => {
                warn!(
                    endpoint = %self.endpoint,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "remote token validation timed out"
                );
                Err(ValidationError::Timeout(self.timeout))
            }
        }
    }
}
