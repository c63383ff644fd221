//! Blocking chat-completions client.

use crate::config::ProviderConfig;
use deck_core::{PromptBlocks, ProviderError, RawResponse, TextGenerator};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<Message>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// One configured backend. Makes exactly one HTTP call per
/// [`generate`](TextGenerator::generate); retrying is up to the caller.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    config: ProviderConfig,
    client: Client,
}

impl ProviderClient {
    /// Build the HTTP client for `config`.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn request_body(&self, prompt: &PromptBlocks) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });
        if self.config.json_mode {
            body["response_format"] = serde_json::json!({"type": "json_object"});
        }
        body
    }

    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            ProviderError::Network(err.to_string())
        }
    }

    fn check_status(&self, resp: Response) -> Result<Response, ProviderError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse().ok());
            return Err(ProviderError::RateLimit { retry_after_secs });
        }

        let message = resp.text().unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProviderError::Auth(if message.is_empty() {
                format!("{} rejected the API key", self.config.backend)
            } else {
                message
            }));
        }
        Err(ProviderError::MalformedHttp {
            status: Some(status.as_u16()),
            message,
        })
    }
}

impl TextGenerator for ProviderClient {
    fn generate(&self, prompt: &PromptBlocks) -> Result<RawResponse, ProviderError> {
        let url = self.config.completions_url();
        log::debug!("POST {} (model {})", url, self.config.model);

        let start = Instant::now();
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(prompt))
            .send()
            .map_err(|e| self.transport_error(e))?;
        let status = resp.status().as_u16();
        log::debug!("{} responded {} in {}ms", self.config.backend, status, start.elapsed().as_millis());

        let resp = self.check_status(resp)?;
        let body = resp.text().map_err(|e| self.transport_error(e))?;
        let parsed: CompletionResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::MalformedHttp {
                status: Some(status),
                message: format!("undecodable completion body: {e}"),
            })?;

        let choice = parsed.choices.into_iter().next();
        let truncated = choice
            .as_ref()
            .and_then(|c| c.finish_reason.as_deref())
            .is_some_and(|reason| reason == "length");
        let text = choice
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::MalformedHttp {
                status: Some(status),
                message: "completion has no content".to_string(),
            })?;

        Ok(RawResponse::new(text, parsed.model.unwrap_or_else(|| self.config.model.clone()))
            .with_truncated(truncated))
    }
}
