//! Provider configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default output token budget for one deck.
pub const DEFAULT_MAX_TOKENS: u32 = 12_000;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Supported chat-completions backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    MiniMax,
    OpenAi,
}

impl Backend {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Backend::MiniMax => "https://api.minimax.io/v1",
            Backend::OpenAi => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Backend::MiniMax => "MiniMax-M2.5",
            Backend::OpenAi => "gpt-4o",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::MiniMax => "minimax",
            Backend::OpenAi => "openai",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Backend::MiniMax),
            "openai" => Ok(Backend::OpenAi),
            other => Err(format!("unknown provider '{other}' (expected minimax or openai)")),
        }
    }
}

/// Everything needed to talk to one backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub backend: Backend,
    /// Endpoint root; `/chat/completions` is appended.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    /// Ask the backend for a JSON object response.
    pub json_mode: bool,
}

impl ProviderConfig {
    /// Configuration for `backend` with its default endpoint and model.
    pub fn new(backend: Backend, api_key: impl Into<String>) -> Self {
        Self {
            backend,
            base_url: backend.default_base_url().to_string(),
            api_key: api_key.into(),
            model: backend.default_model().to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
            json_mode: true,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens.max(1);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults() {
        let config = ProviderConfig::new(Backend::default(), "key");
        assert_eq!(config.backend, Backend::MiniMax);
        assert_eq!(config.model, "MiniMax-M2.5");
        assert_eq!(config.max_tokens, 12_000);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.json_mode);

        let config = ProviderConfig::new(Backend::OpenAi, "key");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.completions_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let config = ProviderConfig::new(Backend::MiniMax, "key").with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("OpenAI".parse::<Backend>(), Ok(Backend::OpenAi));
        assert_eq!(" minimax ".parse::<Backend>(), Ok(Backend::MiniMax));
        assert!("claude".parse::<Backend>().is_err());
    }

    #[test]
    fn test_builders_clamp() {
        let config = ProviderConfig::new(Backend::OpenAi, "key")
            .with_temperature(5.0)
            .with_max_tokens(0);
        assert_eq!(config.temperature, 2.0);
        assert_eq!(config.max_tokens, 1);
    }
}
