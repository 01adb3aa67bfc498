//! Blocking client for OpenAI-compatible `/chat/completions` endpoints.

use std::{io::BufReader, time::Duration};

use serde::Serialize;
use tracing::{debug, warn};

use healix_config::ProviderConfig;
use healix_contracts::{
    error::{HealixError, HealixResult},
    message::ConversationMessage,
};
use healix_core::traits::ChatBackend;

use crate::sse::read_stream;

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    temperature: f32,
}

#[derive(Debug, Serialize, PartialEq)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// A hosted chat model reached over HTTP with a bearer key.
pub struct ChatCompletionsClient {
    name: String,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
    referer: String,
    title: String,
    timeout_secs: u64,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ChatCompletionsClient {
    /// Build a client from provider settings, reading the key from the
    /// environment variable the provider names.
    ///
    /// Returns `HealixError::Config` when that variable is unset or blank.
    pub fn from_provider(provider: &ProviderConfig) -> HealixResult<Self> {
        let api_key = provider.api_key().ok_or_else(|| HealixError::Config {
            reason: format!(
                "API key not configured for provider '{}' (set {})",
                provider.name, provider.api_key_env
            ),
        })?;
        Self::new(provider, api_key)
    }

    /// Build a client with an explicit key.
    pub fn new(provider: &ProviderConfig, api_key: impl Into<String>) -> HealixResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .build()
            .map_err(|e| HealixError::Config {
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            name: provider.name.clone(),
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            model: provider.model.clone(),
            api_key: api_key.into(),
            temperature: provider.temperature,
            referer: provider.referer.clone(),
            title: provider.title.clone(),
            timeout_secs: provider.timeout_secs,
            client,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body<'a>(
        &'a self,
        system_prompt: &'a str,
        messages: &'a [ConversationMessage],
    ) -> ChatRequest<'a> {
        let mut wire = Vec::with_capacity(messages.len() + 1);
        wire.push(WireMessage { role: "system", content: system_prompt });
        wire.extend(messages.iter().map(|m| WireMessage {
            role: m.role.as_str(),
            content: &m.content,
        }));

        ChatRequest { model: &self.model, messages: wire, stream: true, temperature: self.temperature }
    }
}

impl ChatBackend for ChatCompletionsClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn complete(
        &self,
        system_prompt: &str,
        messages: &[ConversationMessage],
        on_delta: &mut dyn FnMut(&str),
    ) -> HealixResult<String> {
        let url = self.endpoint();
        debug!(provider = %self.name, model = %self.model, turns = messages.len(), "sending chat request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&self.request_body(system_prompt, messages))
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    HealixError::Backend { reason: format!("cannot connect to {}", self.base_url) }
                } else if e.is_timeout() {
                    HealixError::Backend {
                        reason: format!("request timed out after {}s", self.timeout_secs),
                    }
                } else {
                    HealixError::Backend { reason: e.to_string() }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(provider = %self.name, status = status.as_u16(), "chat request rejected");
            return Err(HealixError::BackendStatus { status: status.as_u16(), body });
        }

        let text = read_stream(BufReader::new(response), on_delta)?;
        debug!(provider = %self.name, chars = text.len(), "chat stream finished");
        Ok(text)
    }
}
