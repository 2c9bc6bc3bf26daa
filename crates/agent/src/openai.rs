//! OpenAI-compatible chat-completions client.
//!
//! Works against api.openai.com and against local servers that speak the same
//! protocol (Ollama exposes `/v1/chat/completions`). A missing API key for a
//! provider that needs one is reported as a request failure so callers can
//! degrade the same way they do for network errors.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use fitfinder_core::config::{LlmConfig, LlmProvider};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::llm::{ChatCompletion, LlmClient};

pub struct OpenAiCompatibleClient {
    client: Client,
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
}

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl OpenAiCompatibleClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            client,
            provider: config.provider,
            endpoint: config.endpoint().to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.endpoint)
    }

    fn request_body<'a>(&'a self, request: &'a ChatCompletion) -> ChatRequestBody<'a> {
        ChatRequestBody {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: &request.system },
                ChatMessage { role: "user", content: &request.user },
            ],
            temperature: request.temperature,
        }
    }

    fn http_request(&self, request: &ChatCompletion, api_key: Option<&str>) -> RequestBuilder {
        let http_request =
            self.client.post(self.completions_url()).json(&self.request_body(request));
        match api_key {
            Some(api_key) => http_request.bearer_auth(api_key),
            None => http_request,
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().trim())
            .filter(|key| !key.is_empty())
    }
}

#[async_trait]
impl LlmClient for OpenAiCompatibleClient {
    async fn complete(&self, request: &ChatCompletion) -> Result<String> {
        let api_key = self.api_key();
        if api_key.is_none() && self.provider.requires_api_key() {
            bail!("llm.api_key is not configured for the {} provider", self.provider.as_str());
        }

        let response = self.http_request(request, api_key).send().await.map_err(|error| {
            if error.is_timeout() {
                anyhow!("request to {} timed out", self.endpoint)
            } else {
                anyhow!("request to {} failed: {error}", self.endpoint)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("completion endpoint returned {status}: {}", truncate(detail.trim(), 200));
        }

        let payload: Value =
            response.json().await.context("failed to decode completion response")?;
        reply_content(&payload)
    }
}

/// `choices[0].message.content` of a chat-completions payload.
pub fn reply_content(payload: &Value) -> Result<String> {
    let content = payload
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| anyhow!("completion response had no message content"))?;

    Ok(content.to_string())
}

fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &value[..index]),
        None => value.to_string(),
    }
}
