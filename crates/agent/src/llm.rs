use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// One system + user exchange sent to a text-generation service.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatCompletion {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &ChatCompletion) -> Result<String>;
}
