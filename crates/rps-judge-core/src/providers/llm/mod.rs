pub mod fake;
pub mod gemini;
pub mod openai;
pub mod tracing;

use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    /// Provider extras; token counts live under `usage`.
    pub meta: serde_json::Value,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}

/// Builds the HTTP client shared by the hosted providers.
pub(crate) fn http_client(timeout: std::time::Duration) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
