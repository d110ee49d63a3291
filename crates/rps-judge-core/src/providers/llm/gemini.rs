use super::{LlmClient, LlmResponse};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiClient {
    pub model: String,
    api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        model: String,
        api_key: String,
        temperature: f32,
        max_tokens: u32,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            model,
            api_key,
            temperature,
            max_tokens,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: super::http_client(timeout)?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn body(&self, prompt: &str, system: Option<&str>) -> serde_json::Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_tokens,
                "responseMimeType": "application/json"
            }
        });
        if let Some(sys) = system {
            body["systemInstruction"] = json!({ "parts": [{ "text": sys }] });
        }
        body
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> anyhow::Result<LlmResponse> {
        let url = self.endpoint();
        crate::providers::network::ensure_allowed(&url)?;

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&self.body(prompt, system))
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            anyhow::bail!("Gemini API rejected the credentials (status {})", status);
        }
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error (status {}): {}", status, error_text);
        }

        let json: serde_json::Value = resp.json().await?;
        let text = extract_text(&json)?;

        let usage = json.get("usageMetadata");
        let meta = json!({
            "usage": {
                "input_tokens": usage.and_then(|u| u.get("promptTokenCount")),
                "output_tokens": usage.and_then(|u| u.get("candidatesTokenCount")),
            }
        });

        Ok(LlmResponse {
            text,
            provider: "gemini".to_string(),
            model: self.model.clone(),
            meta,
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

fn extract_text(json: &serde_json::Value) -> anyhow::Result<String> {
    if let Some(text) = json
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(|v| v.as_str())
    {
        return Ok(text.to_string());
    }
    if let Some(reason) = json
        .pointer("/promptFeedback/blockReason")
        .and_then(|v| v.as_str())
    {
        anyhow::bail!("Gemini blocked the prompt: {}", reason);
    }
    anyhow::bail!("Gemini API response missing content")
}
