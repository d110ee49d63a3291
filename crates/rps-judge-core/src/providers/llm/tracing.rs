use super::{LlmClient, LlmResponse};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::field::Empty;
use tracing::{Instrument, Span};

/// Runs every judge call inside an `llm.request` span with latency, token
/// usage and failure recorded on it.
pub struct TracingLlmClient {
    inner: Arc<dyn LlmClient>,
}

impl TracingLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>) -> Self {
        Self { inner }
    }
}

fn record_reply(span: &Span, resp: &LlmResponse) {
    span.record("llm.model", resp.model.as_str());
    span.record("judge.reply_bytes", resp.text.len() as u64);
    let usage = resp.meta.get("usage");
    let tokens = |key: &str| usage.and_then(|u| u.get(key)).and_then(|v| v.as_u64());
    if let Some(n) = tokens("input_tokens") {
        span.record("llm.usage.input_tokens", n);
    }
    if let Some(n) = tokens("output_tokens") {
        span.record("llm.usage.output_tokens", n);
    }
}

#[async_trait]
impl LlmClient for TracingLlmClient {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> anyhow::Result<LlmResponse> {
        let span = tracing::info_span!(
            "llm.request",
            "llm.provider" = self.inner.provider_name(),
            "llm.model" = Empty,
            "llm.usage.input_tokens" = Empty,
            "llm.usage.output_tokens" = Empty,
            "llm.duration_ms" = Empty,
            "judge.prompt_bytes" = prompt.len() as u64,
            "judge.reply_bytes" = Empty,
            "error.message" = Empty
        );

        let started = Instant::now();
        let result = self
            .inner
            .complete(prompt, system)
            .instrument(span.clone())
            .await;
        span.record("llm.duration_ms", started.elapsed().as_millis() as u64);

        match &result {
            Ok(resp) => {
                record_reply(&span, resp);
                span.in_scope(|| tracing::debug!("judge reply received"));
            }
            Err(e) => {
                span.record("error.message", format!("{:#}", e).as_str());
                span.in_scope(|| tracing::debug!("judge request failed"));
            }
        }
        result
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::llm::fake::FakeClient;

    #[tokio::test]
    async fn replies_and_errors_pass_through_unchanged() {
        let inner = Arc::new(FakeClient::new("gemini-test").with_response("{}"));
        let client = TracingLlmClient::new(inner.clone());
        let resp = client.complete("prompt", Some("sys")).await.unwrap();
        assert_eq!(resp.text, "{}");
        assert_eq!(client.provider_name(), "fake");
        assert_eq!(inner.calls()[0].system.as_deref(), Some("sys"));

        let failing = TracingLlmClient::new(Arc::new(FakeClient::new("m").failing("boom")));
        let err = failing.complete("prompt", None).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
