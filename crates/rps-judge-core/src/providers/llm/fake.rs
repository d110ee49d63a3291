use super::{LlmClient, LlmResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// One request seen by a [`FakeClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct FakeCall {
    pub prompt: String,
    pub system: Option<String>,
}

/// In-process client for tests: replays scripted replies, then a fixed one.
#[derive(Debug)]
pub struct FakeClient {
    model: String,
    scripted: Mutex<VecDeque<String>>,
    fixed_response: Option<String>,
    failure: Option<String>,
    calls: Mutex<Vec<FakeCall>>,
}

impl FakeClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            scripted: Mutex::new(VecDeque::new()),
            fixed_response: None,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    pub fn with_responses<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(responses.into_iter().map(Into::into));
        self
    }

    /// Every call fails with `message`, as a transport error would.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> anyhow::Result<LlmResponse> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(FakeCall {
                prompt: prompt.to_string(),
                system: system.map(str::to_string),
            });

        if let Some(msg) = &self.failure {
            anyhow::bail!("{}", msg);
        }

        let scripted = self
            .scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let text = scripted
            .or_else(|| self.fixed_response.clone())
            .ok_or_else(|| anyhow::anyhow!("no more fake responses"))?;

        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: self.model.clone(),
            meta: serde_json::json!({}),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
