//! Hosted-model judge.
//!
//! - prompt.rs: system prompt and round message builders only
//! - client.rs: model call and response parse boundary

pub(crate) mod client;
pub mod prompt;

use super::Judge;
use crate::errors::JudgeError;
use crate::model::Verdict;
use crate::providers::llm::LlmClient;
use crate::state::GameState;
use async_trait::async_trait;
use std::sync::Arc;

pub struct LlmJudge {
    name: String,
    client: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl LlmJudge {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self::with_system_prompt(client, prompt::SYSTEM_PROMPT.to_string())
    }

    pub fn with_system_prompt(client: Arc<dyn LlmClient>, system_prompt: String) -> Self {
        Self {
            name: client.provider_name().to_string(),
            client,
            system_prompt,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

#[async_trait]
impl Judge for LlmJudge {
    async fn evaluate_round(
        &self,
        state: &GameState,
        player1_move: &str,
        player2_move: &str,
    ) -> Result<Verdict, JudgeError> {
        let request = state.request(player1_move, player2_move);
        let prompt = prompt::build_round_prompt(&request)
            .map_err(|e| JudgeError::unavailable(&self.name, e))?;
        tracing::debug!(judge = %self.name, round = request.round_number, "evaluating round");

        let mut verdict =
            client::call_judge(&self.name, self.client.as_ref(), &self.system_prompt, &prompt)
                .await?;
        if verdict.round_number.is_none() {
            verdict.round_number = Some(state.round_number);
        }
        Ok(verdict)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::MockJudge;
    use crate::model::{Player, ValidationStatus};
    use crate::providers::llm::fake::FakeClient;

    fn canned(state: &GameState, p1: &str, p2: &str) -> String {
        let mut val =
            serde_json::to_value(MockJudge::new().judge(state, p1, p2)).unwrap();
        val.as_object_mut().unwrap().remove("round_number");
        val.to_string()
    }

    #[tokio::test]
    async fn sends_state_snapshot_and_system_prompt() {
        let state = GameState {
            round_number: 3,
            player1_bomb_used: true,
            ..GameState::new()
        };
        let fake = Arc::new(FakeClient::new("gemini-test").with_response(canned(
            &state, "bomb", "scissors",
        )));
        let judge = LlmJudge::with_system_prompt(fake.clone(), "be fair".to_string());

        let verdict = judge
            .evaluate_round(&state, "bomb", "scissors")
            .await
            .unwrap();
        assert_eq!(verdict.status(Player::Player1), ValidationStatus::Invalid);
        assert_eq!(verdict.round_number, Some(3));

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system.as_deref(), Some("be fair"));
        assert!(calls[0].prompt.contains("\"player1_bomb_used\": true"));
        assert!(calls[0].prompt.contains("\"player2_move\": \"scissors\""));
    }

    #[tokio::test]
    async fn provider_failure_is_unavailable() {
        let fake = Arc::new(FakeClient::new("m").failing("503 upstream"));
        let judge = LlmJudge::new(fake);
        let err = judge
            .evaluate_round(&GameState::new(), "rock", "rock")
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("503 upstream"));
    }

    #[tokio::test]
    async fn garbage_reply_is_malformed() {
        let fake = Arc::new(FakeClient::new("m").with_response("I think rock wins."));
        let judge = LlmJudge::new(fake);
        let err = judge
            .evaluate_round(&GameState::new(), "rock", "rock")
            .await
            .unwrap_err();
        assert!(matches!(err, JudgeError::MalformedVerdict { .. }));
    }
}
