use super::Judge;
use crate::errors::JudgeError;
use crate::model::Verdict;
use crate::state::GameState;
use async_trait::async_trait;
use std::sync::Arc;

/// Asks `primary` first and retries the round on `fallback` when the primary
/// cannot be reached. Malformed verdicts are passed through untouched.
pub struct FailoverJudge {
    primary: Arc<dyn Judge>,
    fallback: Arc<dyn Judge>,
}

impl FailoverJudge {
    pub fn new(primary: Arc<dyn Judge>, fallback: Arc<dyn Judge>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl Judge for FailoverJudge {
    async fn evaluate_round(
        &self,
        state: &GameState,
        player1_move: &str,
        player2_move: &str,
    ) -> Result<Verdict, JudgeError> {
        match self
            .primary
            .evaluate_round(state, player1_move, player2_move)
            .await
        {
            Err(e) if e.is_unavailable() => {
                tracing::warn!(
                    "{}; using {} judge for round {}",
                    e,
                    self.fallback.name(),
                    state.round_number
                );
                self.fallback
                    .evaluate_round(state, player1_move, player2_move)
                    .await
            }
            other => other,
        }
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}
