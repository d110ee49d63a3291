//! Judges decide a round from the raw move text of both players.
//!
//! - mock.rs: deterministic rules, no I/O
//! - llm/: hosted model behind an `LlmClient`, with prompt and parse boundaries
//! - failover.rs: primary judge with a fallback on transport failure

pub mod failover;
pub mod llm;
pub mod mock;

use crate::errors::JudgeError;
use crate::model::Verdict;
use crate::state::GameState;
use async_trait::async_trait;

pub use failover::FailoverJudge;
pub use llm::LlmJudge;
pub use mock::MockJudge;

#[async_trait]
pub trait Judge: Send + Sync {
    /// Judges one round. Rejected or unclear moves are part of the verdict;
    /// an `Err` means no verdict could be produced at all.
    async fn evaluate_round(
        &self,
        state: &GameState,
        player1_move: &str,
        player2_move: &str,
    ) -> Result<Verdict, JudgeError>;

    fn name(&self) -> &str;
}
