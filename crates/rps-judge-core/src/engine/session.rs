use super::scoreboard::{MatchSummary, MatchTally};
use crate::errors::JudgeError;
use crate::judge::Judge;
use crate::model::Verdict;
use crate::state::GameState;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub round_number: u32,
    pub verdict: Verdict,
    /// Set on the round that completes a match.
    pub match_summary: Option<MatchSummary>,
}

/// Owns the game state between rounds and applies each verdict to it.
pub struct Session {
    judge: Arc<dyn Judge>,
    state: GameState,
    match_length: u32,
    tally: MatchTally,
    matches_completed: u32,
}

impl Session {
    /// `match_length` of 0 keeps a single state for the whole session.
    pub fn new(judge: Arc<dyn Judge>, match_length: u32) -> Self {
        Self {
            judge,
            state: GameState::new(),
            match_length,
            tally: MatchTally::default(),
            matches_completed: 0,
        }
    }

    pub fn with_state(mut self, state: GameState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tally(&self) -> MatchTally {
        self.tally
    }

    pub fn judge_name(&self) -> &str {
        self.judge.name()
    }

    /// Judges one round. On error the state is left exactly as it was.
    pub async fn play_round(
        &mut self,
        player1_move: &str,
        player2_move: &str,
    ) -> Result<RoundOutcome, JudgeError> {
        let round_number = self.state.round_number;
        let verdict = self
            .judge
            .evaluate_round(&self.state, player1_move, player2_move)
            .await?;

        self.state
            .apply(player1_move, player2_move, verdict.clone());
        self.tally.record(verdict.game_logic.round_winner);

        let match_summary = if self.match_length > 0 && self.tally.rounds() >= self.match_length {
            self.matches_completed += 1;
            let summary = MatchSummary {
                match_number: self.matches_completed,
                tally: self.tally,
                outcome: self.tally.outcome(),
            };
            tracing::info!(
                match_number = summary.match_number,
                "match complete; starting a fresh game"
            );
            self.tally = MatchTally::default();
            self.state = GameState::new();
            Some(summary)
        } else {
            None
        };

        Ok(RoundOutcome {
            round_number,
            verdict,
            match_summary,
        })
    }
}
