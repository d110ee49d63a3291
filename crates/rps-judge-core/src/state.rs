use crate::model::{Move, Player, RoundRequest, ValidationStatus, Verdict};
use serde::Serialize;

/// One judged round. Never edited once appended to the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord {
    pub round_number: u32,
    pub player1_input: String,
    pub player2_input: String,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub round_number: u32,
    pub player1_bomb_used: bool,
    pub player2_bomb_used: bool,
    pub history: Vec<RoundRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            round_number: 1,
            player1_bomb_used: false,
            player2_bomb_used: false,
            history: Vec::new(),
        }
    }

    pub fn bomb_used(&self, player: Player) -> bool {
        match player {
            Player::Player1 => self.player1_bomb_used,
            Player::Player2 => self.player2_bomb_used,
        }
    }

    pub fn request(&self, player1_move: &str, player2_move: &str) -> RoundRequest {
        RoundRequest {
            round_number: self.round_number,
            player1_move: player1_move.to_string(),
            player2_move: player2_move.to_string(),
            player1_bomb_used: self.player1_bomb_used,
            player2_bomb_used: self.player2_bomb_used,
        }
    }

    /// Folds a verdict into the state and advances the round.
    ///
    /// A bomb flag moves false -> true only when that player's validated move
    /// is a bomb. The judge's own `state_update` flags are not trusted, and a
    /// flag is never cleared.
    pub fn apply(&mut self, player1_input: &str, player2_input: &str, verdict: Verdict) {
        for player in [Player::Player1, Player::Player2] {
            if accepted_move(&verdict, player) == Some(Move::Bomb) {
                match player {
                    Player::Player1 => self.player1_bomb_used = true,
                    Player::Player2 => self.player2_bomb_used = true,
                }
            }
        }

        self.history.push(RoundRecord {
            round_number: self.round_number,
            player1_input: player1_input.to_string(),
            player2_input: player2_input.to_string(),
            verdict,
        });
        self.round_number += 1;
    }
}

/// The move a verdict accepted for `player`, if its status is VALID.
fn accepted_move(verdict: &Verdict, player: Player) -> Option<Move> {
    if verdict.status(player) != ValidationStatus::Valid {
        return None;
    }
    let played = match player {
        Player::Player1 => verdict.game_logic.player1_move,
        Player::Player2 => verdict.game_logic.player2_move,
    };
    played.or(verdict.intent_understanding.get(player).move_understood)
}
