//! Wire and domain types shared by every judge.
//!
//! Field names match the JSON exchanged with the hosted judge, so a [`Verdict`]
//! produced by the mock and one parsed from a model reply are interchangeable.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Bomb,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Rock, Move::Paper, Move::Scissors, Move::Bomb];

    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
            Move::Bomb => "bomb",
        }
    }

    /// Exact, case-insensitive match against the canonical move names.
    pub fn parse_exact(raw: &str) -> Option<Move> {
        let needle = raw.trim();
        Move::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(needle))
    }

    /// Whether `self` defeats `other`. Scissors cut the bomb's fuse.
    pub fn beats(&self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Scissors, Move::Paper)
                | (Move::Paper, Move::Rock)
                | (Move::Bomb, Move::Rock)
                | (Move::Bomb, Move::Paper)
                | (Move::Scissors, Move::Bomb)
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    pub fn label(&self) -> &'static str {
        match self {
            Player::Player1 => "Player 1",
            Player::Player2 => "Player 2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Valid,
    Invalid,
    Unclear,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "VALID",
            ValidationStatus::Invalid => "INVALID",
            ValidationStatus::Unclear => "UNCLEAR",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundWinner {
    Player1,
    Player2,
    Draw,
}

impl RoundWinner {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundWinner::Player1 => "player1",
            RoundWinner::Player2 => "player2",
            RoundWinner::Draw => "draw",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundAction {
    Played,
    Rejected,
    UnclearMove,
}

impl RoundAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundAction::Played => "PLAYED",
            RoundAction::Rejected => "REJECTED",
            RoundAction::UnclearMove => "UNCLEAR_MOVE",
        }
    }
}

/// Request payload sent to the hosted judge for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRequest {
    pub round_number: u32,
    pub player1_move: String,
    pub player2_move: String,
    pub player1_bomb_used: bool,
    pub player2_bomb_used: bool,
}

/// Pair of per-player values, serialized as `{ "player1": .., "player2": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerPlayer<T> {
    pub player1: T,
    pub player2: T,
}

impl<T> PerPlayer<T> {
    pub fn get(&self, player: Player) -> &T {
        match player {
            Player::Player1 => &self.player1,
            Player::Player2 => &self.player2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub raw_input: String,
    #[serde(default)]
    pub move_understood: Option<Move>,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub status: ValidationStatus,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogic {
    #[serde(default)]
    pub player1_move: Option<Move>,
    #[serde(default)]
    pub player2_move: Option<Move>,
    #[serde(default)]
    pub round_winner: Option<RoundWinner>,
    #[serde(default)]
    pub round_explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub player1_bomb_used: bool,
    pub player2_bomb_used: bool,
    #[serde(default)]
    pub bombs_remaining: Option<BombsRemaining>,
}

impl StateUpdate {
    pub fn bomb_used(&self, player: Player) -> bool {
        match player {
            Player::Player1 => self.player1_bomb_used,
            Player::Player2 => self.player2_bomb_used,
        }
    }

    /// Remaining bombs as reported, or derived from the flags when absent.
    pub fn remaining(&self) -> BombsRemaining {
        self.bombs_remaining.clone().unwrap_or(BombsRemaining {
            player1: u8::from(!self.player1_bomb_used),
            player2: u8::from(!self.player2_bomb_used),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BombsRemaining {
    #[serde(deserialize_with = "lenient_count")]
    pub player1: u8,
    #[serde(deserialize_with = "lenient_count")]
    pub player2: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    pub move_accepted: bool,
    pub action: RoundAction,
    #[serde(default)]
    pub player_message: String,
}

/// The five-section result of judging one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(default)]
    pub round_number: Option<u32>,
    pub intent_understanding: PerPlayer<Intent>,
    pub validation: PerPlayer<Validation>,
    pub game_logic: GameLogic,
    pub state_update: StateUpdate,
    pub final_result: FinalResult,
}

impl Verdict {
    pub const SECTIONS: [&'static str; 5] = [
        "intent_understanding",
        "validation",
        "game_logic",
        "state_update",
        "final_result",
    ];

    pub fn status(&self, player: Player) -> ValidationStatus {
        self.validation.get(player).status
    }
}

// Hosted models sometimes quote small integers ("0"/"1").
fn lenient_count<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Num(u8),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Num(n) => Ok(n),
        Count::Text(s) => s
            .trim()
            .parse::<u8>()
            .map_err(|_| serde::de::Error::custom(format!("invalid bomb count '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exact_ignores_case_and_padding() {
        assert_eq!(Move::parse_exact("ROCK"), Some(Move::Rock));
        assert_eq!(Move::parse_exact("  Scissors \n"), Some(Move::Scissors));
        assert_eq!(Move::parse_exact("rok"), None);
        assert_eq!(Move::parse_exact("rock paper"), None);
        assert_eq!(Move::parse_exact(""), None);
    }

    #[test]
    fn dominance_table() {
        assert!(Move::Rock.beats(Move::Scissors));
        assert!(Move::Scissors.beats(Move::Paper));
        assert!(Move::Paper.beats(Move::Rock));
        assert!(Move::Bomb.beats(Move::Rock));
        assert!(Move::Bomb.beats(Move::Paper));
        assert!(Move::Scissors.beats(Move::Bomb));
        assert!(!Move::Bomb.beats(Move::Scissors));
        for m in Move::ALL {
            assert!(!m.beats(m), "{} must not beat itself", m);
        }
    }

    #[test]
    fn bombs_remaining_accepts_quoted_numbers() {
        let v: BombsRemaining =
            serde_json::from_str(r#"{"player1": "0", "player2": 1}"#).unwrap();
        assert_eq!(v.player1, 0);
        assert_eq!(v.player2, 1);

        let err = serde_json::from_str::<BombsRemaining>(r#"{"player1": "many", "player2": 1}"#);
        assert!(err.is_err());
    }

    #[test]
    fn status_literals_are_uppercase() {
        assert_eq!(
            serde_json::to_string(&ValidationStatus::Unclear).unwrap(),
            "\"UNCLEAR\""
        );
        assert_eq!(
            serde_json::to_string(&RoundAction::UnclearMove).unwrap(),
            "\"UNCLEAR_MOVE\""
        );
    }
}
