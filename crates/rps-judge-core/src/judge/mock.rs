//! Offline judge implementing the literal rule subset.
//!
//! Moves must be spelled exactly (case-insensitive). A refusal forfeits the
//! move; anything else unrecognized is unclear and carries no penalty. The
//! round is only scored when both moves are valid.

use super::Judge;
use crate::errors::JudgeError;
use crate::model::{
    BombsRemaining, FinalResult, GameLogic, Intent, Move, PerPlayer, Player, RoundAction,
    RoundWinner, StateUpdate, Validation, ValidationStatus, Verdict,
};
use crate::state::GameState;
use async_trait::async_trait;

pub const MOCK_PREFIX: &str = "(MOCK) ";

/// Whole-input refusals.
pub const REFUSAL_TOKENS: &[&str] = &["pass", "skip", "nope", "forfeit", "refuse", "i refuse"];
/// Refusals recognized anywhere in the input.
pub const REFUSAL_PHRASES: &[&str] = &["don't want", "dont want", "do not want", "not play"];

const CANONICAL_LIST: &str = "rock, paper, scissors or bomb";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reading {
    Move(Move),
    Refusal,
    Empty,
    Unrecognized,
}

fn read_input(raw: &str) -> Reading {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return Reading::Empty;
    }
    if REFUSAL_TOKENS.contains(&text.as_str())
        || REFUSAL_PHRASES.iter().any(|p| text.contains(p))
    {
        return Reading::Refusal;
    }
    match Move::parse_exact(&text) {
        Some(m) => Reading::Move(m),
        None => Reading::Unrecognized,
    }
}

struct PlayerCall {
    intent: Intent,
    validation: Validation,
    accepted: Option<Move>,
}

fn call_player(player: Player, raw: &str, bomb_used: bool) -> PlayerCall {
    let label = player.label();
    let reading = read_input(raw);

    let (move_understood, reasoning) = match reading {
        Reading::Move(m) => (Some(m), format!("Exact match for '{}'.", m)),
        Reading::Refusal => (None, "Input is a refusal to play.".to_string()),
        Reading::Empty => (None, "No input was given.".to_string()),
        Reading::Unrecognized => (
            None,
            format!("'{}' is not one of {}.", raw.trim(), CANONICAL_LIST),
        ),
    };

    let (status, reason) = match reading {
        Reading::Move(Move::Bomb) if bomb_used => (
            ValidationStatus::Invalid,
            format!("{} has already used the bomb.", label),
        ),
        Reading::Move(_) => (
            ValidationStatus::Valid,
            "Move recognized and constraints satisfied.".to_string(),
        ),
        Reading::Refusal => (
            ValidationStatus::Invalid,
            format!("{} refused to play; the move is forfeited this round.", label),
        ),
        Reading::Empty => (
            ValidationStatus::Unclear,
            format!("{} gave no move.", label),
        ),
        Reading::Unrecognized => (
            ValidationStatus::Unclear,
            format!("Could not determine {}'s move from the input.", label),
        ),
    };

    let accepted = match status {
        ValidationStatus::Valid => move_understood,
        _ => None,
    };

    PlayerCall {
        intent: Intent {
            raw_input: raw.to_string(),
            move_understood,
            reasoning,
        },
        validation: Validation { status, reason },
        accepted,
    }
}

fn decide(m1: Move, m2: Move) -> (RoundWinner, String) {
    if m1 == m2 {
        let explanation = if m1 == Move::Bomb {
            "Both players used bomb. Draw.".to_string()
        } else {
            format!("Both players played {}. It's a draw.", m1)
        };
        (RoundWinner::Draw, explanation)
    } else if m1.beats(m2) {
        (RoundWinner::Player1, format!("{} beats {}.", m1, m2))
    } else if m2.beats(m1) {
        (RoundWinner::Player2, format!("{} beats {}.", m2, m1))
    } else {
        // Every distinct pair is ordered by `Move::beats`.
        (RoundWinner::Draw, format!("{} and {} tie.", m1, m2))
    }
}

fn excluded_reason(player: Player, status: ValidationStatus) -> Option<String> {
    match status {
        ValidationStatus::Valid => None,
        ValidationStatus::Invalid => Some(format!("{}'s move was rejected", player.label())),
        ValidationStatus::Unclear => Some(format!("{}'s move was unclear", player.label())),
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockJudge;

impl MockJudge {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core of the mock; never fails.
    pub fn judge(&self, state: &GameState, player1_move: &str, player2_move: &str) -> Verdict {
        let p1 = call_player(Player::Player1, player1_move, state.player1_bomb_used);
        let p2 = call_player(Player::Player2, player2_move, state.player2_bomb_used);

        let game_logic = match (p1.accepted, p2.accepted) {
            (Some(m1), Some(m2)) => {
                let (winner, explanation) = decide(m1, m2);
                GameLogic {
                    player1_move: Some(m1),
                    player2_move: Some(m2),
                    round_winner: Some(winner),
                    round_explanation: explanation,
                }
            }
            (m1, m2) => {
                let excluded: Vec<String> = [
                    excluded_reason(Player::Player1, p1.validation.status),
                    excluded_reason(Player::Player2, p2.validation.status),
                ]
                .into_iter()
                .flatten()
                .collect();
                GameLogic {
                    player1_move: m1,
                    player2_move: m2,
                    round_winner: None,
                    round_explanation: format!("Round not scored: {}.", excluded.join(" and ")),
                }
            }
        };

        let player1_bomb_used = state.player1_bomb_used || p1.accepted == Some(Move::Bomb);
        let player2_bomb_used = state.player2_bomb_used || p2.accepted == Some(Move::Bomb);
        let state_update = StateUpdate {
            player1_bomb_used,
            player2_bomb_used,
            bombs_remaining: Some(BombsRemaining {
                player1: u8::from(!player1_bomb_used),
                player2: u8::from(!player2_bomb_used),
            }),
        };

        let statuses = [p1.validation.status, p2.validation.status];
        let action = if statuses.iter().all(|s| *s == ValidationStatus::Valid) {
            RoundAction::Played
        } else if statuses.contains(&ValidationStatus::Invalid) {
            RoundAction::Rejected
        } else {
            RoundAction::UnclearMove
        };

        let player_message = match action {
            RoundAction::Played => {
                let outcome = match game_logic.round_winner {
                    Some(RoundWinner::Player1) => "Player 1 wins the round.",
                    Some(RoundWinner::Player2) => "Player 2 wins the round.",
                    _ => "It's a draw.",
                };
                format!("{}Move accepted. {}", MOCK_PREFIX, outcome)
            }
            _ => {
                let mut parts = Vec::new();
                for (player, call) in [(Player::Player1, &p1), (Player::Player2, &p2)] {
                    match call.validation.status {
                        ValidationStatus::Valid => {}
                        ValidationStatus::Invalid => parts.push(call.validation.reason.clone()),
                        ValidationStatus::Unclear => parts.push(format!(
                            "{} Please restate: {}, choose {}.",
                            call.validation.reason,
                            player.label(),
                            CANONICAL_LIST
                        )),
                    }
                }
                format!("{}{}", MOCK_PREFIX, parts.join(" "))
            }
        };

        Verdict {
            round_number: Some(state.round_number),
            intent_understanding: PerPlayer {
                player1: p1.intent,
                player2: p2.intent,
            },
            validation: PerPlayer {
                player1: p1.validation,
                player2: p2.validation,
            },
            game_logic,
            state_update,
            final_result: FinalResult {
                move_accepted: action == RoundAction::Played,
                action,
                player_message,
            },
        }
    }
}

#[async_trait]
impl Judge for MockJudge {
    async fn evaluate_round(
        &self,
        state: &GameState,
        player1_move: &str,
        player2_move: &str,
    ) -> Result<Verdict, JudgeError> {
        Ok(self.judge(state, player1_move, player2_move))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(round: u32, p1: bool, p2: bool) -> GameState {
        GameState {
            round_number: round,
            player1_bomb_used: p1,
            player2_bomb_used: p2,
            history: Vec::new(),
        }
    }

    #[test]
    fn canonical_moves_resolve_case_insensitively() {
        let judge = MockJudge::new();
        for (raw, expected) in [
            ("rock", Move::Rock),
            ("PAPER", Move::Paper),
            ("Scissors", Move::Scissors),
            (" bOmB ", Move::Bomb),
        ] {
            let v = judge.judge(&GameState::new(), raw, "rock");
            assert_eq!(v.intent_understanding.player1.move_understood, Some(expected));
            assert_eq!(v.status(Player::Player1), ValidationStatus::Valid);
        }
    }

    #[test]
    fn near_misses_are_unclear_not_guessed() {
        let v = MockJudge::new().judge(&GameState::new(), "rok", "boulder");
        assert_eq!(v.intent_understanding.player1.move_understood, None);
        assert_eq!(v.intent_understanding.player2.move_understood, None);
        assert_eq!(v.status(Player::Player1), ValidationStatus::Unclear);
        assert_eq!(v.status(Player::Player2), ValidationStatus::Unclear);
        assert_eq!(v.final_result.action, RoundAction::UnclearMove);
        assert!(v.final_result.player_message.contains("Please restate"));
    }

    #[test]
    fn second_bomb_is_invalid_and_flag_stays_set() {
        let v = MockJudge::new().judge(&state(4, false, true), "rock", "bomb");
        assert_eq!(v.status(Player::Player2), ValidationStatus::Invalid);
        assert_eq!(v.intent_understanding.player2.move_understood, Some(Move::Bomb));
        assert!(v.state_update.player2_bomb_used);
        assert_eq!(v.state_update.remaining().player2, 0);
        assert_eq!(v.game_logic.player2_move, None);
        assert_eq!(v.game_logic.round_winner, None);
        assert_eq!(v.final_result.action, RoundAction::Rejected);
    }

    #[test]
    fn bomb_against_bomb_is_a_draw_and_spends_both() {
        let v = MockJudge::new().judge(&GameState::new(), "bomb", "bomb");
        assert_eq!(v.game_logic.round_winner, Some(RoundWinner::Draw));
        assert!(v.state_update.player1_bomb_used);
        assert!(v.state_update.player2_bomb_used);
        assert_eq!(v.game_logic.round_explanation, "Both players used bomb. Draw.");
    }

    #[test]
    fn bomb_table() {
        let judge = MockJudge::new();
        let cases = [
            ("bomb", "rock", RoundWinner::Player1),
            ("paper", "bomb", RoundWinner::Player2),
            ("bomb", "scissors", RoundWinner::Player2),
            ("scissors", "bomb", RoundWinner::Player1),
            ("rock", "scissors", RoundWinner::Player1),
            ("rock", "paper", RoundWinner::Player2),
        ];
        for (m1, m2, winner) in cases {
            let v = judge.judge(&GameState::new(), m1, m2);
            assert_eq!(v.game_logic.round_winner, Some(winner), "{} vs {}", m1, m2);
        }
    }

    #[test]
    fn losing_bomb_is_still_spent() {
        let v = MockJudge::new().judge(&GameState::new(), "bomb", "scissors");
        assert!(v.state_update.player1_bomb_used);
        assert!(!v.state_update.player2_bomb_used);
    }

    #[test]
    fn empty_input_is_unclear_without_mutation() {
        let before = state(2, false, false);
        let v = MockJudge::new().judge(&before, "   ", "bomb");
        assert_eq!(v.status(Player::Player1), ValidationStatus::Unclear);
        assert!(!v.state_update.player1_bomb_used);
        // A validated bomb is spent even when the round goes unscored.
        assert!(v.state_update.player2_bomb_used);
        assert_eq!(v.game_logic.player2_move, Some(Move::Bomb));
        assert_eq!(v.game_logic.round_winner, None);
    }

    #[test]
    fn refusals_forfeit_without_touching_bombs() {
        let judge = MockJudge::new();
        for raw in ["pass", "SKIP", "I don't want to play", "nope"] {
            let v = judge.judge(&GameState::new(), raw, "paper");
            assert_eq!(v.status(Player::Player1), ValidationStatus::Invalid, "{}", raw);
            assert!(!v.state_update.player1_bomb_used);
            assert!(!v.final_result.move_accepted);
            assert_eq!(v.final_result.action, RoundAction::Rejected);
        }
    }

    #[test]
    fn messages_carry_mock_prefix() {
        let v = MockJudge::new().judge(&GameState::new(), "paper", "rock");
        assert_eq!(
            v.final_result.player_message,
            "(MOCK) Move accepted. Player 1 wins the round."
        );
        assert_eq!(v.round_number, Some(1));
    }
}
