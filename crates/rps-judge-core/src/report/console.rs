use crate::config::OpponentKind;
use crate::engine::scoreboard::{MatchOutcome, MatchSummary};
use crate::model::{Move, Player, Verdict};
use std::fmt::Write;

const RULE_WIDTH: usize = 70;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn move_or_none(m: Option<Move>) -> &'static str {
    m.map(|m| m.as_str()).unwrap_or("none")
}

/// Display names for match summaries.
pub fn player_names(opponent: OpponentKind) -> (&'static str, &'static str) {
    match opponent {
        OpponentKind::Bot => ("Bot", "User"),
        OpponentKind::Human => ("Player 1", "Player 2"),
    }
}

pub fn welcome_banner(judge_name: &str, opponent: OpponentKind) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(out, "ROCK-PAPER-SCISSORS PLUS: AI JUDGE");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "\nWelcome! The {} judge will evaluate your moves.", judge_name);
    let _ = writeln!(out, "Valid moves: rock, paper, scissors, bomb");
    let _ = writeln!(out, "(Bomb can be used only once per player)");
    match opponent {
        OpponentKind::Bot => {
            let _ = writeln!(out, "You are Player 2; the bot plays as Player 1.");
        }
        OpponentKind::Human => {
            let _ = writeln!(out, "Two players take turns typing at this terminal.");
        }
    }
    let _ = writeln!(out, "Type 'quit' to leave.");
    out
}

/// Renders the five verdict sections as a human-readable report. The header
/// uses the locally tracked `round_number`, not the judge's echo.
pub fn format_verdict(round_number: u32, verdict: &Verdict) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(out, "ROUND {}", round_number);
    let _ = writeln!(out, "{}", rule());

    let _ = writeln!(out, "\n[INTENT UNDERSTANDING]");
    for player in [Player::Player1, Player::Player2] {
        let intent = verdict.intent_understanding.get(player);
        let _ = writeln!(out, "  {}", player.label());
        let _ = writeln!(out, "    Raw Input: {}", intent.raw_input);
        let _ = writeln!(
            out,
            "    Move Understood: {}",
            move_or_none(intent.move_understood)
        );
        let _ = writeln!(out, "    Reasoning: {}", intent.reasoning);
    }

    let _ = writeln!(out, "\n[VALIDATION]");
    for player in [Player::Player1, Player::Player2] {
        let v = verdict.validation.get(player);
        let _ = writeln!(out, "  {}: {} - {}", player.label(), v.status, v.reason);
    }

    let logic = &verdict.game_logic;
    let _ = writeln!(out, "\n[GAME LOGIC]");
    let _ = writeln!(out, "  Player 1 Move: {}", move_or_none(logic.player1_move));
    let _ = writeln!(out, "  Player 2 Move: {}", move_or_none(logic.player2_move));
    let _ = writeln!(
        out,
        "  Round Winner: {}",
        logic.round_winner.map(|w| w.as_str()).unwrap_or("none")
    );
    let _ = writeln!(out, "  Explanation: {}", logic.round_explanation);

    let update = &verdict.state_update;
    let remaining = update.remaining();
    let _ = writeln!(out, "\n[STATE UPDATE]");
    let _ = writeln!(out, "  Player 1 Bomb Used: {}", update.player1_bomb_used);
    let _ = writeln!(out, "  Player 2 Bomb Used: {}", update.player2_bomb_used);
    let _ = writeln!(
        out,
        "  Bombs Remaining: P1={}, P2={}",
        remaining.player1, remaining.player2
    );

    let result = &verdict.final_result;
    let _ = writeln!(out, "\n[RESULT]");
    let _ = writeln!(out, "  Move Accepted: {}", result.move_accepted);
    let _ = writeln!(out, "  Action: {}", result.action.as_str());
    let _ = writeln!(out, "  Message: {}", result.player_message);
    out
}

pub fn format_match_summary(summary: &MatchSummary, opponent: OpponentKind) -> String {
    let (p1, p2) = player_names(opponent);
    let t = &summary.tally;
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule());
    let _ = writeln!(
        out,
        "FINAL RESULT FOR MATCH {} ({} ROUNDS):",
        summary.match_number,
        t.rounds()
    );
    let _ = writeln!(
        out,
        "  {} wins: {}, {} wins: {}, Draws: {}, Unscored: {}",
        p2, t.player2_wins, p1, t.player1_wins, t.draws, t.unscored
    );
    let result = match summary.outcome {
        MatchOutcome::Player1 => format!("{} wins", p1),
        MatchOutcome::Player2 => format!("{} wins", p2),
        MatchOutcome::Draw => "Draw".to_string(),
    };
    let _ = writeln!(out, "\nFinal result: {}", result);
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "A new match begins; both bombs are available again.");
    out
}
