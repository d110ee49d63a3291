use super::judge_builder::{build_judge, judge_settings};
use crate::cli::args::JudgeRoundArgs;
use crate::exit_codes;
use rps_judge_core::config::resolve_config;
use rps_judge_core::state::GameState;

/// Judges one round against the given state and prints the verdict JSON.
pub async fn run(args: JudgeRoundArgs) -> anyhow::Result<i32> {
    let cfg = resolve_config(args.judge.config.as_deref())?;
    let judge = build_judge(&judge_settings(&args.judge, &cfg))?;

    let state = GameState {
        round_number: args.round,
        player1_bomb_used: args.p1_bomb_used,
        player2_bomb_used: args.p2_bomb_used,
        ..GameState::new()
    };
    tracing::debug!(judge = judge.name(), round = args.round, "judging single round");

    let verdict = judge.evaluate_round(&state, &args.p1, &args.p2).await?;
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(exit_codes::SUCCESS)
}
