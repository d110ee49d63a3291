use super::judge_builder::{build_judge, judge_settings};
use crate::cli::args::PlayArgs;
use crate::exit_codes;
use rps_judge_core::config::{resolve_config, GameConfig, GameSettings};
use rps_judge_core::engine::{Driver, Opponent, Session};

pub async fn run(args: PlayArgs) -> anyhow::Result<i32> {
    let cfg = resolve_config(args.judge.config.as_deref())?;
    let judge = build_judge(&judge_settings(&args.judge, &cfg))?;
    let game = game_settings(&args, &cfg);

    tracing::info!(
        judge = judge.name(),
        opponent = ?game.opponent,
        match_length = game.match_length,
        "starting session"
    );

    let session = Session::new(judge, game.match_length);
    let opponent = Opponent::from_kind(game.opponent, game.seed);
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut driver = Driver::new(session, opponent, input, std::io::stdout())
        .with_max_rounds(game.max_rounds);

    let exit = driver.run().await?;
    tracing::info!(?exit, rounds = driver.rounds_played(), "session ended");
    Ok(exit_codes::SUCCESS)
}

fn game_settings(args: &PlayArgs, cfg: &GameConfig) -> GameSettings {
    let mut g = cfg.game.clone();
    if let Some(o) = args.opponent {
        g.opponent = o.into();
    }
    if let Some(n) = args.match_length {
        g.match_length = n;
    }
    if args.max_rounds.is_some() {
        g.max_rounds = args.max_rounds;
    }
    if args.seed.is_some() {
        g.seed = args.seed;
    }
    g
}
