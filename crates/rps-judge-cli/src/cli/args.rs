use clap::{Parser, Subcommand, ValueEnum};
use rps_judge_core::config::OpponentKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rps-judge",
    version,
    about = "Rock-Paper-Scissors Plus refereed by an AI judge",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// Options for the default interactive game
    #[command(flatten)]
    pub play: PlayArgs,
}

#[derive(Subcommand)]
pub enum Command {
    /// Play interactively (the default when no subcommand is given)
    Play(PlayArgs),
    /// Judge a single round and print the verdict as JSON
    Judge(JudgeRoundArgs),
    /// Print the system prompt sent to the hosted judge
    Prompt(PromptArgs),
    Version,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct JudgeArgs {
    /// Which judge decides rounds
    /// - auto: gemini when GEMINI_API_KEY is set, otherwise mock
    /// - gemini / openai: hosted model
    /// - mock: deterministic offline rules
    #[arg(long, env = "RPS_JUDGE")]
    pub judge: Option<String>,

    /// Model identifier (provider-specific)
    /// Example: gemini-1.5-flash
    #[arg(long, env = "RPS_JUDGE_MODEL")]
    pub judge_model: Option<String>,

    /// Sampling temperature for hosted judges
    #[arg(long, env = "RPS_JUDGE_TEMPERATURE")]
    pub judge_temperature: Option<f32>,

    /// Max tokens for the judge reply
    #[arg(long, env = "RPS_JUDGE_MAX_TOKENS")]
    pub judge_max_tokens: Option<u32>,

    /// Per-request timeout for hosted judges, in seconds
    #[arg(long, env = "RPS_JUDGE_TIMEOUT_SECS")]
    pub judge_timeout_secs: Option<u64>,

    /// Report hosted judge outages instead of falling back to the mock judge
    #[arg(long)]
    pub no_fallback: bool,

    /// Replace the bundled system prompt
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// YAML config file (default: rps-judge.yaml when present)
    #[arg(long, env = "RPS_JUDGE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpponentArg {
    Bot,
    Human,
}

impl From<OpponentArg> for OpponentKind {
    fn from(arg: OpponentArg) -> Self {
        match arg {
            OpponentArg::Bot => OpponentKind::Bot,
            OpponentArg::Human => OpponentKind::Human,
        }
    }
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct PlayArgs {
    #[command(flatten)]
    pub judge: JudgeArgs,

    /// Who plays as Player 1
    #[arg(long, value_enum)]
    pub opponent: Option<OpponentArg>,

    /// Rounds per match before a fresh game starts (0 = one endless game)
    #[arg(long)]
    pub match_length: Option<u32>,

    /// Stop after this many judged rounds
    #[arg(long)]
    pub max_rounds: Option<u32>,

    /// Seed for the bot's move choice
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct JudgeRoundArgs {
    #[command(flatten)]
    pub judge: JudgeArgs,

    /// Player 1's raw move text
    #[arg(long, allow_hyphen_values = true)]
    pub p1: String,

    /// Player 2's raw move text
    #[arg(long, allow_hyphen_values = true)]
    pub p2: String,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub round: u32,

    #[arg(long)]
    pub p1_bomb_used: bool,

    #[arg(long)]
    pub p2_bomb_used: bool,
}

#[derive(clap::Args, Clone, Debug)]
pub struct PromptArgs {
    #[command(flatten)]
    pub judge: JudgeArgs,
}
