use super::judge_builder::{effective_prompt, judge_settings};
use crate::cli::args::PromptArgs;
use crate::exit_codes;
use rps_judge_core::config::resolve_config;

pub fn run(args: PromptArgs) -> anyhow::Result<i32> {
    let cfg = resolve_config(args.judge.config.as_deref())?;
    let settings = judge_settings(&args.judge, &cfg);
    print!("{}", effective_prompt(&settings)?);
    Ok(exit_codes::SUCCESS)
}
