use super::{judge, play, prompt};
use crate::cli::args::{Cli, Command};
use crate::exit_codes;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        None => play::run(cli.play).await,
        Some(Command::Play(args)) => play::run(args).await,
        Some(Command::Judge(args)) => judge::run(args).await,
        Some(Command::Prompt(args)) => prompt::run(args),
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::SUCCESS)
        }
    }
}
