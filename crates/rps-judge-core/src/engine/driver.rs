use super::opponent::Opponent;
use super::session::Session;
use crate::config::OpponentKind;
use crate::report::console;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const QUIT_WORDS: &[&str] = &["quit", "exit", "q"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverExit {
    Quit,
    EndOfInput,
    MaxRounds,
}

enum Prompted {
    Move(String),
    Quit,
    EndOfInput,
}

/// Interactive loop: read moves, judge, apply, print.
pub struct Driver<R, W> {
    session: Session,
    opponent: Opponent,
    input: R,
    out: W,
    max_rounds: Option<u32>,
    rounds_played: u32,
}

impl<R, W> Driver<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(session: Session, opponent: Opponent, input: R, out: W) -> Self {
        Self {
            session,
            opponent,
            input,
            out,
            max_rounds: None,
            rounds_played: 0,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self) -> anyhow::Result<DriverExit> {
        let kind = self.opponent.kind();
        write!(
            self.out,
            "{}",
            console::welcome_banner(self.session.judge_name(), kind)
        )?;

        let exit = loop {
            if let Some(max) = self.max_rounds {
                if self.rounds_played >= max {
                    writeln!(self.out, "\nReached the limit of {} rounds.", max)?;
                    break DriverExit::MaxRounds;
                }
            }

            let round = self.session.state().round_number;
            writeln!(self.out, "\n--- Round {} ---", round)?;

            let player1_bomb_used = self.session.state().player1_bomb_used;
            let player1 = match self.opponent.next_move(player1_bomb_used) {
                Some(m) => m.to_string(),
                None => match self.read_move("Player 1 move: ").await? {
                    Prompted::Move(m) => m,
                    Prompted::Quit => break DriverExit::Quit,
                    Prompted::EndOfInput => break DriverExit::EndOfInput,
                },
            };
            let label = match kind {
                OpponentKind::Bot => "Your move: ",
                OpponentKind::Human => "Player 2 move: ",
            };
            let player2 = match self.read_move(label).await? {
                Prompted::Move(m) => m,
                Prompted::Quit => break DriverExit::Quit,
                Prompted::EndOfInput => break DriverExit::EndOfInput,
            };

            match self.session.play_round(&player1, &player2).await {
                Ok(outcome) => {
                    self.rounds_played += 1;
                    write!(
                        self.out,
                        "{}",
                        console::format_verdict(outcome.round_number, &outcome.verdict)
                    )?;
                    if let Some(summary) = &outcome.match_summary {
                        write!(self.out, "{}", console::format_match_summary(summary, kind))?;
                    }
                }
                Err(e) => {
                    tracing::warn!(round, "round not judged: {}", e);
                    writeln!(self.out, "\njudge error: {}", e)?;
                    writeln!(self.out, "Round {} was not counted; please play it again.", round)?;
                }
            }
        };

        writeln!(self.out, "\nThanks for playing!")?;
        self.out.flush()?;
        Ok(exit)
    }

    async fn read_move(&mut self, prompt: &str) -> anyhow::Result<Prompted> {
        loop {
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                return Ok(Prompted::EndOfInput);
            }
            let trimmed = line.trim();
            if QUIT_WORDS
                .iter()
                .any(|w| w.eq_ignore_ascii_case(trimmed))
            {
                return Ok(Prompted::Quit);
            }
            if trimmed.is_empty() {
                writeln!(self.out, "Please provide a move.")?;
                continue;
            }
            return Ok(Prompted::Move(trimmed.to_string()));
        }
    }
}
