use crate::model::RoundWinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Player1,
    Player2,
    Draw,
}

/// Running count of round results within one match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchTally {
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub draws: u32,
    /// Rounds with no winner because a move was rejected or unclear.
    pub unscored: u32,
}

impl MatchTally {
    pub fn record(&mut self, winner: Option<RoundWinner>) {
        match winner {
            Some(RoundWinner::Player1) => self.player1_wins += 1,
            Some(RoundWinner::Player2) => self.player2_wins += 1,
            Some(RoundWinner::Draw) => self.draws += 1,
            None => self.unscored += 1,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.player1_wins + self.player2_wins + self.draws + self.unscored
    }

    pub fn outcome(&self) -> MatchOutcome {
        use std::cmp::Ordering;
        match self.player1_wins.cmp(&self.player2_wins) {
            Ordering::Greater => MatchOutcome::Player1,
            Ordering::Less => MatchOutcome::Player2,
            Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub match_number: u32,
    pub tally: MatchTally,
    pub outcome: MatchOutcome,
}
