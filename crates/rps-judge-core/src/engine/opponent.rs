use crate::config::OpponentKind;
use crate::model::Move;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const CLASSIC: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

/// Source of player 1's moves.
pub enum Opponent {
    /// Picks uniformly from the moves still open to it.
    Bot(StdRng),
    /// Player 1 types moves on the same input as player 2.
    Human,
}

impl Opponent {
    pub fn bot(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Opponent::Bot(rng)
    }

    pub fn from_kind(kind: OpponentKind, seed: Option<u64>) -> Self {
        match kind {
            OpponentKind::Bot => Self::bot(seed),
            OpponentKind::Human => Opponent::Human,
        }
    }

    pub fn kind(&self) -> OpponentKind {
        match self {
            Opponent::Bot(_) => OpponentKind::Bot,
            Opponent::Human => OpponentKind::Human,
        }
    }

    /// Next bot move, or `None` when player 1 is human. A spent bomb is
    /// never chosen again.
    pub fn next_move(&mut self, bomb_used: bool) -> Option<Move> {
        match self {
            Opponent::Bot(rng) => {
                let pool: &[Move] = if bomb_used { &CLASSIC } else { &Move::ALL };
                pool.choose(rng).copied()
            }
            Opponent::Human => None,
        }
    }
}
