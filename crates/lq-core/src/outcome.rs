//! Final tally of a finished game and its outcome bucket.

use std::fmt;

/// Coarse end-of-game result used to pick the closing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every question answered correctly.
    Perfect,
    /// Some, but not all, answered correctly.
    Partial,
    /// Nothing answered correctly.
    Zero,
}

/// Score at the end of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalTally {
    /// Correct answers.
    pub score: usize,
    /// Questions played.
    pub total: usize,
}

impl FinalTally {
    /// Bucket the tally. Zero wins over perfect for an (unreachable) empty game.
    pub fn outcome(&self) -> Outcome {
        if self.score == 0 {
            Outcome::Zero
        } else if self.score == self.total {
            Outcome::Perfect
        } else {
            Outcome::Partial
        }
    }

    /// Score as a whole percentage of the total.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.score * 100) / self.total) as u32
    }
}

impl fmt::Display for FinalTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.score, self.total)
    }
}
