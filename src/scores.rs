//! Column scores and the final move choice

use rand::seq::SliceRandom;
use rand::Rng;

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::{CENTER_COLUMN, WIDTH};

pub type Score = i32;

/// The drop completes a line of four
pub const WIN_MOVE: Score = 1_000_000;
/// The drop leaves the opponent a cell they can win on
pub const FORCED_MOVE: Score = -10_000;
/// The drop sets up a threat the opponent cannot cover
pub const DOUBLE_TRAP_MOVE: Score = 1_000;
/// The drop sets up a single threat
pub const TRAP_MOVE: Score = 100;

/// Marks a column that was not evaluated, either unplayable or not searched
pub const UNEVALUATED: Score = Score::MIN;
/// Score of every column once the lookahead is exhausted
pub const NEUTRAL: Score = 0;

/// Divisor applied to a continuation score at each level of lookahead
pub const DAMPING_FACTOR: f64 = 1.5;

/// One score per column, indexed by column
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Scores([Score; WIDTH]);

impl Scores {
    /// Every column unevaluated
    pub fn unevaluated() -> Self {
        Self([UNEVALUATED; WIDTH])
    }

    /// Every column neutral, the result of a search with no depth left
    pub fn neutral() -> Self {
        Self([NEUTRAL; WIDTH])
    }

    pub fn from_array(scores: [Score; WIDTH]) -> Self {
        Self(scores)
    }

    pub fn as_array(&self) -> &[Score; WIDTH] {
        &self.0
    }

    /// Highest score over all columns, [`UNEVALUATED`] when none were evaluated
    pub fn max(&self) -> Score {
        self.0.iter().copied().max().unwrap_or(UNEVALUATED)
    }

    /// True when at least one column holds a real score
    pub fn evaluated(&self) -> bool {
        self.0.iter().any(|&score| score != UNEVALUATED)
    }

    /// Columns sharing the highest score, in column order
    pub fn best_columns(&self) -> Vec<usize> {
        let max = self.max();
        (0..WIDTH).filter(|&column| self.0[column] == max).collect()
    }

    /// Picks the column to play
    ///
    /// The center column wins any tie it is part of. Otherwise a unique best
    /// column is returned, and remaining ties are broken uniformly at random.
    ///
    /// # Notes
    /// The vector must hold at least one evaluated column. On an all
    /// [`UNEVALUATED`] vector every column ties and the result is meaningless.
    pub fn best_column<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let best = self.best_columns();
        if best.contains(&CENTER_COLUMN) {
            return CENTER_COLUMN;
        }
        match best.as_slice() {
            [column] => *column,
            ties => *ties.choose(rng).unwrap_or(&CENTER_COLUMN),
        }
    }
}

impl Default for Scores {
    fn default() -> Self {
        Self::unevaluated()
    }
}

impl Index<usize> for Scores {
    type Output = Score;

    fn index(&self, column: usize) -> &Self::Output {
        &self.0[column]
    }
}

impl IndexMut<usize> for Scores {
    fn index_mut(&mut self, column: usize) -> &mut Self::Output {
        &mut self.0[column]
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for score in self.0.iter() {
            match *score {
                UNEVALUATED => write!(f, "|-")?,
                score => write!(f, "|{}", score)?,
            }
        }
        write!(f, "|")
    }
}
