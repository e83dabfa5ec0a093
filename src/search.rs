//! Depth-bounded lookahead over all columns
//!
//! # Scoring
//! Each playable column first gets an immediate score from
//! [`score_column`]. Wins, double traps and forced losses are kept as they
//! are. Any other column is scored by searching the position one level
//! deeper and taking the best continuation, negated when the continuation is
//! the opponent's reply, then divided by [`DAMPING_FACTOR`] so that
//! outcomes further away count for less.

use anyhow::{anyhow, Result};
use log::{debug, log_enabled, trace, Level};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use std::time::Instant;

use crate::board::Player;
use crate::scorer::score_column;
use crate::scores::*;
use crate::state::GameState;
use crate::WIDTH;

/// Sequential search of every column of `state` on behalf of `player`
///
/// A `depth` of zero returns [`Scores::neutral`]. Unplayable columns stay
/// [`UNEVALUATED`].
pub fn search(state: &GameState, player: Player, depth: u32) -> Scores {
    if depth == 0 {
        return Scores::neutral();
    }

    let mut scores = Scores::unevaluated();
    for column in 0..WIDTH {
        if let Some(score) = column_score(state, column, player, depth) {
            scores[column] = score;
        }
    }

    if log_enabled!(Level::Trace) {
        trace!("depth={} scores={}", depth, scores);
    }
    scores
}

/// Score of dropping into `column`, `None` when the column is full
///
/// `depth` counts this drop and must be at least one.
pub(crate) fn column_score(
    state: &GameState,
    column: usize,
    player: Player,
    depth: u32,
) -> Option<Score> {
    debug_assert!(depth > 0);
    if !state.playable(column) {
        return None;
    }

    let mut next = *state;
    next.play(column);

    let immediate = score_column(&next, column);
    if is_decisive(immediate) {
        trace!("depth={} col={} score={}", depth, column, immediate);
        return Some(immediate);
    }

    let score = continuation_score(&next, player, depth - 1);
    trace!("depth={} col={} score={}", depth, column, score);
    Some(score)
}

/// Immediate scores that end the lookahead for a column
pub fn is_decisive(score: Score) -> bool {
    score == WIN_MOVE || score == DOUBLE_TRAP_MOVE || score == FORCED_MOVE
}

/// True when the best continuation of `next` belongs to `player`'s opponent
///
/// The continuation search scores the replies of whoever is to move in
/// `next`. If `player` made the last drop those replies are the opponent's,
/// and their best score is the worst case for `player`.
pub fn continuation_is_opponents(next: &GameState, player: Player) -> bool {
    next.last_player() == player
}

/// Damped best continuation of `next`, seen from `player`'s side
fn continuation_score(next: &GameState, player: Player, depth: u32) -> Score {
    let continuation = search(next, player, depth);

    // nothing left to play: the drop filled the board without a win
    let mut best = match continuation.max() {
        UNEVALUATED => NEUTRAL,
        best => best,
    };
    if continuation_is_opponents(next, player) {
        best = -best;
    }
    damp(best)
}

/// Discounts a continuation score by one level, truncating towards zero
pub fn damp(score: Score) -> Score {
    (score as f64 / DAMPING_FACTOR) as Score
}

/// Tunables for an [`Engine`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    /// Levels of lookahead, counting the engine's own drop
    pub depth: u32,
    /// Worker threads used for the top-level fan-out over columns
    pub workers: usize,
    /// Seed for tie breaks, `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub const DEFAULT_DEPTH: u32 = 4;

    /// One worker per hardware thread, leaving one for the caller
    pub fn default_workers() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .saturating_sub(1)
            .max(1)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: Self::DEFAULT_DEPTH,
            workers: Self::default_workers(),
            seed: None,
        }
    }
}

/// Chooses moves by searching every column in parallel
///
/// Only the top level is spread over the worker pool, one task per column;
/// the search below each column runs on the worker that picked it up.
pub struct Engine {
    config: EngineConfig,
    pool: rayon::ThreadPool,
    rng: Option<Mutex<StdRng>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers.max(1))
            .thread_name(|i| format!("connect4-search-{}", i))
            .build()?;
        let rng = config.seed.map(|seed| Mutex::new(StdRng::seed_from_u64(seed)));

        Ok(Self { config, pool, rng })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scores every column of `state` for the player to move
    ///
    /// Fails if the search of any column panicked.
    pub fn scores(&self, state: &GameState) -> Result<Scores> {
        self.scores_at_depth(state, self.config.depth)
    }

    /// Like [`Engine::scores`] with an explicit depth
    pub fn scores_at_depth(&self, state: &GameState, depth: u32) -> Result<Scores> {
        if depth == 0 {
            return Ok(Scores::neutral());
        }
        let player = state.turn();

        // each task owns the result for its column, collected back in column order
        let results: Vec<Option<Score>> = self.pool.install(|| {
            (0..WIDTH)
                .into_par_iter()
                .map(|column| {
                    panic::catch_unwind(AssertUnwindSafe(|| {
                        column_score(state, column, player, depth)
                    }))
                    .map_err(|_| anyhow!("search of column {} panicked", column + 1))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut scores = Scores::unevaluated();
        for (column, score) in results.into_iter().enumerate() {
            if let Some(score) = score {
                scores[column] = score;
            }
        }
        Ok(scores)
    }

    /// Picks the column to play for the player to move
    ///
    /// # Notes
    /// The game must still be in progress with at least one playable column,
    /// an error is returned otherwise.
    pub fn choose_column(&self, state: &GameState) -> Result<usize> {
        match &self.rng {
            Some(rng) => {
                let mut rng = rng
                    .lock()
                    .map_err(|_| anyhow!("tie break generator poisoned"))?;
                self.choose_column_with_rng(state, &mut *rng)
            }
            None => self.choose_column_with_rng(state, &mut rand::thread_rng()),
        }
    }

    /// Like [`Engine::choose_column`] with a caller supplied tie break source
    pub fn choose_column_with_rng<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        rng: &mut R,
    ) -> Result<usize> {
        if state.is_done() {
            return Err(anyhow!("cannot choose a move, the game is already over"));
        }
        if state.board().playable_columns().next().is_none() {
            return Err(anyhow!("cannot choose a move, no column is playable"));
        }

        let start = Instant::now();
        let scores = self.scores(state)?;
        let column = scores.best_column(rng);
        debug!(
            "{} scores={} col={} in {:.1}ms",
            state.turn(),
            scores,
            column + 1,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(column)
    }
}
