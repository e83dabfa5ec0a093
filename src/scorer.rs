//! Immediate score of a single drop

use log::trace;

use crate::scores::*;
use crate::state::GameState;
use crate::threat::{self, Threat};

/// Scores the drop into `column` that produced `state`
///
/// `state` is the position right after the drop, so the mover is
/// [`GameState::last_player`]. Returns [`WIN_MOVE`] if the drop won,
/// [`FORCED_MOVE`] if it leaves the opponent a winning landing cell, and
/// otherwise a trap score between 0 and [`DOUBLE_TRAP_MOVE`].
pub fn score_column(state: &GameState, column: usize) -> Score {
    let mover = state.last_player();
    if state.winner() == Some(mover) {
        trace!("col={} WIN_MOVE", column);
        return WIN_MOVE;
    }

    let board = state.board();

    // a cell the opponent can fill right now to win: don't play here
    let opponent_threats = threat::evaluate(board, mover.opponent());
    for eval_column in board.playable_columns() {
        if opponent_threats.at_landing(board, eval_column).is_forced() {
            trace!("col={} opponent threat at col={} FORCED_MOVE", column, eval_column);
            return FORCED_MOVE;
        }
    }

    let threats = threat::evaluate(board, mover);
    let mut score = NEUTRAL;
    let mut forced_count = 0;
    for eval_column in board.playable_columns() {
        match threats.at_landing(board, eval_column) {
            Threat::DoubleForced => {
                score = score.max(DOUBLE_TRAP_MOVE);
                trace!("col={} trap at col={} DOUBLE_TRAP_MOVE", column, eval_column);
            }
            Threat::Forced => {
                score = score.max(TRAP_MOVE);
                forced_count += 1;
                trace!("col={} trap at col={} TRAP_MOVE", column, eval_column);
            }
            Threat::None => (),
        }
    }

    // two separate threats cannot both be blocked in one move
    if forced_count > 1 {
        score = DOUBLE_TRAP_MOVE;
        trace!("col={} {} open threats DOUBLE_TRAP_MOVE", column, forced_count);
    }

    score
}
