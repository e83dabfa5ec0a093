//! Turn and result bookkeeping around a [`Board`]

use anyhow::{anyhow, Result};

use std::fmt;

use crate::board::{Board, Player};
use crate::WIDTH;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Playing,
    Win(Player),
    Draw,
}

/// A game in progress
///
/// `done` is set once a drop completes a line of four (recording the
/// winner) or fills the board. The turn passes to the opponent after
/// every drop, so [`GameState::last_player`] always names whoever moved last.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GameState {
    board: Board,
    turn: Player,
    winner: Option<Player>,
    done: bool,
}

impl GameState {
    pub fn new(first: Player) -> Self {
        Self {
            board: Board::new(),
            turn: first,
            winner: None,
            done: false,
        }
    }

    /// Builds a state by replaying 1-indexed column digits, starting with `first`
    pub fn from_moves<S: AsRef<str>>(first: Player, moves: S) -> Result<Self> {
        let mut state = Self::new(first);

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    state.play_checked(column)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player due to drop next
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// The player who made the most recent drop
    pub fn last_player(&self) -> Player {
        self.turn.opponent()
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn playable(&self, column: usize) -> bool {
        self.board.playable(column)
    }

    pub fn outcome(&self) -> Outcome {
        match (self.done, self.winner) {
            (_, Some(player)) => Outcome::Win(player),
            (true, None) => Outcome::Draw,
            (false, None) => Outcome::Playing,
        }
    }

    /// Drops a token for the current player without validation
    ///
    /// Callers must make sure `column` is playable; a full column is ignored.
    pub fn play(&mut self, column: usize) {
        debug_assert!(self.playable(column), "column {} is not playable", column);
        if let Some(row) = self.board.drop_token(column, self.turn) {
            if self.board.is_winning_drop(row, column, self.turn) {
                self.winner = Some(self.turn);
                self.done = true;
            } else if self.board.is_full() {
                self.done = true;
            }
            self.turn = self.turn.opponent();
        }
    }

    /// Validated move for user input, `column_one_indexed` counts from 1
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<Outcome> {
        if self.done {
            return Err(anyhow!("Invalid move, the game is already over"));
        }
        if column_one_indexed < 1 || column_one_indexed > WIDTH {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                WIDTH
            ));
        }
        let column = column_one_indexed - 1;
        if !self.playable(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }

        self.play(column);
        Ok(self.outcome())
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "TURN: {}", self.turn)
    }
}
