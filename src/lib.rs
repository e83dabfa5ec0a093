//! A heuristic agent for playing the board game 'Connect 4'
//!
//! The agent scans the board for open lines of three, scores each column
//! from the threats a drop there creates or concedes, and looks a few
//! moves ahead with a damped, depth-bounded search fanned out over a
//! worker pool. It is not a solver: it plays well, not perfectly.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{search::{Engine, EngineConfig}, state::GameState, board::Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let engine = Engine::new(EngineConfig { depth: 2, ..EngineConfig::default() })?;
//!
//! // player one has three stacked in column 1, player two must block
//! let state = GameState::from_moves(Player::One, "12121")?;
//! assert_eq!(engine.choose_column(&state)?, 0);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod state;

pub mod threat;

pub mod scores;

pub mod scorer;

pub mod search;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The column preferred whenever it ties for the best score
pub const CENTER_COLUMN: usize = WIDTH / 2;

// the threat scans assume at least one full window of four in every direction
const_assert!(WIDTH >= 4 && HEIGHT >= 4);
const_assert!(CENTER_COLUMN == 3);
