//! The playing grid: a gravity-packed array of cells

use std::fmt;

use crate::{HEIGHT, WIDTH};

/// One of the two sides in a game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Single character used when rendering the board as text
    pub fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// Steps (row, column) for the horizontal, vertical and both diagonal lines
pub(crate) const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [Cell; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
    num_moves: usize,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
            heights: [0; WIDTH],
            num_moves: 0,
        }
    }

    /// The cell at `row` (0 is the bottom row) and `column`
    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[column + WIDTH * row]
    }

    /// Bounds-checked cell lookup with signed coordinates, `None` off the board
    pub(crate) fn get_signed(&self, row: i32, column: i32) -> Option<Cell> {
        if row < 0 || row >= HEIGHT as i32 || column < 0 || column >= WIDTH as i32 {
            None
        } else {
            Some(self.get(row as usize, column as usize))
        }
    }

    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    /// The row a token dropped into `column` would land on, if the column has room
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if self.playable(column) {
            Some(self.heights[column])
        } else {
            None
        }
    }

    pub fn playable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| self.playable(column))
    }

    /// Drops a token for `player` into `column`, returning the row it landed on
    pub fn drop_token(&mut self, column: usize, player: Player) -> Option<usize> {
        let row = self.landing_row(column)?;
        self.cells[column + WIDTH * row] = player.into();
        self.heights[column] += 1;
        self.num_moves += 1;
        Some(row)
    }

    /// Checks whether the token at (`row`, `column`) is part of a line of four for `player`
    pub fn is_winning_drop(&self, row: usize, column: usize, player: Player) -> bool {
        let cell = Cell::from(player);
        if self.get(row, column) != cell {
            return false;
        }

        for &(dy, dx) in DIRECTIONS.iter() {
            let mut run = 1;
            for &sign in [-1i32, 1].iter() {
                let mut y = row as i32 + dy * sign;
                let mut x = column as i32 + dx * sign;
                while self.get_signed(y, x) == Some(cell) {
                    run += 1;
                    y += dy * sign;
                    x += dx * sign;
                }
            }
            if run >= 4 {
                return true;
            }
        }
        false
    }

    /// Scans the whole board for any line of four belonging to `player`
    pub fn has_four(&self, player: Player) -> bool {
        (0..HEIGHT).any(|row| {
            (0..WIDTH).any(|column| {
                let cell = Cell::from(player);
                DIRECTIONS.iter().any(|&(dy, dx)| {
                    (0..4).all(|i| {
                        self.get_signed(row as i32 + dy * i, column as i32 + dx * i) == Some(cell)
                    })
                })
            })
        })
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == WIDTH * HEIGHT
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "|-|-|-|-|-|-|-|")?;
        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                let symbol = self.get(row, column).owner().map_or(' ', Player::symbol);
                write!(f, "|{}", symbol)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "|-|-|-|-|-|-|-|")
    }
}
