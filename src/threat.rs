//! Threat detection: which empty cells would complete a line of four
//!
//! A cell is [`Threat::Forced`] for an owner when a token of theirs there
//! completes four in a row, so the opponent is forced to occupy it first.
//! When two forced cells sit directly on top of each other the lower one is
//! upgraded to [`Threat::DoubleForced`]: whoever fills it hands the owner
//! the cell above, so the column can no longer be defended.

use crate::board::{Board, Cell, Player};
use crate::{HEIGHT, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Threat {
    None,
    Forced,
    DoubleForced,
}

impl Threat {
    /// True for both forced markers
    pub fn is_forced(self) -> bool {
        match self {
            Threat::Forced | Threat::DoubleForced => true,
            Threat::None => false,
        }
    }
}

/// Threat markers laid over a board, evaluated for a single owner
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ThreatBoard {
    owner: Player,
    threats: [Threat; WIDTH * HEIGHT], // same layout as the board cells
}

impl ThreatBoard {
    fn new(owner: Player) -> Self {
        Self {
            owner,
            threats: [Threat::None; WIDTH * HEIGHT],
        }
    }

    pub fn owner(&self) -> Player {
        self.owner
    }

    pub fn get(&self, row: usize, column: usize) -> Threat {
        self.threats[column + WIDTH * row]
    }

    /// The threat on the cell the next token in `column` would land on
    pub fn at_landing(&self, board: &Board, column: usize) -> Threat {
        match board.landing_row(column) {
            Some(row) => self.get(row, column),
            None => Threat::None,
        }
    }

    /// Marks a cell forced unless an earlier scan already marked it
    fn mark(&mut self, (row, column): (usize, usize)) {
        let threat = &mut self.threats[column + WIDTH * row];
        if *threat == Threat::None {
            *threat = Threat::Forced;
        }
    }

    pub fn count(&self, threat: Threat) -> usize {
        self.threats.iter().filter(|&&t| t == threat).count()
    }
}

/// How a single cell of a window relates to the evaluated owner
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Slot {
    Own,
    Empty,
    Other,
}

fn slot(board: &Board, owner: Cell, (row, column): (usize, usize)) -> Slot {
    match board.get(row, column) {
        Cell::Empty => Slot::Empty,
        cell if cell == owner => Slot::Own,
        _ => Slot::Other,
    }
}

/// Computes the threat markers of `owner` on `board`
///
/// Scans run horizontal, vertical, then both diagonals, and the first scan
/// to mark a cell wins. Double-forced upgrades are applied last.
pub fn evaluate(board: &Board, owner: Player) -> ThreatBoard {
    let mut threats = ThreatBoard::new(owner);

    horizontal(board, &mut threats);
    vertical(board, &mut threats);
    diagonal_down(board, &mut threats);
    diagonal_up(board, &mut threats);
    double_forced(&mut threats);

    threats
}

/// Marks the single gap of a four-cell line holding three of the owner's tokens
fn scan_window(board: &Board, window: [(usize, usize); 4], threats: &mut ThreatBoard) {
    use self::Slot::*;

    let owner = Cell::from(threats.owner);
    let slots = [
        slot(board, owner, window[0]),
        slot(board, owner, window[1]),
        slot(board, owner, window[2]),
        slot(board, owner, window[3]),
    ];
    let gap = match slots {
        [Own, Own, Own, Empty] => 3,
        [Own, Own, Empty, Own] => 2,
        [Own, Empty, Own, Own] => 1,
        [Empty, Own, Own, Own] => 0,
        _ => return,
    };
    threats.mark(window[gap]);
}

fn horizontal(board: &Board, threats: &mut ThreatBoard) {
    for row in 0..HEIGHT {
        for column in 0..=WIDTH - 4 {
            let window = [
                (row, column),
                (row, column + 1),
                (row, column + 2),
                (row, column + 3),
            ];
            scan_window(board, window, threats);
        }
    }
}

// a stack can only be finished from above, so three under a gap is the only shape
fn vertical(board: &Board, threats: &mut ThreatBoard) {
    let owner = Cell::from(threats.owner);
    for column in 0..WIDTH {
        for row in 3..HEIGHT {
            if board.get(row, column).is_empty()
                && (1..=3).all(|below| board.get(row - below, column) == owner)
            {
                threats.mark((row, column));
            }
        }
    }
}

// top-left to bottom-right
fn diagonal_down(board: &Board, threats: &mut ThreatBoard) {
    for row in 3..HEIGHT {
        for column in 0..=WIDTH - 4 {
            let window = [
                (row, column),
                (row - 1, column + 1),
                (row - 2, column + 2),
                (row - 3, column + 3),
            ];
            scan_window(board, window, threats);
        }
    }
}

// bottom-left to top-right
fn diagonal_up(board: &Board, threats: &mut ThreatBoard) {
    for row in 0..=HEIGHT - 4 {
        for column in 0..=WIDTH - 4 {
            let window = [
                (row, column),
                (row + 1, column + 1),
                (row + 2, column + 2),
                (row + 3, column + 3),
            ];
            scan_window(board, window, threats);
        }
    }
}

/// Upgrades the lower of two vertically adjacent forced cells
///
/// Rows are walked top down, so in a run of three forced cells only the
/// middle one is upgraded.
fn double_forced(threats: &mut ThreatBoard) {
    for column in 0..WIDTH {
        for row in (1..HEIGHT).rev() {
            if threats.get(row, column) == Threat::Forced
                && threats.get(row - 1, column) == Threat::Forced
            {
                threats.threats[column + WIDTH * (row - 1)] = Threat::DoubleForced;
            }
        }
    }
}
