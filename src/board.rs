use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::types::Position;

pub const BOARD_SIZE: usize = 4;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Side to move. Black is the AI and the maximizing player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn is_maximizing(self) -> bool {
        self == Self::Black
    }

    /// Wire code used in serialized state: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Self::Black,
            Player::White => Self::White,
        }
    }
}

/// 4x4 board state represented by two bitboards.
///
/// Bit `row * 4 + col` is set in exactly one mask for an occupied cell.
/// The type is `Copy`; every update returns a new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u16,
    white: u16,
}

impl Board {
    /// Creates the opening position:
    /// (1,1)=white, (1,2)=black, (2,1)=black, (2,2)=white.
    pub fn new() -> Self {
        Self {
            black: bit(6) | bit(9),
            white: bit(5) | bit(10),
        }
    }

    pub fn empty() -> Self {
        Self { black: 0, white: 0 }
    }

    /// A cell set in both masks is black.
    pub fn from_bitboards(black: u16, white: u16) -> Self {
        Self {
            black,
            white: white & !black,
        }
    }

    pub fn get(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Returns a copy with one cell replaced.
    pub fn with_cell(&self, pos: Position, cell: Cell) -> Self {
        let square = bit(pos.index());
        let (mut black, mut white) = (self.black & !square, self.white & !square);
        match cell {
            Cell::Black => black |= square,
            Cell::White => white |= square,
            Cell::Empty => {}
        }
        Self { black, white }
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Converts board to `[u8; 16]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut cells = [0u8; NUM_SQUARES];
        for (idx, cell) in cells.iter_mut().enumerate() {
            *cell = match self.get(Position::from_index(idx)) {
                Cell::Empty => 0,
                Cell::Black => 1,
                Cell::White => 2,
            };
        }
        cells
    }

    /// Same position with every stone's colour swapped.
    pub fn inverted(&self) -> Self {
        Self {
            black: self.white,
            white: self.black,
        }
    }

    /// `(own, opponent)` masks from `player`'s point of view.
    pub(crate) fn sides(&self, player: Player) -> (u16, u16) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    pub(crate) fn from_sides(player: Player, own: u16, opp: u16) -> Self {
        match player {
            Player::Black => Self::from_bitboards(own, opp),
            Player::White => Self::from_bitboards(opp, own),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..BOARD_SIZE {
                let symbol = match self.get(Position::new(row as u8, col as u8)) {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parses four whitespace-separated rows of `B`, `W` or `.`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split_whitespace().collect();
        if rows.len() != BOARD_SIZE {
            return Err(GameError::ParseBoard(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != BOARD_SIZE {
                return Err(GameError::ParseBoard(format!(
                    "row {row} must have {BOARD_SIZE} cells: {line:?}"
                )));
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = match symbol {
                    'B' | 'b' => Cell::Black,
                    'W' | 'w' => Cell::White,
                    '.' => Cell::Empty,
                    other => {
                        return Err(GameError::ParseBoard(format!(
                            "unexpected cell {other:?} at ({row}, {col})"
                        )));
                    }
                };
                board = board.with_cell(Position::new(row as u8, col as u8), cell);
            }
        }
        Ok(board)
    }
}

pub(crate) fn bit(idx: usize) -> u16 {
    debug_assert!(idx < NUM_SQUARES, "square index {idx} off the board");
    1u16 << idx
}
