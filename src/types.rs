use serde::Serialize;

use crate::board::BOARD_SIZE;
use crate::error::GameError;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Caller contract: `row` and `col` are below `BOARD_SIZE`.
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(
            (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE,
            "position outside the 4x4 board"
        );
        Self { row, col }
    }

    /// Bounds-checks raw input coordinates, e.g. a pointer mapped onto the grid.
    pub fn checked(row: i32, col: i32) -> Result<Self, GameError> {
        let size = BOARD_SIZE as i32;
        if !(0..size).contains(&row) || !(0..size).contains(&col) {
            return Err(GameError::OutOfBounds { row, col });
        }
        Ok(Self::new(row as u8, col as u8))
    }

    /// Row-major cell index (0..=15).
    ///
    /// Panics for a cell outside the board, so every board lookup fails
    /// the same way instead of aliasing another cell.
    pub fn index(self) -> usize {
        assert!(
            (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE,
            "position outside the 4x4 board: ({}, {})",
            self.row,
            self.col
        );
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        Self::new((idx / BOARD_SIZE) as u8, (idx % BOARD_SIZE) as u8)
    }
}

/// Public game state handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub message: String,
    pub is_game_over: bool,
    /// `true` while the AI still owes a move.
    pub ai_pending: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    pub last_move: Option<Position>,
    /// Contract:
    /// - Normal move: list of flipped cell indices (0..=15).
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 1=black (AI), 2=white (human), 0=tie.
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}
