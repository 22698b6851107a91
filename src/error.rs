use crate::types::Position;

/// Errors surfaced by the game controller.
///
/// None of these are fatal: a rejected human move leaves the game
/// untouched apart from the status message.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("position out of bounds: ({row}, {col})")]
    OutOfBounds { row: i32, col: i32 },

    #[error("it is not the player's turn")]
    NotHumanTurn,

    #[error("illegal move at ({}, {})", .0.row, .0.col)]
    IllegalMove(Position),

    #[error("game is already over")]
    GameOver,

    /// The move selector returned nothing although a legal move exists.
    #[error("AI could not select a move")]
    NoMoveSelected,

    #[error("invalid board text: {0}")]
    ParseBoard(String),
}
