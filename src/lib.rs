use wasm_bindgen::prelude::*;

pub mod ai;
pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod types;

pub use ai::search::{MinimaxSelector, SearchResult, Searcher, minimax};
pub use board::{Board, Cell, Player};
pub use config::GameConfig;
pub use error::GameError;
pub use game::{FirstLegalMoveSelector, Game, GameStatus, MoveSelector, Outcome};
pub use types::{GameResult, GameState, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
