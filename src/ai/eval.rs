use crate::board::Board;

/// Material differential: black stones minus white stones.
///
/// Positive favors Black (the AI). Only a true outcome score on a
/// terminal board, which is the only place the search calls it.
pub fn evaluate(board: &Board) -> i32 {
    let (black, white) = board.count();
    black as i32 - white as i32
}
