//! Move legality, stone flipping and move generation.

use once_cell::sync::Lazy;

use crate::board::{BOARD_SIZE, Board, Cell, NUM_SQUARES, Player, bit};
use crate::types::Position;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// For every cell and direction, the cells walked outward until the edge.
static RAYS: Lazy<Vec<[Vec<usize>; 8]>> = Lazy::new(|| {
    (0..NUM_SQUARES)
        .map(|idx| {
            let origin = Position::from_index(idx);
            std::array::from_fn(|dir| {
                let (dr, dc) = DIRECTIONS[dir];
                let mut r = origin.row as i32 + dr;
                let mut c = origin.col as i32 + dc;
                let mut ray = Vec::new();
                while in_bounds(r, c) {
                    ray.push(r as usize * BOARD_SIZE + c as usize);
                    r += dr;
                    c += dc;
                }
                ray
            })
        })
        .collect()
});

/// Returns whether `player` may place a stone at `pos`.
///
/// False for occupied cells. Otherwise legal when at least one direction
/// holds a run of opponent stones closed by one of `player`'s stones.
pub fn is_legal_move(board: &Board, pos: Position, player: Player) -> bool {
    if board.get(pos) != Cell::Empty {
        return false;
    }
    let (me, opp) = board.sides(player);
    RAYS[pos.index()]
        .iter()
        .any(|ray| run_closed_by_own(ray, me, opp) != 0)
}

/// Mask of the opponent stones a stone at `pos` would capture.
///
/// Does not look at whether `pos` itself is empty.
pub fn flips(board: &Board, pos: Position, player: Player) -> u16 {
    let (me, opp) = board.sides(player);
    RAYS[pos.index()]
        .iter()
        .fold(0, |acc, ray| acc | run_closed_by_own(ray, me, opp))
}

/// Places `player` at `pos` and flips every captured run.
///
/// Caller contract: `is_legal_move(board, pos, player)` holds. The input
/// board is never modified.
pub fn apply_move(board: &Board, pos: Position, player: Player) -> Board {
    debug_assert!(
        is_legal_move(board, pos, player),
        "apply_move() requires a legal move"
    );
    let captured = flips(board, pos, player);
    let (me, opp) = board.sides(player);
    Board::from_sides(player, me | bit(pos.index()) | captured, opp & !captured)
}

/// All legal moves for `player` in row-major order. Empty means pass.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Position> {
    (0..NUM_SQUARES)
        .map(Position::from_index)
        .filter(|&pos| is_legal_move(board, pos, player))
        .collect()
}

pub fn has_legal_move(board: &Board, player: Player) -> bool {
    (0..NUM_SQUARES).any(|idx| is_legal_move(board, Position::from_index(idx), player))
}

/// Opponent run starting next to the origin, kept only if an own stone closes it.
fn run_closed_by_own(ray: &[usize], me: u16, opp: u16) -> u16 {
    let mut line = 0u16;
    for &idx in ray {
        let square = bit(idx);
        if (opp & square) != 0 {
            line |= square;
        } else if (me & square) != 0 {
            return line;
        } else {
            return 0;
        }
    }
    0
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
