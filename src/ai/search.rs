use tracing::debug;
use web_time::Instant;

use crate::ai::eval::evaluate;
use crate::board::{Board, Player};
use crate::game::MoveSelector;
use crate::rules::{apply_move, has_legal_move, legal_moves};
use crate::types::Position;

/// Stand-ins for -inf/+inf. Real scores stay within -16..=16 and the
/// search never negates, so the extremes cannot overflow.
pub const MIN_SCORE: i32 = i32::MIN;
pub const MAX_SCORE: i32 = i32::MAX;

/// Score of a position from Black's point of view plus the move that
/// achieves it.
///
/// `best_move` is `None` only at terminal or forced-pass nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Position>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Full-depth minimax with alpha-beta pruning.
///
/// No depth cutoff and no transposition table: the 4x4 tree is small
/// enough to search to the end every time.
#[derive(Debug, Default)]
pub struct Searcher {
    stats: SearchStats,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches `board` with the full window and resets the statistics.
    pub fn search(&mut self, board: &Board, player: Player) -> SearchResult {
        self.stats = SearchStats::default();
        self.minimax(board, player, MIN_SCORE, MAX_SCORE)
    }

    /// Statistics of the searches run since the last `search()` call.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn minimax(
        &mut self,
        board: &Board,
        player: Player,
        alpha: i32,
        beta: i32,
    ) -> SearchResult {
        self.stats.nodes += 1;

        let moves = legal_moves(board, player);
        if moves.is_empty() {
            if !has_legal_move(board, player.opponent()) {
                return SearchResult {
                    score: evaluate(board),
                    best_move: None,
                };
            }
            // Forced pass: same board, same window, opponent to move.
            let passed = self.minimax(board, player.opponent(), alpha, beta);
            return SearchResult {
                score: passed.score,
                best_move: None,
            };
        }

        let mut alpha = alpha;
        let mut beta = beta;
        let mut best_move = None;
        let mut best_score = if player.is_maximizing() {
            MIN_SCORE
        } else {
            MAX_SCORE
        };

        for mv in moves {
            let child = apply_move(board, mv, player);
            let score = self.minimax(&child, player.opponent(), alpha, beta).score;

            // Strict comparison: the first move seen keeps ties.
            if player.is_maximizing() {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        SearchResult {
            score: best_score,
            best_move,
        }
    }
}

/// Runs one alpha-beta search from `board` with `player` to move.
pub fn minimax(board: &Board, player: Player, alpha: i32, beta: i32) -> SearchResult {
    Searcher::new().minimax(board, player, alpha, beta)
}

/// AI move source backed by the full alpha-beta search.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimaxSelector;

impl MoveSelector for MinimaxSelector {
    fn select_move(&self, board: &Board, player: Player) -> Option<Position> {
        let started = Instant::now();
        let mut searcher = Searcher::new();
        let result = searcher.search(board, player);
        let stats = searcher.stats();

        debug!(
            ?player,
            score = result.score,
            best_move = ?result.best_move,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            elapsed_us = started.elapsed().as_micros() as u64,
            "search finished"
        );

        result.best_move
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    /// Reference minimax without pruning; returns the score and counts nodes.
    fn plain_minimax(board: &Board, player: Player, nodes: &mut u64) -> i32 {
        *nodes += 1;
        let moves = legal_moves(board, player);
        if moves.is_empty() {
            if legal_moves(board, player.opponent()).is_empty() {
                return evaluate(board);
            }
            return plain_minimax(board, player.opponent(), nodes);
        }

        let scores = moves
            .into_iter()
            .map(|mv| plain_minimax(&apply_move(board, mv, player), player.opponent(), nodes));
        if player.is_maximizing() {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn reachable(plies: usize) -> Vec<(Board, Player)> {
        let mut out = vec![(Board::new(), Player::Black)];
        let mut frontier = out.clone();
        for _ in 0..plies {
            let mut next = Vec::new();
            for (b, p) in frontier {
                for mv in legal_moves(&b, p) {
                    next.push((apply_move(&b, mv, p), p.opponent()));
                }
            }
            out.extend(next.iter().copied());
            frontier = next;
        }
        out
    }

    #[test]
    fn opening_is_a_loss_by_eight_and_keeps_first_tied_move() {
        let mut searcher = Searcher::new();

        let result = searcher.search(&Board::new(), Player::Black);

        // All four opening moves score -8; the first generated one wins the tie.
        assert_eq!(result.score, -8);
        assert_eq!(result.best_move, Some(Position::new(0, 1)));
    }

    /// Every distinct (board, player-to-move) in the game tree, including
    /// the nodes where a side has to pass.
    fn whole_tree() -> HashSet<(Board, Player)> {
        let mut seen = HashSet::new();
        let mut stack = vec![(Board::new(), Player::Black)];
        while let Some((b, p)) = stack.pop() {
            if !seen.insert((b, p)) {
                continue;
            }
            let moves = legal_moves(&b, p);
            if moves.is_empty() {
                if has_legal_move(&b, p.opponent()) {
                    stack.push((b, p.opponent()));
                }
                continue;
            }
            for mv in moves {
                stack.push((apply_move(&b, mv, p), p.opponent()));
            }
        }
        seen
    }

    #[test]
    fn pruning_matches_plain_minimax_on_every_reachable_node() {
        let nodes = whole_tree();
        let pass_nodes = nodes
            .iter()
            .filter(|(b, p)| !has_legal_move(b, *p) && has_legal_move(b, p.opponent()))
            .count();
        assert!(pass_nodes > 0);

        for (b, p) in nodes {
            let mut visited = 0;
            let expected = plain_minimax(&b, p, &mut visited);
            let result = minimax(&b, p, MIN_SCORE, MAX_SCORE);

            assert_eq!(result.score, expected, "board:\n{b}\nplayer: {p:?}");
            assert_eq!(
                result.best_move.is_none(),
                legal_moves(&b, p).is_empty(),
                "board:\n{b}\nplayer: {p:?}"
            );
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes_than_plain_minimax() {
        let mut nodes = 0;
        plain_minimax(&Board::new(), Player::Black, &mut nodes);

        let mut searcher = Searcher::new();
        searcher.search(&Board::new(), Player::Black);
        let stats = searcher.stats();

        assert!(stats.cutoffs > 0);
        assert!(stats.nodes < nodes, "{} >= {}", stats.nodes, nodes);
    }

    #[test]
    fn best_move_is_legal_whenever_moves_exist() {
        for (b, p) in reachable(4) {
            let moves = legal_moves(&b, p);
            let result = minimax(&b, p, MIN_SCORE, MAX_SCORE);

            match result.best_move {
                Some(mv) => assert!(moves.contains(&mv)),
                None => assert!(moves.is_empty()),
            }
        }
    }

    #[test]
    fn forced_pass_propagates_opponent_score_without_move() {
        let b = board("BW.. .... .... ....");

        let white = minimax(&b, Player::White, MIN_SCORE, MAX_SCORE);
        let black = minimax(&b, Player::Black, MIN_SCORE, MAX_SCORE);

        assert_eq!(
            white,
            SearchResult {
                score: 3,
                best_move: None,
            }
        );
        assert_eq!(
            black,
            SearchResult {
                score: 3,
                best_move: Some(Position::new(0, 2)),
            }
        );
    }

    #[test]
    fn terminal_board_returns_evaluation_without_move() {
        let b = board("B..W .... .... W...");

        let result = minimax(&b, Player::Black, MIN_SCORE, MAX_SCORE);

        assert_eq!(
            result,
            SearchResult {
                score: -1,
                best_move: None,
            }
        );
    }

    #[test]
    fn selector_returns_search_move() {
        let b = board("BW.. .... .... ....");

        assert_eq!(
            MinimaxSelector.select_move(&b, Player::Black),
            Some(Position::new(0, 2))
        );
        assert_eq!(MinimaxSelector.select_move(&b, Player::White), None);
    }
}
