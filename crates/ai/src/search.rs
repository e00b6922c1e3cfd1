use crate::types::{SearchResult, MAX_DEPTH};
use engine::{BoardState, Move, Side};

/// Fixed-depth minimax with alpha-beta pruning. The board and the side to
/// move are passed in per call; the engine holds no game state of its own.
pub struct SearchEngine {
    max_depth: u32,
    pub nodes_searched: u64,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::with_depth(MAX_DEPTH)
    }

    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            nodes_searched: 0,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Picks a move for `side_to_move` on the given board.
    pub fn compute_move(&mut self, board: &BoardState, side_to_move: Side) -> SearchResult {
        self.nodes_searched = 0;
        self.minimax(board, side_to_move, 0, i32::MIN, i32::MAX, side_to_move)
    }

    // A node maximizes when its side equals the root's side-to-move, not by
    // recursion parity, and terminal nodes are always scored from the root
    // side's perspective. A negamax rewrite would not pick the same moves.
    fn minimax(
        &mut self,
        board: &BoardState,
        side: Side,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        root_side: Side,
    ) -> SearchResult {
        self.nodes_searched += 1;

        if board.side_has_lost(Side::White)
            || board.side_has_lost(Side::Black)
            || depth == self.max_depth
        {
            return SearchResult {
                best_move: Move::default(),
                score: board.evaluate_material(root_side),
            };
        }

        let maximizing = side == root_side;
        let mut best_move = Move::default();
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

        for mv in board.all_valid_moves(side) {
            // clone-and-discard per branch; the snapshot is a flat copy
            let mut next = board.clone();
            if next.apply_move_unchecked(mv).is_err() {
                continue;
            }

            let result = self.minimax(&next, side.opponent(), depth + 1, alpha, beta, root_side);

            // strict comparisons keep the first move reaching a tied score
            if maximizing {
                if result.score > best_score {
                    best_score = result.score;
                    best_move = mv;
                }
                alpha = alpha.max(best_score);
            } else {
                if result.score < best_score {
                    best_score = result.score;
                    best_move = mv;
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                break;
            }
        }

        SearchResult {
            best_move,
            score: best_score,
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{PieceKind, Square};

    #[test]
    fn test_start_position_move_is_legal() {
        let board = BoardState::new();
        let mut search = SearchEngine::new();

        let result = search.compute_move(&board, Side::White);
        let legal = board.all_valid_moves(Side::White);

        println!(
            "depth 4 from start: {} (score {}, {} nodes)",
            result.best_move, result.score, search.nodes_searched
        );
        assert!(legal.contains(&result.best_move));
        assert!(search.nodes_searched > 0);
    }

    #[test]
    fn test_search_grabs_a_hanging_king() {
        let mut board = BoardState::empty();
        board.set_piece_at(Square::new(4, 0), Side::White, PieceKind::King);
        board.set_piece_at(Square::new(4, 6), Side::White, PieceKind::Queen);
        board.set_piece_at(Square::new(4, 7), Side::Black, PieceKind::King);

        let mut search = SearchEngine::with_depth(2);
        let result = search.compute_move(&board, Side::White);

        assert_eq!(
            result.best_move,
            Move::new(Square::new(4, 6), Square::new(4, 7)),
            "queen should take the exposed king"
        );
    }

    #[test]
    fn test_lost_position_returns_zero_move() {
        // White has no king, so the root is already terminal: the search
        // returns the static score with the zero-move sentinel.
        let mut board = BoardState::empty();
        board.set_piece_at(Square::new(4, 7), Side::Black, PieceKind::King);

        let mut search = SearchEngine::new();
        let result = search.compute_move(&board, Side::White);

        assert_eq!(result.best_move, Move::default());
        // own 0 + |189 - 150|
        assert_eq!(result.score, 39);
        assert_eq!(search.nodes_searched, 1);
    }

    #[test]
    fn test_search_leaves_the_board_untouched() {
        let board = BoardState::new();
        let snapshot = board.clone();
        let mut search = SearchEngine::with_depth(3);

        search.compute_move(&board, Side::Black);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_depth_zero_is_terminal_at_the_root() {
        let board = BoardState::new();
        let mut search = SearchEngine::with_depth(0);
        let result = search.compute_move(&board, Side::White);

        assert_eq!(result.best_move, Move::default());
        assert_eq!(result.score, 189);
    }
}
