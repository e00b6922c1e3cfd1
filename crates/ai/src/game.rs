use crate::search::SearchEngine;
use engine::{BoardState, GameLogger, Move, Side};
use std::time::Instant;

type TurnCallback = Box<dyn FnMut(bool)>;
type ScoreCallback = Box<dyn FnMut(u32, u32)>;

/// Drives a game: validates and applies moves, tracks the side to move and
/// the running score, and notifies the presentation layer through optional
/// callbacks. Owns the board; search and presentation only borrow it.
pub struct GameController {
    board: BoardState,
    turn: Side,
    scores: [u32; 2],
    logger: GameLogger,
    on_turn: Option<TurnCallback>,
    on_score: Option<ScoreCallback>,
}

impl GameController {
    pub fn new() -> Self {
        GameController {
            board: BoardState::new(),
            turn: Side::White,
            scores: [0, 0],
            logger: GameLogger::new(),
            on_turn: None,
            on_score: None,
        }
    }

    /// Resets the board to the starting position. With `reset_scores` the
    /// scores are zeroed and White gets the move; without it (the
    /// after-a-win path) the current side to move is left alone.
    pub fn prepare_game(&mut self, reset_scores: bool) {
        self.board.reset();
        if reset_scores {
            self.scores = [0, 0];
            self.turn = Side::White;
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// Called with `is_white` after every completed turn.
    pub fn set_turn_callback<F>(&mut self, callback: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.on_turn = Some(Box::new(callback));
    }

    /// Called with (white score, black score) whenever a king falls.
    pub fn set_score_callback<F>(&mut self, callback: F)
    where
        F: FnMut(u32, u32) + 'static,
    {
        self.on_score = Some(Box::new(callback));
    }

    /// Validates and plays one move for the side to move. Returns false and
    /// changes nothing if the move is not in the side's move list. On a king
    /// capture the mover scores, the board resets, and the winner keeps the
    /// move; otherwise the turn passes to the opponent.
    pub fn play_turn(&mut self, mv: Move) -> bool {
        if !self.board.is_valid_move(self.turn, mv) {
            return false;
        }

        let promoted = match self.board.apply_move_unchecked(mv) {
            Ok(promoted) => promoted,
            Err(_) => return false,
        };

        self.logger.log_move(self.turn, mv);
        if promoted {
            self.logger.log_promotion(self.turn, mv);
        }

        let opponent = self.turn.opponent();
        if self.board.side_has_lost(opponent) {
            self.scores[self.turn.index()] += 1;
            self.logger.log_board_reset(self.turn);
            self.logger.log_score(self.scores[0], self.scores[1]);
            if let Some(callback) = self.on_score.as_mut() {
                callback(self.scores[0], self.scores[1]);
            }
            self.prepare_game(false);
        } else {
            self.turn = opponent;
        }

        if let Some(callback) = self.on_turn.as_mut() {
            callback(self.turn == Side::White);
        }
        true
    }

    /// Lets the given search pick and play a move for the side to move.
    /// Returns the move played, or None if the search produced nothing
    /// playable (an empty move list yields the zero-move sentinel).
    pub fn play_ai_turn(&mut self, search: &mut SearchEngine) -> Option<Move> {
        let started = Instant::now();
        let result = search.compute_move(&self.board, self.turn);
        let elapsed = started.elapsed().as_millis() as u64;

        self.logger.log_search(
            self.turn,
            result.best_move,
            result.score,
            search.nodes_searched,
            elapsed,
        );

        if self.play_turn(result.best_move) {
            Some(result.best_move)
        } else {
            None
        }
    }

    /// Flushes the game log to disk; returns the filename written.
    pub fn save_log(&mut self, reason: &str) -> Result<String, String> {
        self.logger.save_to_file(reason)
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}
