use engine::Move;

/// Output of one search invocation. `best_move` stays at the zero move
/// {0,0} when no explored child improves on the initial score sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
}

/// Fixed search depth in plies.
pub const MAX_DEPTH: u32 = 4;
