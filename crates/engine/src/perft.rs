use crate::board::BoardState;
use crate::types::{Move, Side};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct PerftResult {
    pub nodes: u64,
    pub time_ms: u128,
}

impl PerftResult {
    pub fn nodes_per_second(&self) -> u64 {
        if self.time_ms == 0 {
            return 0;
        }
        (self.nodes * 1000) / (self.time_ms as u64)
    }
}

/// Counts pseudo-legal move sequences to a given depth. A line ends early
/// when a king is captured, mirroring the engine's win condition.
pub fn perft(board: &BoardState, side: Side, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in board.all_valid_moves(side) {
        let mut next = board.clone();
        if next.apply_move_unchecked(mv).is_err() {
            continue;
        }

        if next.side_has_lost(side.opponent()) {
            nodes += 1;
        } else {
            nodes += perft(&next, side.opponent(), depth - 1);
        }
    }

    nodes
}

/// Perft with timing, for the console harness.
pub fn perft_timed(board: &BoardState, side: Side, depth: u32) -> PerftResult {
    let start = Instant::now();
    let nodes = perft(board, side, depth);
    PerftResult {
        nodes,
        time_ms: start.elapsed().as_millis(),
    }
}

/// Per-root-move node counts, handy when chasing a generator discrepancy.
pub fn perft_divide(board: &BoardState, side: Side, depth: u32) -> Vec<(Move, u64)> {
    let mut results = Vec::new();

    for mv in board.all_valid_moves(side) {
        let mut next = board.clone();
        if next.apply_move_unchecked(mv).is_err() {
            continue;
        }

        let nodes = if depth <= 1 || next.side_has_lost(side.opponent()) {
            1
        } else {
            perft(&next, side.opponent(), depth - 1)
        };
        results.push((mv, nodes));
    }

    results
}
