use engine::perft::{perft_divide, perft_timed};
use engine::{BoardState, Side};

fn main() {
    println!("🎯 PSEUDO-LEGAL MOVE COUNT TEST");
    println!("{}", "=".repeat(60));

    let board = BoardState::new();
    let expected: [(u32, u64); 3] = [(1, 20), (2, 400), (3, 8_902)];

    for (depth, want) in expected {
        let result = perft_timed(&board, Side::White, depth);
        let status = if result.nodes == want { "✅" } else { "❌" };
        println!(
            "{} depth {}: {} nodes (expected {}) in {}ms ({} n/s)",
            status,
            depth,
            result.nodes,
            want,
            result.time_ms,
            result.nodes_per_second()
        );
    }

    println!("\n📋 Divide at depth 2:");
    for (mv, nodes) in perft_divide(&board, Side::White, 2) {
        println!("  {}: {}", mv, nodes);
    }
}
