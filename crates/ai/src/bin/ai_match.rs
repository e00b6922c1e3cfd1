use ai::{GameController, SearchEngine, MAX_DEPTH};
use engine::Side;

const MAX_PLIES: u32 = 40;

fn main() {
    println!("🤖 AI vs AI MATCH (depth {})", MAX_DEPTH);
    println!("{}", "=".repeat(60));

    let mut game = GameController::new();
    game.set_score_callback(|white, black| {
        println!("🏆 King captured! Score: White {} - Black {}", white, black);
    });

    let mut white_search = SearchEngine::new();
    let mut black_search = SearchEngine::new();

    for ply in 1..=MAX_PLIES {
        let side = game.turn();
        let search = match side {
            Side::White => &mut white_search,
            Side::Black => &mut black_search,
        };

        match game.play_ai_turn(search) {
            Some(mv) => println!(
                "{:>3}. {} plays {} ({} nodes)",
                ply, side, mv, search.nodes_searched
            ),
            None => {
                println!("{:>3}. {} has no playable move, stopping", ply, side);
                break;
            }
        }
    }

    println!("{}", "=".repeat(60));
    println!(
        "Final score: White {} - Black {}",
        game.score(Side::White),
        game.score(Side::Black)
    );

    match game.save_log("ai_match") {
        Ok(filename) => println!("📝 Log saved to {}", filename),
        Err(e) => println!("⚠️ Could not save log: {}", e),
    }
}
