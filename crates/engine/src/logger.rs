use crate::types::{Move, Side};
use std::fs::{self, File};
use std::io::Write;

/// Buffered game log. Lines accumulate in memory during play and are
/// flushed to `logs/<timestamp>.txt` on demand, so logging never blocks a
/// search in progress.
#[derive(Debug)]
pub struct GameLogger {
    pub log_buffer: String,
    move_count: u32,
}

impl GameLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(64 * 1024),
            move_count: 0,
        };

        logger.log("=== Chess game log started ===");
        logger.log(&format!(
            "Date: {}",
            chrono::Local::now().format("%m/%d/%Y %H:%M:%S")
        ));
        logger
    }

    pub fn log(&mut self, message: &str) {
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    /// Numbered move line for a played move.
    pub fn log_move(&mut self, side: Side, mv: Move) {
        self.move_count += 1;
        self.log(&format!("{}. {} {}", self.move_count, side, mv));
    }

    /// Search summary for an AI-chosen move.
    pub fn log_search(&mut self, side: Side, mv: Move, score: i32, nodes: u64, time_ms: u64) {
        self.log(&format!(
            "AI ({}): {} score {} | {} nodes in {}ms",
            side, mv, score, nodes, time_ms
        ));
    }

    pub fn log_promotion(&mut self, side: Side, mv: Move) {
        self.log(&format!("{} pawn promoted to queen on {}", side, mv.to));
    }

    pub fn log_score(&mut self, white: u32, black: u32) {
        self.log(&format!("Score: White {} - Black {}", white, black));
    }

    pub fn log_board_reset(&mut self, winner: Side) {
        self.log(&format!("{} captured the enemy king - board reset", winner));
    }

    /// Writes the buffer to `logs/<timestamp>.txt` and returns the filename.
    pub fn save_to_file(&mut self, reason: &str) -> Result<String, String> {
        if let Err(e) = fs::create_dir_all("logs") {
            return Err(format!("Failed to create logs directory: {}", e));
        }

        let now = chrono::Local::now();
        let filename = format!("logs/{}.txt", now.format("%m_%d_%Y_%H_%M_%S"));

        self.log(&format!("Game ended: {} - saving log", reason));

        match File::create(&filename) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(self.log_buffer.as_bytes()) {
                    return Err(format!("Failed to write log file: {}", e));
                }
                Ok(filename)
            }
            Err(e) => Err(format!("Failed to create log file: {}", e)),
        }
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}
