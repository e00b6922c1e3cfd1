pub mod bitboard;
pub mod board;
pub mod error;
pub mod logger;
pub mod perft;
pub mod types;

pub use bitboard::*;
pub use board::*;
pub use error::EngineError;
pub use logger::GameLogger;
pub use types::*;
