pub mod game;
pub mod search;
pub mod types;

pub use game::GameController;
pub use search::SearchEngine;
pub use types::{SearchResult, MAX_DEPTH};
