use crate::types::Square;
use thiserror::Error;

/// Failures the core refuses to paper over with a sentinel value.
/// A rejected move (`is_valid_move` returning false) is a normal negative
/// result and never surfaces here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("square index {0} is outside the board (0-63)")]
    OutOfRange(i16),

    #[error("square {0} holds no piece")]
    EmptySquare(Square),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
