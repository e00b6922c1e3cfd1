use crate::error::EngineError;
use std::fmt;

/// A board square, index 0-63, file = index % 8, rank = index / 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Square(pub u8);

impl Square {
    pub fn new(file: u8, rank: u8) -> Self {
        Self(rank * 8 + file)
    }

    pub fn file(&self) -> u8 {
        self.0 % 8
    }

    pub fn rank(&self) -> u8 {
        self.0 / 8
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Step by (file delta, rank delta). Off-board steps return None instead of wrapping.
    pub fn offset(&self, df: i8, dr: i8) -> Option<Square> {
        let new_file = self.file() as i8 + df;
        let new_rank = self.rank() as i8 + dr;

        if new_file >= 0 && new_file < 8 && new_rank >= 0 && new_rank < 8 {
            Some(Square::new(new_file as u8, new_rank as u8))
        } else {
            None
        }
    }

    pub fn up(&self) -> Option<Square> {
        self.offset(0, 1)
    }

    pub fn down(&self) -> Option<Square> {
        self.offset(0, -1)
    }

    pub fn left(&self) -> Option<Square> {
        self.offset(-1, 0)
    }

    pub fn right(&self) -> Option<Square> {
        self.offset(1, 0)
    }
}

impl TryFrom<i16> for Square {
    type Error = EngineError;

    fn try_from(index: i16) -> Result<Self, EngineError> {
        if (0..64).contains(&index) {
            Ok(Square(index as u8))
        } else {
            Err(EngineError::OutOfRange(index))
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{}{}", file, rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

// Declaration order fixes the per-side plane layout: Pawn=0 .. King=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Bishop,
    Knight,
    Queen,
    King,
}

impl PieceKind {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A from/to square pair. Captures and promotions are reconstructed by
/// inspecting the board, not recorded here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Read-only projection of one occupied square, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceData {
    pub kind: PieceKind,
    pub side: Side,
    pub square: Square,
}

/// Per-square metadata mirror kept alongside the bitboard planes.
/// An empty square has both fields None.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardSquare {
    pub kind: Option<PieceKind>,
    pub side: Option<Side>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_coordinates() {
        let e2 = Square::new(4, 1);
        assert_eq!(e2.0, 12);
        assert_eq!(e2.file(), 4);
        assert_eq!(e2.rank(), 1);
        assert_eq!(e2.to_string(), "e2");
    }

    #[test]
    fn test_offsets_stop_at_board_edge() {
        let a1 = Square::new(0, 0);
        assert_eq!(a1.left(), None);
        assert_eq!(a1.down(), None);
        assert_eq!(a1.right(), Some(Square::new(1, 0)));
        assert_eq!(a1.up(), Some(Square::new(0, 1)));

        let h8 = Square::new(7, 7);
        assert_eq!(h8.right(), None);
        assert_eq!(h8.up(), None);

        // a file-wrap like h1 + (1, 0) must not land on a2
        let h1 = Square::new(7, 0);
        assert_eq!(h1.offset(1, 0), None);
    }

    #[test]
    fn test_square_try_from_range() {
        assert_eq!(Square::try_from(0i16), Ok(Square(0)));
        assert_eq!(Square::try_from(63i16), Ok(Square(63)));
        assert_eq!(Square::try_from(64i16), Err(EngineError::OutOfRange(64)));
        assert_eq!(Square::try_from(-1i16), Err(EngineError::OutOfRange(-1)));
    }

    #[test]
    fn test_move_equality_and_default() {
        let mv = Move::new(Square(12), Square(28));
        assert_eq!(mv, Move::new(Square(12), Square(28)));
        assert_ne!(mv, Move::new(Square(28), Square(12)));
        assert_eq!(Move::default(), Move::new(Square(0), Square(0)));
        assert_eq!(mv.to_string(), "e2e4");
    }
}
