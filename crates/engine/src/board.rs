use crate::bitboard::{scan_first_set, BitBoard};
use crate::error::EngineError;
use crate::types::*;

// Targeting flags for move collection
pub const TARGET_EMPTY: u8 = 0b01;
pub const TARGET_ENEMY: u8 = 0b10;
pub const TARGET_ANY: u8 = TARGET_EMPTY | TARGET_ENEMY;

/// Move generation here is pseudo-legal: piece movement rules are honored
/// but nothing verifies that a move leaves the own king safe. The game is
/// decided by king capture instead of checkmate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalityLevel {
    Pseudo,
}

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Full board snapshot: the bitboard planes plus a per-square metadata
/// mirror. Cloning copies everything, so search can mutate hypothetical
/// futures without touching the live game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    bitboard: BitBoard,
    squares: [BoardSquare; 64],
}

impl BoardState {
    pub const LEGALITY: LegalityLevel = LegalityLevel::Pseudo;

    /// Board in the standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Board with no pieces, for custom setups.
    pub fn empty() -> Self {
        BoardState {
            bitboard: BitBoard::new(),
            squares: [BoardSquare::default(); 64],
        }
    }

    pub fn bitboard(&self) -> &BitBoard {
        &self.bitboard
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceData> {
        self.bitboard.piece_at(square)
    }

    pub fn square_info(&self, square: Square) -> BoardSquare {
        self.squares[square.index()]
    }

    pub fn evaluate_material(&self, side: Side) -> i32 {
        self.bitboard.evaluate_material(side)
    }

    /// True if `target` is on the board and its occupancy matches the
    /// targeting flags: empty squares need TARGET_EMPTY, enemy-held squares
    /// need TARGET_ENEMY. Own pieces never match.
    pub fn is_square_targetable(&self, target: Option<Square>, side: Side, flags: u8) -> bool {
        let square = match target {
            Some(square) => square,
            None => return false,
        };

        match self.bitboard.piece_at(square) {
            None => flags & TARGET_EMPTY != 0,
            Some(data) => data.side != side && flags & TARGET_ENEMY != 0,
        }
    }

    fn collect_move_if_targetable(
        &self,
        side: Side,
        from: Square,
        to: Option<Square>,
        flags: u8,
        moves: &mut Vec<Move>,
    ) {
        if let Some(to) = to {
            if self.is_square_targetable(Some(to), side, flags) {
                moves.push(Move::new(from, to));
            }
        }
    }

    pub fn collect_king_moves(&self, side: Side, from: Square, moves: &mut Vec<Move>) {
        for (df, dr) in KING_OFFSETS {
            self.collect_move_if_targetable(side, from, from.offset(df, dr), TARGET_ANY, moves);
        }
    }

    pub fn collect_knight_moves(&self, side: Side, from: Square, moves: &mut Vec<Move>) {
        for (df, dr) in KNIGHT_OFFSETS {
            self.collect_move_if_targetable(side, from, from.offset(df, dr), TARGET_ANY, moves);
        }
    }

    // Walks one ray: empty squares are collected and the walk continues, the
    // first enemy square is collected and ends the ray, an own piece ends it
    // uncollected.
    fn walk_ray(&self, side: Side, from: Square, df: i8, dr: i8, moves: &mut Vec<Move>) {
        let mut cursor = from.offset(df, dr);
        while let Some(square) = cursor {
            self.collect_move_if_targetable(side, from, Some(square), TARGET_ANY, moves);
            if self.bitboard.piece_at(square).is_some() {
                break;
            }
            cursor = square.offset(df, dr);
        }
    }

    pub fn collect_rook_moves(&self, side: Side, from: Square, moves: &mut Vec<Move>) {
        for (df, dr) in ROOK_DIRECTIONS {
            self.walk_ray(side, from, df, dr, moves);
        }
    }

    pub fn collect_bishop_moves(&self, side: Side, from: Square, moves: &mut Vec<Move>) {
        for (df, dr) in BISHOP_DIRECTIONS {
            self.walk_ray(side, from, df, dr, moves);
        }
    }

    pub fn collect_queen_moves(&self, side: Side, from: Square, moves: &mut Vec<Move>) {
        self.collect_rook_moves(side, from, moves);
        self.collect_bishop_moves(side, from, moves);
    }

    /// Pawns move forward only: single step onto an empty square, a double
    /// step from the starting rank through an empty intermediate square, and
    /// the two forward diagonals as captures. No en passant.
    pub fn collect_pawn_moves(&self, side: Side, from: Square, moves: &mut Vec<Move>) {
        let (forward, start_rank) = match side {
            Side::White => (from.up(), 1),
            Side::Black => (from.down(), 6),
        };

        if from.rank() == start_rank {
            if let Some(step) = forward {
                if self.bitboard.piece_at(step).is_none() {
                    let double = match side {
                        Side::White => step.up(),
                        Side::Black => step.down(),
                    };
                    self.collect_move_if_targetable(side, from, double, TARGET_EMPTY, moves);
                }
            }
        }

        self.collect_move_if_targetable(side, from, forward, TARGET_EMPTY, moves);

        if let Some(step) = forward {
            let (first_diagonal, second_diagonal) = match side {
                Side::White => (step.left(), step.right()),
                Side::Black => (step.right(), step.left()),
            };
            self.collect_move_if_targetable(side, from, first_diagonal, TARGET_ENEMY, moves);
            self.collect_move_if_targetable(side, from, second_diagonal, TARGET_ENEMY, moves);
        }
    }

    /// Every pseudo-legal move for `side`, appended to `moves`.
    pub fn collect_moves(&self, side: Side, moves: &mut Vec<Move>) {
        for data in self.bitboard.list_pieces(side) {
            match data.kind {
                PieceKind::King => self.collect_king_moves(side, data.square, moves),
                PieceKind::Queen => self.collect_queen_moves(side, data.square, moves),
                PieceKind::Knight => self.collect_knight_moves(side, data.square, moves),
                PieceKind::Bishop => self.collect_bishop_moves(side, data.square, moves),
                PieceKind::Rook => self.collect_rook_moves(side, data.square, moves),
                PieceKind::Pawn => self.collect_pawn_moves(side, data.square, moves),
            }
        }
    }

    pub fn all_valid_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        self.collect_moves(side, &mut moves);
        moves
    }

    /// Membership check against the full generated list. Callers validating
    /// many candidates should generate once and query the list instead.
    pub fn is_valid_move(&self, side: Side, mv: Move) -> bool {
        self.all_valid_moves(side).contains(&mv)
    }

    /// Applies a move without validating it, auto-queening a pawn that
    /// reaches its last rank. Returns whether a promotion occurred.
    pub fn apply_move_unchecked(&mut self, mv: Move) -> Result<bool, EngineError> {
        self.bitboard.apply_move(mv)?;

        self.squares[mv.to.index()] = self.squares[mv.from.index()];
        self.squares[mv.from.index()] = BoardSquare::default();

        if let Some(data) = self.bitboard.piece_at(mv.to) {
            if data.kind == PieceKind::Pawn {
                let last_rank = match data.side {
                    Side::White => 7,
                    Side::Black => 0,
                };
                if mv.to.rank() == last_rank {
                    self.bitboard.promote(mv.to, PieceKind::Queen)?;
                    self.squares[mv.to.index()].kind = Some(PieceKind::Queen);
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// A side has lost once its king plane is empty. There is no checkmate
    /// or stalemate detection.
    pub fn side_has_lost(&self, side: Side) -> bool {
        scan_first_set(self.bitboard.plane(side, PieceKind::King), 0).is_none()
    }

    pub fn set_piece_at(&mut self, square: Square, side: Side, kind: PieceKind) {
        self.bitboard.set_piece(square, side, kind);
        self.squares[square.index()] = BoardSquare {
            kind: Some(kind),
            side: Some(side),
        };
    }

    pub fn clear_square(&mut self, square: Square) {
        self.bitboard.clear_square(square);
        self.squares[square.index()] = BoardSquare::default();
    }

    pub fn clear_all(&mut self) {
        self.bitboard = BitBoard::new();
        self.squares = [BoardSquare::default(); 64];
    }

    /// Clears the board and lays out the standard starting position.
    pub fn reset(&mut self) {
        self.clear_all();

        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            self.set_piece_at(Square::new(file as u8, 0), Side::White, kind);
            self.set_piece_at(Square::new(file as u8, 7), Side::Black, kind);
        }

        for file in 0..8 {
            self.set_piece_at(Square::new(file, 1), Side::White, PieceKind::Pawn);
            self.set_piece_at(Square::new(file, 6), Side::Black, PieceKind::Pawn);
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}
