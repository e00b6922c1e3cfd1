use crate::error::EngineError;
use crate::types::*;

pub type Plane = u64;

pub const PLANE_EMPTY: Plane = 0;
pub const PLANE_FULL: Plane = 0xFFFF_FFFF_FFFF_FFFF;

/// Number of per-(side, kind) occupancy planes.
pub const PIECE_PLANES: usize = 12;

// Core bit operations on a single plane
pub fn set_bit(plane: &mut Plane, square: u8) {
    *plane |= 1u64 << square;
}

pub fn clear_bit(plane: &mut Plane, square: u8) {
    *plane &= !(1u64 << square);
}

pub fn get_bit(plane: Plane, square: u8) -> bool {
    (plane & (1u64 << square)) != 0
}

pub fn count_bits(plane: Plane) -> u32 {
    plane.count_ones()
}

/// Linear scan for the first set bit at or after `start`.
/// Returns the bit index plus the cursor to resume from, so a caller can
/// enumerate every set bit without rescanning from zero each time.
pub fn scan_first_set(plane: Plane, start: u8) -> Option<(u8, u8)> {
    let mut cursor = start;
    while cursor < 64 {
        if get_bit(plane, cursor) {
            return Some((cursor, cursor + 1));
        }
        cursor += 1;
    }
    None
}

/// Iterator over the set bits of a plane, built on the resumable scan.
pub struct PlaneIterator {
    plane: Plane,
    cursor: u8,
}

impl PlaneIterator {
    pub fn new(plane: Plane) -> Self {
        PlaneIterator { plane, cursor: 0 }
    }
}

impl Iterator for PlaneIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, next) = scan_first_set(self.plane, self.cursor)?;
        self.cursor = next;
        Some(Square(index))
    }
}

pub fn iterate_bits(plane: Plane) -> PlaneIterator {
    PlaneIterator::new(plane)
}

/// Plane slot for a (side, kind) pair: White block 0-5, Black block 6-11,
/// kind order Pawn, Rook, Bishop, Knight, Queen, King within each block.
pub fn plane_index(side: Side, kind: PieceKind) -> usize {
    let base = match side {
        Side::White => 0,
        Side::Black => 6,
    };
    base + kind.index()
}

/// Material weight used by the evaluation.
pub fn piece_weight(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::King => 150,
        PieceKind::Queen => 9,
        PieceKind::Knight => 5,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 3,
        PieceKind::Pawn => 1,
    }
}

// Kind order for the per-square plane probe.
const PROBE_ORDER: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Queen,
    PieceKind::King,
];

// Kind order for piece listings (kept stable for the evaluation walk).
const LIST_ORDER: [PieceKind; 6] = [
    PieceKind::King,
    PieceKind::Queen,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Pawn,
];

/// Packed occupancy state: one plane per (side, kind) pair plus the derived
/// free/occupied planes and each side's combined occupancy.
///
/// Invariants: at most one piece plane holds any square's bit, `free` is the
/// complement of `occupied`, and each side plane equals the OR of that
/// side's six piece planes. Every mutation rebuilds the derived planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBoard {
    planes: [Plane; PIECE_PLANES],
    free: Plane,
    occupied: Plane,
    side_planes: [Plane; 2],
}

impl BitBoard {
    pub fn new() -> Self {
        BitBoard {
            planes: [PLANE_EMPTY; PIECE_PLANES],
            free: PLANE_FULL,
            occupied: PLANE_EMPTY,
            side_planes: [PLANE_EMPTY; 2],
        }
    }

    pub fn plane(&self, side: Side, kind: PieceKind) -> Plane {
        self.planes[plane_index(side, kind)]
    }

    pub fn free(&self) -> Plane {
        self.free
    }

    pub fn occupied(&self) -> Plane {
        self.occupied
    }

    pub fn side_occupancy(&self, side: Side) -> Plane {
        self.side_planes[side.index()]
    }

    fn rebuild_derived_planes(&mut self) {
        for side in [Side::White, Side::Black] {
            let mut combined = PLANE_EMPTY;
            for kind in PROBE_ORDER {
                combined |= self.planes[plane_index(side, kind)];
            }
            self.side_planes[side.index()] = combined;
        }

        self.occupied = self.side_planes[0] | self.side_planes[1];
        self.free = !self.occupied;
    }

    /// Looks up the occupant of a square: White's combined plane first, then
    /// Black's, then the matching kind plane. None means the square is empty.
    pub fn piece_at(&self, square: Square) -> Option<PieceData> {
        let side = if get_bit(self.side_planes[Side::White.index()], square.0) {
            Side::White
        } else if get_bit(self.side_planes[Side::Black.index()], square.0) {
            Side::Black
        } else {
            return None;
        };

        for kind in PROBE_ORDER {
            if get_bit(self.planes[plane_index(side, kind)], square.0) {
                return Some(PieceData { kind, side, square });
            }
        }

        None
    }

    /// All pieces of one side, kind order King, Queen, Knight, Bishop, Rook, Pawn.
    pub fn list_pieces(&self, side: Side) -> Vec<PieceData> {
        let mut pieces = Vec::new();

        for kind in LIST_ORDER {
            let plane = self.planes[plane_index(side, kind)];
            let mut cursor = 0;
            while let Some((index, next)) = scan_first_set(plane, cursor) {
                pieces.push(PieceData {
                    kind,
                    side,
                    square: Square(index),
                });
                cursor = next;
            }
        }

        pieces
    }

    /// White's pieces followed by Black's.
    pub fn list_all_pieces(&self) -> Vec<PieceData> {
        let mut pieces = self.list_pieces(Side::White);
        pieces.extend(self.list_pieces(Side::Black));
        pieces
    }

    /// Moves whatever sits on `move.from` to `move.to`, clearing a captured
    /// piece's plane bit if the destination was occupied. No legality check;
    /// the board state layer owns that.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), EngineError> {
        if mv.from == mv.to {
            return Err(EngineError::InvalidArgument(
                "move origin equals destination",
            ));
        }

        let mover = self
            .piece_at(mv.from)
            .ok_or(EngineError::EmptySquare(mv.from))?;
        let captured = self.piece_at(mv.to);

        let mover_plane = plane_index(mover.side, mover.kind);
        set_bit(&mut self.planes[mover_plane], mv.to.0);
        clear_bit(&mut self.planes[mover_plane], mv.from.0);

        if let Some(victim) = captured {
            clear_bit(
                &mut self.planes[plane_index(victim.side, victim.kind)],
                mv.to.0,
            );
        }

        self.rebuild_derived_planes();
        Ok(())
    }

    /// Replaces the piece on `square` with `kind` of the same side.
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<(), EngineError> {
        let data = self
            .piece_at(square)
            .ok_or(EngineError::EmptySquare(square))?;

        clear_bit(&mut self.planes[plane_index(data.side, data.kind)], square.0);
        set_bit(&mut self.planes[plane_index(data.side, kind)], square.0);
        self.rebuild_derived_planes();
        Ok(())
    }

    /// Puts a piece on a square, clearing whatever occupied it before.
    pub fn set_piece(&mut self, square: Square, side: Side, kind: PieceKind) {
        for plane in self.planes.iter_mut() {
            clear_bit(plane, square.0);
        }
        set_bit(&mut self.planes[plane_index(side, kind)], square.0);
        self.rebuild_derived_planes();
    }

    pub fn clear_square(&mut self, square: Square) {
        for plane in self.planes.iter_mut() {
            clear_bit(plane, square.0);
        }
        self.rebuild_derived_planes();
    }

    fn side_material(&self, side: Side) -> i32 {
        self.list_pieces(side)
            .iter()
            .map(|data| piece_weight(data.kind))
            .sum()
    }

    /// Material score for `side`: own weights plus the absolute distance of
    /// the opponent's weights from 189 (the full starting material). Both
    /// sides score 189 at the start; captures widen the gap.
    pub fn evaluate_material(&self, side: Side) -> i32 {
        let own = self.side_material(side);
        let opponent = self.side_material(side.opponent());
        own + (189 - opponent).abs()
    }
}

impl Default for BitBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(bb: &BitBoard) {
        // at most one piece plane may own any square
        for square in 0..64u8 {
            let mut owners = 0;
            for side in [Side::White, Side::Black] {
                for kind in PROBE_ORDER {
                    if get_bit(bb.plane(side, kind), square) {
                        owners += 1;
                    }
                }
            }
            assert!(owners <= 1, "square {} owned by {} planes", square, owners);
        }

        assert_eq!(bb.free(), !bb.occupied(), "free/occupied out of sync");

        for side in [Side::White, Side::Black] {
            let mut combined = PLANE_EMPTY;
            for kind in PROBE_ORDER {
                combined |= bb.plane(side, kind);
            }
            assert_eq!(bb.side_occupancy(side), combined);
        }
    }

    #[test]
    fn test_scan_first_set_resumes() {
        let plane: Plane = (1 << 3) | (1 << 17) | (1 << 63);

        let (first, cursor) = scan_first_set(plane, 0).unwrap();
        assert_eq!(first, 3);
        let (second, cursor) = scan_first_set(plane, cursor).unwrap();
        assert_eq!(second, 17);
        let (third, cursor) = scan_first_set(plane, cursor).unwrap();
        assert_eq!(third, 63);
        assert_eq!(scan_first_set(plane, cursor), None);

        assert_eq!(scan_first_set(PLANE_EMPTY, 0), None);

        let squares: Vec<u8> = iterate_bits(plane).map(|sq| sq.0).collect();
        assert_eq!(squares, vec![3, 17, 63]);
    }

    #[test]
    fn test_plane_index_layout() {
        assert_eq!(plane_index(Side::White, PieceKind::Pawn), 0);
        assert_eq!(plane_index(Side::White, PieceKind::King), 5);
        assert_eq!(plane_index(Side::Black, PieceKind::Pawn), 6);
        assert_eq!(plane_index(Side::Black, PieceKind::King), 11);
    }

    #[test]
    fn test_set_piece_and_lookup() {
        let mut bb = BitBoard::new();
        assert_eq!(bb.free(), PLANE_FULL);

        let d4 = Square::new(3, 3);
        bb.set_piece(d4, Side::White, PieceKind::Knight);

        let data = bb.piece_at(d4).expect("knight should be found");
        assert_eq!(data.kind, PieceKind::Knight);
        assert_eq!(data.side, Side::White);
        assert_eq!(data.square, d4);
        assert_eq!(bb.piece_at(Square::new(3, 4)), None);

        // overwrite replaces, never stacks
        bb.set_piece(d4, Side::Black, PieceKind::Queen);
        let data = bb.piece_at(d4).unwrap();
        assert_eq!(data.kind, PieceKind::Queen);
        assert_eq!(data.side, Side::Black);
        assert_invariants(&bb);
    }

    #[test]
    fn test_apply_move_round_trip() {
        let mut bb = BitBoard::new();
        let e2 = Square::new(4, 1);
        let e4 = Square::new(4, 3);
        bb.set_piece(e2, Side::White, PieceKind::Pawn);

        let before = bb.clone();
        bb.apply_move(Move::new(e2, e4)).unwrap();
        assert_eq!(bb.piece_at(e2), None);
        assert_eq!(bb.piece_at(e4).unwrap().kind, PieceKind::Pawn);
        assert_invariants(&bb);

        // quiet move reverses exactly
        bb.apply_move(Move::new(e4, e2)).unwrap();
        assert_eq!(bb, before);
    }

    #[test]
    fn test_apply_move_capture_and_restore() {
        let mut bb = BitBoard::new();
        let d4 = Square::new(3, 3);
        let d6 = Square::new(3, 5);
        bb.set_piece(d4, Side::White, PieceKind::Rook);
        bb.set_piece(d6, Side::Black, PieceKind::Bishop);

        let before = bb.clone();
        bb.apply_move(Move::new(d4, d6)).unwrap();

        let data = bb.piece_at(d6).unwrap();
        assert_eq!(data.kind, PieceKind::Rook);
        assert_eq!(data.side, Side::White);
        assert_eq!(count_bits(bb.occupied()), 1);
        assert_invariants(&bb);

        // reverse move plus re-seating the victim restores the pre-move state
        bb.apply_move(Move::new(d6, d4)).unwrap();
        bb.set_piece(d6, Side::Black, PieceKind::Bishop);
        assert_eq!(bb, before);
    }

    #[test]
    fn test_apply_move_failure_modes() {
        let mut bb = BitBoard::new();
        let a1 = Square::new(0, 0);
        let a2 = Square::new(0, 1);

        assert_eq!(
            bb.apply_move(Move::new(a1, a2)),
            Err(EngineError::EmptySquare(a1))
        );

        bb.set_piece(a1, Side::White, PieceKind::Rook);
        assert!(matches!(
            bb.apply_move(Move::new(a1, a1)),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_promote() {
        let mut bb = BitBoard::new();
        let a8 = Square::new(0, 7);
        bb.set_piece(a8, Side::White, PieceKind::Pawn);

        bb.promote(a8, PieceKind::Queen).unwrap();
        let data = bb.piece_at(a8).unwrap();
        assert_eq!(data.kind, PieceKind::Queen);
        assert_eq!(data.side, Side::White);
        assert_invariants(&bb);

        let empty = Square::new(1, 7);
        assert_eq!(
            bb.promote(empty, PieceKind::Queen),
            Err(EngineError::EmptySquare(empty))
        );
    }

    #[test]
    fn test_list_pieces_order_and_sides() {
        let mut bb = BitBoard::new();
        bb.set_piece(Square::new(0, 0), Side::White, PieceKind::Pawn);
        bb.set_piece(Square::new(1, 0), Side::White, PieceKind::King);
        bb.set_piece(Square::new(2, 0), Side::White, PieceKind::Rook);
        bb.set_piece(Square::new(3, 0), Side::Black, PieceKind::Queen);

        let white = bb.list_pieces(Side::White);
        let kinds: Vec<PieceKind> = white.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![PieceKind::King, PieceKind::Rook, PieceKind::Pawn]
        );

        let all = bb.list_all_pieces();
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].side, Side::Black);
        assert_eq!(all[3].kind, PieceKind::Queen);
    }

    #[test]
    fn test_evaluate_material_formula() {
        let mut bb = BitBoard::new();
        bb.set_piece(Square::new(4, 0), Side::White, PieceKind::King);
        bb.set_piece(Square::new(4, 7), Side::Black, PieceKind::King);
        bb.set_piece(Square::new(3, 7), Side::Black, PieceKind::Queen);

        // own 150, opponent 159 -> 150 + |189 - 159| = 180
        assert_eq!(bb.evaluate_material(Side::White), 180);
        // own 159, opponent 150 -> 159 + |189 - 150| = 198
        assert_eq!(bb.evaluate_material(Side::Black), 198);
    }
}
