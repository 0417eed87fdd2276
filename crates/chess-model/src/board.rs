//! Board storage and attack queries.

use crate::types::{Piece, PieceKind, Side, Square};

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1),
    (0, 1), (1, -1), (1, 0), (1, 1),
];

const ROOK_RAYS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_RAYS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 8x8 mailbox. Indexed by [`Square`] through `piece_at`/`set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Empty board.
    pub fn empty() -> Board {
        Board { cells: [[None; 8]; 8] }
    }

    /// Standard starting position.
    pub fn initial() -> Board {
        use PieceKind::*;
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Board::empty();
        for (col, &kind) in back.iter().enumerate() {
            let col = col as u8;
            board.set(Square::new(0, col), Some(Piece::new(Side::Black, kind)));
            board.set(Square::new(7, col), Some(Piece::new(Side::White, kind)));
        }
        for col in 0..8 {
            board.set(Square::new(1, col), Some(Piece::new(Side::Black, Pawn)));
            board.set(Square::new(6, col), Some(Piece::new(Side::White, Pawn)));
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row as usize][square.col as usize] = piece;
    }

    /// Locate the king of `side`. The model never removes kings, so a
    /// missing king only happens on hand-built test boards.
    pub fn king_square(&self, side: Side) -> Option<Square> {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square::new(row, col);
                if self.piece_at(sq)
                    == Some(Piece::new(side, PieceKind::King))
                {
                    return Some(sq);
                }
            }
        }
        None
    }

    /// Whether any piece of `by` attacks `target`. Works backwards
    /// from the target square instead of generating moves for every
    /// attacker.
    pub fn is_attacked(&self, target: Square, by: Side) -> bool {
        // Pawns capture toward their own forward direction, so from
        // the target's point of view they sit one row behind it.
        let pawn_row = -by.forward();
        for dc in [-1i8, 1] {
            if let Some(sq) = target.offset(pawn_row, dc) {
                if self.piece_at(sq) == Some(Piece::new(by, PieceKind::Pawn)) {
                    return true;
                }
            }
        }

        for (dr, dc) in KNIGHT_JUMPS {
            if let Some(sq) = target.offset(dr, dc) {
                if self.piece_at(sq) == Some(Piece::new(by, PieceKind::Knight)) {
                    return true;
                }
            }
        }

        for (dr, dc) in KING_STEPS {
            if let Some(sq) = target.offset(dr, dc) {
                if self.piece_at(sq) == Some(Piece::new(by, PieceKind::King)) {
                    return true;
                }
            }
        }

        self.ray_attacked(target, by, &ROOK_RAYS, PieceKind::Rook)
            || self.ray_attacked(target, by, &BISHOP_RAYS, PieceKind::Bishop)
    }

    fn ray_attacked(
        &self,
        target: Square,
        by: Side,
        rays: &[(i8, i8)],
        slider: PieceKind,
    ) -> bool {
        for &(dr, dc) in rays {
            let mut sq = target;
            while let Some(next) = sq.offset(dr, dc) {
                sq = next;
                match self.piece_at(sq) {
                    None => continue,
                    Some(piece) => {
                        if piece.side == by
                            && (piece.kind == slider || piece.kind == PieceKind::Queen)
                        {
                            return true;
                        }
                        break;
                    }
                }
            }
        }
        false
    }

    /// Signed material balance in pawn units, positive when White
    /// leads.
    pub fn material_score(&self) -> i32 {
        let mut score = 0;
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.piece_at(Square::new(row, col)) {
                    let value = piece.kind.value();
                    score += match piece.side {
                        Side::White => value,
                        Side::Black => -value,
                    };
                }
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_is_balanced() {
        let board = Board::initial();
        assert_eq!(board.material_score(), 0);
        assert_eq!(board.king_square(Side::White), Some(Square::new(7, 4)));
        assert_eq!(board.king_square(Side::Black), Some(Square::new(0, 4)));
    }

    #[test]
    fn knight_attack_detected() {
        let mut board = Board::empty();
        board.set(Square::new(4, 4), Some(Piece::new(Side::White, PieceKind::Knight)));
        assert!(board.is_attacked(Square::new(2, 3), Side::White));
        assert!(!board.is_attacked(Square::new(2, 4), Side::White));
    }

    #[test]
    fn slider_attack_blocked_by_intervening_piece() {
        let mut board = Board::empty();
        board.set(Square::new(4, 0), Some(Piece::new(Side::Black, PieceKind::Rook)));
        board.set(Square::new(4, 3), Some(Piece::new(Side::White, PieceKind::Pawn)));
        assert!(board.is_attacked(Square::new(4, 2), Side::Black));
        assert!(!board.is_attacked(Square::new(4, 5), Side::Black));
    }

    #[test]
    fn pawn_attacks_point_forward_only() {
        let mut board = Board::empty();
        board.set(Square::new(4, 4), Some(Piece::new(Side::White, PieceKind::Pawn)));
        // White moves toward row 0.
        assert!(board.is_attacked(Square::new(3, 3), Side::White));
        assert!(board.is_attacked(Square::new(3, 5), Side::White));
        assert!(!board.is_attacked(Square::new(5, 3), Side::White));
        assert!(!board.is_attacked(Square::new(3, 4), Side::White));
    }
}
