//! Core chess types: sides, pieces, squares and moves.
//!
//! The board is an 8x8 mailbox of `Option<Piece>`. Rows run top-down
//! from Black's back rank (row 0) to White's back rank (row 7), so a
//! White move decreases the row index. Columns run left-right from the
//! a-file (col 0) to the h-file (col 7).

use crate::error::ModelError;
use std::fmt;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a forward pawn step for this side.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Back rank row for this side.
    #[inline]
    pub fn home_row(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    /// Promotion row for this side's pawns.
    #[inline]
    pub fn promotion_row(self) -> u8 {
        self.opponent().home_row()
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

/// Piece type, independent of side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material value in pawn units. The king carries none; losing it
    /// is handled by checkmate detection, not by evaluation.
    #[inline]
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub fn new(side: Side, kind: PieceKind) -> Piece {
        Piece { side, kind }
    }

    /// Two-character code, e.g. `wP` or `bQ`.
    pub fn code(self) -> String {
        let s = match self.side {
            Side::White => 'w',
            Side::Black => 'b',
        };
        let k = match self.kind {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        format!("{s}{k}")
    }
}

/// A board coordinate. Both components are always in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Build a square, panicking on out-of-range coordinates. Use
    /// [`Square::offset`] for arithmetic that may leave the board.
    #[inline]
    pub fn new(row: u8, col: u8) -> Square {
        assert!(row < 8 && col < 8, "square ({row}, {col}) off board");
        Square { row, col }
    }

    /// Apply a (row, col) delta, returning `None` off the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// Parse algebraic notation, e.g. `"e4"`.
    pub fn from_algebraic(text: &str) -> Result<Square, ModelError> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(ModelError::BadSquare { text: text.to_string() });
        }
        let col = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if col >= 8 || rank >= 8 {
            return Err(ModelError::BadSquare { text: text.to_string() });
        }
        Ok(Square { row: 7 - rank, col })
    }

    /// Algebraic notation, e.g. `"e4"`.
    pub fn algebraic(self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = (b'1' + (7 - self.row)) as char;
        format!("{file}{rank}")
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.algebraic())
    }
}

/// Distinguishes moves whose application or display differs from a
/// plain piece relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveFlag {
    #[default]
    Normal,
    /// Pawn two-square advance; opens an en-passant window.
    DoublePush,
    /// En-passant capture; the captured pawn is not on `to`.
    EnPassant,
    /// Pawn reaching the last rank; always promotes to a queen.
    Promotion,
}

/// A single move, carrying enough context to undo itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    /// Captured piece, if any. For en passant this is the pawn on the
    /// adjacent square, not a piece on `to`.
    pub capture: Option<Piece>,
    pub flag: MoveFlag,
}

impl Move {
    /// Square the captured piece actually occupies, when there is one.
    #[inline]
    pub fn capture_square(&self) -> Option<Square> {
        self.capture.map(|_| match self.flag {
            MoveFlag::EnPassant => Square { row: self.from.row, col: self.to.col },
            _ => self.to,
        })
    }

    /// Coordinate notation, e.g. `"e2e4"`.
    pub fn notation(&self) -> String {
        format!("{}{}", self.from.algebraic(), self.to.algebraic())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_round_trip() {
        for text in ["a1", "h8", "e4", "d5"] {
            let sq = Square::from_algebraic(text).unwrap();
            assert_eq!(sq.algebraic(), text);
        }
    }

    #[test]
    fn algebraic_rejects_garbage() {
        for text in ["", "e", "e9", "i4", "e44"] {
            assert!(Square::from_algebraic(text).is_err(), "{text}");
        }
    }

    #[test]
    fn white_back_rank_is_row_seven() {
        assert_eq!(Square::from_algebraic("e1").unwrap(), Square::new(7, 4));
        assert_eq!(Square::from_algebraic("e8").unwrap(), Square::new(0, 4));
    }

    #[test]
    fn en_passant_capture_square_sits_beside_the_mover() {
        let mv = Move {
            from: Square::new(3, 4),
            to: Square::new(2, 3),
            piece: Piece::new(Side::White, PieceKind::Pawn),
            capture: Some(Piece::new(Side::Black, PieceKind::Pawn)),
            flag: MoveFlag::EnPassant,
        };
        assert_eq!(mv.capture_square(), Some(Square::new(3, 3)));
    }
}
