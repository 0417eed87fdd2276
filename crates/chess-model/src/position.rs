//! Game position: board plus side to move, move history and the
//! en-passant window, with apply/undo and terminal detection.

use crate::board::Board;
use crate::error::{ModelError, ModelResult};
use crate::move_gen::pseudo_legal_moves;
use crate::types::{Move, MoveFlag, Piece, PieceKind, Side, Square};

/// Complete game state. Cloning takes a value snapshot; the search
/// runs on such a snapshot and never touches the live position.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    side_to_move: Side,
    move_log: Vec<Move>,
    /// Landing square of a hypothetical en-passant capture, set only
    /// on the move immediately after a double push.
    ep_target: Option<Square>,
    /// One entry per applied move, so undo can restore the window.
    ep_history: Vec<Option<Square>>,
}

impl Position {
    pub fn new() -> Position {
        Position {
            board: Board::initial(),
            side_to_move: Side::White,
            move_log: Vec::new(),
            ep_target: None,
            ep_history: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Side::White
    }

    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    #[inline]
    pub fn material_score(&self) -> i32 {
        self.board.material_score()
    }

    /// Apply a move produced by [`Position::legal_moves`]. The only
    /// validation is that the named piece is still where the move says
    /// it is; full legality is the generator's job.
    pub fn apply(&mut self, mv: Move) -> ModelResult<()> {
        match self.board.piece_at(mv.from) {
            None => return Err(ModelError::NoPieceAt { square: mv.from }),
            Some(piece) if piece.side != self.side_to_move => {
                return Err(ModelError::WrongSide { square: mv.from })
            }
            Some(_) => {}
        }

        if let Some(victim_sq) = mv.capture_square() {
            self.board.set(victim_sq, None);
        }
        self.board.set(mv.from, None);
        let landed = match mv.flag {
            MoveFlag::Promotion => Piece::new(mv.piece.side, PieceKind::Queen),
            _ => mv.piece,
        };
        self.board.set(mv.to, Some(landed));

        self.ep_history.push(self.ep_target);
        self.ep_target = match mv.flag {
            MoveFlag::DoublePush => mv.from.offset(mv.piece.side.forward(), 0),
            _ => None,
        };

        self.move_log.push(mv);
        self.side_to_move = self.side_to_move.opponent();
        Ok(())
    }

    /// Take back the most recent move. Returns it, or `None` on an
    /// empty log.
    pub fn undo_last(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;
        self.board.set(mv.to, None);
        self.board.set(mv.from, Some(mv.piece));
        if let (Some(victim), Some(victim_sq)) = (mv.capture, mv.capture_square()) {
            self.board.set(victim_sq, Some(victim));
        }
        self.ep_target = self.ep_history.pop().flatten();
        self.side_to_move = self.side_to_move.opponent();
        Some(mv)
    }

    /// All legal moves for the side to move. Pseudo-legal moves are
    /// probed on a scratch copy and kept only if the mover's king is
    /// safe afterwards.
    pub fn legal_moves(&self) -> Vec<Move> {
        let side = self.side_to_move;
        let mut probe = self.clone();
        pseudo_legal_moves(&self.board, side, self.ep_target)
            .into_iter()
            .filter(|&mv| {
                // apply cannot fail here: the move was generated from
                // this exact board.
                let ok = probe.apply(mv).is_ok() && !probe.in_check(side);
                probe.undo_last();
                ok
            })
            .collect()
    }

    pub fn in_check(&self, side: Side) -> bool {
        match self.board.king_square(side) {
            Some(king) => self.board.is_attacked(king, side.opponent()),
            None => false,
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    #[inline]
    pub fn ep_target(&self) -> Option<Square> {
        self.ep_target
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_move(pos: &Position, from: &str, to: &str) -> Move {
        let from = Square::from_algebraic(from).unwrap();
        let to = Square::from_algebraic(to).unwrap();
        pos.legal_moves()
            .into_iter()
            .find(|m| m.from == from && m.to == to)
            .unwrap_or_else(|| panic!("no move {from}{to}"))
    }

    #[test]
    fn apply_flips_side_and_extends_log() {
        let mut pos = Position::new();
        let mv = find_move(&pos, "e2", "e4");
        pos.apply(mv).unwrap();
        assert_eq!(pos.side_to_move(), Side::Black);
        assert_eq!(pos.move_log().len(), 1);
    }

    #[test]
    fn undo_restores_the_previous_position() {
        let mut pos = Position::new();
        let snapshot = pos.clone();
        let mv = find_move(&pos, "g1", "f3");
        pos.apply(mv).unwrap();
        assert_eq!(pos.undo_last(), Some(mv));
        assert_eq!(pos.board(), snapshot.board());
        assert_eq!(pos.side_to_move(), Side::White);
        assert!(pos.move_log().is_empty());
    }

    #[test]
    fn undo_on_empty_log_is_a_no_op() {
        let mut pos = Position::new();
        assert_eq!(pos.undo_last(), None);
        assert_eq!(pos.move_log().len(), 0);
    }

    #[test]
    fn en_passant_window_opens_and_closes() {
        let mut pos = Position::new();
        pos.apply(find_move(&pos, "e2", "e4")).unwrap();
        assert_eq!(pos.ep_target(), Some(Square::from_algebraic("e3").unwrap()));
        pos.apply(find_move(&pos, "g8", "f6")).unwrap();
        assert_eq!(pos.ep_target(), None);
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let mut pos = Position::new();
        pos.apply(find_move(&pos, "e2", "e4")).unwrap();
        pos.apply(find_move(&pos, "a7", "a6")).unwrap();
        pos.apply(find_move(&pos, "e4", "e5")).unwrap();
        pos.apply(find_move(&pos, "d7", "d5")).unwrap();
        let ep = find_move(&pos, "e5", "d6");
        assert_eq!(ep.flag, MoveFlag::EnPassant);
        pos.apply(ep).unwrap();
        let d5 = Square::from_algebraic("d5").unwrap();
        assert_eq!(pos.board().piece_at(d5), None);

        pos.undo_last();
        assert_eq!(
            pos.board().piece_at(d5),
            Some(Piece::new(Side::Black, PieceKind::Pawn))
        );
    }

    #[test]
    fn promotion_lands_a_queen_and_undoes_to_a_pawn() {
        let mut pos = Position::new();
        // March the a-pawn through Black's queenside.
        for (from, to) in [
            ("a2", "a4"), ("h7", "h6"),
            ("a4", "a5"), ("h6", "h5"),
            ("a5", "a6"), ("h5", "h4"),
            ("a6", "b7"), ("h4", "h3"),
        ] {
            pos.apply(find_move(&pos, from, to)).unwrap();
        }
        let promo = find_move(&pos, "b7", "a8");
        assert_eq!(promo.flag, MoveFlag::Promotion);
        pos.apply(promo).unwrap();
        let a8 = Square::from_algebraic("a8").unwrap();
        assert_eq!(
            pos.board().piece_at(a8),
            Some(Piece::new(Side::White, PieceKind::Queen))
        );
        pos.undo_last();
        let b7 = Square::from_algebraic("b7").unwrap();
        assert_eq!(
            pos.board().piece_at(b7),
            Some(Piece::new(Side::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn legal_moves_never_leave_the_king_in_check() {
        // After 1.e4 f6 2.Qh5+ Black is in check; every reply must
        // resolve it.
        let mut pos = Position::new();
        pos.apply(find_move(&pos, "e2", "e4")).unwrap();
        pos.apply(find_move(&pos, "f7", "f6")).unwrap();
        pos.apply(find_move(&pos, "d1", "h5")).unwrap();
        assert!(pos.in_check(Side::Black));
        let replies = pos.legal_moves();
        assert!(!replies.is_empty());
        for mv in replies {
            pos.apply(mv).unwrap();
            assert!(!pos.in_check(Side::Black), "{mv} leaves the king in check");
            pos.undo_last();
        }
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut pos = Position::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            pos.apply(find_move(&pos, from, to)).unwrap();
        }
        assert!(pos.is_checkmate());
        assert!(!pos.is_stalemate());
        assert!(pos.legal_moves().is_empty());
    }

    #[test]
    fn apply_rejects_stale_moves() {
        let mut pos = Position::new();
        let mv = find_move(&pos, "e2", "e4");
        pos.apply(mv).unwrap();
        assert!(matches!(
            pos.apply(mv),
            Err(ModelError::NoPieceAt { .. })
        ));
    }
}
