//! Pseudo-legal move generation.
//!
//! Generates every move that obeys piece movement rules, including
//! double pushes, en passant and promotions, without checking whether
//! the mover's king is left in check. [`Position`](crate::Position)
//! applies that filter.
//!
//! Castling is deliberately absent from this model.

use crate::board::Board;
use crate::types::{Move, MoveFlag, Piece, PieceKind, Side, Square};

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

/// Generate all pseudo-legal moves for `side`. `ep_target` is the
/// square a capturing pawn would land on, set only on the move
/// immediately after an enemy double push.
pub fn pseudo_legal_moves(
    board: &Board,
    side: Side,
    ep_target: Option<Square>,
) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for row in 0..8 {
        for col in 0..8 {
            let from = Square::new(row, col);
            let Some(piece) = board.piece_at(from) else { continue };
            if piece.side != side {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => pawn_moves(board, from, piece, ep_target, &mut moves),
                PieceKind::Knight => step_moves(board, from, piece, &KNIGHT_JUMPS, &mut moves),
                PieceKind::King => step_moves(board, from, piece, &KING_STEPS, &mut moves),
                PieceKind::Rook => slide_moves(board, from, piece, &ROOK_RAYS, &mut moves),
                PieceKind::Bishop => slide_moves(board, from, piece, &BISHOP_RAYS, &mut moves),
                PieceKind::Queen => {
                    slide_moves(board, from, piece, &ROOK_RAYS, &mut moves);
                    slide_moves(board, from, piece, &BISHOP_RAYS, &mut moves);
                }
            }
        }
    }
    moves
}

fn pawn_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    ep_target: Option<Square>,
    moves: &mut Vec<Move>,
) {
    let side = piece.side;
    let forward = side.forward();

    if let Some(one) = from.offset(forward, 0) {
        if board.piece_at(one).is_none() {
            push_pawn_move(from, one, piece, None, MoveFlag::Normal, moves);
            // Double push only from the pawn's starting row.
            let start_row = match side {
                Side::White => 6,
                Side::Black => 1,
            };
            if from.row == start_row {
                if let Some(two) = from.offset(2 * forward, 0) {
                    if board.piece_at(two).is_none() {
                        moves.push(Move {
                            from,
                            to: two,
                            piece,
                            capture: None,
                            flag: MoveFlag::DoublePush,
                        });
                    }
                }
            }
        }
    }

    for dc in [-1i8, 1] {
        let Some(to) = from.offset(forward, dc) else { continue };
        if let Some(victim) = board.piece_at(to) {
            if victim.side != side {
                push_pawn_move(from, to, piece, Some(victim), MoveFlag::Normal, moves);
            }
        } else if Some(to) == ep_target {
            let victim_sq = Square::new(from.row, to.col);
            if let Some(victim) = board.piece_at(victim_sq) {
                moves.push(Move {
                    from,
                    to,
                    piece,
                    capture: Some(victim),
                    flag: MoveFlag::EnPassant,
                });
            }
        }
    }
}

/// Forward steps and ordinary captures share the promotion check.
fn push_pawn_move(
    from: Square,
    to: Square,
    piece: Piece,
    capture: Option<Piece>,
    flag: MoveFlag,
    moves: &mut Vec<Move>,
) {
    let flag = if to.row == piece.side.promotion_row() {
        MoveFlag::Promotion
    } else {
        flag
    };
    moves.push(Move { from, to, piece, capture, flag });
}

fn step_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    steps: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in steps {
        let Some(to) = from.offset(dr, dc) else { continue };
        match board.piece_at(to) {
            None => moves.push(Move {
                from,
                to,
                piece,
                capture: None,
                flag: MoveFlag::Normal,
            }),
            Some(victim) if victim.side != piece.side => moves.push(Move {
                from,
                to,
                piece,
                capture: Some(victim),
                flag: MoveFlag::Normal,
            }),
            Some(_) => {}
        }
    }
}

fn slide_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    rays: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in rays {
        let mut sq = from;
        while let Some(to) = sq.offset(dr, dc) {
            sq = to;
            match board.piece_at(to) {
                None => moves.push(Move {
                    from,
                    to,
                    piece,
                    capture: None,
                    flag: MoveFlag::Normal,
                }),
                Some(victim) => {
                    if victim.side != piece.side {
                        moves.push(Move {
                            from,
                            to,
                            piece,
                            capture: Some(victim),
                            flag: MoveFlag::Normal,
                        });
                    }
                    break;
                }
            }
        }
    }
}
