//! Board model seam: the live position plus the legal-move cache.

use bevy::prelude::*;
use chess_model::{Move, Position, Side, Square};

/// Resource wrapping the live [`Position`]. Systems mutate it only
/// through the commit, undo and reset paths, each of which refreshes
/// [`LegalMoves`] afterwards.
#[derive(Resource, Debug, Default)]
pub struct BoardModel {
    pub position: Position,
}

impl BoardModel {
    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.position.side_to_move()
    }
}

/// Cached legal moves for the current position.
///
/// Refreshed after every board mutation, so every system within a
/// tick sees the same list. Starts empty; the session startup system
/// fills it before the first tick runs game logic.
#[derive(Resource, Debug, Default)]
pub struct LegalMoves {
    moves: Vec<Move>,
}

impl LegalMoves {
    pub fn refresh(&mut self, position: &Position) {
        self.moves = position.legal_moves();
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Legal destinations from one square, for target highlighting.
    pub fn targets_from(&self, from: Square) -> Vec<Square> {
        self.moves
            .iter()
            .filter(|m| m.from == from)
            .map(|m| m.to)
            .collect()
    }
}
