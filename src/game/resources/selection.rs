//! Selection resource: the two-click move accumulator.
//!
//! Pure click bookkeeping. The accumulator never touches the board;
//! it only matches click pairs against the legal-move list it is
//! handed, so a stale selection can never produce a stale move.

use bevy::prelude::*;
use chess_model::{Move, Square};

/// What a click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The pending square was clicked again; selection emptied.
    Cleared,
    /// The click became (or replaced) the pending first square.
    Pending(Square),
    /// The click pair named exactly one legal move.
    Candidate(Move),
}

/// Resource holding at most one pending first click.
#[derive(Resource, Debug, Default)]
pub struct Selection {
    pending: Option<Square>,
}

impl Selection {
    #[inline]
    pub fn pending(&self) -> Option<Square> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Feed one click into the accumulator.
    ///
    /// A second click resolves immediately: either it names exactly
    /// one legal move from the pending square, or the selection
    /// collapses to the new square as a fresh first click. Any square
    /// may be a first click; a square with no moves simply never
    /// resolves to a candidate.
    pub fn on_square_clicked(&mut self, square: Square, legal_moves: &[Move]) -> ClickOutcome {
        match self.pending {
            Some(prev) if prev == square => {
                self.pending = None;
                ClickOutcome::Cleared
            }
            Some(prev) => {
                let mut matches = legal_moves
                    .iter()
                    .filter(|m| m.from == prev && m.to == square);
                match (matches.next(), matches.next()) {
                    (Some(&mv), None) => {
                        self.pending = None;
                        ClickOutcome::Candidate(mv)
                    }
                    _ => {
                        self.pending = Some(square);
                        ClickOutcome::Pending(square)
                    }
                }
            }
            None => {
                self.pending = Some(square);
                ClickOutcome::Pending(square)
            }
        }
    }
}
