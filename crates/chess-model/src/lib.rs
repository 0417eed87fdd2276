//! # chess-model
//!
//! Board model and move search behind the session controller:
//! piece placement, legal move generation (including en passant,
//! double pushes and auto-queen promotion), apply/undo with a full
//! move log, checkmate and stalemate detection, material scoring, and
//! a cancellable alpha-beta search with a uniform random fallback.
//!
//! Castling and draw rules beyond stalemate are out of scope.

pub mod board;
pub mod error;
pub mod move_gen;
pub mod position;
pub mod search;
pub mod types;

pub use board::Board;
pub use error::{ModelError, ModelResult};
pub use position::Position;
pub use search::{best_move, random_legal_move, SearchLimits};
pub use types::{Move, MoveFlag, Piece, PieceKind, Side, Square};
