//! Session resources: board seam, selection, turn phase, opponent.

pub mod board;
pub mod opponent;
pub mod selection;
pub mod turn;

pub use board::{BoardModel, LegalMoves};
pub use opponent::{Difficulty, OpponentConfig};
pub use selection::{ClickOutcome, Selection};
pub use turn::{TurnPhase, TurnState};
