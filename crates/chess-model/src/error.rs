//! Error types for the board model.

use crate::types::Square;
use thiserror::Error;

/// Errors that can occur when constructing or querying model values.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Text did not parse as a board coordinate
    #[error("not a square: {text:?}")]
    BadSquare { text: String },

    /// A move named a source square with no piece on it
    #[error("no piece on {square}")]
    NoPieceAt { square: Square },

    /// A move named a source square held by the side not to move
    #[error("piece on {square} does not belong to the side to move")]
    WrongSide { square: Square },
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
