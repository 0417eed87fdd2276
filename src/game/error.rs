//! Error types for the session controller.

/// Errors that can occur while driving the session
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The board model refused a move the controller tried to commit
    #[error("move rejected by the board model: {0}")]
    MoveRejected(#[from] chess_model::ModelError),

    /// The search produced nothing and the legal-move list was empty
    #[error("no legal move available for the robot")]
    NoRobotMove,
}

/// Result type alias for session operations
pub type GameResult<T> = Result<T, GameError>;
