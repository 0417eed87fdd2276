//! Turn phase state machine.
//!
//! Exactly one phase is active at a time and every change goes through
//! [`TurnState::transition_to`], which validates the edge. An invalid
//! transition is a logic error: debug builds panic on it, release
//! builds log and proceed so a shipped game does not crash.

use bevy::prelude::*;

/// Where the session currently is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TurnPhase {
    /// Waiting for the human to click, or for the search spawner to
    /// pick up the robot's turn.
    #[default]
    AwaitingInput,

    /// A search task is running for the robot's move.
    SearchInFlight,

    /// A committed move is being played back; input and search
    /// results are held off until the playback finishes.
    Animating,

    /// Checkmate or stalemate was reached. Only a reset leaves this
    /// phase.
    GameOver,
}

impl TurnPhase {
    /// Whether clicks are consumed in this phase.
    pub fn accepts_input(self) -> bool {
        self == TurnPhase::AwaitingInput
    }
}

/// Resource holding the active [`TurnPhase`].
#[derive(Resource, Debug, Default)]
pub struct TurnState {
    phase: TurnPhase,
}

impl TurnState {
    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Move to `next`. Re-entering the current phase is a no-op;
    /// any other edge outside the table below is a logic error.
    pub fn transition_to(&mut self, next: TurnPhase) {
        use TurnPhase::*;
        let valid = match (self.phase, next) {
            (from, to) if from == to => true,
            (AwaitingInput, SearchInFlight) => true, // search spawned
            (AwaitingInput, Animating) => true,      // human move committed
            (AwaitingInput, GameOver) => true,       // terminal detected
            (SearchInFlight, Animating) => true,     // robot move committed
            (SearchInFlight, AwaitingInput) => true, // search cancelled
            (SearchInFlight, GameOver) => true,      // terminal detected
            (Animating, AwaitingInput) => true,      // playback done
            (Animating, GameOver) => true,           // playback done, terminal
            (GameOver, AwaitingInput) => true,       // reset
            _ => false,
        };

        if !valid {
            error!(
                "[TURN] Invalid phase transition: {:?} -> {:?}",
                self.phase, next
            );
            #[cfg(debug_assertions)]
            panic!("invalid phase transition: {:?} -> {:?}", self.phase, next);
        }

        self.phase = next;
    }
}
