//! Robot opponent configuration.

use bevy::prelude::*;
use chess_model::{SearchLimits, Side};

/// How hard the robot thinks. Maps onto concrete search limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    /// Shallow and fast; suitable for tests and casual play.
    Casual,
    #[default]
    Standard,
    Strong,
}

impl Difficulty {
    pub fn limits(self) -> SearchLimits {
        match self {
            Difficulty::Casual => SearchLimits { max_depth: 2, time_budget_ms: 300 },
            Difficulty::Standard => SearchLimits { max_depth: 3, time_budget_ms: 1_500 },
            Difficulty::Strong => SearchLimits { max_depth: 5, time_budget_ms: 5_000 },
        }
    }
}

/// Which side the robot plays and at what strength. The human plays
/// White by default.
#[derive(Resource, Debug, Clone, Copy)]
pub struct OpponentConfig {
    pub robot_side: Side,
    pub difficulty: Difficulty,
}

impl Default for OpponentConfig {
    fn default() -> OpponentConfig {
        OpponentConfig {
            robot_side: Side::Black,
            difficulty: Difficulty::default(),
        }
    }
}
