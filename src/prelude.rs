//! Commonly used types and utilities for ease of import.

pub use crate::{
    is_match_over, AiPlayer, AttackOutcome, Coord, Difficulty, Grid, Match, Orientation,
    Participant, Side, TargetingEngine, Vessel,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, MatchSummary};
