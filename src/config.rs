use core::time::Duration;

use crate::bitboard::BitBoard;

/// Side length of every grid.
pub const GRID_SIZE: usize = 10;

/// Zero-indexed `(row, col)` cell address.
pub type Coord = (usize, usize);

/// Cell set covering one grid.
pub type BB = BitBoard<u128, GRID_SIZE>;

/// Hull lengths of the standard fleet, placed largest first.
pub const FLEET: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Longest hull a grid accepts.
pub const MAX_HULL_LENGTH: usize = 5;

/// Random anchor/orientation samples tried per hull before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Fresh-grid retries for a whole automated fleet.
pub const MAX_FLEET_ATTEMPTS: usize = 20;

/// Display class of a hull by length.
pub fn vessel_class(length: usize) -> &'static str {
    match length {
        1 => "Patrol Boat",
        2 => "Destroyer",
        3 => "Cruiser",
        4 => "Battleship",
        5 => "Carrier",
        _ => "Vessel",
    }
}

/// Skill tier of an automated participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(clap::ValueEnum, serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Chance per turn of ignoring an active streak and drawing a random cell.
    pub fn randomization(self) -> f64 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 0.25,
            Difficulty::Hard => 0.0,
        }
    }

    /// Delay before an automated shot is revealed. Only the interface layer
    /// waits on this.
    pub fn pacing(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(1200),
            Difficulty::Medium => Duration::from_millis(800),
            Difficulty::Hard => Duration::from_millis(400),
        }
    }
}
