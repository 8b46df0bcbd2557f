//! Common types: attack outcomes, cell states and the error taxonomy.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::config::{Coord, MAX_HULL_LENGTH};

/// Index of a vessel within the grid that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VesselId(pub usize);

/// Result of firing at a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Coordinate lies outside the grid; nothing changed.
    OutOfBounds,
    /// Cell was already resolved as a hit or miss; nothing changed.
    AlreadyAttacked,
    /// Shot landed in open water.
    Miss,
    /// Shot struck a vessel. `sunk` reflects the vessel after this hit.
    Hit {
        vessel: VesselId,
        length: usize,
        sunk: bool,
    },
}

impl AttackOutcome {
    /// True for outcomes that marked the cell (hit or miss).
    pub fn is_resolved(&self) -> bool {
        matches!(self, AttackOutcome::Miss | AttackOutcome::Hit { .. })
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, AttackOutcome::Hit { .. })
    }

    /// The vessel sunk by this shot, if any.
    pub fn sunk_vessel(&self) -> Option<VesselId> {
        match *self {
            AttackOutcome::Hit {
                vessel, sunk: true, ..
            } => Some(vessel),
            _ => None,
        }
    }
}

/// Observable state of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Occupied,
    Hit,
    Miss,
}

/// Reasons a placement is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Hull length must be positive.
    ZeroLength,
    /// Hull is longer than [`MAX_HULL_LENGTH`].
    TooLong,
    /// Part of the hull falls off the grid.
    OutOfBounds,
    /// Hull shares a cell with a placed vessel.
    Overlap,
    /// Hull touches a placed vessel, diagonals included.
    Adjacent,
    /// Attacks have been recorded, so the fleet is fixed.
    PlacementClosed,
    /// Random placement ran out of attempts.
    Exhausted,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::ZeroLength => write!(f, "hull length must be at least 1"),
            PlacementError::TooLong => {
                write!(f, "hull length must be at most {}", MAX_HULL_LENGTH)
            }
            PlacementError::OutOfBounds => write!(f, "hull does not fit on the grid"),
            PlacementError::Overlap => write!(f, "hull overlaps another vessel"),
            PlacementError::Adjacent => write!(f, "hull touches another vessel"),
            PlacementError::PlacementClosed => write!(f, "placement phase is over"),
            PlacementError::Exhausted => write!(f, "no free position found for hull"),
        }
    }
}

/// Errors returned by grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    InvalidPlacement(PlacementError),
    /// Attack target lies outside the grid.
    InvalidCoordinate(Coord),
    /// Attack target was already resolved.
    DuplicateAttack(Coord),
    /// Underlying bitboard error.
    BitBoard(BitBoardError),
}

impl From<PlacementError> for GridError {
    fn from(err: PlacementError) -> Self {
        GridError::InvalidPlacement(err)
    }
}

impl From<BitBoardError> for GridError {
    fn from(err: BitBoardError) -> Self {
        GridError::BitBoard(err)
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidPlacement(e) => write!(f, "invalid placement: {}", e),
            GridError::InvalidCoordinate((r, c)) => {
                write!(f, "coordinate ({}, {}) is out of bounds", r, c)
            }
            GridError::DuplicateAttack((r, c)) => {
                write!(f, "coordinate ({}, {}) was already attacked", r, c)
            }
            GridError::BitBoard(e) => write!(f, "bitboard error: {}", e),
        }
    }
}

/// Faults of the targeting engine. These indicate broken bookkeeping, not a
/// rule violation, and should end the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Untried pool and streak are both exhausted.
    NoMovesAvailable,
    /// A pursuit anchor lies outside the grid.
    OffGrid(Coord),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoMovesAvailable => {
                write!(f, "targeting engine has no untried cells left")
            }
            EngineError::OffGrid((r, c)) => {
                write!(f, "pursuit anchor ({}, {}) is off the grid", r, c)
            }
        }
    }
}

/// Errors surfaced by the match controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    Grid(GridError),
    Engine(EngineError),
    /// A winner was already declared.
    MatchOver,
    /// The configured turn ceiling was reached without a winner.
    TurnLimit(usize),
}

impl From<GridError> for MatchError {
    fn from(err: GridError) -> Self {
        MatchError::Grid(err)
    }
}

impl From<EngineError> for MatchError {
    fn from(err: EngineError) -> Self {
        MatchError::Engine(err)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Grid(e) => write!(f, "{}", e),
            MatchError::Engine(e) => write!(f, "engine fault: {}", e),
            MatchError::MatchOver => write!(f, "match is already over"),
            MatchError::TurnLimit(n) => write!(f, "no winner after {} turns", n),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for GridError {}
#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
#[cfg(feature = "std")]
impl std::error::Error for MatchError {}
