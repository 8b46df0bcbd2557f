//! One participant's sea: placed vessels plus hit and miss marks.

use alloc::vec::Vec;
use core::fmt;
use log::{debug, info};
use rand::Rng;

use crate::common::{AttackOutcome, CellState, GridError, PlacementError, VesselId};
use crate::config::{Coord, BB, GRID_SIZE, MAX_HULL_LENGTH, MAX_PLACEMENT_ATTEMPTS};
use crate::vessel::{Orientation, Vessel};

/// A 10×10 grid. Cell state is always derived from the occupancy, hit and
/// miss masks; vessels never touch, diagonals included.
#[derive(Clone, Default)]
pub struct Grid {
    vessels: Vec<Vessel>,
    occupied: BB,
    hits: BB,
    misses: BB,
}

impl Grid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Place a fully formed vessel. Nothing changes on failure.
    pub fn place(&mut self, vessel: Vessel) -> Result<VesselId, GridError> {
        if !(self.hits | self.misses).is_empty() {
            return Err(PlacementError::PlacementClosed.into());
        }
        let mask = vessel.mask();
        if !(self.occupied & mask).is_empty() {
            return Err(PlacementError::Overlap.into());
        }
        if !(self.occupied & mask.neighborhood()).is_empty() {
            return Err(PlacementError::Adjacent.into());
        }
        self.occupied |= mask;
        let id = VesselId(self.vessels.len());
        debug!("placed {} at {:?}", vessel.class(), vessel.cells());
        self.vessels.push(vessel);
        Ok(id)
    }

    /// Build and place a hull of `length` from `anchor`.
    pub fn place_vessel(
        &mut self,
        length: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<VesselId, GridError> {
        let vessel = Vessel::new(length, anchor, orientation)?;
        self.place(vessel)
    }

    /// Place a hull of `length` at a random legal position, sampling up to
    /// [`MAX_PLACEMENT_ATTEMPTS`] anchors.
    pub fn place_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        length: usize,
    ) -> Result<VesselId, GridError> {
        if length == 0 {
            return Err(PlacementError::ZeroLength.into());
        }
        if length > MAX_HULL_LENGTH {
            return Err(PlacementError::TooLong.into());
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orientation {
                Orientation::Horizontal => (GRID_SIZE - 1, GRID_SIZE - length),
                Orientation::Vertical => (GRID_SIZE - length, GRID_SIZE - 1),
            };
            let anchor = (rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            match self.place_vessel(length, anchor, orientation) {
                Ok(id) => return Ok(id),
                Err(GridError::InvalidPlacement(
                    PlacementError::Overlap | PlacementError::Adjacent,
                )) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(PlacementError::Exhausted.into())
    }

    /// Fire at `coord`. Rejected shots leave the grid untouched.
    pub fn attack(&mut self, coord: Coord) -> AttackOutcome {
        let (row, col) = coord;
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return AttackOutcome::OutOfBounds;
        }
        if self.hits.contains(row, col) || self.misses.contains(row, col) {
            return AttackOutcome::AlreadyAttacked;
        }
        let struck = self
            .vessels
            .iter_mut()
            .enumerate()
            .find(|(_, v)| v.occupies(coord));
        match struck {
            Some((idx, vessel)) => {
                vessel.strike(coord);
                let _ = self.hits.set(row, col);
                let sunk = vessel.is_sunk();
                if sunk {
                    info!("{} sunk at {:?}", vessel.class(), vessel.cells());
                }
                AttackOutcome::Hit {
                    vessel: VesselId(idx),
                    length: vessel.length(),
                    sunk,
                }
            }
            None => {
                let _ = self.misses.set(row, col);
                AttackOutcome::Miss
            }
        }
    }

    /// [`Grid::attack`] with rejected shots reported as errors.
    pub fn try_attack(&mut self, coord: Coord) -> Result<AttackOutcome, GridError> {
        match self.attack(coord) {
            AttackOutcome::OutOfBounds => Err(GridError::InvalidCoordinate(coord)),
            AttackOutcome::AlreadyAttacked => Err(GridError::DuplicateAttack(coord)),
            outcome => Ok(outcome),
        }
    }

    /// Returns `true` when every placed vessel is sunk; vacuously true for an
    /// empty grid.
    pub fn all_sunk(&self) -> bool {
        self.vessels.iter().all(Vessel::is_sunk)
    }

    /// Number of vessels still afloat.
    pub fn remaining(&self) -> usize {
        self.vessels.iter().filter(|v| !v.is_sunk()).count()
    }

    /// State of a cell, or `None` when `coord` is off the grid.
    pub fn cell(&self, coord: Coord) -> Option<CellState> {
        let (row, col) = coord;
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        let state = if self.hits.contains(row, col) {
            CellState::Hit
        } else if self.misses.contains(row, col) {
            CellState::Miss
        } else if self.occupied.contains(row, col) {
            CellState::Occupied
        } else {
            CellState::Empty
        };
        Some(state)
    }

    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    pub fn vessel(&self, id: VesselId) -> Option<&Vessel> {
        self.vessels.get(id.0)
    }

    /// Occupancy mask of all vessels.
    pub fn occupied(&self) -> BB {
        self.occupied
    }

    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn misses(&self) -> BB {
        self.misses
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid {{\n  occupied: {:?},\n  hits: {:?},\n  misses: {:?},\n  vessels: {:?}\n}}",
            self.occupied, self.hits, self.misses, self.vessels
        )
    }
}
