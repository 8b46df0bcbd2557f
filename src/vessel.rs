//! Vessel footprint and damage tracking.

use alloc::vec::Vec;
use core::fmt;

use crate::common::PlacementError;
use crate::config::{vessel_class, Coord, BB, GRID_SIZE, MAX_HULL_LENGTH};

/// Orientation of a hull on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A hull laid out on a straight line of cells. The footprint never changes
/// after construction; only the hit set grows.
#[derive(Clone, PartialEq, Eq)]
pub struct Vessel {
    cells: Vec<Coord>,
    mask: BB,
    hits: BB,
}

impl Vessel {
    /// Lay a hull of 1 to [`MAX_HULL_LENGTH`] cells from `anchor`, extending
    /// right for horizontal and down for vertical orientation.
    pub fn new(
        length: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<Self, PlacementError> {
        if length == 0 {
            return Err(PlacementError::ZeroLength);
        }
        if length > MAX_HULL_LENGTH {
            return Err(PlacementError::TooLong);
        }
        let (row, col) = anchor;
        let ends_inside =
            |start: usize| start.checked_add(length).is_some_and(|end| end <= GRID_SIZE);
        let fits = match orientation {
            Orientation::Horizontal => row < GRID_SIZE && ends_inside(col),
            Orientation::Vertical => col < GRID_SIZE && ends_inside(row),
        };
        if !fits {
            return Err(PlacementError::OutOfBounds);
        }

        let cells: Vec<Coord> = (0..length)
            .map(|i| match orientation {
                Orientation::Horizontal => (row, col + i),
                Orientation::Vertical => (row + i, col),
            })
            .collect();
        let mask =
            BB::from_iter(cells.iter().copied()).map_err(|_| PlacementError::OutOfBounds)?;
        Ok(Vessel {
            cells,
            mask,
            hits: BB::new(),
        })
    }

    /// Record a strike at `coord`. Returns `false` when the cell is not part
    /// of this hull. Striking the same cell twice counts once.
    pub fn strike(&mut self, coord: Coord) -> bool {
        if self.mask.contains(coord.0, coord.1) {
            let _ = self.hits.set(coord.0, coord.1);
            true
        } else {
            false
        }
    }

    pub fn length(&self) -> usize {
        self.cells.len()
    }

    /// Occupied cells, ordered from the anchor outward.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn occupies(&self, coord: Coord) -> bool {
        self.mask.contains(coord.0, coord.1)
    }

    /// Occupancy mask of the hull.
    pub fn mask(&self) -> BB {
        self.mask
    }

    /// Cells struck so far.
    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn hit_count(&self) -> usize {
        self.hits.count_ones()
    }

    pub fn is_sunk(&self) -> bool {
        self.hit_count() == self.length()
    }

    pub fn class(&self) -> &'static str {
        vessel_class(self.length())
    }
}

impl fmt::Debug for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vessel {{ class: \"{}\", cells: {:?}, hits: {} }}",
            self.class(),
            self.cells,
            self.hit_count(),
        )
    }
}
