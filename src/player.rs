use alloc::string::String;
use log::warn;
use rand::rngs::SmallRng;

use crate::common::{AttackOutcome, EngineError, GridError, PlacementError};
use crate::config::{Coord, Difficulty, FLEET, MAX_FLEET_ATTEMPTS};
use crate::grid::Grid;
use crate::targeting::{Intent, TargetingEngine};

/// Interface implemented by the two sides of a match. Interactive players
/// live outside the crate and implement this by prompting.
pub trait Participant {
    /// Name recorded in the match summary.
    fn name(&self) -> &str;

    /// Place the whole fleet onto the provided grid.
    fn place_fleet(&mut self, rng: &mut SmallRng, grid: &mut Grid) -> Result<(), GridError>;

    /// Choose the next cell to fire at on the opponent grid.
    fn select_target(&mut self, rng: &mut SmallRng) -> Result<Coord, EngineError>;

    /// Inform the participant of the outcome of its last shot. `sunk_cells`
    /// holds the hull of a vessel that shot sank, and is empty otherwise.
    fn handle_outcome(
        &mut self,
        _coord: Coord,
        _outcome: AttackOutcome,
        _sunk_cells: &[Coord],
    ) {
    }
}

/// Automated participant: random fleet layout, hunt/target shots.
pub struct AiPlayer {
    name: String,
    engine: TargetingEngine,
    pending: Option<(Coord, Intent)>,
}

impl AiPlayer {
    pub fn new(name: impl Into<String>, difficulty: Difficulty, rng: &mut SmallRng) -> Self {
        Self {
            name: name.into(),
            engine: TargetingEngine::new(difficulty, rng),
            pending: None,
        }
    }

    pub fn engine(&self) -> &TargetingEngine {
        &self.engine
    }
}

impl Participant for AiPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn place_fleet(&mut self, rng: &mut SmallRng, grid: &mut Grid) -> Result<(), GridError> {
        for attempt in 1..=MAX_FLEET_ATTEMPTS {
            let mut fresh = Grid::new();
            let placed = FLEET
                .iter()
                .try_for_each(|&len| fresh.place_random(&mut *rng, len).map(|_| ()));
            match placed {
                Ok(()) => {
                    *grid = fresh;
                    return Ok(());
                }
                Err(GridError::InvalidPlacement(PlacementError::Exhausted)) => {
                    warn!(
                        "{}: fleet layout {} boxed itself in, retrying",
                        self.name, attempt
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Err(PlacementError::Exhausted.into())
    }

    fn select_target(&mut self, rng: &mut SmallRng) -> Result<Coord, EngineError> {
        let (coord, intent) = self.engine.select(rng)?;
        self.pending = Some((coord, intent));
        Ok(coord)
    }

    fn handle_outcome(&mut self, coord: Coord, outcome: AttackOutcome, sunk_cells: &[Coord]) {
        let intent = match self.pending.take() {
            Some((c, intent)) if c == coord => intent,
            _ => Intent::Seek,
        };
        self.engine.record(coord, intent, outcome, sunk_cells);
    }
}
