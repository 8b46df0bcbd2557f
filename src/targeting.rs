//! Hunt/target shot selection for the automated participant.
//!
//! The engine alternates between two modes:
//!
//! * **Seek**: draw the next cell from a pool shuffled once at construction.
//! * **Pursue**: a vessel was hit but not sunk. Probe outward from the first
//!   hit (the anchor), either along a locked direction or by cycling the four
//!   unit directions until one extends the streak.
//!
//! When a vessel sinks, every cell around it is dropped from the pool: no
//! other vessel may touch it, so those cells are certain misses.
//!
//! The engine learns only from the outcomes handed to
//! [`TargetingEngine::record`], plus the hull of any vessel it sinks. It never
//! reads the opponent's occupancy or marks.

use alloc::vec::Vec;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{AttackOutcome, EngineError, VesselId};
use crate::config::{Coord, Difficulty, BB, GRID_SIZE};
use crate::grid::Grid;

/// Unit step along a row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dr: i8,
    pub dc: i8,
}

impl Direction {
    pub const DOWN: Direction = Direction { dr: 1, dc: 0 };
    pub const RIGHT: Direction = Direction { dr: 0, dc: 1 };
    pub const UP: Direction = Direction { dr: -1, dc: 0 };
    pub const LEFT: Direction = Direction { dr: 0, dc: -1 };

    /// Probe order around a fresh anchor: +row, +col, -row, -col.
    pub const ALL: [Direction; 4] = [
        Direction::DOWN,
        Direction::RIGHT,
        Direction::UP,
        Direction::LEFT,
    ];

    pub fn reversed(self) -> Self {
        Direction {
            dr: -self.dr,
            dc: -self.dc,
        }
    }

    /// One step from `coord`, or `None` when that leaves the grid.
    pub fn step(self, coord: Coord) -> Option<Coord> {
        let row = coord.0.checked_add_signed(self.dr as isize)?;
        let col = coord.1.checked_add_signed(self.dc as isize)?;
        (row < GRID_SIZE && col < GRID_SIZE).then_some((row, col))
    }

    fn bit(self) -> u8 {
        match (self.dr, self.dc) {
            (1, 0) => 0b0001,
            (0, 1) => 0b0010,
            (-1, 0) => 0b0100,
            _ => 0b1000,
        }
    }
}

/// Why a cell was chosen; handed back to [`TargetingEngine::record`] with the
/// outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Drawn from the shuffled pool.
    Seek,
    /// Extending the streak along a locked direction.
    Extend(Direction),
    /// Trying one of the four directions around a lone anchor.
    Probe(Direction),
}

/// Observable engine mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Seek,
    Pursue {
        anchor: Coord,
        direction: Option<Direction>,
    },
}

/// An unresolved run of hits on one vessel.
#[derive(Debug, Clone)]
struct Streak {
    vessel: VesselId,
    anchor: Coord,
    hits: Vec<Coord>,
    direction: Option<Direction>,
    /// Directions around the anchor that failed to extend the streak.
    exhausted: u8,
}

impl Streak {
    fn new(vessel: VesselId, anchor: Coord) -> Self {
        Streak {
            vessel,
            anchor,
            hits: alloc::vec![anchor],
            direction: None,
            exhausted: 0,
        }
    }

    fn is_exhausted(&self, dir: Direction) -> bool {
        self.exhausted & dir.bit() != 0
    }

    fn exhaust(&mut self, dir: Direction) {
        self.exhausted |= dir.bit();
    }
}

/// Shot selection state for one automated participant in one match.
#[derive(Debug, Clone)]
pub struct TargetingEngine {
    difficulty: Difficulty,
    /// Shuffled candidate cells, consumed from the back. Entries that left
    /// `untried` are skipped when popped.
    pool: Vec<Coord>,
    untried: BB,
    /// Every hit this engine has landed.
    landed: BB,
    streak: Option<Streak>,
    /// Hits on other vessels made while a streak was active.
    backlog: Vec<(Coord, VesselId)>,
}

impl TargetingEngine {
    /// Fresh engine with the whole grid untried.
    pub fn new<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let mut pool: Vec<Coord> = (0..GRID_SIZE)
            .flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
            .collect();
        pool.shuffle(rng);
        TargetingEngine {
            difficulty,
            pool,
            untried: BB::full(),
            landed: BB::new(),
            streak: None,
            backlog: Vec::new(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> Mode {
        match &self.streak {
            None => Mode::Seek,
            Some(s) => Mode::Pursue {
                anchor: s.anchor,
                direction: s.direction,
            },
        }
    }

    /// Hits of the active streak in the order they landed.
    pub fn streak(&self) -> &[Coord] {
        self.streak.as_ref().map_or(&[][..], |s| s.hits.as_slice())
    }

    /// Cells not yet fired at and not ruled out.
    pub fn untried(&self) -> BB {
        self.untried
    }

    pub fn is_untried(&self, coord: Coord) -> bool {
        self.untried.contains(coord.0, coord.1)
    }

    /// Enter pursuit of `vessel` with `anchor` as the only known hit, as if
    /// that hit had just landed. An off-grid anchor leaves the engine as it
    /// was.
    pub fn pursue(&mut self, anchor: Coord, vessel: VesselId) -> Result<(), EngineError> {
        self.landed
            .set(anchor.0, anchor.1)
            .map_err(|_| EngineError::OffGrid(anchor))?;
        let _ = self.untried.clear(anchor.0, anchor.1);
        self.streak = Some(Streak::new(vessel, anchor));
        Ok(())
    }

    /// Lock the probing direction of the active streak. Ignored in seek mode.
    pub fn lock_direction(&mut self, direction: Direction) {
        if let Some(streak) = self.streak.as_mut() {
            streak.direction = Some(direction);
        }
    }

    /// Pick the next cell to fire at.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(Coord, Intent), EngineError> {
        if self.streak.is_some() && rng.random_bool(self.difficulty.randomization()) {
            if let Some(coord) = self.draw() {
                debug!("ignoring streak, seeking at {:?}", coord);
                return Ok((coord, Intent::Seek));
            }
        }
        // Each failed step drops a streak, so this ends once the backlog is
        // drained.
        while self.streak.is_some() {
            if let Some(choice) = self.pursue_step() {
                return Ok(choice);
            }
        }
        self.draw()
            .map(|coord| (coord, Intent::Seek))
            .ok_or(EngineError::NoMovesAvailable)
    }

    /// Feed back the outcome of a shot chosen by [`TargetingEngine::select`].
    /// `vessel_cells` must list the hull of a vessel this shot sank, and is
    /// ignored otherwise.
    pub fn record(
        &mut self,
        coord: Coord,
        intent: Intent,
        outcome: AttackOutcome,
        vessel_cells: &[Coord],
    ) {
        let _ = self.untried.clear(coord.0, coord.1);
        match outcome {
            AttackOutcome::OutOfBounds | AttackOutcome::AlreadyAttacked => {
                debug!("shot at {:?} rejected: {:?}", coord, outcome);
            }
            AttackOutcome::Miss => {
                if let Some(streak) = self.streak.as_mut() {
                    match intent {
                        Intent::Extend(dir) => {
                            streak.exhaust(dir);
                            streak.direction = Some(dir.reversed());
                        }
                        Intent::Probe(dir) => streak.exhaust(dir),
                        Intent::Seek => {}
                    }
                }
            }
            AttackOutcome::Hit { vessel, sunk, .. } => {
                let _ = self.landed.set(coord.0, coord.1);
                if sunk {
                    self.sink(vessel, vessel_cells);
                    return;
                }
                match self.streak.as_mut() {
                    None => {
                        debug!("new streak anchored at {:?}", coord);
                        self.streak = Some(Streak::new(vessel, coord));
                    }
                    Some(streak) if streak.vessel == vessel => {
                        streak.hits.push(coord);
                        if let Intent::Extend(dir) | Intent::Probe(dir) = intent {
                            streak.direction = Some(dir);
                        }
                    }
                    Some(_) => self.backlog.push((coord, vessel)),
                }
            }
        }
    }

    /// Choose, fire at `grid` and learn from the outcome in one step.
    pub fn next_move<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: &mut Grid,
    ) -> Result<(Coord, AttackOutcome), EngineError> {
        let (coord, intent) = self.select(rng)?;
        let outcome = grid.attack(coord);
        let cells = outcome
            .sunk_vessel()
            .and_then(|id| grid.vessel(id))
            .map_or(&[][..], |v| v.cells());
        self.record(coord, intent, outcome, cells);
        Ok((coord, outcome))
    }

    /// Pop pool entries until one is still untried.
    fn draw(&mut self) -> Option<Coord> {
        while let Some(coord) = self.pool.pop() {
            if self.is_untried(coord) {
                return Some(coord);
            }
        }
        None
    }

    /// First untried cell past the known hits running from the anchor in
    /// `dir`. `None` when that cell is off the grid or already resolved.
    fn probe(&self, anchor: Coord, dir: Direction) -> Option<Coord> {
        let mut cursor = anchor;
        loop {
            cursor = dir.step(cursor)?;
            if !self.landed.contains(cursor.0, cursor.1) {
                return self.is_untried(cursor).then_some(cursor);
            }
        }
    }

    /// Directed probing for the active streak. Bounded by the four
    /// directions around the anchor; gives up the streak when all fail.
    fn pursue_step(&mut self) -> Option<(Coord, Intent)> {
        let mut streak = self.streak.take()?;

        if let Some(dir) = streak.direction {
            for d in [dir, dir.reversed()] {
                if let Some(coord) = self.probe(streak.anchor, d) {
                    streak.direction = Some(d);
                    self.streak = Some(streak);
                    return Some((coord, Intent::Extend(d)));
                }
                streak.exhaust(d);
            }
            streak.direction = None;
        }

        for d in Direction::ALL {
            if streak.is_exhausted(d) {
                continue;
            }
            if let Some(coord) = self.probe(streak.anchor, d) {
                self.streak = Some(streak);
                return Some((coord, Intent::Probe(d)));
            }
            streak.exhaust(d);
        }

        debug!(
            "directions around {:?} exhausted, dropping streak",
            streak.anchor
        );
        self.resume_backlog();
        None
    }

    fn sink(&mut self, vessel: VesselId, cells: &[Coord]) {
        let hull = BB::from_iter(cells.iter().copied()).unwrap_or_default();
        self.untried &= !hull.neighborhood();
        debug!(
            "vessel {:?} sunk, {} cells left untried",
            vessel,
            self.untried.count_ones()
        );

        self.backlog.retain(|&(_, v)| v != vessel);
        let chasing_other = self.streak.as_ref().is_some_and(|s| s.vessel != vessel);
        if !chasing_other {
            self.streak = None;
            self.resume_backlog();
        }
    }

    /// Adopt the oldest backlog hit as the next anchor.
    fn resume_backlog(&mut self) {
        if self.streak.is_none() && !self.backlog.is_empty() {
            let (anchor, vessel) = self.backlog.remove(0);
            debug!("resuming pursuit from {:?}", anchor);
            self.streak = Some(Streak::new(vessel, anchor));
        }
    }
}
