use alloc::vec::Vec;
use log::{debug, info, warn};
use rand::rngs::SmallRng;

use crate::common::{AttackOutcome, GridError, MatchError};
use crate::config::Coord;
use crate::grid::Grid;
use crate::player::Participant;
use crate::score::ShotTally;

/// One of the two participants of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Result of one resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub attacker: Side,
    pub coord: Coord,
    pub outcome: AttackOutcome,
    /// Set when this shot sank the defender's last vessel.
    pub winner: Option<Side>,
}

/// Returns `true` once either grid has lost its whole fleet.
pub fn is_match_over(a: &Grid, b: &Grid) -> bool {
    a.all_sunk() || b.all_sunk()
}

/// Turn order and win detection for two grids. Each side fires at the other
/// side's grid; sides alternate after every resolved shot.
#[derive(Debug, Clone)]
pub struct Match {
    grids: [Grid; 2],
    tallies: [ShotTally; 2],
    turn: Side,
    turns: usize,
    winner: Option<Side>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// Empty grids, first side to move.
    pub fn new() -> Self {
        Match {
            grids: [Grid::new(), Grid::new()],
            tallies: [ShotTally::new(); 2],
            turn: Side::First,
            turns: 0,
            winner: None,
        }
    }

    /// Grid owned by `side`.
    pub fn grid(&self, side: Side) -> &Grid {
        &self.grids[side.index()]
    }

    /// Mutable grid for the placement phase.
    pub fn grid_mut(&mut self, side: Side) -> &mut Grid {
        &mut self.grids[side.index()]
    }

    /// Shot statistics of `side` as attacker.
    pub fn tally(&self, side: Side) -> &ShotTally {
        &self.tallies[side.index()]
    }

    /// Side whose shot is next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Resolved shots so far, both sides combined.
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// The side to move fires at `coord` on the opponent grid. A rejected
    /// coordinate is returned as an error and the same side keeps the turn.
    pub fn attack(&mut self, coord: Coord) -> Result<TurnReport, MatchError> {
        if self.is_over() {
            return Err(MatchError::MatchOver);
        }
        let attacker = self.turn;
        let defender = attacker.opponent();
        let outcome = self.grids[defender.index()].try_attack(coord)?;
        self.tallies[attacker.index()].record(&outcome);
        self.turns += 1;
        debug!("{:?} fired at {:?}: {:?}", attacker, coord, outcome);

        if self.grids[defender.index()].all_sunk() {
            info!("{:?} wins after {} shots", attacker, self.turns);
            self.winner = Some(attacker);
        } else {
            self.turn = defender;
        }
        Ok(TurnReport {
            attacker,
            coord,
            outcome,
            winner: self.winner,
        })
    }

    /// Let an automated participant take the current turn. Rejected shots
    /// are reported back to it and it picks again within the same turn.
    pub fn play_turn<P: Participant + ?Sized>(
        &mut self,
        participant: &mut P,
        rng: &mut SmallRng,
    ) -> Result<TurnReport, MatchError> {
        loop {
            let coord = participant.select_target(rng)?;
            match self.attack(coord) {
                Ok(report) => {
                    let sunk_cells: Vec<Coord> = report
                        .outcome
                        .sunk_vessel()
                        .and_then(|id| self.grid(report.attacker.opponent()).vessel(id))
                        .map(|v| v.cells().to_vec())
                        .unwrap_or_default();
                    participant.handle_outcome(coord, report.outcome, &sunk_cells);
                    return Ok(report);
                }
                Err(MatchError::Grid(GridError::InvalidCoordinate(_))) => {
                    warn!("{} fired off the grid at {:?}", participant.name(), coord);
                    participant.handle_outcome(coord, AttackOutcome::OutOfBounds, &[]);
                }
                Err(MatchError::Grid(GridError::DuplicateAttack(_))) => {
                    warn!("{} fired twice at {:?}", participant.name(), coord);
                    participant.handle_outcome(coord, AttackOutcome::AlreadyAttacked, &[]);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Play alternating turns until a winner emerges. Fails with
    /// [`MatchError::TurnLimit`] if `turn_limit` resolved shots pass first.
    pub fn run<A, B>(
        &mut self,
        first: &mut A,
        second: &mut B,
        rng: &mut SmallRng,
        turn_limit: usize,
    ) -> Result<Side, MatchError>
    where
        A: Participant + ?Sized,
        B: Participant + ?Sized,
    {
        while self.winner.is_none() {
            if self.turns >= turn_limit {
                return Err(MatchError::TurnLimit(self.turns));
            }
            match self.turn {
                Side::First => self.play_turn(first, rng)?,
                Side::Second => self.play_turn(second, rng)?,
            };
        }
        self.winner.ok_or(MatchError::MatchOver)
    }
}
