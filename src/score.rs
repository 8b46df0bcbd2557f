//! Per-participant shot statistics and the end-of-match summary record.

use crate::common::AttackOutcome;

/// Points for a hit that leaves the vessel afloat.
pub const HIT_POINTS: u32 = 5;
/// Points per hull cell when a vessel sinks.
pub const SINK_POINTS_PER_CELL: u32 = 10;

/// Running shot statistics for one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotTally {
    pub shots: u32,
    pub hits: u32,
    pub misses: u32,
    pub vessels_sunk: u32,
    pub score: u32,
}

impl ShotTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a shot. Rejected shots are ignored.
    pub fn record(&mut self, outcome: &AttackOutcome) {
        match *outcome {
            AttackOutcome::OutOfBounds | AttackOutcome::AlreadyAttacked => {}
            AttackOutcome::Miss => {
                self.shots += 1;
                self.misses += 1;
            }
            AttackOutcome::Hit { length, sunk, .. } => {
                self.shots += 1;
                self.hits += 1;
                if sunk {
                    self.vessels_sunk += 1;
                    self.score += SINK_POINTS_PER_CELL * length as u32;
                } else {
                    self.score += HIT_POINTS;
                }
            }
        }
    }

    /// Share of shots that hit, as a percentage. Zero before the first shot.
    pub fn accuracy(&self) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            f64::from(self.hits) * 100.0 / f64::from(self.shots)
        }
    }
}

/// Summary line appended to the match history log.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchSummary {
    pub name: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub shots: u32,
    pub hits: u32,
    pub misses: u32,
    pub accuracy: f64,
    pub vessels_sunk: u32,
    pub score: u32,
}

#[cfg(feature = "std")]
impl MatchSummary {
    pub fn new(name: impl Into<String>, tally: &ShotTally, timestamp: u64) -> Self {
        MatchSummary {
            name: name.into(),
            timestamp,
            shots: tally.shots,
            hits: tally.hits,
            misses: tally.misses,
            accuracy: (tally.accuracy() * 100.0).round() / 100.0,
            vessels_sunk: tally.vessels_sunk,
            score: tally.score,
        }
    }

    /// Summary stamped with the current wall-clock time.
    pub fn now(name: impl Into<String>, tally: &ShotTally) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::new(name, tally, timestamp)
    }
}
