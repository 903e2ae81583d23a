//! Per-pass dispatch counts

use super::CategoryPair;
use gridfire_engine::physics::CollisionPhase;
use std::fmt;

/// Enter, Stay and Exit dispatch counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseCounts {
    /// Enter dispatches
    pub enter: usize,
    /// Stay dispatches
    pub stay: usize,
    /// Exit dispatches
    pub exit: usize,
}

impl PhaseCounts {
    /// Count one dispatch
    pub fn record(&mut self, phase: CollisionPhase) {
        match phase {
            CollisionPhase::Enter => self.enter += 1,
            CollisionPhase::Stay => self.stay += 1,
            CollisionPhase::Exit => self.exit += 1,
        }
    }

    /// Sum of all three phases
    pub fn total(&self) -> usize {
        self.enter + self.stay + self.exit
    }

    fn add(&mut self, other: &PhaseCounts) {
        self.enter += other.enter;
        self.stay += other.stay;
        self.exit += other.exit;
    }
}

/// What one collision pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    per_pair: [PhaseCounts; 4],
    /// Pairs recorded as overlapping this pass
    pub recorded_pairs: usize,
    /// Adversaries killed during this pass
    pub kills: usize,
}

impl PassReport {
    /// Counts for one category pair
    pub fn counts(&self, pair: CategoryPair) -> PhaseCounts {
        self.per_pair[pair.index()]
    }

    /// Count one dispatch for `pair`
    pub fn record(&mut self, pair: CategoryPair, phase: CollisionPhase) {
        self.per_pair[pair.index()].record(phase);
    }

    /// Counts summed over every pair
    pub fn totals(&self) -> PhaseCounts {
        let mut totals = PhaseCounts::default();
        for counts in &self.per_pair {
            totals.add(counts);
        }
        totals
    }

    /// Total dispatches of every phase and pair
    pub fn dispatches(&self) -> usize {
        self.totals().total()
    }

    /// Fold another report into this one
    pub fn accumulate(&mut self, other: &PassReport) {
        for (mine, theirs) in self.per_pair.iter_mut().zip(&other.per_pair) {
            mine.add(theirs);
        }
        self.recorded_pairs += other.recorded_pairs;
        self.kills += other.kills;
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals = self.totals();
        write!(
            f,
            "{} enter, {} stay, {} exit, {} pairs",
            totals.enter, totals.stay, totals.exit, self.recorded_pairs
        )
    }
}
