//! The per-tick collision pass
//!
//! One pass tests every enabled category pair, classifies each tested pair
//! against the previous pass, and invokes the reaction table once per
//! transition. Participants are snapshotted when the pass starts: a
//! participant killed or consumed partway through keeps its place and its
//! bounds until the pass ends, and drops out on the next one.

use super::policy::{self, CategoryPair, CategoryPairs};
use super::report::PassReport;
use crate::config::CollisionConfig;
use crate::dice::ReactionContext;
use crate::participant::{Category, Participant};
use crate::world::{World, WorldParts};
use gridfire_engine::config::EngineConfig;
use gridfire_engine::foundation::collections::EntityId;
use gridfire_engine::physics::{Aabb, CollisionError, CollisionRegistry, Frame};
use log::{debug, trace};

/// A gated-in participant as it was when the pass started
#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    id: EntityId,
    bounds: Aabb,
}

impl Candidate {
    fn of<P: Participant>(index: usize, participant: &P) -> Self {
        Self {
            index,
            id: participant.id(),
            bounds: *participant.bounds(),
        }
    }
}

fn snapshot<P: Participant>(participants: &[P]) -> Vec<Candidate> {
    participants
        .iter()
        .enumerate()
        .filter(|(_, participant)| participant.is_active())
        .map(|(index, participant)| Candidate::of(index, participant))
        .collect()
}

/// Snapshot of every category for one pass
struct Candidates {
    avatar: Vec<Candidate>,
    adversaries: Vec<Candidate>,
    projectiles: Vec<Candidate>,
    pickups: Vec<Candidate>,
}

impl Candidates {
    fn capture(world: &World) -> Self {
        let avatar = world.avatar();
        Self {
            avatar: if avatar.is_active() { vec![Candidate::of(0, avatar)] } else { Vec::new() },
            adversaries: snapshot(world.adversaries()),
            projectiles: snapshot(world.projectiles()),
            pickups: snapshot(world.pickups()),
        }
    }

    fn of(&self, category: Category) -> &[Candidate] {
        match category {
            Category::Avatar => &self.avatar,
            Category::Adversary => &self.adversaries,
            Category::Projectile => &self.projectiles,
            Category::Pickup => &self.pickups,
        }
    }
}

/// Owns the collision registry and runs one pass per tick
pub struct CollisionManager {
    registry: CollisionRegistry,
    enabled: CategoryPairs,
    totals: PassReport,
    passes: u64,
}

impl CollisionManager {
    /// Manager testing every category pair with an unbounded registry
    pub fn new() -> Self {
        Self::with_registry(CollisionRegistry::new(), CategoryPairs::all())
    }

    /// Manager with an explicit registry and pair mask
    pub fn with_registry(registry: CollisionRegistry, enabled: CategoryPairs) -> Self {
        Self {
            registry,
            enabled,
            totals: PassReport::default(),
            passes: 0,
        }
    }

    /// Manager set up from configuration
    pub fn from_config(engine: &EngineConfig, collision: &CollisionConfig) -> Self {
        let registry = match engine.max_collision_pairs {
            Some(limit) => CollisionRegistry::with_capacity_limit(limit),
            None => CollisionRegistry::new(),
        };
        let enabled = CategoryPairs::from_pairs(collision.enabled_pairs.iter().copied());
        debug!("Collision pairs enabled: {:?}", enabled);
        Self::with_registry(registry, enabled)
    }

    /// Run one collision pass over `world`
    ///
    /// The registry rotates even when the pass fails, so the next pass
    /// starts from a clean current frame.
    pub fn run_pass(
        &mut self,
        world: &mut World,
        ctx: &mut ReactionContext<'_>,
    ) -> Result<PassReport, CollisionError> {
        let candidates = Candidates::capture(world);
        let mut parts = world.parts_mut();
        let mut report = PassReport::default();

        let mut outcome = Ok(());
        for pair in self.enabled.pairs() {
            outcome = self.sweep(pair, &candidates, &mut parts, ctx, &mut report);
            if outcome.is_err() {
                break;
            }
        }

        report.recorded_pairs = self.registry.len(Frame::Current);
        self.registry.rotate();
        self.passes += 1;
        outcome?;

        if report.dispatches() > 0 {
            trace!("Collision pass {}: {}", self.passes, report);
        }
        self.totals.accumulate(&report);
        Ok(report)
    }

    fn sweep(
        &mut self,
        pair: CategoryPair,
        candidates: &Candidates,
        parts: &mut WorldParts<'_>,
        ctx: &mut ReactionContext<'_>,
        report: &mut PassReport,
    ) -> Result<(), CollisionError> {
        let (outer, inner) = pair.categories();

        for first in candidates.of(outer) {
            for second in candidates.of(inner) {
                debug_assert_ne!(first.id, second.id, "participant paired with itself");

                let phase =
                    self.registry.classify(first.id, &first.bounds, second.id, &second.bounds)?;
                let Some(phase) = phase else {
                    continue;
                };

                report.record(pair, phase);
                if policy::dispatch(pair, phase, first.index, second.index, parts, ctx) {
                    report.kills += 1;
                }
            }
        }

        Ok(())
    }

    /// Drop a despawned participant from the registry
    pub fn forget(&mut self, id: EntityId) {
        self.registry.forget(id);
    }

    /// Enable or disable one category pair
    pub fn set_enabled(&mut self, pair: CategoryPair, enabled: bool) {
        self.enabled.set(pair.flag(), enabled);
    }

    /// Currently enabled pairs
    pub fn enabled(&self) -> CategoryPairs {
        self.enabled
    }

    /// Registry, for inspection
    pub fn registry(&self) -> &CollisionRegistry {
        &self.registry
    }

    /// Counts summed over every successful pass
    pub fn totals(&self) -> &PassReport {
        &self.totals
    }

    /// Number of passes run, including failed ones
    pub fn passes(&self) -> u64 {
        self.passes
    }
}

impl Default for CollisionManager {
    fn default() -> Self {
        Self::new()
    }
}
