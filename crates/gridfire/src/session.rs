//! A running game
//!
//! Each tick moves every participant, runs one collision pass and then
//! checks whether the game is decided. The checks run in a fixed order:
//! an expired time trial, then the avatar's health, then the avatar's kill
//! count.

use crate::collision::{CollisionManager, PassReport};
use crate::config::{CombatTuning, GameConfig};
use crate::dice::{Dice, ReactionContext};
use crate::error::GameError;
use crate::participant::{Category, Participant};
use crate::world::World;
use gridfire_engine::foundation::collections::EntityId;
use gridfire_engine::foundation::time::{Countdown, FixedTimestep};
use log::{error, info};
use std::fmt;

/// State of the game after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Still being played
    InProgress,
    /// The avatar killed every adversary
    Victory,
    /// The avatar ran out of health
    Defeat,
    /// The time-trial clock ran out
    TimeUp,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::InProgress => "in progress",
            Outcome::Victory => "victory",
            Outcome::Defeat => "defeat",
            Outcome::TimeUp => "time's up",
        };
        f.write_str(text)
    }
}

/// End-of-game figures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Ticks simulated
    pub ticks: u64,
    /// Result so far
    pub outcome: Outcome,
    /// Avatar score
    pub score: u32,
    /// Adversaries killed by the avatar
    pub adversaries_defeated: u32,
    /// Adversaries spawned
    pub adversaries_total: usize,
    /// Avatar health left
    pub avatar_health: f32,
    /// Seconds left on the time-trial clock
    pub time_left: Option<f32>,
    /// Collision dispatches over the whole game
    pub collisions: PassReport,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} ticks: score {}, defeated {}/{}, health {:.0} ({})",
            self.outcome,
            self.ticks,
            self.score,
            self.adversaries_defeated,
            self.adversaries_total,
            self.avatar_health,
            self.collisions
        )
    }
}

/// One game from spawn to outcome
pub struct Game {
    world: World,
    collisions: CollisionManager,
    dice: Dice,
    tuning: CombatTuning,
    timestep: FixedTimestep,
    time_trial: Option<Countdown>,
    ticks: u64,
    outcome: Outcome,
}

impl Game {
    /// Start a game with the layout described by `config`
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let mut dice = Dice::seeded(config.simulation.seed);
        let world = World::from_config(config, &mut dice)?;
        Ok(Self::assemble(world, config, dice))
    }

    /// Start a game on a hand-built world
    pub fn with_world(world: World, config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::assemble(world, config, Dice::seeded(config.simulation.seed)))
    }

    fn assemble(world: World, config: &GameConfig, dice: Dice) -> Self {
        Self {
            world,
            collisions: CollisionManager::from_config(&config.engine, &config.collision),
            dice,
            tuning: config.combat.clone(),
            timestep: FixedTimestep::new(
                config.engine.fixed_timestep,
                config.engine.max_steps_per_frame,
            ),
            time_trial: config.simulation.time_trial_secs.map(Countdown::new),
            ticks: 0,
            outcome: Outcome::InProgress,
        }
    }

    /// Simulate one step of `delta` seconds
    ///
    /// A decided game no longer changes.
    pub fn tick(&mut self, delta: f32) -> Result<Outcome, GameError> {
        if self.outcome != Outcome::InProgress {
            return Ok(self.outcome);
        }

        self.world.update(delta, &mut self.dice);

        let mut ctx = ReactionContext::new(&mut self.dice, &self.tuning);
        if let Err(err) = self.collisions.run_pass(&mut self.world, &mut ctx) {
            error!("Collision pass failed on tick {}: {}", self.ticks, err);
            return Err(err.into());
        }

        self.ticks += 1;
        if let Some(clock) = self.time_trial.as_mut() {
            clock.tick(delta);
        }
        self.outcome = self.evaluate();
        if self.outcome != Outcome::InProgress {
            info!("Game decided on tick {}: {}", self.ticks, self.outcome);
        }
        Ok(self.outcome)
    }

    /// Feed a variable frame time through the fixed timestep
    pub fn advance(&mut self, frame_delta: f32) -> Result<Outcome, GameError> {
        let steps = self.timestep.accumulate(frame_delta);
        let step = self.timestep.step();
        for _ in 0..steps {
            if self.tick(step)? != Outcome::InProgress {
                break;
            }
        }
        Ok(self.outcome)
    }

    fn evaluate(&self) -> Outcome {
        let avatar = self.world.avatar();
        let adversaries = self.world.adversaries().len();
        let defeated = usize::try_from(avatar.adversaries_defeated()).unwrap_or(usize::MAX);

        if self.time_trial.as_ref().is_some_and(Countdown::is_finished) {
            Outcome::TimeUp
        } else if avatar.is_defeated() {
            Outcome::Defeat
        } else if adversaries > 0 && defeated >= adversaries {
            Outcome::Victory
        } else {
            Outcome::InProgress
        }
    }

    /// Remove a participant between ticks
    pub fn despawn(&mut self, id: EntityId) -> Option<Category> {
        let category = self.world.despawn(id)?;
        self.collisions.forget(id);
        Some(category)
    }

    /// Result so far
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Ticks simulated
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Figures for the game so far
    pub fn summary(&self) -> Summary {
        let avatar = self.world.avatar();
        Summary {
            ticks: self.ticks,
            outcome: self.outcome,
            score: avatar.score(),
            adversaries_defeated: avatar.adversaries_defeated(),
            adversaries_total: self.world.adversaries().len(),
            avatar_health: avatar.health(),
            time_left: self.time_trial.as_ref().map(Countdown::remaining),
            collisions: *self.collisions.totals(),
        }
    }

    /// The world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably (between ticks only)
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The collision manager
    pub fn collisions(&self) -> &CollisionManager {
        &self.collisions
    }

    /// Id of the avatar
    pub fn avatar_id(&self) -> EntityId {
        self.world.avatar().id()
    }
}
