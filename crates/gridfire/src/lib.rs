//! # Gridfire
//!
//! A small arena shooter built on `gridfire_engine`: one avatar, a handful
//! of adversaries with distinct movement patterns, a recycled projectile
//! pool and respawning health pickups.
//!
//! The interesting part is the collision pass in [`collision`]: every tick
//! it tests the enabled category pairs, classifies each pair as Enter, Stay
//! or Exit against the previous tick, and routes each transition through a
//! fixed reaction table.
//!
//! ```rust
//! use gridfire::prelude::*;
//!
//! let mut config = GameConfig::default();
//! config.arena.adversary_count = 2;
//!
//! let mut game = Game::new(&config)?;
//! for _ in 0..10 {
//!     game.tick(config.engine.fixed_timestep)?;
//! }
//! assert_eq!(game.ticks(), 10);
//! # Ok::<(), GameError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod arena;
pub mod autopilot;
pub mod collision;
pub mod config;
pub mod dice;
pub mod error;
pub mod participant;
pub mod session;
pub mod world;

#[cfg(test)]
mod tests;

/// Common imports for game users
pub mod prelude {
    pub use crate::{
        arena::Arena,
        autopilot::Autopilot,
        collision::{CategoryPair, CategoryPairs, CollisionManager, PassReport, PhaseCounts},
        config::{CombatTuning, GameConfig, RollRange},
        dice::{Dice, ReactionContext},
        error::GameError,
        participant::{
            Adversary, AdversarySpec, Avatar, AvatarIntent, AvatarSpec, Behaviour, Category,
            Participant, Pickup, Projectile,
        },
        session::{Game, Outcome, Summary},
        world::World,
    };
}
