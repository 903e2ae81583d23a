//! # Gridfire Engine
//!
//! Frame-based collision bookkeeping for small real-time games.
//!
//! ## Features
//!
//! - **Bounding Volumes**: axis-aligned boxes rebuilt from position and local extents
//! - **Overlap Test**: closed-interval separating-axis test
//! - **Collision Registry**: previous/current pair sets with Enter/Stay/Exit classification
//! - **Stable Handles**: generational entity ids that never alias a recycled slot
//! - **Configuration**: TOML/RON config files via serde
//!
//! ## Quick Start
//!
//! ```rust
//! use gridfire_engine::prelude::*;
//!
//! let mut roster: Roster<&str> = Roster::with_key();
//! let avatar = roster.insert("avatar");
//! let adversary = roster.insert("adversary");
//!
//! let avatar_box = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
//! let adversary_box = Aabb::new(Vec3::new(0.5, 0.0, 0.5), Vec3::new(1.5, 1.0, 1.5));
//!
//! let mut registry = CollisionRegistry::new();
//! let phase = registry.classify(avatar, &avatar_box, adversary, &adversary_box)?;
//! assert_eq!(phase, Some(CollisionPhase::Enter));
//! registry.rotate();
//! # Ok::<(), CollisionError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EngineConfig},
        foundation::{
            collections::{EntityId, Roster},
            math::Vec3,
            time::{Countdown, FixedTimestep, Stopwatch},
        },
        physics::{
            Aabb, BoundsError, Collider, CollisionError, CollisionPair, CollisionPhase,
            CollisionRegistry, Frame, LocalExtents,
        },
    };
}
