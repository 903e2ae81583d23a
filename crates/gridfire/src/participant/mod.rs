//! Collision participants
//!
//! Every entity that can collide belongs to exactly one [`Category`]. Each
//! category has a gate (alive, in flight, available) that decides whether it
//! takes part in a collision pass, plus reaction hooks named after the
//! category it reacts to: `on_<other>_enter`, `on_<other>_stay`,
//! `on_<other>_exit`. Hooks only mutate their own participant.

pub mod adversary;
pub mod avatar;
pub mod pickup;
pub mod projectile;

pub use adversary::{Adversary, AdversarySpec, Behaviour};
pub use avatar::{Avatar, AvatarIntent, AvatarSpec};
pub use pickup::Pickup;
pub use projectile::Projectile;

use gridfire_engine::foundation::collections::EntityId;
use gridfire_engine::foundation::math::Vec3;
use gridfire_engine::physics::Aabb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Height below the board where inactive participants are parked
pub const PARKING_DEPTH: f32 = -10.0;

/// Kind of collision participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// The player-controlled character
    Avatar,
    /// Autonomous enemies
    Adversary,
    /// Short-lived shots
    Projectile,
    /// Consumable health packs
    Pickup,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Avatar => "avatar",
            Category::Adversary => "adversary",
            Category::Projectile => "projectile",
            Category::Pickup => "pickup",
        };
        f.write_str(name)
    }
}

/// Read access the collision manager needs from every participant
pub trait Participant {
    /// Category shared by every value of this type
    const CATEGORY: Category;

    /// Stable identity of this participant
    fn id(&self) -> EntityId;

    /// World-space bounding volume for this frame
    fn bounds(&self) -> &Aabb;

    /// Gate: whether this participant takes part in collision passes
    fn is_active(&self) -> bool;
}

/// Request to launch a projectile, produced by avatar and adversary updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRequest {
    /// Spawn point of the projectile
    pub origin: Vec3,
    /// Velocity in units per second
    pub velocity: Vec3,
    /// Heading of the projectile
    pub yaw: f32,
    /// Participant that fired
    pub owner: EntityId,
}
