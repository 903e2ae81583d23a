//! Physics module for collision detection
//!
//! Discrete, per-frame overlap classification between axis-aligned boxes.
//! There is no broad phase and no collision response: callers test the
//! pairs they care about and react to the Enter/Stay/Exit transitions.

pub mod bounds;
pub mod collision_registry;
pub mod transition;

pub use bounds::{overlaps, Aabb, Axis, BoundsError, Collider, LocalExtents};
pub use collision_registry::{CollisionError, CollisionPair, CollisionRegistry, Frame};
pub use transition::CollisionPhase;
