//! Scripted avatar driver for headless runs
//!
//! Walks a rectangular patrol around the board, keeps the nearest live
//! adversary in its sights and fires on a fixed cadence.

use crate::arena::Arena;
use crate::participant::AvatarIntent;
use crate::world::World;
use gridfire_engine::foundation::math::{utils, Vec3};
use gridfire_engine::foundation::time::Countdown;

/// Waypoint considered reached within this distance
const WAYPOINT_RADIUS: f32 = 0.5;

/// Seconds between autopilot shots
pub const DEFAULT_FIRE_INTERVAL: f32 = 0.75;

/// Patrol-and-shoot driver
#[derive(Debug, Clone)]
pub struct Autopilot {
    waypoints: Vec<Vec3>,
    next: usize,
    trigger: Countdown,
}

impl Autopilot {
    /// Patrol the quarter lines of `arena`
    pub fn for_arena(arena: &Arena) -> Self {
        let (near_x, far_x) = (arena.width() * 0.25, arena.width() * 0.75);
        let (near_z, far_z) = (arena.depth() * 0.25, arena.depth() * 0.75);
        Self::with_waypoints(vec![
            Vec3::new(near_x, 0.0, near_z),
            Vec3::new(far_x, 0.0, near_z),
            Vec3::new(far_x, 0.0, far_z),
            Vec3::new(near_x, 0.0, far_z),
        ])
    }

    /// Patrol an explicit route, looping back to the start
    pub fn with_waypoints(waypoints: Vec<Vec3>) -> Self {
        Self {
            waypoints,
            next: 0,
            trigger: Countdown::new(DEFAULT_FIRE_INTERVAL),
        }
    }

    /// Waypoint currently being walked to
    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.next).copied()
    }

    /// Decide the avatar's intent for the coming step
    pub fn drive(&mut self, world: &mut World, delta: f32) {
        let position = world.avatar().position();

        if let Some(waypoint) = self.current_waypoint() {
            if utils::planar_distance(&position, &waypoint) <= WAYPOINT_RADIUS {
                self.next = (self.next + 1) % self.waypoints.len();
            }
        }

        let target = world
            .adversaries()
            .iter()
            .filter(|adversary| adversary.is_alive())
            .map(|adversary| adversary.position())
            .min_by(|a, b| {
                utils::planar_distance(&position, a).total_cmp(&utils::planar_distance(&position, b))
            });

        let yaw = match (target, self.current_waypoint()) {
            (Some(target), _) | (None, Some(target)) => utils::yaw_towards(&position, &target),
            (None, None) => world.avatar().yaw(),
        };

        // Movement input is relative to the heading the avatar will face
        let (forward, strafe) = self
            .current_waypoint()
            .and_then(|waypoint| utils::planar_direction(&position, &waypoint))
            .map_or((0.0, 0.0), |direction| {
                (
                    direction.dot(&utils::forward_from_yaw(yaw)),
                    direction.dot(&utils::right_from_yaw(yaw)),
                )
            });

        let fire = target.is_some() && self.trigger.tick(delta);
        if fire {
            self.trigger.reset();
        }

        world.avatar_mut().set_intent(AvatarIntent {
            forward,
            strafe,
            yaw,
            fire,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::AvatarSpec;
    use approx::assert_relative_eq;
    use gridfire_engine::physics::LocalExtents;

    fn world_at(position: Vec3) -> World {
        World::new(
            Arena::new(30.0, 30.0),
            AvatarSpec {
                position,
                extents: LocalExtents::grounded(0.4, 1.8).unwrap(),
                max_health: 100.0,
                move_speed: 5.0,
                projectile_speed: 10.0,
            },
        )
    }

    #[test]
    fn test_walks_towards_waypoint() {
        let mut world = world_at(Vec3::new(5.0, 0.0, 5.0));
        let mut autopilot = Autopilot::with_waypoints(vec![Vec3::new(5.0, 0.0, 15.0)]);

        autopilot.drive(&mut world, 0.1);
        let intent = *world.avatar().intent();
        assert_relative_eq!(intent.yaw, 0.0);
        assert_relative_eq!(intent.forward, 1.0, epsilon = 1e-5);
        assert_relative_eq!(intent.strafe, 0.0, epsilon = 1e-5);
        assert!(!intent.fire);
    }

    #[test]
    fn test_advances_through_route() {
        let mut world = world_at(Vec3::new(5.0, 0.0, 5.0));
        let mut autopilot = Autopilot::with_waypoints(vec![
            Vec3::new(5.0, 0.0, 5.2),
            Vec3::new(10.0, 0.0, 5.0),
        ]);

        autopilot.drive(&mut world, 0.1);
        assert_eq!(autopilot.current_waypoint(), Some(Vec3::new(10.0, 0.0, 5.0)));
    }
}
