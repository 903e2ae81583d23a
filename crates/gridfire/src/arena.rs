//! Board geometry and the starting layout

use crate::dice::Dice;
use crate::participant::Behaviour;
use gridfire_engine::foundation::math::{utils, Vec3};

/// Width of the wall ring around the playable interior
const WALL: f32 = 1.0;

/// Closest an adversary may spawn to the avatar
pub const MIN_SPAWN_DISTANCE: f32 = 6.0;

/// Attempts at finding a spawn point before settling for the last one
const SPAWN_ATTEMPTS: usize = 64;

/// Health, skill and movement of one adversary difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdversaryProfile {
    /// Starting health
    pub health: i32,
    /// Points for the kill
    pub skill: u32,
    /// Movement pattern
    pub behaviour: Behaviour,
}

/// Difficulty tiers, weakest first
pub const ADVERSARY_PROFILES: [AdversaryProfile; 5] = [
    AdversaryProfile { health: 20, skill: 2, behaviour: Behaviour::Chase },
    AdversaryProfile { health: 40, skill: 4, behaviour: Behaviour::Flee },
    AdversaryProfile { health: 60, skill: 6, behaviour: Behaviour::Wander },
    AdversaryProfile { health: 80, skill: 8, behaviour: Behaviour::Hover },
    AdversaryProfile { health: 90, skill: 10, behaviour: Behaviour::Skittish },
];

/// Rectangular board on the XZ plane, spanning `0..width` and `0..depth`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    width: f32,
    depth: f32,
}

impl Arena {
    /// Create a board of the given size
    pub fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }

    /// Board size along X
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Board size along Z
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Middle of the board at ground level
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.width * 0.5, 0.0, self.depth * 0.5)
    }

    /// Whether a point lies inside the wall ring (inclusive)
    pub fn is_interior(&self, point: &Vec3) -> bool {
        (WALL..=self.width - WALL).contains(&point.x) && (WALL..=self.depth - WALL).contains(&point.z)
    }

    /// Pull a point back inside the wall ring, keeping its height
    pub fn clamp_interior(&self, point: &Vec3) -> Vec3 {
        Vec3::new(
            utils::clamp(point.x, WALL, self.width - WALL),
            point.y,
            utils::clamp(point.z, WALL, self.depth - WALL),
        )
    }

    /// Uniformly random ground point inside the wall ring
    pub fn random_interior_point(&self, dice: &mut Dice) -> Vec3 {
        Vec3::new(
            dice.uniform(WALL, self.width - WALL),
            0.0,
            dice.uniform(WALL, self.depth - WALL),
        )
    }

    /// Random interior point at least [`MIN_SPAWN_DISTANCE`] from `avoid`
    ///
    /// Small boards may have no such point; the last candidate is returned.
    pub fn spawn_point_away_from(&self, avoid: &Vec3, dice: &mut Dice) -> Vec3 {
        let mut candidate = self.random_interior_point(dice);
        for _ in 1..SPAWN_ATTEMPTS {
            if utils::planar_distance(&candidate, avoid) >= MIN_SPAWN_DISTANCE {
                break;
            }
            candidate = self.random_interior_point(dice);
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interior_and_clamp() {
        let arena = Arena::new(30.0, 20.0);
        assert!(arena.is_interior(&Vec3::new(1.0, 0.0, 19.0)));
        assert!(!arena.is_interior(&Vec3::new(0.5, 0.0, 10.0)));
        assert!(!arena.is_interior(&Vec3::new(10.0, 0.0, 19.5)));

        let clamped = arena.clamp_interior(&Vec3::new(-4.0, 2.0, 40.0));
        assert_relative_eq!(clamped, Vec3::new(1.0, 2.0, 19.0));
    }

    #[test]
    fn test_random_points_stay_interior() {
        let arena = Arena::new(30.0, 30.0);
        let mut dice = Dice::seeded(11);
        for _ in 0..200 {
            assert!(arena.is_interior(&arena.random_interior_point(&mut dice)));
        }
    }

    #[test]
    fn test_spawn_points_keep_their_distance() {
        let arena = Arena::new(30.0, 30.0);
        let mut dice = Dice::seeded(5);
        let center = arena.center();
        for _ in 0..50 {
            let point = arena.spawn_point_away_from(&center, &mut dice);
            assert!(utils::planar_distance(&point, &center) >= MIN_SPAWN_DISTANCE);
        }
    }

    #[test]
    fn test_profiles_cover_every_behaviour() {
        for behaviour in Behaviour::ALL {
            assert!(ADVERSARY_PROFILES.iter().any(|p| p.behaviour == behaviour));
        }
    }
}
