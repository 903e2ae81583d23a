//! Autonomous adversaries
//!
//! Each adversary follows one movement [`Behaviour`], turns to face the
//! avatar every update and fires on a fixed interval while alive.

use super::{Category, FireRequest, Participant, Projectile, PARKING_DEPTH};
use crate::arena::Arena;
use crate::dice::{Dice, ReactionContext};
use gridfire_engine::foundation::collections::EntityId;
use gridfire_engine::foundation::math::{utils, Vec3};
use gridfire_engine::foundation::time::Countdown;
use gridfire_engine::physics::{Aabb, Collider, LocalExtents};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

/// Muzzle position relative to an adversary facing `+Z`
const GUN_OFFSET: [f32; 3] = [-0.133, 1.2, 1.137];

/// Distance at which a hovering adversary stops approaching
const HOVER_RADIUS: f32 = 5.0;

/// Distance at which a skittish adversary bolts
const SKITTISH_RADIUS: f32 = 5.0;

/// Closest a chasing adversary tries to get
const CHASE_ARRIVAL: f32 = 0.01;

/// Wander target reached
const WANDER_ARRIVAL: f32 = 0.1;

/// Skittish target reached
const SKITTISH_ARRIVAL: f32 = 0.01;

/// Where dead adversaries are kept
fn graveyard() -> Vec3 {
    Vec3::new(10.0, PARKING_DEPTH, 0.0)
}

/// How an adversary moves around the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behaviour {
    /// Head straight for the avatar
    Chase,
    /// Back away from the avatar without leaving the board interior
    Flee,
    /// Walk to random points on the board
    Wander,
    /// Close in until within hovering range of the avatar
    Hover,
    /// Stand still until the avatar comes near, then run to a random point
    Skittish,
}

impl Behaviour {
    /// Every behaviour, from most to least aggressive
    pub const ALL: [Behaviour; 5] = [
        Behaviour::Chase,
        Behaviour::Flee,
        Behaviour::Wander,
        Behaviour::Hover,
        Behaviour::Skittish,
    ];

    /// Movement speed in units per second
    pub fn speed(self) -> f32 {
        match self {
            Behaviour::Chase => 3.0,
            Behaviour::Flee => 2.4,
            Behaviour::Wander => 1.8,
            Behaviour::Hover => 1.2,
            Behaviour::Skittish => 0.6,
        }
    }
}

/// Construction parameters for an [`Adversary`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdversarySpec {
    /// Starting position
    pub position: Vec3,

    /// Mesh-space box
    pub extents: LocalExtents,

    /// Starting health
    pub health: i32,

    /// Points awarded for the kill
    pub skill: u32,

    /// Movement pattern
    pub behaviour: Behaviour,

    /// Seconds between shots
    pub fire_interval: f32,

    /// Launch speed of fired projectiles
    pub projectile_speed: f32,
}

/// An adversary
#[derive(Debug, Clone)]
pub struct Adversary {
    id: EntityId,
    collider: Collider,
    position: Vec3,
    yaw: f32,
    health: i32,
    skill: u32,
    behaviour: Behaviour,
    alive: bool,
    target: Option<Vec3>,
    fire_timer: Countdown,
    projectile_speed: f32,
}

impl Adversary {
    /// Create a live adversary
    pub fn new(id: EntityId, spec: AdversarySpec) -> Self {
        Self {
            id,
            collider: Collider::new(spec.extents, &spec.position),
            position: spec.position,
            yaw: 0.0,
            health: spec.health,
            skill: spec.skill,
            behaviour: spec.behaviour,
            alive: spec.health > 0,
            target: None,
            fire_timer: Countdown::new(spec.fire_interval),
            projectile_speed: spec.projectile_speed,
        }
    }

    /// Face the avatar, move, and fire when the interval runs out
    ///
    /// Dead adversaries do nothing.
    pub fn update(
        &mut self,
        delta: f32,
        avatar_position: &Vec3,
        arena: &Arena,
        dice: &mut Dice,
    ) -> Option<FireRequest> {
        if !self.alive {
            return None;
        }

        self.yaw = utils::yaw_towards(&self.position, avatar_position);

        let step = self.behaviour.speed() * delta;
        let next = match self.behaviour {
            Behaviour::Chase => self.approach(avatar_position, CHASE_ARRIVAL, step),
            Behaviour::Hover => self.approach(avatar_position, HOVER_RADIUS, step),
            Behaviour::Flee => self.retreat(avatar_position, arena, step),
            Behaviour::Wander => {
                if self.target.is_none() {
                    self.target = Some(arena.random_interior_point(dice));
                }
                self.pursue_target(WANDER_ARRIVAL, step)
            }
            Behaviour::Skittish => {
                if self.target.is_none()
                    && utils::planar_distance(&self.position, avatar_position) <= SKITTISH_RADIUS
                {
                    self.target = Some(arena.random_interior_point(dice));
                }
                self.pursue_target(SKITTISH_ARRIVAL, step)
            }
        };
        self.set_position(next);

        if !self.fire_timer.tick(delta) {
            return None;
        }
        self.fire_timer.reset();

        let muzzle = Vec3::new(GUN_OFFSET[0], GUN_OFFSET[1], GUN_OFFSET[2]);
        Some(FireRequest {
            origin: self.position + utils::rotate_y(&muzzle, self.yaw),
            velocity: utils::forward_from_yaw(self.yaw) * self.projectile_speed,
            yaw: self.yaw,
            owner: self.id,
        })
    }

    fn approach(&self, goal: &Vec3, stop_distance: f32, step: f32) -> Vec3 {
        if utils::planar_distance(&self.position, goal) < stop_distance {
            self.position
        } else {
            utils::step_towards(&self.position, goal, step)
        }
    }

    fn retreat(&self, threat: &Vec3, arena: &Arena, step: f32) -> Vec3 {
        let Some(away) = utils::planar_direction(threat, &self.position) else {
            return self.position;
        };
        let next = self.position + away * step;
        // Cornered adversaries hold still rather than slide along the wall
        if arena.is_interior(&next) { next } else { self.position }
    }

    fn pursue_target(&mut self, arrival: f32, step: f32) -> Vec3 {
        let Some(target) = self.target else {
            return self.position;
        };
        let next = utils::step_towards(&self.position, &target, step);
        if utils::planar_distance(&next, &target) <= arrival {
            self.target = None;
        }
        next
    }

    /// Move the adversary and refresh its bounds
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.collider.sync(&self.position);
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current heading in radians
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current health, negative once overkilled
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Points awarded for the kill
    pub fn skill(&self) -> u32 {
        self.skill
    }

    /// Movement pattern
    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    /// Whether the adversary is still in play
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Seconds until the next shot
    pub fn fire_cooldown(&self) -> f32 {
        self.fire_timer.remaining()
    }

    /// Hit by a projectile
    ///
    /// Damage always applies. Death happens once: the adversary is sunk
    /// below the board and stops updating.
    pub fn on_projectile_enter(&mut self, projectile: &Projectile, ctx: &mut ReactionContext<'_>) {
        let damage = ctx.roll(ctx.tuning().projectile_damage_to_adversary);
        self.health = self.health.saturating_sub(i32::try_from(damage).unwrap_or(i32::MAX));
        debug!(
            "Adversary {:?} hit by projectile {:?} for {} (health {})",
            self.id,
            projectile.id(),
            damage,
            self.health
        );

        if self.alive && self.health <= 0 {
            self.alive = false;
            self.target = None;
            self.set_position(graveyard());
            info!("Adversary {:?} destroyed", self.id);
        }
    }

    /// Projectile still passing through
    pub fn on_projectile_stay(&mut self, projectile: &Projectile) {
        trace!("Adversary {:?} still overlapping projectile {:?}", self.id, projectile.id());
    }

    /// Projectile passed through
    pub fn on_projectile_exit(&mut self, projectile: &Projectile) {
        debug!("Projectile {:?} left adversary {:?}", projectile.id(), self.id);
    }
}

impl Participant for Adversary {
    const CATEGORY: Category = Category::Adversary;

    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> &Aabb {
        self.collider.bounds()
    }

    fn is_active(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CombatTuning, RollRange};
    use approx::assert_relative_eq;
    use gridfire_engine::foundation::collections::Roster;

    fn spawn(behaviour: Behaviour, position: Vec3, health: i32) -> (Roster<()>, Adversary) {
        let mut roster: Roster<()> = Roster::with_key();
        let adversary = Adversary::new(
            roster.insert(()),
            AdversarySpec {
                position,
                extents: LocalExtents::grounded(0.5, 2.0).unwrap(),
                health,
                skill: 2,
                behaviour,
                fire_interval: 5.0,
                projectile_speed: 10.0,
            },
        );
        (roster, adversary)
    }

    #[test]
    fn test_chase_closes_distance() {
        let arena = Arena::new(30.0, 30.0);
        let mut dice = Dice::seeded(3);
        let (_, mut adversary) = spawn(Behaviour::Chase, Vec3::new(5.0, 0.0, 5.0), 20);
        let avatar = Vec3::new(15.0, 0.0, 5.0);

        adversary.update(1.0, &avatar, &arena, &mut dice);
        assert_relative_eq!(adversary.position().x, 8.0, epsilon = 1e-4);
        assert_relative_eq!(adversary.yaw(), std::f32::consts::FRAC_PI_2, epsilon = 1e-4);
    }

    #[test]
    fn test_hover_stops_at_radius() {
        let arena = Arena::new(30.0, 30.0);
        let mut dice = Dice::seeded(3);
        let (_, mut adversary) = spawn(Behaviour::Hover, Vec3::new(11.0, 0.0, 5.0), 20);
        let avatar = Vec3::new(15.0, 0.0, 5.0);

        adversary.update(1.0, &avatar, &arena, &mut dice);
        assert_relative_eq!(adversary.position().x, 11.0);
    }

    #[test]
    fn test_flee_holds_at_wall() {
        let arena = Arena::new(30.0, 30.0);
        let mut dice = Dice::seeded(3);
        let (_, mut adversary) = spawn(Behaviour::Flee, Vec3::new(1.5, 0.0, 5.0), 20);
        let avatar = Vec3::new(3.0, 0.0, 5.0);

        adversary.update(1.0, &avatar, &arena, &mut dice);
        assert_relative_eq!(adversary.position().x, 1.5);

        adversary.set_position(Vec3::new(10.0, 0.0, 5.0));
        adversary.update(1.0, &avatar, &arena, &mut dice);
        assert_relative_eq!(adversary.position().x, 12.4, epsilon = 1e-4);
    }

    #[test]
    fn test_skittish_waits_for_avatar() {
        let arena = Arena::new(30.0, 30.0);
        let mut dice = Dice::seeded(3);
        let (_, mut adversary) = spawn(Behaviour::Skittish, Vec3::new(10.0, 0.0, 10.0), 20);

        adversary.update(1.0, &Vec3::new(25.0, 0.0, 25.0), &arena, &mut dice);
        assert_relative_eq!(adversary.position(), Vec3::new(10.0, 0.0, 10.0));

        adversary.update(1.0, &Vec3::new(12.0, 0.0, 10.0), &arena, &mut dice);
        assert!(utils::planar_distance(&adversary.position(), &Vec3::new(10.0, 0.0, 10.0)) > 0.0);
    }

    #[test]
    fn test_fires_on_interval() {
        let arena = Arena::new(30.0, 30.0);
        let mut dice = Dice::seeded(3);
        let (_, mut adversary) = spawn(Behaviour::Hover, Vec3::new(5.0, 0.0, 5.0), 20);
        let avatar = Vec3::new(5.0, 0.0, 8.0);

        assert!(adversary.update(4.0, &avatar, &arena, &mut dice).is_none());
        let shot = adversary.update(1.0, &avatar, &arena, &mut dice).unwrap();
        assert_eq!(shot.owner, adversary.id());
        assert_relative_eq!(shot.origin, Vec3::new(4.867, 1.2, 6.137), epsilon = 1e-4);
        assert_relative_eq!(shot.velocity, Vec3::new(0.0, 0.0, 10.0), epsilon = 1e-4);
        assert_relative_eq!(adversary.fire_cooldown(), 5.0);
    }

    #[test]
    fn test_lethal_hit_sinks_adversary() {
        let (mut roster, mut adversary) = spawn(Behaviour::Chase, Vec3::new(5.0, 0.0, 5.0), 10);
        let projectile = Projectile::new(
            roster.insert(()),
            LocalExtents::centered(Vec3::new(0.1, 0.1, 0.1)).unwrap(),
        );
        let tuning = CombatTuning {
            projectile_damage_to_adversary: RollRange::fixed(10),
            ..CombatTuning::default()
        };
        let mut dice = Dice::seeded(0);
        let mut ctx = ReactionContext::new(&mut dice, &tuning);

        adversary.on_projectile_enter(&projectile, &mut ctx);
        assert_eq!(adversary.health(), 0);
        assert!(!adversary.is_active());
        assert_relative_eq!(adversary.position(), graveyard());

        let arena = Arena::new(30.0, 30.0);
        assert!(adversary.update(10.0, &Vec3::zeros(), &arena, &mut dice).is_none());
        assert_relative_eq!(adversary.position(), graveyard());
    }
}
