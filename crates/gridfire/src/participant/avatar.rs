//! The player-controlled avatar

use super::{Adversary, Category, FireRequest, Participant, Pickup, Projectile};
use crate::arena::Arena;
use crate::dice::ReactionContext;
use gridfire_engine::foundation::collections::EntityId;
use gridfire_engine::foundation::math::{utils, Vec3};
use gridfire_engine::physics::{Aabb, Collider, LocalExtents};
use log::{debug, info, trace};

/// Height above the avatar's feet where its shots start
const MUZZLE_HEIGHT: f32 = 1.0;

/// Distance in front of the avatar where its shots start
const MUZZLE_REACH: f32 = 1.0;

/// Movement and firing request for the next update
///
/// Produced by whatever drives the avatar: an input layer, a script, a test.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AvatarIntent {
    /// Forward/backward input in `-1.0..=1.0`
    pub forward: f32,

    /// Right/left input in `-1.0..=1.0`
    pub strafe: f32,

    /// Heading to face, in radians
    pub yaw: f32,

    /// Fire one shot on the next update
    pub fire: bool,
}

/// Construction parameters for an [`Avatar`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarSpec {
    /// Starting position
    pub position: Vec3,

    /// Mesh-space box
    pub extents: LocalExtents,

    /// Health cap, also the starting health
    pub max_health: f32,

    /// Units per second
    pub move_speed: f32,

    /// Launch speed of fired projectiles
    pub projectile_speed: f32,
}

/// The avatar
#[derive(Debug, Clone)]
pub struct Avatar {
    id: EntityId,
    collider: Collider,
    position: Vec3,
    yaw: f32,
    health: f32,
    max_health: f32,
    move_speed: f32,
    projectile_speed: f32,
    score: u32,
    adversaries_defeated: u32,
    intent: AvatarIntent,
}

impl Avatar {
    /// Create an avatar at full health
    pub fn new(id: EntityId, spec: AvatarSpec) -> Self {
        Self {
            id,
            collider: Collider::new(spec.extents, &spec.position),
            position: spec.position,
            yaw: 0.0,
            health: spec.max_health,
            max_health: spec.max_health,
            move_speed: spec.move_speed,
            projectile_speed: spec.projectile_speed,
            score: 0,
            adversaries_defeated: 0,
            intent: AvatarIntent::default(),
        }
    }

    /// Replace the pending intent
    pub fn set_intent(&mut self, intent: AvatarIntent) {
        self.intent = intent;
    }

    /// Pending intent
    pub fn intent(&self) -> &AvatarIntent {
        &self.intent
    }

    /// Apply the pending intent for one step
    ///
    /// Movement is relative to the new heading and clamped to the arena
    /// interior. A fire request is consumed by the update that returns it.
    pub fn update(&mut self, delta: f32, arena: &Arena) -> Option<FireRequest> {
        let intent = self.intent;
        self.yaw = intent.yaw;

        let forward = utils::forward_from_yaw(self.yaw);
        let right = utils::right_from_yaw(self.yaw);
        let input = forward * utils::clamp(intent.forward, -1.0, 1.0)
            + right * utils::clamp(intent.strafe, -1.0, 1.0);

        if input.magnitude_squared() > 0.0 {
            let direction = if input.magnitude() > 1.0 { input.normalize() } else { input };
            let target = self.position + direction * self.move_speed * delta;
            self.set_position(arena.clamp_interior(&target));
        }

        if !intent.fire {
            return None;
        }
        self.intent.fire = false;

        Some(FireRequest {
            origin: self.position + Vec3::y() * MUZZLE_HEIGHT + forward * MUZZLE_REACH,
            velocity: forward * self.projectile_speed,
            yaw: self.yaw,
            owner: self.id,
        })
    }

    /// Move the avatar and refresh its bounds
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

    /// Current health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Health cap
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Whether health has run out
    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    /// Points earned so far
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of adversaries this avatar has killed
    pub fn adversaries_defeated(&self) -> u32 {
        self.adversaries_defeated
    }

    /// Lose `amount` health; health may go negative
    pub fn apply_damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    /// Credit a kill worth `skill` points
    pub fn award_kill(&mut self, skill: u32) {
        self.score += skill;
        self.adversaries_defeated += 1;
        info!(
            "Avatar scored {} (total {}, defeated {})",
            skill, self.score, self.adversaries_defeated
        );
    }

    /// Touching an adversary is fatal
    pub fn on_adversary_enter(&mut self, adversary: &Adversary) {
        self.health = 0.0;
        info!("Avatar caught by adversary {:?}", adversary.id());
    }

    /// Still in contact with an adversary
    pub fn on_adversary_stay(&mut self, adversary: &Adversary) {
        trace!("Avatar still touching adversary {:?}", adversary.id());
    }

    /// Contact with an adversary ended
    pub fn on_adversary_exit(&mut self, adversary: &Adversary) {
        debug!("Avatar left adversary {:?}", adversary.id());
    }

    /// Hit by a projectile
    #[allow(clippy::cast_precision_loss)]
    pub fn on_projectile_enter(&mut self, projectile: &Projectile, ctx: &mut ReactionContext<'_>) {
        let damage = ctx.roll(ctx.tuning().projectile_damage_to_avatar);
        self.apply_damage(damage as f32);
        debug!(
            "Avatar hit by projectile {:?} for {} (health {})",
            projectile.id(),
            damage,
            self.health
        );
    }

    /// Projectile still passing through
    pub fn on_projectile_stay(&mut self, projectile: &Projectile) {
        trace!("Avatar still overlapping projectile {:?}", projectile.id());
    }

    /// Projectile passed through
    pub fn on_projectile_exit(&mut self, projectile: &Projectile) {
        debug!("Projectile {:?} left avatar", projectile.id());
    }

    /// Picked up a health pack
    #[allow(clippy::cast_precision_loss)]
    pub fn on_pickup_enter(&mut self, pickup: &Pickup, ctx: &mut ReactionContext<'_>) {
        let heal = ctx.roll(ctx.tuning().pickup_heal);
        self.health = (self.health + heal as f32).min(self.max_health);
        debug!(
            "Avatar healed {} from pickup {:?} (health {})",
            heal,
            pickup.id(),
            self.health
        );
    }

    /// Still standing on a pickup
    pub fn on_pickup_stay(&mut self, pickup: &Pickup) {
        trace!("Avatar still over pickup {:?}", pickup.id());
    }

    /// Stepped off a pickup
    pub fn on_pickup_exit(&mut self, pickup: &Pickup) {
        debug!("Avatar left pickup {:?}", pickup.id());
    }
}

impl Participant for Avatar {
    const CATEGORY: Category = Category::Avatar;

    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> &Aabb {
        self.collider.bounds()
    }

    fn is_active(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CombatTuning, RollRange};
    use crate::dice::Dice;
    use approx::assert_relative_eq;
    use gridfire_engine::foundation::collections::Roster;
    use gridfire_engine::foundation::math::constants;

    fn spawn_avatar(position: Vec3) -> Avatar {
        let mut roster: Roster<()> = Roster::with_key();
        Avatar::new(
            roster.insert(()),
            AvatarSpec {
                position,
                extents: LocalExtents::grounded(0.5, 1.8).unwrap(),
                max_health: 100.0,
                move_speed: 5.0,
                projectile_speed: 10.0,
            },
        )
    }

    #[test]
    fn test_moves_along_heading() {
        let arena = Arena::new(30.0, 30.0);
        let mut avatar = spawn_avatar(Vec3::new(15.0, 0.0, 15.0));
        avatar.set_intent(AvatarIntent {
            forward: 1.0,
            yaw: constants::PI / 2.0,
            ..AvatarIntent::default()
        });

        assert!(avatar.update(1.0, &arena).is_none());
        assert_relative_eq!(avatar.position().x, 20.0, epsilon = 1e-4);
        assert_relative_eq!(avatar.position().z, 15.0, epsilon = 1e-4);
        assert_relative_eq!(avatar.bounds().min.x, 19.5, epsilon = 1e-4);
    }

    #[test]
    fn test_movement_clamped_to_interior() {
        let arena = Arena::new(30.0, 30.0);
        let mut avatar = spawn_avatar(Vec3::new(2.0, 0.0, 2.0));
        avatar.set_intent(AvatarIntent {
            forward: -1.0,
            ..AvatarIntent::default()
        });

        avatar.update(10.0, &arena);
        assert_relative_eq!(avatar.position().z, 1.0);
    }

    #[test]
    fn test_fire_request_is_consumed() {
        let arena = Arena::new(30.0, 30.0);
        let mut avatar = spawn_avatar(Vec3::new(5.0, 0.0, 5.0));
        avatar.set_intent(AvatarIntent {
            fire: true,
            ..AvatarIntent::default()
        });

        let request = avatar.update(0.016, &arena).unwrap();
        assert_eq!(request.owner, avatar.id());
        assert_relative_eq!(request.origin, Vec3::new(5.0, 1.0, 6.0), epsilon = 1e-5);
        assert_relative_eq!(request.velocity, Vec3::new(0.0, 0.0, 10.0), epsilon = 1e-5);

        assert!(avatar.update(0.016, &arena).is_none());
    }

    #[test]
    fn test_heal_is_clamped_to_max() {
        let mut roster: Roster<()> = Roster::with_key();
        let mut avatar = spawn_avatar(Vec3::zeros());
        let pickup = Pickup::new(
            roster.insert(()),
            Vec3::zeros(),
            LocalExtents::grounded(0.5, 0.5).unwrap(),
            10.0,
        );
        let tuning = CombatTuning {
            pickup_heal: RollRange::fixed(30),
            ..CombatTuning::default()
        };
        let mut dice = Dice::seeded(0);
        let mut ctx = ReactionContext::new(&mut dice, &tuning);

        avatar.apply_damage(10.0);
        avatar.on_pickup_enter(&pickup, &mut ctx);
        assert_relative_eq!(avatar.health(), 100.0);
    }

    #[test]
    fn test_award_kill() {
        let mut avatar = spawn_avatar(Vec3::zeros());
        avatar.award_kill(4);
        avatar.award_kill(6);
        assert_eq!(avatar.score(), 10);
        assert_eq!(avatar.adversaries_defeated(), 2);
    }
}
