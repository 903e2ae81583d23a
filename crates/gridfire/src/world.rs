//! Participant storage and per-tick movement
//!
//! The world owns one collection per category, each kept in creation order,
//! and a roster that issues every participant's id. Spawning and despawning
//! only happen between ticks, never while a collision pass is running.

use crate::arena::{Arena, ADVERSARY_PROFILES};
use crate::config::GameConfig;
use crate::dice::Dice;
use crate::participant::{
    Adversary, AdversarySpec, Avatar, AvatarSpec, Category, FireRequest, Participant, Pickup,
    Projectile,
};
use gridfire_engine::foundation::collections::{EntityId, Roster};
use gridfire_engine::foundation::math::Vec3;
use gridfire_engine::physics::{BoundsError, LocalExtents};
use log::{debug, info, warn};

/// Default projectile lifetime in seconds
pub const DEFAULT_PROJECTILE_LIFETIME: f32 = 5.0;

/// Mutable view of every collection at once
///
/// Lets a collision pass hold one participant mutably while reading another
/// from a different category.
pub struct WorldParts<'a> {
    /// The avatar
    pub avatar: &'a mut Avatar,
    /// Adversaries in creation order
    pub adversaries: &'a mut [Adversary],
    /// Projectile pool in creation order
    pub projectiles: &'a mut [Projectile],
    /// Pickups in creation order
    pub pickups: &'a mut [Pickup],
}

/// All participants of one game
#[derive(Debug, Clone)]
pub struct World {
    roster: Roster<Category>,
    arena: Arena,
    avatar: Avatar,
    adversaries: Vec<Adversary>,
    projectiles: Vec<Projectile>,
    pickups: Vec<Pickup>,
    projectile_lifetime: f32,
}

impl World {
    /// Create a world holding only the avatar
    pub fn new(arena: Arena, avatar: AvatarSpec) -> Self {
        let mut roster = Roster::with_key();
        let avatar = Avatar::new(roster.insert(Category::Avatar), avatar);

        Self {
            roster,
            arena,
            avatar,
            adversaries: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            projectile_lifetime: DEFAULT_PROJECTILE_LIFETIME,
        }
    }

    /// Build the starting layout described by `config`
    ///
    /// The avatar starts in the middle of the board. Adversaries cycle
    /// through the difficulty tiers and spawn away from the avatar.
    pub fn from_config(config: &GameConfig, dice: &mut Dice) -> Result<Self, BoundsError> {
        let arena = Arena::new(config.arena.width, config.arena.depth);
        let mut world = Self::new(
            arena,
            AvatarSpec {
                position: arena.center(),
                extents: LocalExtents::grounded(0.4, 1.8)?,
                max_health: config.combat.avatar_max_health,
                move_speed: config.movement.avatar_speed,
                projectile_speed: config.movement.projectile_speed,
            },
        );
        world.set_projectile_lifetime(config.movement.projectile_lifetime_secs);

        let adversary_extents = LocalExtents::grounded(0.5, 2.0)?;
        for index in 0..config.arena.adversary_count {
            let profile = ADVERSARY_PROFILES[index % ADVERSARY_PROFILES.len()];
            world.spawn_adversary(AdversarySpec {
                position: arena.spawn_point_away_from(&arena.center(), dice),
                extents: adversary_extents,
                health: profile.health,
                skill: profile.skill,
                behaviour: profile.behaviour,
                fire_interval: config.movement.adversary_fire_interval_secs,
                projectile_speed: config.movement.projectile_speed,
            });
        }

        let pickup_extents = LocalExtents::grounded(0.5, 0.5)?;
        for _ in 0..config.arena.pickup_count {
            let spot = arena.random_interior_point(dice);
            world.spawn_pickup(spot, pickup_extents, config.combat.pickup_respawn_secs);
        }

        let projectile_extents = LocalExtents::centered(Vec3::repeat(0.1))?;
        for _ in 0..config.arena.projectile_pool {
            world.spawn_projectile(projectile_extents);
        }

        info!(
            "World ready: {}x{} board, {} adversaries, {} pickups, {} projectiles",
            arena.width(),
            arena.depth(),
            world.adversaries.len(),
            world.pickups.len(),
            world.projectiles.len()
        );
        Ok(world)
    }

    /// Add an adversary
    pub fn spawn_adversary(&mut self, spec: AdversarySpec) -> EntityId {
        let id = self.roster.insert(Category::Adversary);
        self.adversaries.push(Adversary::new(id, spec));
        debug!("Spawned adversary {:?} ({:?})", id, spec.behaviour);
        id
    }

    /// Add an idle projectile to the pool
    pub fn spawn_projectile(&mut self, extents: LocalExtents) -> EntityId {
        let id = self.roster.insert(Category::Projectile);
        self.projectiles.push(Projectile::new(id, extents));
        id
    }

    /// Add an available pickup
    pub fn spawn_pickup(&mut self, position: Vec3, extents: LocalExtents, respawn_secs: f32) -> EntityId {
        let id = self.roster.insert(Category::Pickup);
        self.pickups.push(Pickup::new(id, position, extents, respawn_secs));
        debug!("Spawned pickup {:?} at {:?}", id, position);
        id
    }

    /// Remove a participant between ticks
    ///
    /// Returns the category that was removed. The avatar cannot be
    /// despawned and unknown or stale ids are ignored.
    pub fn despawn(&mut self, id: EntityId) -> Option<Category> {
        let category = *self.roster.get(id)?;
        if category == Category::Avatar {
            warn!("Ignoring request to despawn the avatar");
            return None;
        }

        self.roster.remove(id);
        match category {
            Category::Adversary => self.adversaries.retain(|a| a.id() != id),
            Category::Projectile => self.projectiles.retain(|p| p.id() != id),
            Category::Pickup => self.pickups.retain(|p| p.id() != id),
            Category::Avatar => {}
        }
        debug!("Despawned {} {:?}", category, id);
        Some(category)
    }

    /// Category of a live id
    pub fn category_of(&self, id: EntityId) -> Option<Category> {
        self.roster.get(id).copied()
    }

    /// Number of live participants across all categories
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    /// Whether only the avatar is left
    pub fn is_empty(&self) -> bool {
        self.roster.len() <= 1
    }

    /// Move everything for one step
    ///
    /// Runs the avatar, then adversaries, then projectiles, then pickup
    /// timers. Shots fired this step launch before projectiles move.
    pub fn update(&mut self, delta: f32, dice: &mut Dice) {
        let mut requests = Vec::new();

        if let Some(request) = self.avatar.update(delta, &self.arena) {
            requests.push(request);
        }

        let avatar_position = self.avatar.position();
        for adversary in &mut self.adversaries {
            if let Some(request) = adversary.update(delta, &avatar_position, &self.arena, dice) {
                requests.push(request);
            }
        }

        for request in &requests {
            self.fire(request);
        }

        for projectile in &mut self.projectiles {
            projectile.update(delta, self.projectile_lifetime);
        }

        for pickup in &mut self.pickups {
            pickup.update(delta);
        }
    }

    /// Launch the first idle projectile in the pool
    ///
    /// Returns `None` when every projectile is already in flight.
    pub fn fire(&mut self, request: &FireRequest) -> Option<EntityId> {
        let Some(projectile) = self.projectiles.iter_mut().find(|p| !p.is_in_flight()) else {
            warn!("Projectile pool exhausted, dropping shot from {:?}", request.owner);
            return None;
        };
        projectile.launch(request);
        Some(projectile.id())
    }

    /// Seconds a projectile flies before it is recycled
    pub fn projectile_lifetime(&self) -> f32 {
        self.projectile_lifetime
    }

    /// Change the projectile lifetime
    pub fn set_projectile_lifetime(&mut self, seconds: f32) {
        self.projectile_lifetime = seconds;
    }

    /// Split into per-category mutable views
    pub fn parts_mut(&mut self) -> WorldParts<'_> {
        WorldParts {
            avatar: &mut self.avatar,
            adversaries: &mut self.adversaries,
            projectiles: &mut self.projectiles,
            pickups: &mut self.pickups,
        }
    }

    /// Board geometry
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The avatar
    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    /// The avatar, mutably
    pub fn avatar_mut(&mut self) -> &mut Avatar {
        &mut self.avatar
    }

    /// Adversaries in creation order
    pub fn adversaries(&self) -> &[Adversary] {
        &self.adversaries
    }

    /// Adversaries, mutably
    pub fn adversaries_mut(&mut self) -> &mut [Adversary] {
        &mut self.adversaries
    }

    /// Projectile pool in creation order
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Projectile pool, mutably
    pub fn projectiles_mut(&mut self) -> &mut [Projectile] {
        &mut self.projectiles
    }

    /// Pickups in creation order
    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Pickups, mutably
    pub fn pickups_mut(&mut self) -> &mut [Pickup] {
        &mut self.pickups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::AvatarIntent;

    fn small_world() -> World {
        World::new(
            Arena::new(30.0, 30.0),
            AvatarSpec {
                position: Vec3::new(15.0, 0.0, 15.0),
                extents: LocalExtents::grounded(0.4, 1.8).unwrap(),
                max_health: 100.0,
                move_speed: 5.0,
                projectile_speed: 10.0,
            },
        )
    }

    #[test]
    fn test_default_layout() {
        let config = GameConfig::default();
        let mut dice = Dice::seeded(config.simulation.seed);
        let world = World::from_config(&config, &mut dice).unwrap();

        assert_eq!(world.adversaries().len(), config.arena.adversary_count);
        assert_eq!(world.pickups().len(), config.arena.pickup_count);
        assert_eq!(world.projectiles().len(), config.arena.projectile_pool);
        assert!(world.projectiles().iter().all(|p| !p.is_in_flight()));
        assert_eq!(world.len(), 1 + 5 + 4 + 32);
        assert_eq!(world.category_of(world.avatar().id()), Some(Category::Avatar));
    }

    #[test]
    fn test_fire_uses_first_idle_projectile() {
        let mut world = small_world();
        let extents = LocalExtents::centered(Vec3::repeat(0.1)).unwrap();
        let first = world.spawn_projectile(extents);
        let second = world.spawn_projectile(extents);

        let request = FireRequest {
            origin: Vec3::new(5.0, 1.0, 5.0),
            velocity: Vec3::new(0.0, 0.0, 10.0),
            yaw: 0.0,
            owner: world.avatar().id(),
        };
        assert_eq!(world.fire(&request), Some(first));
        assert_eq!(world.fire(&request), Some(second));
        assert_eq!(world.fire(&request), None);
    }

    #[test]
    fn test_avatar_shot_launches_on_update() {
        let mut world = small_world();
        let mut dice = Dice::seeded(1);
        world.spawn_projectile(LocalExtents::centered(Vec3::repeat(0.1)).unwrap());
        world.avatar_mut().set_intent(AvatarIntent {
            fire: true,
            ..AvatarIntent::default()
        });

        world.update(0.1, &mut dice);
        let projectile = &world.projectiles()[0];
        assert!(projectile.is_in_flight());
        assert_eq!(projectile.owner(), Some(world.avatar().id()));
    }

    #[test]
    fn test_despawn_keeps_order_and_rejects_stale_ids() {
        let mut world = small_world();
        let extents = LocalExtents::grounded(0.5, 0.5).unwrap();
        let a = world.spawn_pickup(Vec3::new(2.0, 0.0, 2.0), extents, 5.0);
        let b = world.spawn_pickup(Vec3::new(4.0, 0.0, 4.0), extents, 5.0);
        let c = world.spawn_pickup(Vec3::new(6.0, 0.0, 6.0), extents, 5.0);

        assert_eq!(world.despawn(b), Some(Category::Pickup));
        assert_eq!(world.despawn(b), None);
        let ids: Vec<_> = world.pickups().iter().map(Participant::id).collect();
        assert_eq!(ids, vec![a, c]);

        // A new spawn may reuse the slot but never the id
        let d = world.spawn_pickup(Vec3::new(8.0, 0.0, 8.0), extents, 5.0);
        assert_ne!(d, b);
        assert_eq!(world.category_of(b), None);
    }

    #[test]
    fn test_avatar_cannot_be_despawned() {
        let mut world = small_world();
        let avatar = world.avatar().id();
        assert_eq!(world.despawn(avatar), None);
        assert_eq!(world.category_of(avatar), Some(Category::Avatar));
    }
}
