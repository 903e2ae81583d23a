//! Pooled projectiles
//!
//! Projectiles are never destroyed. A spent projectile is parked below the
//! board and relaunched by the next shot that needs one.

use super::{Adversary, Avatar, Category, FireRequest, Participant, PARKING_DEPTH};
use gridfire_engine::foundation::collections::EntityId;
use gridfire_engine::foundation::math::Vec3;
use gridfire_engine::physics::{Aabb, Collider, LocalExtents};
use log::{debug, trace};

/// Where idle projectiles wait
pub fn rest_position() -> Vec3 {
    Vec3::new(0.0, PARKING_DEPTH, 0.0)
}

/// A projectile from the shared pool
#[derive(Debug, Clone)]
pub struct Projectile {
    id: EntityId,
    collider: Collider,
    position: Vec3,
    velocity: Vec3,
    yaw: f32,
    in_flight: bool,
    time_in_air: f32,
    owner: Option<EntityId>,
    last_hit: Option<EntityId>,
}

impl Projectile {
    /// Create an idle projectile at its rest position
    pub fn new(id: EntityId, extents: LocalExtents) -> Self {
        Self {
            id,
            collider: Collider::new(extents, &rest_position()),
            position: rest_position(),
            velocity: Vec3::zeros(),
            yaw: 0.0,
            in_flight: false,
            time_in_air: 0.0,
            owner: None,
            last_hit: None,
        }
    }

    /// Put the projectile in flight
    pub fn launch(&mut self, request: &FireRequest) {
        self.velocity = request.velocity;
        self.yaw = request.yaw;
        self.owner = Some(request.owner);
        self.last_hit = None;
        self.time_in_air = 0.0;
        self.in_flight = true;
        self.move_to(request.origin);
        trace!("Projectile {:?} launched by {:?}", self.id, request.owner);
    }

    /// Advance along the velocity, recycling after `lifetime` seconds
    pub fn update(&mut self, delta: f32, lifetime: f32) {
        if !self.in_flight {
            return;
        }

        self.time_in_air += delta;
        if self.time_in_air >= lifetime {
            self.recycle();
            return;
        }

        self.move_to(self.position + self.velocity * delta);
    }

    /// Stop flying and return to the rest position
    pub fn recycle(&mut self) {
        self.in_flight = false;
        self.time_in_air = 0.0;
        self.velocity = Vec3::zeros();
        self.move_to(rest_position());
    }

    fn move_to(&mut self, position: Vec3) {
        self.position = position;
        self.collider.sync(&self.position);
    }

    /// Whether the projectile is flying
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Heading the projectile was fired at
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Seconds since launch
    pub fn time_in_air(&self) -> f32 {
        self.time_in_air
    }

    /// Participant that fired the current flight
    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    /// Last participant this projectile struck
    pub fn last_hit(&self) -> Option<EntityId> {
        self.last_hit
    }

    /// Struck the avatar
    pub fn on_avatar_enter(&mut self, avatar: &Avatar) {
        self.last_hit = Some(avatar.id());
        debug!("Projectile {:?} struck avatar {:?}", self.id, avatar.id());
    }

    /// Still passing through the avatar
    pub fn on_avatar_stay(&mut self, avatar: &Avatar) {
        trace!("Projectile {:?} inside avatar {:?}", self.id, avatar.id());
    }

    /// Passed through the avatar
    pub fn on_avatar_exit(&mut self, avatar: &Avatar) {
        debug!("Projectile {:?} cleared avatar {:?}", self.id, avatar.id());
        self.recycle();
    }

    /// Struck an adversary
    pub fn on_adversary_enter(&mut self, adversary: &Adversary) {
        self.last_hit = Some(adversary.id());
        debug!("Projectile {:?} struck adversary {:?}", self.id, adversary.id());
    }

    /// Still passing through an adversary
    pub fn on_adversary_stay(&mut self, adversary: &Adversary) {
        trace!("Projectile {:?} inside adversary {:?}", self.id, adversary.id());
    }

    /// Passed through an adversary
    pub fn on_adversary_exit(&mut self, adversary: &Adversary) {
        debug!("Projectile {:?} cleared adversary {:?}", self.id, adversary.id());
        self.recycle();
    }
}

impl Participant for Projectile {
    const CATEGORY: Category = Category::Projectile;

    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> &Aabb {
        self.collider.bounds()
    }

    fn is_active(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gridfire_engine::foundation::collections::Roster;

    fn pooled() -> (EntityId, Projectile) {
        let mut roster: Roster<()> = Roster::with_key();
        let owner = roster.insert(());
        let extents = LocalExtents::centered(Vec3::new(0.1, 0.1, 0.1)).unwrap();
        (owner, Projectile::new(roster.insert(()), extents))
    }

    #[test]
    fn test_flight_and_expiry() {
        let (owner, mut projectile) = pooled();
        assert!(!projectile.is_active());

        projectile.launch(&FireRequest {
            origin: Vec3::new(1.0, 1.0, 1.0),
            velocity: Vec3::new(0.0, 0.0, 10.0),
            yaw: 0.0,
            owner,
        });
        assert!(projectile.is_active());
        assert_eq!(projectile.owner(), Some(owner));

        projectile.update(0.5, 5.0);
        assert_relative_eq!(projectile.position(), Vec3::new(1.0, 1.0, 6.0), epsilon = 1e-5);
        assert_relative_eq!(projectile.bounds().center(), projectile.position(), epsilon = 1e-5);

        projectile.update(4.5, 5.0);
        assert!(!projectile.is_in_flight());
        assert_relative_eq!(projectile.position(), rest_position());
        assert_relative_eq!(projectile.time_in_air(), 0.0);
    }

    #[test]
    fn test_idle_projectile_does_not_move() {
        let (_, mut projectile) = pooled();
        projectile.update(1.0, 5.0);
        assert_relative_eq!(projectile.position(), rest_position());
    }
}
