//! Consumable health packs

use super::{Avatar, Category, Participant, PARKING_DEPTH};
use gridfire_engine::foundation::collections::EntityId;
use gridfire_engine::foundation::math::Vec3;
use gridfire_engine::foundation::time::Countdown;
use gridfire_engine::physics::{Aabb, Collider, LocalExtents};
use log::{debug, info, trace};

/// A health pack that disappears when collected and returns later
#[derive(Debug, Clone)]
pub struct Pickup {
    id: EntityId,
    collider: Collider,
    position: Vec3,
    spawn_point: Vec3,
    available: bool,
    respawn: Countdown,
}

impl Pickup {
    /// Place an available pickup at `spawn_point`
    pub fn new(id: EntityId, spawn_point: Vec3, extents: LocalExtents, respawn_secs: f32) -> Self {
        Self {
            id,
            collider: Collider::new(extents, &spawn_point),
            position: spawn_point,
            spawn_point,
            available: true,
            respawn: Countdown::new(respawn_secs),
        }
    }

    /// Whether the pickup can be collected
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Where the pickup returns to after respawning
    pub fn spawn_point(&self) -> Vec3 {
        self.spawn_point
    }

    /// Seconds until a consumed pickup returns
    pub fn respawn_remaining(&self) -> f32 {
        if self.available { 0.0 } else { self.respawn.remaining() }
    }

    /// Advance the respawn timer
    ///
    /// Returns true on the update that brings the pickup back.
    pub fn update(&mut self, delta: f32) -> bool {
        if self.available || !self.respawn.tick(delta) {
            return false;
        }

        self.available = true;
        self.move_to(self.spawn_point);
        info!("Pickup {:?} respawned", self.id);
        true
    }

    fn move_to(&mut self, position: Vec3) {
        self.position = position;
        self.collider.sync(&self.position);
    }

    /// Collected by the avatar: hide below the board and start the timer
    pub fn on_avatar_enter(&mut self, avatar: &Avatar) {
        self.available = false;
        self.move_to(Vec3::new(self.spawn_point.x, PARKING_DEPTH, self.spawn_point.z));
        self.respawn.reset();
        debug!("Pickup {:?} collected by {:?}", self.id, avatar.id());
    }

    /// Avatar still overlapping
    pub fn on_avatar_stay(&mut self, avatar: &Avatar) {
        trace!("Pickup {:?} still under {:?}", self.id, avatar.id());
    }

    /// Avatar moved away
    pub fn on_avatar_exit(&mut self, avatar: &Avatar) {
        debug!("Pickup {:?} no longer under {:?}", self.id, avatar.id());
    }
}

impl Participant for Pickup {
    const CATEGORY: Category = Category::Pickup;

    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> &Aabb {
        self.collider.bounds()
    }

    fn is_active(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::AvatarSpec;
    use approx::assert_relative_eq;
    use gridfire_engine::foundation::collections::Roster;

    #[test]
    fn test_collect_then_respawn() {
        let mut roster: Roster<()> = Roster::with_key();
        let extents = LocalExtents::grounded(0.5, 0.5).unwrap();
        let avatar = Avatar::new(
            roster.insert(()),
            AvatarSpec {
                position: Vec3::zeros(),
                extents,
                max_health: 100.0,
                move_speed: 5.0,
                projectile_speed: 10.0,
            },
        );
        let mut pickup = Pickup::new(roster.insert(()), Vec3::new(4.0, 0.0, 6.0), extents, 2.0);

        pickup.on_avatar_enter(&avatar);
        assert!(!pickup.is_active());
        assert_relative_eq!(pickup.position().y, PARKING_DEPTH);
        assert_relative_eq!(pickup.bounds().min.y, PARKING_DEPTH);

        assert!(!pickup.update(1.5));
        assert!(!pickup.is_available());
        assert!(pickup.update(0.5));
        assert!(pickup.is_available());
        assert_relative_eq!(pickup.position(), Vec3::new(4.0, 0.0, 6.0));

        // An available pickup ignores further updates
        assert!(!pickup.update(5.0));
    }
}
