//! Category-pair reaction table
//!
//! Which participant reacts to which transition, for every category pair
//! the game tests. The first category in a pair's name is the outer loop of
//! its sub-pass.

use crate::dice::ReactionContext;
use crate::participant::{Category, Participant};
use crate::world::WorldParts;
use bitflags::bitflags;
use gridfire_engine::physics::CollisionPhase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pair of categories tested against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryPair {
    /// Avatar against adversaries
    AvatarAdversary,
    /// Avatar against projectiles
    AvatarProjectile,
    /// Adversaries against projectiles
    AdversaryProjectile,
    /// Avatar against pickups
    AvatarPickup,
}

bitflags! {
    /// Set of enabled category pairs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategoryPairs: u8 {
        /// Avatar against adversaries
        const AVATAR_ADVERSARY = 1 << 0;
        /// Avatar against projectiles
        const AVATAR_PROJECTILE = 1 << 1;
        /// Adversaries against projectiles
        const ADVERSARY_PROJECTILE = 1 << 2;
        /// Avatar against pickups
        const AVATAR_PICKUP = 1 << 3;
    }
}

impl CategoryPair {
    /// Every pair in sub-pass order
    pub const ALL: [CategoryPair; 4] = [
        CategoryPair::AvatarAdversary,
        CategoryPair::AvatarProjectile,
        CategoryPair::AdversaryProjectile,
        CategoryPair::AvatarPickup,
    ];

    /// Position in [`CategoryPair::ALL`]
    pub fn index(self) -> usize {
        match self {
            CategoryPair::AvatarAdversary => 0,
            CategoryPair::AvatarProjectile => 1,
            CategoryPair::AdversaryProjectile => 2,
            CategoryPair::AvatarPickup => 3,
        }
    }

    /// Mask bit for this pair
    pub fn flag(self) -> CategoryPairs {
        match self {
            CategoryPair::AvatarAdversary => CategoryPairs::AVATAR_ADVERSARY,
            CategoryPair::AvatarProjectile => CategoryPairs::AVATAR_PROJECTILE,
            CategoryPair::AdversaryProjectile => CategoryPairs::ADVERSARY_PROJECTILE,
            CategoryPair::AvatarPickup => CategoryPairs::AVATAR_PICKUP,
        }
    }

    /// Outer and inner category of the sub-pass
    pub fn categories(self) -> (Category, Category) {
        match self {
            CategoryPair::AvatarAdversary => (Category::Avatar, Category::Adversary),
            CategoryPair::AvatarProjectile => (Category::Avatar, Category::Projectile),
            CategoryPair::AdversaryProjectile => (Category::Adversary, Category::Projectile),
            CategoryPair::AvatarPickup => (Category::Avatar, Category::Pickup),
        }
    }
}

impl fmt::Display for CategoryPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, second) = self.categories();
        write!(f, "{first}-{second}")
    }
}

impl CategoryPairs {
    /// Mask enabling exactly the listed pairs
    pub fn from_pairs<I: IntoIterator<Item = CategoryPair>>(pairs: I) -> Self {
        pairs.into_iter().fold(Self::empty(), |mask, pair| mask | pair.flag())
    }

    /// Whether `pair` is enabled
    pub fn contains_pair(self, pair: CategoryPair) -> bool {
        self.contains(pair.flag())
    }

    /// Enabled pairs in sub-pass order
    pub fn pairs(self) -> impl Iterator<Item = CategoryPair> {
        CategoryPair::ALL.into_iter().filter(move |pair| self.contains_pair(*pair))
    }
}

/// Invoke the reactions for one classified pair
///
/// `first` and `second` index the outer and inner collections of the pair.
/// The avatar has no index since there is only one. Returns true when the
/// reaction killed an adversary.
pub fn dispatch(
    pair: CategoryPair,
    phase: CollisionPhase,
    first: usize,
    second: usize,
    parts: &mut WorldParts<'_>,
    ctx: &mut ReactionContext<'_>,
) -> bool {
    match pair {
        CategoryPair::AvatarAdversary => {
            let adversary = &parts.adversaries[second];
            match phase {
                CollisionPhase::Enter => parts.avatar.on_adversary_enter(adversary),
                CollisionPhase::Stay => parts.avatar.on_adversary_stay(adversary),
                CollisionPhase::Exit => parts.avatar.on_adversary_exit(adversary),
            }
            false
        }
        CategoryPair::AvatarProjectile => {
            let projectile = &mut parts.projectiles[second];
            match phase {
                CollisionPhase::Enter => {
                    parts.avatar.on_projectile_enter(projectile, ctx);
                    projectile.on_avatar_enter(parts.avatar);
                }
                CollisionPhase::Stay => {
                    parts.avatar.on_projectile_stay(projectile);
                    projectile.on_avatar_stay(parts.avatar);
                }
                CollisionPhase::Exit => {
                    parts.avatar.on_projectile_exit(projectile);
                    projectile.on_avatar_exit(parts.avatar);
                }
            }
            false
        }
        CategoryPair::AdversaryProjectile => {
            let adversary = &mut parts.adversaries[first];
            let projectile = &mut parts.projectiles[second];
            match phase {
                CollisionPhase::Enter => {
                    let was_alive = adversary.is_alive();
                    adversary.on_projectile_enter(projectile, ctx);
                    projectile.on_adversary_enter(adversary);

                    let killed = was_alive && !adversary.is_alive();
                    if killed && projectile.owner() == Some(parts.avatar.id()) {
                        parts.avatar.award_kill(adversary.skill());
                    }
                    killed
                }
                CollisionPhase::Stay => {
                    adversary.on_projectile_stay(projectile);
                    projectile.on_adversary_stay(adversary);
                    false
                }
                CollisionPhase::Exit => {
                    adversary.on_projectile_exit(projectile);
                    projectile.on_adversary_exit(adversary);
                    false
                }
            }
        }
        CategoryPair::AvatarPickup => {
            let pickup = &mut parts.pickups[second];
            match phase {
                CollisionPhase::Enter => {
                    parts.avatar.on_pickup_enter(pickup, ctx);
                    pickup.on_avatar_enter(parts.avatar);
                }
                CollisionPhase::Stay => {
                    parts.avatar.on_pickup_stay(pickup);
                    pickup.on_avatar_stay(parts.avatar);
                }
                CollisionPhase::Exit => {
                    parts.avatar.on_pickup_exit(pickup);
                    pickup.on_avatar_exit(parts.avatar);
                }
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_order() {
        for (position, pair) in CategoryPair::ALL.iter().enumerate() {
            assert_eq!(pair.index(), position);
        }
    }

    #[test]
    fn test_mask_round_trip() {
        let mask = CategoryPairs::from_pairs([CategoryPair::AvatarPickup, CategoryPair::AvatarAdversary]);
        assert!(mask.contains_pair(CategoryPair::AvatarAdversary));
        assert!(!mask.contains_pair(CategoryPair::AvatarProjectile));

        let enabled: Vec<_> = mask.pairs().collect();
        assert_eq!(enabled, vec![CategoryPair::AvatarAdversary, CategoryPair::AvatarPickup]);

        assert_eq!(CategoryPairs::from_pairs(CategoryPair::ALL), CategoryPairs::all());
    }

    #[test]
    fn test_display() {
        assert_eq!(CategoryPair::AdversaryProjectile.to_string(), "adversary-projectile");
    }
}
