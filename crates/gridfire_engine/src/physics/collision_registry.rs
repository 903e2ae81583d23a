//! Frame-to-frame memory of colliding pairs
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.10:
//! "Collision events are usually reported when contacts begin and end,
//! which requires comparing this frame's contacts against last frame's."
//!
//! The registry owns two pair sets, `previous` and `current`. During a frame
//! the caller records every overlapping pair into `current` and queries
//! `previous` to tell new contacts from continuing ones. [`CollisionRegistry::rotate`]
//! swaps the buffers at the end of the frame.

use crate::foundation::collections::EntityId;
use crate::physics::bounds::Aabb;
use crate::physics::transition::CollisionPhase;
use std::collections::HashSet;
use thiserror::Error;

/// Initial pair capacity reserved per buffer
pub const DEFAULT_PAIR_RESERVE: usize = 1024;

/// Collision pair representing two entities that are colliding
///
/// Unordered: the smaller id is always stored first, so `(a, b)` and `(b, a)`
/// build the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    first: EntityId,
    second: EntityId,
}

impl CollisionPair {
    /// Create a new collision pair in canonical order
    pub fn new(a: EntityId, b: EntityId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Smaller id of the pair
    pub fn first(&self) -> EntityId {
        self.first
    }

    /// Larger id of the pair
    pub fn second(&self) -> EntityId {
        self.second
    }

    /// Whether `id` is one of the two members
    pub fn involves(&self, id: EntityId) -> bool {
        self.first == id || self.second == id
    }

    /// The member that is not `id`
    pub fn other(&self, id: EntityId) -> Option<EntityId> {
        if self.first == id {
            Some(self.second)
        } else if self.second == id {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Which buffer of the registry a query refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Pairs recorded during the last completed frame
    Previous,
    /// Pairs recorded so far during this frame
    Current,
}

/// Collision bookkeeping errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionError {
    /// The current-frame buffer reached its configured limit
    #[error("collision registry full: {capacity} pairs already recorded this frame")]
    CapacityExceeded {
        /// Configured pair limit
        capacity: usize,
    },
}

/// Two-buffer record of colliding pairs
pub struct CollisionRegistry {
    previous: HashSet<CollisionPair>,
    current: HashSet<CollisionPair>,
    capacity: Option<usize>,
}

impl CollisionRegistry {
    /// Create a registry that grows as needed
    pub fn new() -> Self {
        Self {
            previous: HashSet::with_capacity(DEFAULT_PAIR_RESERVE),
            current: HashSet::with_capacity(DEFAULT_PAIR_RESERVE),
            capacity: None,
        }
    }

    /// Create a registry that rejects records past `capacity` pairs per frame
    pub fn with_capacity_limit(capacity: usize) -> Self {
        let reserve = capacity.min(DEFAULT_PAIR_RESERVE);
        Self {
            previous: HashSet::with_capacity(reserve),
            current: HashSet::with_capacity(reserve),
            capacity: Some(capacity),
        }
    }

    /// Configured per-frame pair limit, if any
    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }

    fn buffer(&self, frame: Frame) -> &HashSet<CollisionPair> {
        match frame {
            Frame::Previous => &self.previous,
            Frame::Current => &self.current,
        }
    }

    /// Check whether the unordered pair is present in the given buffer
    pub fn contains(&self, frame: Frame, a: EntityId, b: EntityId) -> bool {
        self.buffer(frame).contains(&CollisionPair::new(a, b))
    }

    /// Register that two entities overlap this frame
    ///
    /// Recording a pair that is already present is a no-op.
    pub fn record(&mut self, a: EntityId, b: EntityId) -> Result<(), CollisionError> {
        let pair = CollisionPair::new(a, b);
        if self.current.contains(&pair) {
            return Ok(());
        }

        if let Some(capacity) = self.capacity {
            if self.current.len() >= capacity {
                return Err(CollisionError::CapacityExceeded { capacity });
            }
        }

        self.current.insert(pair);
        Ok(())
    }

    /// Test, record and classify one pair for this frame
    ///
    /// Overlapping pairs are recorded into the current buffer every frame
    /// they overlap. Pairs that stopped overlapping are left out, which is
    /// what ends their contact.
    pub fn classify(
        &mut self,
        a: EntityId,
        a_bounds: &Aabb,
        b: EntityId,
        b_bounds: &Aabb,
    ) -> Result<Option<CollisionPhase>, CollisionError> {
        let is_colliding = a_bounds.overlaps(b_bounds);
        let was_colliding = self.contains(Frame::Previous, a, b);

        if is_colliding {
            self.record(a, b)?;
        }

        Ok(CollisionPhase::from_overlap(is_colliding, was_colliding))
    }

    /// End the frame: current becomes previous, current starts empty
    ///
    /// The buffers are swapped rather than copied.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.clear();
    }

    /// Drop every pair involving `id` from both buffers
    ///
    /// Used when an entity is removed between frames.
    pub fn forget(&mut self, id: EntityId) {
        self.previous.retain(|pair| !pair.involves(id));
        self.current.retain(|pair| !pair.involves(id));
    }

    /// Iterate the pairs of one buffer (unordered)
    pub fn pairs(&self, frame: Frame) -> impl Iterator<Item = &CollisionPair> {
        self.buffer(frame).iter()
    }

    /// Number of pairs in one buffer
    pub fn len(&self, frame: Frame) -> usize {
        self.buffer(frame).len()
    }

    /// Whether one buffer holds no pairs
    pub fn is_empty(&self, frame: Frame) -> bool {
        self.buffer(frame).is_empty()
    }

    /// Clear all collision data
    pub fn clear(&mut self) {
        self.previous.clear();
        self.current.clear();
    }
}

impl Default for CollisionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
