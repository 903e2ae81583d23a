//! Enter/Stay/Exit classification
//!
//! A pair's phase is a pure function of whether it overlaps this frame and
//! whether it was recorded as overlapping last frame. There is no history
//! beyond one frame and no timers.

use std::fmt;

/// Transition of a colliding pair relative to the previous frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionPhase {
    /// Overlapping now, not overlapping last frame
    Enter,
    /// Overlapping now and last frame
    Stay,
    /// Not overlapping now, overlapping last frame
    Exit,
}

impl CollisionPhase {
    /// Classify a pair from its overlap state in this frame and the last one
    ///
    /// Returns `None` for a pair that was apart and still is.
    pub fn from_overlap(is_colliding: bool, was_colliding: bool) -> Option<Self> {
        match (is_colliding, was_colliding) {
            (true, false) => Some(Self::Enter),
            (true, true) => Some(Self::Stay),
            (false, true) => Some(Self::Exit),
            (false, false) => None,
        }
    }

    /// Short lowercase name, used in log lines
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Stay => "stay",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for CollisionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        assert_eq!(CollisionPhase::from_overlap(true, false), Some(CollisionPhase::Enter));
        assert_eq!(CollisionPhase::from_overlap(true, true), Some(CollisionPhase::Stay));
        assert_eq!(CollisionPhase::from_overlap(false, true), Some(CollisionPhase::Exit));
        assert_eq!(CollisionPhase::from_overlap(false, false), None);
    }
}
