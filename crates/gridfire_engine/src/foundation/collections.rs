//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational handle identifying one entity for its whole lifetime
    ///
    /// Handles compare by identity, never by the entity's contents. A handle
    /// whose entity was removed never matches a later entity that happens to
    /// reuse the same slot.
    pub struct EntityId;
}

/// Handle-based map issuing stable [`EntityId`]s
pub type Roster<T> = SlotMap<EntityId, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reused_slot_gets_distinct_id() {
        let mut roster: Roster<&str> = Roster::with_key();
        let first = roster.insert("projectile");
        roster.remove(first);
        let second = roster.insert("projectile");

        assert_ne!(first, second);
        assert!(!roster.contains_key(first));
        assert!(roster.contains_key(second));
    }

    #[test]
    fn test_ids_are_totally_ordered() {
        let mut roster: Roster<u8> = Roster::with_key();
        let a = roster.insert(1);
        let b = roster.insert(2);
        assert!(a < b || b < a);
    }
}
