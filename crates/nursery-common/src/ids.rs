//! ID types for plants and observers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix used when rendering a plant ID as text.
pub const PLANT_ID_PREFIX: &str = "PLANT-";

/// Unique identifier for a plant.
///
/// IDs are handed out by a [`PlantIdGenerator`]; there is no global counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlantId(u64);

impl PlantId {
    /// Creates a plant ID from a raw value (for deserialization).
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Null/invalid plant ID.
    pub const NULL: Self = Self(0);

    /// Checks if this is a valid (non-null) plant ID.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PLANT_ID_PREFIX}{}", self.0)
    }
}

/// Monotonic source of [`PlantId`]s.
///
/// Owned by whoever creates plants (usually the registry) and passed
/// around explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantIdGenerator {
    next: u64,
}

impl Default for PlantIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantIdGenerator {
    /// Creates a generator whose first ID is `PLANT-1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Creates a generator that continues after `last` (e.g. after loading).
    #[must_use]
    pub const fn starting_after(last: PlantId) -> Self {
        Self {
            next: last.0.saturating_add(1),
        }
    }

    /// Hands out the next ID.
    pub fn next_id(&mut self) -> PlantId {
        let id = PlantId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Number of IDs issued so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.next - 1
    }
}

/// Handle returned when attaching an observer to a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObserverId(u32);

impl ObserverId {
    /// Creates an observer ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generator_starts_at_one() {
        let mut ids = PlantIdGenerator::new();
        let first = ids.next_id();
        assert_eq!(first.raw(), 1);
        assert!(first.is_valid());
        assert_eq!(ids.issued(), 1);
    }

    #[test]
    fn test_plant_id_display() {
        assert_eq!(PlantId::from_raw(42).to_string(), "PLANT-42");
        assert!(!PlantId::NULL.is_valid());
    }

    #[test]
    fn test_generator_resumes_after_last() {
        let mut ids = PlantIdGenerator::starting_after(PlantId::from_raw(9));
        assert_eq!(ids.next_id(), PlantId::from_raw(10));
    }

    #[test]
    fn test_independent_generators() {
        let mut a = PlantIdGenerator::new();
        let mut b = PlantIdGenerator::new();
        assert_eq!(a.next_id(), b.next_id());
    }

    #[test]
    fn test_plant_id_serde() {
        let id = PlantId::from_raw(7);
        let json = serde_json::to_string(&id).expect("serialize");
        let back: PlantId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, back);
    }

    proptest! {
        #[test]
        fn prop_ids_strictly_increase(count in 1usize..200) {
            let mut ids = PlantIdGenerator::new();
            let mut last = PlantId::NULL;
            for _ in 0..count {
                let id = ids.next_id();
                prop_assert!(id > last);
                last = id;
            }
        }
    }
}
