//! Clamped resource levels (water, nutrients, sunlight) and the plant vitals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resource level on the 0..=100 scale.
///
/// Every constructor and mutator clamps; a `ResourceLevel` can never hold
/// a value outside the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "u8")]
pub struct ResourceLevel(u8);

impl ResourceLevel {
    /// Lowest representable level.
    pub const MIN: u8 = 0;
    /// Highest representable level.
    pub const MAX: u8 = 100;

    /// Creates a level, clamping `value` into 0..=100.
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self(value.clamp(i32::from(Self::MIN), i32::from(Self::MAX)) as u8)
    }

    /// Returns the current value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Adds `delta` (which may be negative), clamping the result.
    pub fn adjust(&mut self, delta: i32) {
        *self = Self::new(i32::from(self.0).saturating_add(delta));
    }

    /// Sets the value directly, clamping it.
    pub fn set(&mut self, value: i32) {
        *self = Self::new(value);
    }

    /// Checks if the level is at the top of the scale.
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.0 >= Self::MAX
    }

    /// Checks if the level is empty.
    #[must_use]
    pub const fn is_depleted(self) -> bool {
        self.0 == Self::MIN
    }
}

impl From<i32> for ResourceLevel {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<ResourceLevel> for u8 {
    fn from(level: ResourceLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ResourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Default water level for a freshly potted plant.
pub const INITIAL_WATER: i32 = 50;
/// Default nutrient level for a freshly potted plant.
pub const INITIAL_NUTRIENTS: i32 = 50;
/// Default sunlight level for a freshly potted plant.
pub const INITIAL_SUNLIGHT: i32 = 50;

/// The mutable attributes lifecycle states read and write.
///
/// Only the owning [`Plant`](crate::plant::Plant) hands out `&mut Vitals`,
/// and only to its current lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    /// Water in the soil.
    pub water: ResourceLevel,
    /// Nutrients in the soil.
    pub nutrients: ResourceLevel,
    /// Accumulated light exposure. Tracked, not used by transitions.
    pub sunlight: ResourceLevel,
    /// Age in days.
    pub age: u32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            water: ResourceLevel::new(INITIAL_WATER),
            nutrients: ResourceLevel::new(INITIAL_NUTRIENTS),
            sunlight: ResourceLevel::new(INITIAL_SUNLIGHT),
            age: 0,
        }
    }
}

impl Vitals {
    /// Creates vitals from explicit levels (clamped) and an age.
    #[must_use]
    pub fn new(water: i32, nutrients: i32, age: u32) -> Self {
        Self {
            water: ResourceLevel::new(water),
            nutrients: ResourceLevel::new(nutrients),
            age,
            ..Self::default()
        }
    }

    /// Water level as a plain number.
    #[must_use]
    pub const fn water_level(&self) -> u8 {
        self.water.value()
    }

    /// Nutrient level as a plain number.
    #[must_use]
    pub const fn nutrient_level(&self) -> u8 {
        self.nutrients.value()
    }

    /// Sunlight level as a plain number.
    #[must_use]
    pub const fn sunlight_level(&self) -> u8 {
        self.sunlight.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_clamps_on_construction() {
        assert_eq!(ResourceLevel::new(-20).value(), 0);
        assert_eq!(ResourceLevel::new(250).value(), 100);
        assert_eq!(ResourceLevel::new(55).value(), 55);
    }

    #[test]
    fn test_level_adjust_saturates() {
        let mut level = ResourceLevel::new(95);
        level.adjust(20);
        assert!(level.is_full());

        level.adjust(i32::MIN);
        assert!(level.is_depleted());
    }

    #[test]
    fn test_default_vitals() {
        let vitals = Vitals::default();
        assert_eq!(vitals.water_level(), 50);
        assert_eq!(vitals.nutrient_level(), 50);
        assert_eq!(vitals.sunlight_level(), 50);
        assert_eq!(vitals.age, 0);
    }

    #[test]
    fn test_level_deserialize_clamps() {
        let level: ResourceLevel = serde_json::from_str("140").expect("deserialize");
        assert_eq!(level.value(), 100);
        assert_eq!(serde_json::to_string(&level).expect("serialize"), "100");
    }
}
