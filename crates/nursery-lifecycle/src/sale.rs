//! Readiness-for-sale policy.

use serde::{Deserialize, Serialize};

/// Thresholds a living plant must meet to be offered for sale.
///
/// The policy belongs to whoever sells plants; the lifecycle only evaluates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalePolicy {
    /// Minimum state health percentage.
    pub min_health: u8,
    /// Minimum water level.
    pub min_water: u8,
    /// Minimum nutrient level.
    pub min_nutrients: u8,
}

impl Default for SalePolicy {
    fn default() -> Self {
        Self {
            min_health: 70,
            min_water: 40,
            min_nutrients: 40,
        }
    }
}

impl SalePolicy {
    /// Creates a policy with explicit thresholds (each capped at 100).
    #[must_use]
    pub fn new(min_health: u8, min_water: u8, min_nutrients: u8) -> Self {
        Self {
            min_health: min_health.min(100),
            min_water: min_water.min(100),
            min_nutrients: min_nutrients.min(100),
        }
    }

    /// Checks raw readings against the thresholds.
    #[must_use]
    pub const fn accepts(&self, health: u8, water: u8, nutrients: u8) -> bool {
        health >= self.min_health && water >= self.min_water && nutrients >= self.min_nutrients
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let policy = SalePolicy::default();
        assert!(policy.accepts(70, 40, 40));
        assert!(!policy.accepts(69, 40, 40));
        assert!(!policy.accepts(95, 39, 40));
        assert!(!policy.accepts(95, 40, 39));
    }

    #[test]
    fn test_new_caps_thresholds() {
        let policy = SalePolicy::new(200, 50, 50);
        assert_eq!(policy.min_health, 100);
    }
}
