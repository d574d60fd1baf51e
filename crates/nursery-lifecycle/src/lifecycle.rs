//! Plant lifecycle state machine.
//!
//! A plant moves through a fixed set of stages:
//!
//! ```text
//! Seedling -> Growing -> Mature
//!                ^  \       |
//!                |   v      v
//!                +-- Wilting -> Dead
//! ```
//!
//! Each stage reacts to care (water, fertilize) and to the passage of time
//! (grow) by adjusting the plant's [`Vitals`], then evaluates its transition
//! rule. States are plain values: a transition hands back the next state and
//! the owning plant swaps it in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resources::Vitals;

/// Transition thresholds and care increments for each stage.
pub mod thresholds {
    /// Seedling must be at least this old (days) to start growing.
    pub const SEEDLING_MIN_AGE: u32 = 7;
    /// Seedling needs at least this much water to start growing.
    pub const SEEDLING_REQUIRED_WATER: u8 = 40;

    /// Age (days) at which a growing plant matures.
    pub const GROWING_MATURE_AGE: u32 = 30;
    /// Growing plant wilts below this water level.
    pub const GROWING_MIN_WATER: u8 = 20;
    /// Growing plant wilts below this nutrient level.
    pub const GROWING_MIN_NUTRIENTS: u8 = 30;

    /// Mature plant wilts below this water level.
    pub const MATURE_MIN_WATER: u8 = 15;
    /// Mature plant wilts below this nutrient level.
    pub const MATURE_MIN_NUTRIENTS: u8 = 25;

    /// Wilting plant recovers at or above this water level...
    pub const RECOVERY_WATER: u8 = 60;
    /// ...and at or above this nutrient level.
    pub const RECOVERY_NUTRIENTS: u8 = 50;
    /// Wilting plant dies once it has wilted for more than this many days.
    pub const MAX_WILTING_DAYS: u32 = 7;
}

/// Tag for a lifecycle stage, without per-stage data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LifecycleStage {
    /// Freshly potted.
    #[default]
    Seedling,
    /// Actively growing.
    Growing,
    /// Fully grown.
    Mature,
    /// Suffering from neglect; may recover or die.
    Wilting,
    /// Terminal. Ignores all care.
    Dead,
}

impl LifecycleStage {
    /// All stages in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Seedling,
        Self::Growing,
        Self::Mature,
        Self::Wilting,
        Self::Dead,
    ];

    /// Get the display name of this stage.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Seedling => "Seedling",
            Self::Growing => "Growing",
            Self::Mature => "Mature",
            Self::Wilting => "Wilting",
            Self::Dead => "Dead",
        }
    }

    /// Health percentage reported while in this stage.
    #[must_use]
    pub const fn health_percentage(self) -> u8 {
        match self {
            Self::Seedling => 85,
            Self::Growing => 90,
            Self::Mature => 95,
            Self::Wilting => 40,
            Self::Dead => 0,
        }
    }

    /// Check if this stage is terminal.
    #[must_use]
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }

    /// Check whether the state machine ever moves from `self` to `to`.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Seedling | Self::Wilting, Self::Growing)
                | (Self::Growing, Self::Mature)
                | (Self::Growing | Self::Mature, Self::Wilting)
                | (Self::Wilting, Self::Dead)
        )
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How much a single care action adds in a given stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareIncrements {
    /// Added to the water level by `water`.
    pub water: i32,
    /// Added to the nutrient level by `fertilize`.
    pub nutrients: i32,
}

/// The active lifecycle state of a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    /// See [`LifecycleStage::Seedling`].
    #[default]
    Seedling,
    /// See [`LifecycleStage::Growing`].
    Growing,
    /// See [`LifecycleStage::Mature`].
    Mature,
    /// See [`LifecycleStage::Wilting`].
    Wilting {
        /// Days spent wilting since entering this state.
        days_wilting: u32,
    },
    /// See [`LifecycleStage::Dead`].
    Dead,
}

impl LifecycleState {
    /// A freshly entered wilting state.
    pub const WILTING: Self = Self::Wilting { days_wilting: 0 };

    /// The fresh state for a stage.
    #[must_use]
    pub const fn entering(stage: LifecycleStage) -> Self {
        match stage {
            LifecycleStage::Seedling => Self::Seedling,
            LifecycleStage::Growing => Self::Growing,
            LifecycleStage::Mature => Self::Mature,
            LifecycleStage::Wilting => Self::WILTING,
            LifecycleStage::Dead => Self::Dead,
        }
    }

    /// The stage tag of this state.
    #[must_use]
    pub const fn stage(&self) -> LifecycleStage {
        match self {
            Self::Seedling => LifecycleStage::Seedling,
            Self::Growing => LifecycleStage::Growing,
            Self::Mature => LifecycleStage::Mature,
            Self::Wilting { .. } => LifecycleStage::Wilting,
            Self::Dead => LifecycleStage::Dead,
        }
    }

    /// Stage name, e.g. `"Growing"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.stage().display_name()
    }

    /// Health percentage for this state.
    #[must_use]
    pub const fn health_percentage(&self) -> u8 {
        self.stage().health_percentage()
    }

    /// Check if this is the terminal state.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        matches!(self, Self::Dead)
    }

    /// Days spent wilting, zero outside the wilting state.
    #[must_use]
    pub const fn days_wilting(&self) -> u32 {
        match self {
            Self::Wilting { days_wilting } => *days_wilting,
            _ => 0,
        }
    }

    /// Care increments applied in this state. `None` when dead.
    #[must_use]
    pub const fn care_increments(&self) -> Option<CareIncrements> {
        let (water, nutrients) = match self {
            Self::Seedling => (10, 5),
            Self::Growing => (15, 10),
            Self::Mature => (12, 8),
            Self::Wilting { .. } => (20, 15),
            Self::Dead => return None,
        };
        Some(CareIncrements { water, nutrients })
    }

    /// Apply this state's watering effect and evaluate the transition rule.
    ///
    /// Returns the next state if a transition fires.
    pub fn water(&mut self, vitals: &mut Vitals) -> Option<Self> {
        let increments = self.care_increments()?;
        vitals.water.adjust(increments.water);
        self.check_transition(vitals)
    }

    /// Apply this state's fertilizing effect and evaluate the transition rule.
    pub fn fertilize(&mut self, vitals: &mut Vitals) -> Option<Self> {
        let increments = self.care_increments()?;
        vitals.nutrients.adjust(increments.nutrients);
        self.check_transition(vitals)
    }

    /// Advance one day and evaluate the transition rule.
    ///
    /// Wilting plants count wilting days instead of ageing.
    pub fn grow(&mut self, vitals: &mut Vitals) -> Option<Self> {
        match self {
            Self::Dead => return None,
            Self::Wilting { days_wilting } => *days_wilting = days_wilting.saturating_add(1),
            Self::Seedling | Self::Growing | Self::Mature => {
                vitals.age = vitals.age.saturating_add(1);
            },
        }
        self.check_transition(vitals)
    }

    /// Evaluate the transition rule against the current vitals.
    ///
    /// Pure: never mutates anything. At most one transition fires per call.
    #[must_use]
    pub fn check_transition(&self, vitals: &Vitals) -> Option<Self> {
        use thresholds::{
            GROWING_MATURE_AGE, GROWING_MIN_NUTRIENTS, GROWING_MIN_WATER, MATURE_MIN_NUTRIENTS,
            MATURE_MIN_WATER, MAX_WILTING_DAYS, SEEDLING_MIN_AGE, SEEDLING_REQUIRED_WATER,
        };

        let water = vitals.water_level();
        let nutrients = vitals.nutrient_level();

        match self {
            Self::Seedling => (vitals.age >= SEEDLING_MIN_AGE && water >= SEEDLING_REQUIRED_WATER)
                .then_some(Self::Growing),
            // Maturation wins over neglect when both hold.
            Self::Growing => {
                if vitals.age >= GROWING_MATURE_AGE {
                    Some(Self::Mature)
                } else if water < GROWING_MIN_WATER || nutrients < GROWING_MIN_NUTRIENTS {
                    Some(Self::WILTING)
                } else {
                    None
                }
            },
            Self::Mature => (water < MATURE_MIN_WATER || nutrients < MATURE_MIN_NUTRIENTS)
                .then_some(Self::WILTING),
            Self::Wilting { days_wilting } => {
                if Self::can_recover(vitals) {
                    Some(Self::Growing)
                } else if *days_wilting > MAX_WILTING_DAYS {
                    Some(Self::Dead)
                } else {
                    None
                }
            },
            Self::Dead => None,
        }
    }

    /// Whether a wilting plant has enough water and nutrients to recover.
    #[must_use]
    pub fn can_recover(vitals: &Vitals) -> bool {
        vitals.water_level() >= thresholds::RECOVERY_WATER
            && vitals.nutrient_level() >= thresholds::RECOVERY_NUTRIENTS
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wilting { days_wilting } => write!(f, "Wilting ({days_wilting} days)"),
            other => f.write_str(other.name()),
        }
    }
}

/// Coarse health label derived from a health percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    /// 80% and above
    Excellent,
    /// 60-79%
    Good,
    /// 40-59%
    Fair,
    /// 20-39%
    Poor,
    /// Below 20%
    Critical,
}

impl HealthStatus {
    /// Returns status from a percentage (0-100).
    #[must_use]
    pub const fn from_percentage(pct: u8) -> Self {
        match pct {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            20..=39 => Self::Poor,
            _ => Self::Critical,
        }
    }

    /// Get the display name of this status.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Critical => "Critical",
        }
    }
}
