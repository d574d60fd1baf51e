//! Care strategies: interchangeable routines that water, feed and light a plant.
//!
//! A strategy only decides how much care to give; the plant's lifecycle state
//! still decides what that care does.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use nursery_common::{NurseryError, NurseryResult};

use crate::plant::Plant;

/// A care routine that can be attached to a plant.
pub trait CareStrategy: Send + Sync {
    /// Human readable name, e.g. `"Low Maintenance Care"`.
    fn name(&self) -> String;

    /// Water to request per care session.
    fn water_needs(&self, plant: &Plant) -> i32;

    /// Nutrients to request per care session.
    fn nutrient_needs(&self, plant: &Plant) -> i32;

    /// Hours of light per care session.
    fn sunlight_needs(&self, plant: &Plant) -> i32;

    /// Runs one care session: water, fertilize, then light exposure.
    fn apply_care(&self, plant: &mut Plant) {
        let water = self.water_needs(plant);
        let nutrients = self.nutrient_needs(plant);
        let sunlight = self.sunlight_needs(plant);
        plant.water(water);
        plant.fertilize(nutrients);
        plant.expose_to_sunlight(sunlight);
    }
}

fn positive(field: &'static str, value: i32) -> NurseryResult<i32> {
    if value > 0 {
        Ok(value)
    } else {
        Err(NurseryError::InvalidCareFrequency { field, value })
    }
}

/// Infrequent, light care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowMaintenanceCare {
    water_frequency: i32,
    nutrient_frequency: i32,
}

impl LowMaintenanceCare {
    /// Creates the strategy. Frequencies are days between sessions and must be positive.
    pub fn new(water_frequency: i32, nutrient_frequency: i32) -> NurseryResult<Self> {
        Ok(Self {
            water_frequency: positive("water_frequency", water_frequency)?,
            nutrient_frequency: positive("nutrient_frequency", nutrient_frequency)?,
        })
    }
}

impl CareStrategy for LowMaintenanceCare {
    fn name(&self) -> String {
        "Low Maintenance Care".to_string()
    }

    fn water_needs(&self, _plant: &Plant) -> i32 {
        (5 - self.water_frequency).max(1)
    }

    fn nutrient_needs(&self, _plant: &Plant) -> i32 {
        (4 - self.nutrient_frequency).max(1)
    }

    fn sunlight_needs(&self, _plant: &Plant) -> i32 {
        3
    }
}

/// Extra treatments a high-maintenance routine can include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Treatment {
    /// Encourages new growth.
    Pruning,
    /// Raises humidity around the leaves.
    Misting,
    /// Refreshes the soil.
    Repotting,
}

impl Treatment {
    /// Get the display name of this treatment.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pruning => "pruning",
            Self::Misting => "misting",
            Self::Repotting => "repotting",
        }
    }
}

impl fmt::Display for Treatment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Treatment {
    type Err = NurseryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pruning" => Ok(Self::Pruning),
            "misting" => Ok(Self::Misting),
            "repotting" => Ok(Self::Repotting),
            _ => Err(NurseryError::UnknownTreatment(s.to_string())),
        }
    }
}

/// Frequent, heavy care with optional treatments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighMaintenanceCare {
    water_frequency: i32,
    nutrient_frequency: i32,
    treatments: Vec<Treatment>,
}

impl HighMaintenanceCare {
    /// Creates the strategy. Frequencies must be positive.
    pub fn new(
        water_frequency: i32,
        nutrient_frequency: i32,
        treatments: Vec<Treatment>,
    ) -> NurseryResult<Self> {
        Ok(Self {
            water_frequency: positive("water_frequency", water_frequency)?,
            nutrient_frequency: positive("nutrient_frequency", nutrient_frequency)?,
            treatments,
        })
    }

    /// Treatments applied after each session.
    #[must_use]
    pub fn treatments(&self) -> &[Treatment] {
        &self.treatments
    }
}

impl CareStrategy for HighMaintenanceCare {
    fn name(&self) -> String {
        "High Maintenance Care".to_string()
    }

    fn water_needs(&self, _plant: &Plant) -> i32 {
        (8 - self.water_frequency).max(2)
    }

    fn nutrient_needs(&self, _plant: &Plant) -> i32 {
        (6 - self.nutrient_frequency).max(2)
    }

    fn sunlight_needs(&self, _plant: &Plant) -> i32 {
        6
    }

    fn apply_care(&self, plant: &mut Plant) {
        let water = self.water_needs(plant);
        let nutrients = self.nutrient_needs(plant);
        let sunlight = self.sunlight_needs(plant);
        plant.water(water);
        plant.fertilize(nutrients);
        plant.expose_to_sunlight(sunlight);
        for treatment in &self.treatments {
            debug!(plant = %plant.id(), %treatment, "applying treatment");
        }
    }
}

/// Season used by [`SeasonalCare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Season {
    /// Active growth, moderate needs.
    #[default]
    Spring,
    /// Heat, highest needs.
    Summer,
    /// Cooling off, reduced needs.
    Autumn,
    /// Dormancy, minimal needs.
    Winter,
}

impl Season {
    /// Get the display name of this season.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        }
    }

    /// Added to the base needs during this season.
    #[must_use]
    pub const fn adjustment(self) -> i32 {
        match self {
            Self::Spring => 2,
            Self::Summer => 3,
            Self::Autumn => 1,
            Self::Winter => 0,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Season {
    type Err = NurseryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "autumn" | "fall" => Ok(Self::Autumn),
            "winter" => Ok(Self::Winter),
            _ => Err(NurseryError::UnknownSeason(s.to_string())),
        }
    }
}

/// Care that follows the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeasonalCare {
    season: Season,
}

impl SeasonalCare {
    /// Creates the strategy for a season.
    #[must_use]
    pub const fn new(season: Season) -> Self {
        Self { season }
    }

    /// Current season.
    #[must_use]
    pub const fn season(&self) -> Season {
        self.season
    }

    /// Switches season.
    pub fn set_season(&mut self, season: Season) {
        info!(from = %self.season, to = %season, "seasonal care updated");
        self.season = season;
    }
}

impl CareStrategy for SeasonalCare {
    fn name(&self) -> String {
        format!("Seasonal Care ({})", self.season)
    }

    fn water_needs(&self, _plant: &Plant) -> i32 {
        (3 + self.season.adjustment()).max(1)
    }

    fn nutrient_needs(&self, _plant: &Plant) -> i32 {
        (2 + self.season.adjustment() / 2).max(1)
    }

    fn sunlight_needs(&self, _plant: &Plant) -> i32 {
        (4 + self.season.adjustment()).clamp(2, 8)
    }
}
