//! Simulation configuration.
//!
//! Loaded from a TOML file; anything missing falls back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

use nursery_common::{NurseryError, NurseryResult};
use nursery_lifecycle::{
    CareStrategy, HighMaintenanceCare, LowMaintenanceCare, SalePolicy, Season, SeasonalCare,
    Treatment,
};

/// Configuration file name.
pub const CONFIG_FILE: &str = "nursery.toml";

/// Which care strategy to attach to every plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CareConfig {
    /// No strategy; plants only get the daily tick.
    None,
    /// [`LowMaintenanceCare`]
    Low {
        /// Days between waterings
        water_frequency: i32,
        /// Days between feedings
        nutrient_frequency: i32,
    },
    /// [`HighMaintenanceCare`]
    High {
        /// Days between waterings
        water_frequency: i32,
        /// Days between feedings
        nutrient_frequency: i32,
        /// Extra treatments
        #[serde(default)]
        treatments: Vec<Treatment>,
    },
    /// [`SeasonalCare`]
    Seasonal {
        /// Current season
        season: Season,
    },
}

impl Default for CareConfig {
    fn default() -> Self {
        Self::Low {
            water_frequency: 2,
            nutrient_frequency: 2,
        }
    }
}

impl CareConfig {
    /// Builds the configured strategy.
    pub fn build(&self) -> NurseryResult<Option<Box<dyn CareStrategy>>> {
        Ok(match self {
            Self::None => None,
            Self::Low {
                water_frequency,
                nutrient_frequency,
            } => Some(Box::new(LowMaintenanceCare::new(
                *water_frequency,
                *nutrient_frequency,
            )?)),
            Self::High {
                water_frequency,
                nutrient_frequency,
                treatments,
            } => Some(Box::new(HighMaintenanceCare::new(
                *water_frequency,
                *nutrient_frequency,
                treatments.clone(),
            )?)),
            Self::Seasonal { season } => Some(Box::new(SeasonalCare::new(*season))),
        })
    }
}

/// A plant to pot when the simulation starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSeed {
    /// Display name
    pub name: String,
    /// Species
    pub species: String,
    /// Price
    #[serde(default)]
    pub price: f64,
}

impl PlantSeed {
    fn new(name: &str, species: &str, price: f64) -> Self {
        Self {
            name: name.to_string(),
            species: species.to_string(),
            price,
        }
    }
}

/// Simulation configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of days to simulate
    pub days: u32,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Run the care strategy every N days (0 = never)
    pub care_interval: u32,
    /// Water lost to evaporation each day
    pub daily_water_loss: i32,
    /// Nutrients used up each day
    pub daily_nutrient_loss: i32,
    /// Care strategy attached to every plant
    pub care: CareConfig,
    /// Sale readiness thresholds
    pub sale_policy: SalePolicy,
    /// Plants to pot at start
    pub plants: Vec<PlantSeed>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days: 45,
            log_filter: "nursery=info".to_string(),
            care_interval: 2,
            daily_water_loss: 3,
            daily_nutrient_loss: 2,
            care: CareConfig::default(),
            sale_policy: SalePolicy::default(),
            plants: vec![
                PlantSeed::new("Rose", "Rosa", 100.0),
                PlantSeed::new("Fern", "Nephrolepis", 12.5),
                PlantSeed::new("Basil", "Ocimum basilicum", 4.0),
            ],
        }
    }
}

impl SimConfig {
    /// Reads and parses a config file.
    ///
    /// A missing or unreadable file is [`NurseryError::Io`]; bad TOML or a
    /// mistyped field is [`NurseryError::Config`].
    pub fn read_from<P: AsRef<Path>>(path: P) -> NurseryResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| NurseryError::Config(format!("{}: {e}", path.display())))
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let result = Self::read_from(path);
        log_load_outcome(path, &result);
        result.unwrap_or_default()
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> NurseryResult<()> {
        let path = path.as_ref();
        let contents =
            toml::to_string_pretty(self).map_err(|e| NurseryError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;

        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.days = self.days.clamp(1, 3650);
        self.care_interval = self.care_interval.min(365);
        self.daily_water_loss = self.daily_water_loss.clamp(0, 100);
        self.daily_nutrient_loss = self.daily_nutrient_loss.clamp(0, 100);
        self.sale_policy = SalePolicy::new(
            self.sale_policy.min_health,
            self.sale_policy.min_water,
            self.sale_policy.min_nutrients,
        );
        if self.log_filter.trim().is_empty() {
            self.log_filter = Self::default().log_filter;
        }
    }
}

/// Whether a failed read just means "no config yet".
#[must_use]
pub fn is_missing(err: &NurseryError) -> bool {
    matches!(err, NurseryError::Io(e) if e.kind() == io::ErrorKind::NotFound)
}

/// Logs what [`SimConfig::read_from`] produced. Failures fall back to defaults.
pub fn log_load_outcome(path: &Path, result: &NurseryResult<SimConfig>) {
    match result {
        Ok(_) => info!(path = %path.display(), "loaded config"),
        Err(e) if is_missing(e) => {
            info!(path = %path.display(), "config file not found, using defaults");
        },
        Err(e) => warn!(path = %path.display(), "{e}; using defaults"),
    }
}
