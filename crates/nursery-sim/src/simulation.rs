//! Day-by-day nursery simulation built from a [`SimConfig`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use nursery_common::{NurseryResult, PlantId};
use nursery_lifecycle::{EventBus, LifecycleStage, PlantEvent, PlantRegistry, SalePolicy};

use crate::config::SimConfig;

/// Upper bound on notifications one plant raises in a simulated day.
///
/// A care round waters (state change, health event, label), fertilizes (same
/// three) and reports itself; the growth tick adds a state change and its
/// health event.
pub const MAX_EVENTS_PER_PLANT_PER_DAY: usize = 9;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimReport {
    /// Days simulated
    pub days: u32,
    /// Plants per stage at the end
    pub stage_counts: Vec<(LifecycleStage, usize)>,
    /// Names of plants passing the sale policy at the end
    pub ready_for_sale: Vec<String>,
    /// Plants that died, in order of death
    pub died: Vec<PlantId>,
    /// State changes observed
    pub state_changes: usize,
}

/// A registry plus the environment that acts on it each day.
#[derive(Debug)]
pub struct Simulation {
    registry: PlantRegistry,
    bus: Arc<EventBus>,
    policy: SalePolicy,
    days: u32,
    care_interval: u32,
    daily_water_loss: i32,
    daily_nutrient_loss: i32,
}

impl Simulation {
    /// Pots the configured plants and attaches the configured care strategy.
    pub fn from_config(config: &SimConfig) -> NurseryResult<Self> {
        let mut registry = PlantRegistry::new();
        // Drained once per day, so a full bus can never drop a notification
        let capacity = config
            .plants
            .len()
            .max(1)
            .saturating_mul(MAX_EVENTS_PER_PLANT_PER_DAY);
        let bus = Arc::new(EventBus::new(capacity));

        for seed in &config.plants {
            let id = registry.plant(&seed.name, &seed.species, seed.price);
            let plant = registry.lookup_mut(id)?;
            plant.attach(bus.clone());
            if let Some(strategy) = config.care.build()? {
                plant.set_care_strategy(strategy);
            }
        }
        info!(plants = registry.len(), days = config.days, "simulation ready");

        Ok(Self {
            registry,
            bus,
            policy: config.sale_policy,
            days: config.days,
            care_interval: config.care_interval,
            daily_water_loss: config.daily_water_loss,
            daily_nutrient_loss: config.daily_nutrient_loss,
        })
    }

    /// The plants being simulated.
    #[must_use]
    pub fn registry(&self) -> &PlantRegistry {
        &self.registry
    }

    /// Mutable access to the plants, e.g. to force conditions.
    pub fn registry_mut(&mut self) -> &mut PlantRegistry {
        &mut self.registry
    }

    /// Simulates one day: evaporation, optional care, then one growth tick.
    pub fn step(&mut self) -> Vec<PlantId> {
        for plant in self.registry.iter_mut().filter(|p| p.is_alive()) {
            plant.set_water_level(i32::from(plant.water_level()) - self.daily_water_loss);
            plant.set_nutrient_level(i32::from(plant.nutrient_level()) - self.daily_nutrient_loss);
        }

        let day = self.registry.day() + 1;
        if self.care_interval > 0 && day % self.care_interval == 0 {
            let cared = self.registry.apply_care_all();
            debug!(day, cared, "care round");
        }

        let died = self.registry.advance_day();
        for id in &died {
            warn!(day, plant = %id, "plant died");
        }
        died
    }

    /// Runs every configured day and summarizes the outcome.
    pub fn run(&mut self) -> SimReport {
        let mut died = Vec::new();
        let mut state_changes = 0;

        for _ in 0..self.days {
            died.extend(self.step());
            state_changes += self
                .bus
                .drain()
                .iter()
                .filter(|n| matches!(n.event, PlantEvent::StateChanged { .. }))
                .count();
        }

        let report = SimReport {
            days: self.registry.day(),
            stage_counts: self.registry.stage_counts().to_vec(),
            ready_for_sale: self
                .registry
                .ready_for_sale(&self.policy)
                .iter()
                .map(|p| p.name().to_string())
                .collect(),
            died,
            state_changes,
        };

        for plant in self.registry.iter() {
            info!(
                plant = %plant.id(),
                name = plant.name(),
                state = plant.state_name(),
                health = plant.health_status().display_name(),
                water = plant.water_level(),
                nutrients = plant.nutrient_level(),
                age = plant.age(),
                "final state"
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CareConfig, PlantSeed};
    use nursery_lifecycle::LifecycleState;

    fn config(days: u32) -> SimConfig {
        SimConfig {
            days,
            plants: vec![PlantSeed {
                name: "Rose".to_string(),
                species: "Rosa".to_string(),
                price: 100.0,
            }],
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_neglect_kills_without_care() {
        let mut cfg = config(60);
        cfg.care = CareConfig::None;
        cfg.daily_water_loss = 10;

        let mut sim = Simulation::from_config(&cfg).expect("valid config");
        for plant in sim.registry_mut().iter_mut() {
            plant.set_state(LifecycleState::Growing);
        }
        let report = sim.run();

        assert_eq!(report.days, 60);
        assert_eq!(report.died.len(), 1);
        assert!(report.state_changes >= 1);
        assert!(report.ready_for_sale.is_empty());
    }

    #[test]
    fn test_evaporation_keeps_seedlings_small() {
        let mut cfg = config(20);
        cfg.care = CareConfig::None;
        cfg.daily_water_loss = 10;

        let mut sim = Simulation::from_config(&cfg).expect("valid config");
        let report = sim.run();

        assert!(report.died.is_empty());
        assert_eq!(report.state_changes, 0);
        assert_eq!(report.stage_counts[0], (LifecycleStage::Seedling, 1));
    }

    #[test]
    fn test_no_loss_means_steady_growth() {
        let mut cfg = config(40);
        cfg.care = CareConfig::None;
        cfg.daily_water_loss = 0;
        cfg.daily_nutrient_loss = 0;

        let mut sim = Simulation::from_config(&cfg).expect("valid config");
        let report = sim.run();

        assert!(report.died.is_empty());
        assert_eq!(report.state_changes, 2);
        let mature = report
            .stage_counts
            .iter()
            .find(|(stage, _)| *stage == LifecycleStage::Mature)
            .map(|(_, count)| *count);
        assert_eq!(mature, Some(1));
        assert_eq!(report.ready_for_sale, vec!["Rose".to_string()]);
    }

    #[test]
    fn test_large_nursery_counts_every_state_change() {
        let mut cfg = config(40);
        cfg.care = CareConfig::None;
        cfg.daily_water_loss = 0;
        cfg.daily_nutrient_loss = 0;
        cfg.plants = (0..3000)
            .map(|i| PlantSeed {
                name: format!("Fern {i}"),
                species: "Nephrolepis".to_string(),
                price: 12.5,
            })
            .collect();

        let mut sim = Simulation::from_config(&cfg).expect("valid config");
        let report = sim.run();

        // Seedling -> Growing on day 7, Growing -> Mature on day 30
        assert_eq!(report.state_changes, 6000);
        assert_eq!(report.ready_for_sale.len(), 3000);
    }

    #[test]
    fn test_bus_capacity_scales_with_plants() {
        let sim = Simulation::from_config(&config(1)).expect("valid config");
        assert_eq!(sim.bus.capacity(), MAX_EVENTS_PER_PLANT_PER_DAY);

        let mut cfg = SimConfig::default();
        cfg.plants.clear();
        let empty = Simulation::from_config(&cfg).expect("valid config");
        assert_eq!(empty.bus.capacity(), MAX_EVENTS_PER_PLANT_PER_DAY);

        let three = Simulation::from_config(&SimConfig::default()).expect("valid config");
        assert_eq!(three.bus.capacity(), 3 * MAX_EVENTS_PER_PLANT_PER_DAY);
    }

    #[test]
    fn test_invalid_care_config_fails() {
        let mut cfg = config(1);
        cfg.care = CareConfig::Low {
            water_frequency: -1,
            nutrient_frequency: 1,
        };
        assert!(Simulation::from_config(&cfg).is_err());
    }

    #[test]
    fn test_step_applies_evaporation() {
        let mut cfg = config(1);
        cfg.care = CareConfig::None;
        let mut sim = Simulation::from_config(&cfg).expect("valid config");

        sim.step();

        let rose = sim.registry().iter().next().expect("one plant");
        assert_eq!(rose.water_level(), 45);
        assert_eq!(rose.nutrient_level(), 47);
        assert_eq!(rose.age(), 1);
    }
}
