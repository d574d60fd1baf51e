//! Registry of plants in the nursery.
//!
//! The registry owns the [`PlantIdGenerator`], so IDs are unique per registry
//! without any global state.

use std::collections::BTreeMap;

use tracing::info;

use nursery_common::{NurseryError, NurseryResult, PlantId, PlantIdGenerator};

use crate::lifecycle::LifecycleStage;
use crate::plant::{CareOutcome, Plant};
use crate::sale::SalePolicy;

/// Owns plants and hands out their IDs.
#[derive(Debug, Default)]
pub struct PlantRegistry {
    /// ID source for new plants.
    ids: PlantIdGenerator,
    /// Plants by ID, in creation order.
    plants: BTreeMap<PlantId, Plant>,
    /// Days advanced so far.
    day: u32,
}

impl PlantRegistry {
    /// Create a new empty plant registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pots a new seedling and returns its ID.
    pub fn plant(&mut self, name: &str, species: &str, price: f64) -> PlantId {
        let id = self.ids.next_id();
        self.plants.insert(id, Plant::new(id, name, species, price));
        id
    }

    /// Get a plant by ID.
    #[must_use]
    pub fn get(&self, id: PlantId) -> Option<&Plant> {
        self.plants.get(&id)
    }

    /// Get a mutable reference to a plant.
    pub fn get_mut(&mut self, id: PlantId) -> Option<&mut Plant> {
        self.plants.get_mut(&id)
    }

    /// Get a plant by ID, failing with [`NurseryError::PlantNotFound`].
    pub fn lookup(&self, id: PlantId) -> NurseryResult<&Plant> {
        self.plants.get(&id).ok_or(NurseryError::PlantNotFound(id))
    }

    /// Get a mutable reference to a plant, failing with [`NurseryError::PlantNotFound`].
    pub fn lookup_mut(&mut self, id: PlantId) -> NurseryResult<&mut Plant> {
        self.plants
            .get_mut(&id)
            .ok_or(NurseryError::PlantNotFound(id))
    }

    /// Remove a plant.
    pub fn remove(&mut self, id: PlantId) -> Option<Plant> {
        self.plants.remove(&id)
    }

    /// Check if a plant is registered.
    #[must_use]
    pub fn contains(&self, id: PlantId) -> bool {
        self.plants.contains_key(&id)
    }

    /// Get the number of plants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Days advanced so far.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Iterate over all plants.
    pub fn iter(&self) -> impl Iterator<Item = &Plant> {
        self.plants.values()
    }

    /// Iterate mutably over all plants.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Plant> {
        self.plants.values_mut()
    }

    /// Water a plant.
    pub fn water(&mut self, id: PlantId, amount: i32) -> NurseryResult<CareOutcome> {
        Ok(self.lookup_mut(id)?.water(amount))
    }

    /// Fertilize a plant.
    pub fn fertilize(&mut self, id: PlantId, amount: i32) -> NurseryResult<CareOutcome> {
        Ok(self.lookup_mut(id)?.fertilize(amount))
    }

    /// Run a plant's care strategy.
    pub fn apply_care(&mut self, id: PlantId) -> NurseryResult<CareOutcome> {
        Ok(self.lookup_mut(id)?.apply_care())
    }

    /// Run every plant's care strategy. Returns how many plants were cared for.
    pub fn apply_care_all(&mut self) -> usize {
        self.plants
            .values_mut()
            .map(Plant::apply_care)
            .filter(|outcome| outcome.is_applied())
            .count()
    }

    /// Advances every plant by one day.
    ///
    /// Returns the IDs of plants that died during this day.
    pub fn advance_day(&mut self) -> Vec<PlantId> {
        self.day = self.day.saturating_add(1);

        let mut died = Vec::new();
        for plant in self.plants.values_mut() {
            if !plant.is_alive() {
                continue;
            }
            plant.grow();
            if !plant.is_alive() {
                died.push(plant.id());
            }
        }

        info!(day = self.day, plants = self.plants.len(), died = died.len(), "advanced day");
        died
    }

    /// Plants in a specific stage.
    pub fn by_stage(&self, stage: LifecycleStage) -> Vec<&Plant> {
        self.plants.values().filter(|p| p.stage() == stage).collect()
    }

    /// Plants that pass the sale policy.
    pub fn ready_for_sale(&self, policy: &SalePolicy) -> Vec<&Plant> {
        self.plants
            .values()
            .filter(|p| p.is_ready_for_sale(policy))
            .collect()
    }

    /// Removes dead plants and returns their IDs.
    pub fn take_dead(&mut self) -> Vec<PlantId> {
        let dead: Vec<PlantId> = self
            .plants
            .values()
            .filter(|p| !p.is_alive())
            .map(Plant::id)
            .collect();
        for id in &dead {
            self.plants.remove(id);
        }
        dead
    }

    /// Count of plants per stage, in lifecycle order.
    #[must_use]
    pub fn stage_counts(&self) -> [(LifecycleStage, usize); 5] {
        LifecycleStage::ALL.map(|stage| {
            let count = self.plants.values().filter(|p| p.stage() == stage).count();
            (stage, count)
        })
    }
}
