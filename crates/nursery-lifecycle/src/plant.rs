//! The plant entity: identity, vitals and the active lifecycle state.
//!
//! All care and time-advance goes through [`Plant`]'s action methods, which
//! delegate to the current [`LifecycleState`], install whatever state it hands
//! back and notify attached observers.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use nursery_common::{ObserverId, PlantId};

use crate::care::CareStrategy;
use crate::events::{PlantEvent, PlantObserver};
use crate::lifecycle::{HealthStatus, LifecycleStage, LifecycleState};
use crate::resources::Vitals;
use crate::sale::SalePolicy;

/// Entering a stage whose health is below this raises `health_low`.
pub const HEALTH_LOW_THRESHOLD: u8 = 50;

/// Hours of light per day that count as ideal exposure.
pub const IDEAL_SUN_HOURS: std::ops::RangeInclusive<i32> = 4..=10;

/// Sunlight gained per hour of ideal exposure.
pub const SUNLIGHT_PER_HOUR: i32 = 5;

/// Result of an action on a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CareOutcome {
    /// The action took effect.
    Applied,
    /// The plant is dead; nothing changed.
    Unresponsive,
    /// No care strategy is attached; nothing changed.
    NoStrategy,
}

impl CareOutcome {
    /// Checks if the action took effect.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// A plant in the nursery.
pub struct Plant {
    id: PlantId,
    name: String,
    species: String,
    price: f64,
    vitals: Vitals,
    state: LifecycleState,
    care_strategy: Option<Box<dyn CareStrategy>>,
    observers: Vec<(ObserverId, Arc<dyn PlantObserver>)>,
    next_observer: u32,
}

impl Plant {
    /// Creates a seedling with default vitals (water 50, nutrients 50, age 0).
    ///
    /// The ID comes from the caller, usually a
    /// [`PlantIdGenerator`](nursery_common::PlantIdGenerator) owned by a registry.
    #[must_use]
    pub fn new(id: PlantId, name: impl Into<String>, species: impl Into<String>, price: f64) -> Self {
        let plant = Self {
            id,
            name: name.into(),
            species: species.into(),
            price: sanitize_price(price),
            vitals: Vitals::default(),
            state: LifecycleState::Seedling,
            care_strategy: None,
            observers: Vec::new(),
            next_observer: 1,
        };
        debug!(plant = %plant.id, name = %plant.name, "created plant");
        plant
    }

    // === Identity ===

    /// Unique plant ID.
    #[must_use]
    pub const fn id(&self) -> PlantId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Species or classification (free text).
    #[must_use]
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Price. Not used by the lifecycle.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Sets the price (negative and NaN become zero).
    pub fn set_price(&mut self, price: f64) {
        self.price = sanitize_price(price);
    }

    // === State queries ===

    /// The active lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &LifecycleState {
        &self.state
    }

    /// Stage tag of the active state.
    #[must_use]
    pub const fn stage(&self) -> LifecycleStage {
        self.state.stage()
    }

    /// Name of the active state, e.g. `"Mature"`.
    #[must_use]
    pub const fn state_name(&self) -> &'static str {
        self.state.name()
    }

    /// Health percentage of the active state.
    #[must_use]
    pub const fn health_percentage(&self) -> u8 {
        self.state.health_percentage()
    }

    /// Coarse health label for the active state.
    #[must_use]
    pub const fn health_status(&self) -> HealthStatus {
        HealthStatus::from_percentage(self.health_percentage())
    }

    /// Checks if the plant is not dead.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        !self.state.is_dead()
    }

    /// Checks the plant against a sale policy. Dead plants never qualify.
    #[must_use]
    pub fn is_ready_for_sale(&self, policy: &SalePolicy) -> bool {
        self.is_alive()
            && policy.accepts(
                self.health_percentage(),
                self.water_level(),
                self.nutrient_level(),
            )
    }

    // === Vitals ===

    /// Current vitals.
    #[must_use]
    pub const fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    /// Water level, 0..=100.
    #[must_use]
    pub const fn water_level(&self) -> u8 {
        self.vitals.water_level()
    }

    /// Nutrient level, 0..=100.
    #[must_use]
    pub const fn nutrient_level(&self) -> u8 {
        self.vitals.nutrient_level()
    }

    /// Sunlight level, 0..=100.
    #[must_use]
    pub const fn sunlight_level(&self) -> u8 {
        self.vitals.sunlight_level()
    }

    /// Age in days.
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.vitals.age
    }

    /// Forces the water level (clamped). Does not evaluate transitions.
    pub fn set_water_level(&mut self, level: i32) {
        self.vitals.water.set(level);
    }

    /// Forces the nutrient level (clamped). Does not evaluate transitions.
    pub fn set_nutrient_level(&mut self, level: i32) {
        self.vitals.nutrients.set(level);
    }

    /// Forces the sunlight level (clamped).
    pub fn set_sunlight_level(&mut self, level: i32) {
        self.vitals.sunlight.set(level);
    }

    /// Forces the age (negative becomes zero). Does not evaluate transitions.
    pub fn set_age(&mut self, days: i64) {
        self.vitals.age = days.clamp(0, i64::from(u32::MAX)) as u32;
    }

    // === Actions ===

    /// Waters the plant.
    ///
    /// The active state applies its own fixed increment; `amount` is only
    /// logged. Dead plants are left untouched.
    pub fn water(&mut self, amount: i32) -> CareOutcome {
        if self.state.is_dead() {
            warn!(plant = %self.id, name = %self.name, "cannot water dead plant");
            return CareOutcome::Unresponsive;
        }
        trace!(plant = %self.id, requested = amount, "water requested");

        let next = self.state.water(&mut self.vitals);
        debug!(
            plant = %self.id,
            name = %self.name,
            stage = %self.stage(),
            water = self.water_level(),
            "watered"
        );
        if let Some(next) = next {
            self.set_state(next);
        }
        self.notify(&PlantEvent::Watered);
        CareOutcome::Applied
    }

    /// Fertilizes the plant. Mirrors [`Plant::water`] for nutrients.
    pub fn fertilize(&mut self, amount: i32) -> CareOutcome {
        if self.state.is_dead() {
            warn!(plant = %self.id, name = %self.name, "cannot fertilize dead plant");
            return CareOutcome::Unresponsive;
        }
        trace!(plant = %self.id, requested = amount, "fertilizer requested");

        let next = self.state.fertilize(&mut self.vitals);
        debug!(
            plant = %self.id,
            name = %self.name,
            stage = %self.stage(),
            nutrients = self.nutrient_level(),
            "fertilized"
        );
        if let Some(next) = next {
            self.set_state(next);
        }
        self.notify(&PlantEvent::Fertilized);
        CareOutcome::Applied
    }

    /// Advances the plant by one day.
    pub fn grow(&mut self) -> CareOutcome {
        if self.state.is_dead() {
            warn!(plant = %self.id, name = %self.name, "dead plant cannot grow");
            return CareOutcome::Unresponsive;
        }

        let next = self.state.grow(&mut self.vitals);
        debug!(
            plant = %self.id,
            name = %self.name,
            state = %self.state,
            age = self.age(),
            "advanced one day"
        );
        if let Some(next) = next {
            self.set_state(next);
        }
        CareOutcome::Applied
    }

    /// Adds sunlight directly (clamped). Not load-bearing for transitions.
    pub fn add_sunlight(&mut self, amount: i32) -> CareOutcome {
        if self.state.is_dead() {
            warn!(plant = %self.id, name = %self.name, "cannot add sunlight to dead plant");
            return CareOutcome::Unresponsive;
        }
        self.vitals.sunlight.adjust(amount);
        trace!(plant = %self.id, sunlight = self.sunlight_level(), "added sunlight");
        CareOutcome::Applied
    }

    /// Exposes the plant to `hours` of light.
    ///
    /// Only exposure inside [`IDEAL_SUN_HOURS`] raises the sunlight level.
    pub fn expose_to_sunlight(&mut self, hours: i32) -> CareOutcome {
        if self.state.is_dead() {
            warn!(plant = %self.id, name = %self.name, "cannot expose dead plant to sunlight");
            return CareOutcome::Unresponsive;
        }
        if IDEAL_SUN_HOURS.contains(&hours) {
            return self.add_sunlight(hours.saturating_mul(SUNLIGHT_PER_HOUR));
        }
        debug!(plant = %self.id, hours, "sun exposure outside the ideal window");
        CareOutcome::Applied
    }

    /// Installs `next` as the active state.
    ///
    /// Installing a state of the current stage is a no-op. Returns whether the
    /// state was replaced.
    pub fn set_state(&mut self, next: LifecycleState) -> bool {
        let from = self.stage();
        let to = next.stage();
        if from == to {
            return false;
        }

        self.state = next;
        info!(
            plant = %self.id,
            name = %self.name,
            %from,
            %to,
            "lifecycle state changed"
        );

        self.notify(&PlantEvent::StateChanged { from, to });
        if to.is_dead() {
            self.notify(&PlantEvent::Died);
        } else if to.health_percentage() < HEALTH_LOW_THRESHOLD {
            self.notify(&PlantEvent::HealthLow);
        }
        true
    }

    // === Care strategy ===

    /// Attaches a care strategy, replacing any previous one.
    pub fn set_care_strategy(&mut self, strategy: Box<dyn CareStrategy>) {
        debug!(plant = %self.id, strategy = %strategy.name(), "care strategy set");
        self.care_strategy = Some(strategy);
    }

    /// Detaches and returns the care strategy.
    pub fn clear_care_strategy(&mut self) -> Option<Box<dyn CareStrategy>> {
        self.care_strategy.take()
    }

    /// Name of the attached care strategy.
    #[must_use]
    pub fn care_strategy_name(&self) -> Option<String> {
        self.care_strategy.as_ref().map(|s| s.name())
    }

    /// Runs the attached care strategy and raises `care_applied`.
    pub fn apply_care(&mut self) -> CareOutcome {
        if self.state.is_dead() {
            warn!(plant = %self.id, name = %self.name, "cannot care for dead plant");
            return CareOutcome::Unresponsive;
        }
        let Some(strategy) = self.care_strategy.take() else {
            debug!(plant = %self.id, name = %self.name, "no care strategy set");
            return CareOutcome::NoStrategy;
        };

        info!(plant = %self.id, name = %self.name, strategy = %strategy.name(), "applying care");
        strategy.apply_care(self);
        self.care_strategy = Some(strategy);

        self.notify(&PlantEvent::CareApplied);
        CareOutcome::Applied
    }

    // === Observers ===

    /// Attaches an observer. Attaching the same observer twice returns the
    /// existing handle.
    pub fn attach(&mut self, observer: Arc<dyn PlantObserver>) -> ObserverId {
        let key = Arc::as_ptr(&observer).cast::<()>();
        if let Some((id, _)) = self
            .observers
            .iter()
            .find(|(_, existing)| Arc::as_ptr(existing).cast::<()>() == key)
        {
            return *id;
        }

        let id = ObserverId::new(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Detaches an observer. Returns false if the handle is unknown.
    pub fn detach(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Number of attached observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&self, event: &PlantEvent) {
        for (_, observer) in &self.observers {
            observer.on_event(self, event);
        }
    }

    // === Reporting ===

    /// Plain record of the plant for reporting.
    #[must_use]
    pub fn snapshot(&self) -> PlantSnapshot {
        PlantSnapshot {
            id: self.id,
            name: self.name.clone(),
            species: self.species.clone(),
            stage: self.stage(),
            health: self.health_percentage(),
            water: self.water_level(),
            nutrients: self.nutrient_level(),
            sunlight: self.sunlight_level(),
            age: self.age(),
            price: self.price,
        }
    }
}

impl fmt::Debug for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plant")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("species", &self.species)
            .field("price", &self.price)
            .field("state", &self.state)
            .field("vitals", &self.vitals)
            .field("care_strategy", &self.care_strategy_name())
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Serializable view of a plant at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSnapshot {
    /// Plant ID
    pub id: PlantId,
    /// Display name
    pub name: String,
    /// Species
    pub species: String,
    /// Lifecycle stage
    pub stage: LifecycleStage,
    /// Health percentage
    pub health: u8,
    /// Water level
    pub water: u8,
    /// Nutrient level
    pub nutrients: u8,
    /// Sunlight level
    pub sunlight: u8,
    /// Age in days
    pub age: u32,
    /// Price
    pub price: f64,
}

fn sanitize_price(price: f64) -> f64 {
    if price.is_nan() {
        0.0
    } else {
        price.max(0.0)
    }
}
