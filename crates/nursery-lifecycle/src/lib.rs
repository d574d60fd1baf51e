//! # Nursery Lifecycle
//!
//! Plant lifecycle state machine for the nursery simulation.
//!
//! This crate provides:
//! - Lifecycle states (Seedling, Growing, Mature, Wilting, Dead) and their transition rules
//! - The plant entity that owns its vitals and its current state
//! - Notification hook for state changes and care events
//! - Care strategies (low maintenance, high maintenance, seasonal)
//! - Sale readiness policy
//! - Plant registry that owns ID generation
//!
//! Everything here is synchronous and single-threaded per plant. Wrap a
//! [`Plant`] in a lock if several threads need to act on it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod care;
pub mod events;
pub mod lifecycle;
pub mod plant;
pub mod registry;
pub mod resources;
pub mod sale;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::care::*;
    pub use crate::events::*;
    pub use crate::lifecycle::*;
    pub use crate::plant::*;
    pub use crate::registry::*;
    pub use crate::resources::*;
    pub use crate::sale::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rose() -> Plant {
        let mut ids = nursery_common::PlantIdGenerator::new();
        Plant::new(ids.next_id(), "Rose", "Rosa", 100.0)
    }

    #[derive(Debug, Clone, Copy)]
    enum Action {
        Water(i32),
        Fertilize(i32),
        Grow,
        SetWater(i32),
        SetNutrients(i32),
        SetAge(i64),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            any::<i32>().prop_map(Action::Water),
            any::<i32>().prop_map(Action::Fertilize),
            Just(Action::Grow),
            (-50i32..200).prop_map(Action::SetWater),
            (-50i32..200).prop_map(Action::SetNutrients),
            (-10i64..60).prop_map(Action::SetAge),
        ]
    }

    fn apply(plant: &mut Plant, action: Action) {
        match action {
            Action::Water(amount) => {
                plant.water(amount);
            },
            Action::Fertilize(amount) => {
                plant.fertilize(amount);
            },
            Action::Grow => {
                plant.grow();
            },
            Action::SetWater(level) => plant.set_water_level(level),
            Action::SetNutrients(level) => plant.set_nutrient_level(level),
            Action::SetAge(days) => plant.set_age(days),
        }
    }

    #[test]
    fn test_growth_through_every_stage() {
        let mut plant = rose();
        plant.set_water_level(60);
        plant.set_age(10);
        plant.grow();
        assert_eq!(plant.state_name(), "Growing");

        plant.set_age(35);
        plant.grow();
        assert_eq!(plant.state_name(), "Mature");

        plant.set_water_level(10);
        plant.grow();
        assert_eq!(plant.state_name(), "Wilting");
    }

    proptest! {
        #[test]
        fn prop_levels_stay_in_range(actions in prop::collection::vec(action(), 0..80)) {
            let mut plant = rose();
            for a in actions {
                apply(&mut plant, a);
                prop_assert!(plant.water_level() <= 100);
                prop_assert!(plant.nutrient_level() <= 100);
                prop_assert!(plant.sunlight_level() <= 100);
            }
        }

        #[test]
        fn prop_transitions_follow_graph(actions in prop::collection::vec(action(), 0..80)) {
            let mut plant = rose();
            for a in actions {
                let before = plant.stage();
                apply(&mut plant, a);
                let after = plant.stage();
                prop_assert!(before == after || before.can_transition_to(after),
                    "illegal transition {} -> {}", before, after);
                if before != LifecycleStage::Seedling {
                    prop_assert_ne!(after, LifecycleStage::Seedling);
                }
            }
        }

        #[test]
        fn prop_dead_is_terminal(actions in prop::collection::vec(action(), 0..40)) {
            let mut plant = rose();
            plant.set_state(LifecycleState::Dead);
            for a in actions {
                let levels = (plant.water_level(), plant.nutrient_level());
                match a {
                    Action::Water(_) | Action::Fertilize(_) | Action::Grow => {
                        apply(&mut plant, a);
                        prop_assert_eq!((plant.water_level(), plant.nutrient_level()), levels);
                    },
                    _ => apply(&mut plant, a),
                }
                prop_assert_eq!(plant.stage(), LifecycleStage::Dead);
            }
        }
    }
}
