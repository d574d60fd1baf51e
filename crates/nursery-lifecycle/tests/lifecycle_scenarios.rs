//! End-to-end lifecycle scenarios driven through the public API.

use std::sync::Arc;

use nursery_common::PlantIdGenerator;
use nursery_lifecycle::{
    CareOutcome, EventBus, EventRecorder, LifecycleStage, LifecycleState, Plant, PlantEvent,
    PlantRegistry,
};

fn rose(ids: &mut PlantIdGenerator) -> Plant {
    Plant::new(ids.next_id(), "Rose", "Rosa", 100.0)
}

#[test]
fn test_rose_full_lifecycle() {
    let mut ids = PlantIdGenerator::new();
    let mut plant = rose(&mut ids);
    let recorder = Arc::new(EventRecorder::new());
    plant.attach(recorder.clone());

    assert_eq!(plant.state_name(), "Seedling");
    assert_eq!(plant.water_level(), 50);
    assert_eq!(plant.nutrient_level(), 50);
    assert_eq!(plant.age(), 0);

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

    plant.set_water_level(80);
    plant.set_nutrient_level(70);
    plant.grow();
    assert_eq!(plant.state_name(), "Growing");

    let names: Vec<&str> = recorder
        .events()
        .iter()
        .filter_map(|n| n.event.new_state_name())
        .collect();
    assert_eq!(names, vec!["Growing", "Mature", "Wilting", "Growing"]);
    assert_eq!(recorder.count("health_low"), 1);
}

#[test]
fn test_prolonged_wilting_kills() {
    let mut ids = PlantIdGenerator::new();
    let mut plant = rose(&mut ids);
    plant.set_state(LifecycleState::WILTING);
    plant.set_water_level(10);
    plant.set_nutrient_level(10);

    for day in 1..=10 {
        plant.grow();
        if day <= 7 {
            assert_eq!(plant.stage(), LifecycleStage::Wilting, "day {day}");
        } else {
            assert_eq!(plant.stage(), LifecycleStage::Dead, "day {day}");
        }
    }
}

#[test]
fn test_dead_plant_ignores_water() {
    let mut ids = PlantIdGenerator::new();
    let mut plant = rose(&mut ids);
    plant.set_state(LifecycleState::Dead);
    let before = plant.water_level();

    assert_eq!(plant.water(50), CareOutcome::Unresponsive);
    assert_eq!(plant.water_level(), before);
}

#[test]
fn test_boundaries() {
    let mut ids = PlantIdGenerator::new();

    // Seedling -> Growing at exactly age 7, water 40.
    let mut seedling = rose(&mut ids);
    seedling.set_age(6);
    seedling.set_water_level(40);
    seedling.grow();
    assert_eq!(seedling.stage(), LifecycleStage::Growing);

    // Growing -> Mature at 30, not 29.
    let mut growing = rose(&mut ids);
    growing.set_state(LifecycleState::Growing);
    growing.set_age(28);
    growing.grow();
    assert_eq!(growing.stage(), LifecycleStage::Growing);
    growing.grow();
    assert_eq!(growing.stage(), LifecycleStage::Mature);

    // Wilting recovers at exactly water 60, nutrients 50.
    let mut wilting = rose(&mut ids);
    wilting.set_state(LifecycleState::WILTING);
    wilting.set_water_level(60);
    wilting.set_nutrient_level(50);
    wilting.grow();
    assert_eq!(wilting.stage(), LifecycleStage::Growing);
}

#[test]
fn test_event_bus_across_registry() {
    let bus = Arc::new(EventBus::default());
    let mut registry = PlantRegistry::new();
    let a = registry.plant("Rose", "Rosa", 100.0);
    let b = registry.plant("Tulip", "Tulipa", 15.0);
    for plant in registry.iter_mut() {
        plant.attach(bus.clone());
    }

    registry.water(a, 10).expect("plant exists");
    registry.fertilize(b, 10).expect("plant exists");

    let drained = bus.drain();
    assert_eq!(drained.len(), 2);
    assert_eq!(drained[0].plant_id, a);
    assert_eq!(drained[0].event, PlantEvent::Watered);
    assert_eq!(drained[1].plant_id, b);
    assert_eq!(drained[1].event, PlantEvent::Fertilized);
}

#[test]
fn test_neglected_nursery_over_time() {
    let mut registry = PlantRegistry::new();
    let id = registry.plant("Fern", "Nephrolepis", 12.0);

    for _ in 0..7 {
        registry.advance_day();
    }
    assert_eq!(
        registry.lookup(id).expect("plant exists").stage(),
        LifecycleStage::Growing
    );

    for _ in 0..30 {
        registry.advance_day();
    }
    let fern = registry.lookup(id).expect("plant exists");
    assert_eq!(fern.stage(), LifecycleStage::Mature);
    assert_eq!(fern.age(), 37);
}
